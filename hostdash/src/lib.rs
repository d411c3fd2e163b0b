//! hostdash: terminal dashboard for a `/monitor/api` metrics server.
//!
//! The telemetry pipeline is [`scheduler::Scheduler`] polling a
//! [`client::MonitorApi`], folding each sample into a [`session::Session`]
//! (rolling [`history`], [`alerts`] with cooldown, parsed [`logs`]) and
//! pushing the result to a [`sink::DashboardSink`].

pub mod alerts;
pub mod app;
pub mod client;
pub mod clock;
pub mod config;
pub mod error;
pub mod history;
pub mod logs;
pub mod profiles;
pub mod scheduler;
pub mod session;
pub mod sink;
pub mod types;
pub mod ui;
