//! UI module root: exposes drawing functions for individual panels.

pub mod alerts;
pub mod chart;
pub mod gauges;
pub mod header;
pub mod logs;
pub mod net;
pub mod services;
pub mod theme;
pub mod util;
