//! Runtime settings and logging setup.

use std::fs::OpenOptions;
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::alerts::ALERT_COOLDOWN_MS;
use crate::history::HISTORY_CAP;

pub const DEFAULT_POLL_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub poll_interval: Duration,
    /// Header clock refresh; unrelated to metric polling.
    pub clock_interval: Duration,
    pub request_timeout: Duration,
    pub history_cap: usize,
    pub cooldown_ms: i64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(DEFAULT_POLL_SECS),
            clock_interval: Duration::from_secs(1),
            request_timeout: Duration::from_secs(4),
            history_cap: HISTORY_CAP,
            cooldown_ms: ALERT_COOLDOWN_MS,
        }
    }
}

impl DashboardConfig {
    pub fn with_poll_secs(mut self, secs: u64) -> Self {
        self.poll_interval = Duration::from_secs(secs.max(1));
        // a request must not outlive its tick
        self.request_timeout = self.request_timeout.min(self.poll_interval);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {s}")),
        }
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `level`.
///
/// With a `file`, output is appended there; otherwise it goes to stderr.
pub fn init_tracing(
    level: &str,
    format: LogFormat,
    file: Option<&Path>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hostdash={level}")));

    let registry = tracing_subscriber::registry().with(env_filter);
    match (format, file) {
        (LogFormat::Pretty, None) => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()?,
        (LogFormat::Json, None) => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
        (fmt, Some(path)) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let out = Mutex::new(OpenOptions::new().create(true).append(true).open(path)?);
            match fmt {
                LogFormat::Pretty => registry
                    .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(out))
                    .try_init()?,
                LogFormat::Json => registry
                    .with(tracing_subscriber::fmt::layer().json().with_writer(out))
                    .try_init()?,
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_cadence() {
        let c = DashboardConfig::default();
        assert_eq!(c.poll_interval, Duration::from_secs(5));
        assert_eq!(c.clock_interval, Duration::from_secs(1));
        assert_eq!(c.history_cap, 30);
        assert_eq!(c.cooldown_ms, 60_000);
    }

    #[test]
    fn short_poll_caps_request_timeout() {
        let c = DashboardConfig::default().with_poll_secs(2);
        assert_eq!(c.poll_interval, Duration::from_secs(2));
        assert_eq!(c.request_timeout, Duration::from_secs(2));
        assert_eq!(DashboardConfig::default().with_poll_secs(0).poll_interval, Duration::from_secs(1));
    }

    #[test]
    fn log_format_from_str() {
        assert_eq!(LogFormat::from_str("JSON").unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
        assert!(LogFormat::from_str("xml").is_err());
    }
}
