//! Types that mirror the monitor server's JSON schema.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Cpu {
    pub percent: f64,
    pub count: u32,
    #[serde(alias = "frequency_mhz")]
    pub frequency: f64,
}

// Server pre-formats byte sizes ("3.20GB"), so used/total stay strings.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Usage {
    pub percent: f64,
    #[serde(default)]
    pub used: String,
    #[serde(default)]
    pub total: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Network {
    #[serde(default)]
    pub bytes_sent_per_sec: f64,
    #[serde(default)]
    pub bytes_recv_per_sec: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SystemMetrics {
    pub cpu: Cpu,
    pub memory: Usage,
    // older servers don't report swap
    #[serde(default)]
    pub swap: Usage,
    pub disk: Usage,
    pub network: Network,
    pub uptime: String,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub os: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Running,
    Stopped,
    Unknown,
    #[serde(other)]
    Other,
}

impl ServiceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceStatus::Running => "running",
            ServiceStatus::Stopped => "stopped",
            ServiceStatus::Unknown => "unknown",
            ServiceStatus::Other => "other",
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Service {
    pub name: String,
    pub status: ServiceStatus,
}

/// One `/monitor/api/all` response.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MetricSample {
    pub system: SystemMetrics,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub logs: Vec<String>,
}
