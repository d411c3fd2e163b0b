//! Threshold evaluation and per-key cooldown for outbound alerts.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::SystemMetrics;

/// Minimum gap between two transmissions of the same (type, level).
pub const ALERT_COOLDOWN_MS: i64 = 60_000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub warning: f64,
    pub critical: f64,
}

impl Threshold {
    pub const fn new(warning: f64, critical: f64) -> Self {
        Self { warning, critical }
    }

    fn is_sane(&self) -> bool {
        (0.0..=100.0).contains(&self.warning)
            && (0.0..=100.0).contains(&self.critical)
            && self.warning <= self.critical
    }
}

/// Warning/critical percentages per monitored metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    pub cpu: Threshold,
    pub memory: Threshold,
    pub swap: Threshold,
    pub disk: Threshold,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            cpu: Threshold::new(70.0, 90.0),
            memory: Threshold::new(50.0, 80.0),
            swap: Threshold::new(50.0, 80.0),
            disk: Threshold::new(70.0, 90.0),
        }
    }
}

impl ThresholdConfig {
    pub fn get(&self, kind: AlertType) -> Threshold {
        match kind {
            AlertType::Cpu => self.cpu,
            AlertType::Memory => self.memory,
            AlertType::Swap => self.swap,
            AlertType::Disk => self.disk,
        }
    }

    /// Replace any out-of-range or inverted pair with the built-in default.
    pub fn validated(mut self) -> Self {
        let defaults = ThresholdConfig::default();
        for kind in AlertType::ALL {
            let t = self.get(kind);
            if t.is_sane() {
                continue;
            }
            tracing::warn!(
                metric = %kind,
                warning = t.warning,
                critical = t.critical,
                "ignoring invalid threshold, using default"
            );
            let slot = match kind {
                AlertType::Cpu => &mut self.cpu,
                AlertType::Memory => &mut self.memory,
                AlertType::Swap => &mut self.swap,
                AlertType::Disk => &mut self.disk,
            };
            *slot = defaults.get(kind);
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertType {
    Cpu,
    Memory,
    Swap,
    Disk,
}

impl AlertType {
    /// Evaluation and output order.
    pub const ALL: [AlertType; 4] = [
        AlertType::Cpu,
        AlertType::Memory,
        AlertType::Swap,
        AlertType::Disk,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AlertType::Cpu => "CPU",
            AlertType::Memory => "MEMORY",
            AlertType::Swap => "SWAP",
            AlertType::Disk => "DISK",
        }
    }

    fn reading(self, m: &SystemMetrics) -> f64 {
        match self {
            AlertType::Cpu => m.cpu.percent,
            AlertType::Memory => m.memory.percent,
            AlertType::Swap => m.swap.percent,
            AlertType::Disk => m.disk.percent,
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertLevel {
    Warning,
    Alert,
}

impl AlertLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertLevel::Warning => "WARNING",
            AlertLevel::Alert => "ALERT",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEvent {
    #[serde(rename = "type")]
    pub kind: AlertType,
    pub level: AlertLevel,
    pub message: String,
    pub value: String,
    pub threshold: String,
}

impl AlertEvent {
    fn new(kind: AlertType, level: AlertLevel, value: f64, limit: f64) -> Self {
        let what = match level {
            AlertLevel::Warning => "high",
            AlertLevel::Alert => "critical",
        };
        Self {
            kind,
            level,
            message: format!("{kind} usage {what}: {value:.1}% (threshold {limit}%)"),
            value: format!("{value:.1}%"),
            threshold: format!("{limit}%"),
        }
    }

    pub fn key(&self) -> (AlertType, AlertLevel) {
        (self.kind, self.level)
    }
}

/// Classify every monitored metric; at most one event per metric,
/// critical wins over warning. Output follows [`AlertType::ALL`].
pub fn evaluate(m: &SystemMetrics, thresholds: &ThresholdConfig) -> Vec<AlertEvent> {
    AlertType::ALL
        .iter()
        .filter_map(|&kind| {
            let value = kind.reading(m);
            let t = thresholds.get(kind);
            if value >= t.critical {
                Some(AlertEvent::new(kind, AlertLevel::Alert, value, t.critical))
            } else if value >= t.warning {
                Some(AlertEvent::new(kind, AlertLevel::Warning, value, t.warning))
            } else {
                None
            }
        })
        .collect()
}

/// Last transmission time per (type, level).
///
/// Keys come from a closed set, so the table never holds more than
/// `4 types x 2 levels = 8` entries and needs no eviction.
#[derive(Debug, Clone, PartialEq)]
pub struct Cooldown {
    window_ms: i64,
    last_fired: HashMap<(AlertType, AlertLevel), i64>,
}

impl Cooldown {
    pub fn new(window_ms: i64) -> Self {
        Self {
            window_ms,
            last_fired: HashMap::with_capacity(8),
        }
    }

    /// Admit `ev` if its key never fired or fired at least one window ago.
    ///
    /// A `now_ms` earlier than the last firing (wall clock stepped back)
    /// counts as expired.
    pub fn admit(&mut self, ev: &AlertEvent, now_ms: i64) -> bool {
        let key = ev.key();
        match self.last_fired.get(&key) {
            Some(&last) if (0..self.window_ms).contains(&(now_ms - last)) => false,
            _ => {
                self.last_fired.insert(key, now_ms);
                true
            }
        }
    }

    /// Per-event decision over one evaluation pass, order preserved.
    pub fn admit_all(&mut self, events: Vec<AlertEvent>, now_ms: i64) -> Vec<AlertEvent> {
        events
            .into_iter()
            .filter(|ev| {
                let ok = self.admit(ev, now_ms);
                if !ok {
                    tracing::debug!(kind = %ev.kind, level = %ev.level, "alert suppressed by cooldown");
                }
                ok
            })
            .collect()
    }

    pub fn last_fired(&self, kind: AlertType, level: AlertLevel) -> Option<i64> {
        self.last_fired.get(&(kind, level)).copied()
    }

    pub fn len(&self) -> usize {
        self.last_fired.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_fired.is_empty()
    }
}

impl Default for Cooldown {
    fn default() -> Self {
        Self::new(ALERT_COOLDOWN_MS)
    }
}
