//! Presentation hooks fed by the scheduler after each applied tick.

use chrono::{DateTime, Local};
use tokio::sync::mpsc::UnboundedSender;

use crate::alerts::AlertEvent;
use crate::history::{SeriesName, Snapshot};
use crate::logs::{LogLine, LogRecord};
use crate::types::{MetricSample, ServiceStatus};

pub trait DashboardSink: Send {
    fn on_sample(&mut self, sample: &MetricSample);

    fn on_series_update(&mut self, name: SeriesName, snapshot: Snapshot<'_, f64>);

    fn on_log_records(&mut self, records: &[LogLine]);

    /// Alerts that passed the cooldown this tick, stamped with the tick's
    /// clock label; never called with an empty slice.
    fn on_alerts(&mut self, at: &str, alerts: &[AlertEvent]);

    /// Wall-clock refresh, independent of metric ticks.
    fn on_clock(&mut self, _now: DateTime<Local>) {}
}

/// Owned copy of a series snapshot, for crossing task boundaries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl From<Snapshot<'_, f64>> for SeriesData {
    fn from(s: Snapshot<'_, f64>) -> Self {
        Self {
            labels: s.labels().map(str::to_owned).collect(),
            values: s.values().copied().collect(),
        }
    }
}

impl SeriesData {
    /// `(index, value)` points for a line chart.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    Sample(Box<MetricSample>),
    Series(SeriesName, SeriesData),
    Logs(Vec<LogLine>),
    Alerts(String, Vec<AlertEvent>),
    Clock(DateTime<Local>),
}

/// Forwards every hook to the TUI task.
pub struct ChannelSink {
    tx: UnboundedSender<UiEvent>,
}

impl ChannelSink {
    pub fn new(tx: UnboundedSender<UiEvent>) -> Self {
        Self { tx }
    }

    fn send(&self, ev: UiEvent) {
        // receiver gone means the UI is shutting down
        let _ = self.tx.send(ev);
    }
}

impl DashboardSink for ChannelSink {
    fn on_sample(&mut self, sample: &MetricSample) {
        self.send(UiEvent::Sample(Box::new(sample.clone())));
    }

    fn on_series_update(&mut self, name: SeriesName, snapshot: Snapshot<'_, f64>) {
        self.send(UiEvent::Series(name, snapshot.into()));
    }

    fn on_log_records(&mut self, records: &[LogLine]) {
        self.send(UiEvent::Logs(records.to_vec()));
    }

    fn on_alerts(&mut self, at: &str, alerts: &[AlertEvent]) {
        self.send(UiEvent::Alerts(at.to_string(), alerts.to_vec()));
    }

    fn on_clock(&mut self, now: DateTime<Local>) {
        self.send(UiEvent::Clock(now));
    }
}

/// Headless mode: everything goes to the log.
#[derive(Debug, Default)]
pub struct TracingSink;

impl DashboardSink for TracingSink {
    fn on_sample(&mut self, s: &MetricSample) {
        let m = &s.system;
        tracing::info!(
            cpu = m.cpu.percent,
            cores = m.cpu.count,
            freq_mhz = m.cpu.frequency,
            memory = m.memory.percent,
            swap = m.swap.percent,
            disk = m.disk.percent,
            sent_per_sec = m.network.bytes_sent_per_sec,
            recv_per_sec = m.network.bytes_recv_per_sec,
            uptime = %m.uptime,
            services = s.services.len(),
            "sample"
        );
        for svc in s.services.iter().filter(|svc| svc.status != ServiceStatus::Running) {
            tracing::warn!(service = %svc.name, status = svc.status.as_str(), "service not running");
        }
    }

    fn on_series_update(&mut self, name: SeriesName, snapshot: Snapshot<'_, f64>) {
        tracing::trace!(series = name.as_str(), points = snapshot.len(), "series updated");
    }

    fn on_log_records(&mut self, records: &[LogLine]) {
        for line in records {
            match line {
                LogLine::Structured(LogRecord {
                    timestamp,
                    level,
                    message,
                }) => {
                    tracing::info!(server_ts = %timestamp, level = %level, tier = line.tier().as_str(), "{message}")
                }
                LogLine::Raw(raw) => tracing::info!(tier = "info", "{raw}"),
            }
        }
    }

    fn on_alerts(&mut self, at: &str, alerts: &[AlertEvent]) {
        for a in alerts {
            tracing::warn!(tick = at, kind = %a.kind, level = %a.level, value = %a.value, threshold = %a.threshold, "{}", a.message);
        }
    }
}
