#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use hostdash::alerts::{AlertEvent, ThresholdConfig};
use hostdash::client::MonitorApi;
use hostdash::error::FetchError;
use hostdash::history::{SeriesName, Snapshot};
use hostdash::logs::LogLine;
use hostdash::sink::DashboardSink;
use hostdash::types::MetricSample;
use serde_json::{json, Value};

pub fn sample_json(cpu: f64) -> Value {
    json!({
        "system": {
            "cpu": {"percent": cpu, "count": 4, "frequency": 2400.0},
            "memory": {"percent": 20.0, "used": "1.60GB", "total": "8.00GB"},
            "swap": {"percent": 0.0, "used": "0.00B", "total": "2.00GB"},
            "disk": {"percent": 40.0, "used": "40.00GB", "total": "100.00GB"},
            "network": {"bytes_sent_per_sec": 100.0, "bytes_recv_per_sec": 300.0},
            "uptime": "1 day, 2:03:04",
            "hostname": "test-host"
        },
        "services": [{"name": "dash.service", "status": "running"}],
        "logs": ["2024-01-01 10:00:00 [ERROR] disk full", "garbage line"]
    })
}

pub fn sample(cpu: f64) -> MetricSample {
    serde_json::from_value(sample_json(cpu)).expect("valid sample")
}

/// Replays canned fetch results, each after an optional delay.
#[derive(Default)]
pub struct ScriptedApi {
    script: Mutex<VecDeque<(Duration, Result<MetricSample, FetchError>)>>,
    pub fetches: AtomicUsize,
    pub posts: Mutex<Vec<Vec<AlertEvent>>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(self, delay: Duration, res: Result<MetricSample, FetchError>) -> Self {
        self.script.lock().unwrap().push_back((delay, res));
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn posted(&self) -> Vec<Vec<AlertEvent>> {
        self.posts.lock().unwrap().clone()
    }
}

#[async_trait]
impl MonitorApi for ScriptedApi {
    async fn fetch_sample(&self) -> Result<MetricSample, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some((delay, res)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                res
            }
            None => Err(FetchError::Transport("script exhausted".into())),
        }
    }

    async fn fetch_thresholds(&self) -> Result<ThresholdConfig, FetchError> {
        Err(FetchError::Status(404))
    }

    async fn post_alerts(&self, alerts: &[AlertEvent]) -> Result<(), FetchError> {
        self.posts.lock().unwrap().push(alerts.to_vec());
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct Recorder {
    pub cpu_samples: Vec<f64>,
    pub series: Vec<(SeriesName, usize)>,
    pub log_batches: Vec<Vec<LogLine>>,
    pub alerts: Vec<Vec<AlertEvent>>,
    pub alert_labels: Vec<String>,
    pub clock_ticks: usize,
}

impl DashboardSink for Recorder {
    fn on_sample(&mut self, sample: &MetricSample) {
        self.cpu_samples.push(sample.system.cpu.percent);
    }

    fn on_series_update(&mut self, name: SeriesName, snapshot: Snapshot<'_, f64>) {
        self.series.push((name, snapshot.len()));
    }

    fn on_log_records(&mut self, records: &[LogLine]) {
        self.log_batches.push(records.to_vec());
    }

    fn on_alerts(&mut self, at: &str, alerts: &[AlertEvent]) {
        self.alert_labels.push(at.to_string());
        self.alerts.push(alerts.to_vec());
    }

    fn on_clock(&mut self, _now: chrono::DateTime<chrono::Local>) {
        self.clock_ticks += 1;
    }
}
