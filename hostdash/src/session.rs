//! Per-dashboard state: chart history, cooldown table and thresholds.

use crate::alerts::{evaluate, AlertEvent, Cooldown, ThresholdConfig};
use crate::error::FetchError;
use crate::history::{History, SeriesName};
use crate::logs::{parse_batch, LogLine};
use crate::sink::DashboardSink;
use crate::types::MetricSample;

/// What one successful tick produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TickUpdate {
    pub seq: u64,
    /// Clock label the tick was recorded under.
    pub label: String,
    pub sample: MetricSample,
    pub logs: Vec<LogLine>,
    pub admitted: Vec<AlertEvent>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    history: History,
    cooldown: Cooldown,
    thresholds: ThresholdConfig,
    last_applied: Option<u64>,
}

impl Session {
    pub fn new(thresholds: ThresholdConfig, history_cap: usize, cooldown_ms: i64) -> Self {
        Self {
            history: History::new(history_cap),
            cooldown: Cooldown::new(cooldown_ms),
            thresholds,
            last_applied: None,
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn cooldown(&self) -> &Cooldown {
        &self.cooldown
    }

    pub fn thresholds(&self) -> &ThresholdConfig {
        &self.thresholds
    }

    pub fn last_applied(&self) -> Option<u64> {
        self.last_applied
    }

    /// Fold one tick's fetch outcome into the session.
    ///
    /// Failures and responses older than the last applied tick leave every
    /// field untouched and return `None`.
    pub fn apply(
        &mut self,
        seq: u64,
        outcome: Result<MetricSample, FetchError>,
        label: &str,
        now_ms: i64,
    ) -> Option<TickUpdate> {
        let sample = match outcome {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(seq, error = %e, "metrics poll failed, skipping tick");
                return None;
            }
        };
        if self.last_applied.is_some_and(|last| seq <= last) {
            tracing::debug!(seq, last = ?self.last_applied, "discarding stale metrics response");
            return None;
        }

        self.history.push(label, &sample.system);
        let candidates = evaluate(&sample.system, &self.thresholds);
        let admitted = self.cooldown.admit_all(candidates, now_ms);
        let logs = parse_batch(&sample.logs);
        self.last_applied = Some(seq);

        Some(TickUpdate {
            seq,
            label: label.to_string(),
            sample,
            logs,
            admitted,
        })
    }

    /// Push an applied tick to the presentation layer.
    pub fn publish<S: DashboardSink + ?Sized>(&self, update: &TickUpdate, sink: &mut S) {
        sink.on_sample(&update.sample);
        for name in SeriesName::ALL {
            sink.on_series_update(name, self.history.series(name).snapshot());
        }
        sink.on_log_records(&update.logs);
        if !update.admitted.is_empty() {
            sink.on_alerts(&update.label, &update.admitted);
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(
            ThresholdConfig::default(),
            crate::history::HISTORY_CAP,
            crate::alerts::ALERT_COOLDOWN_MS,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::{AlertLevel, AlertType, ALERT_COOLDOWN_MS};
    use crate::types::{Cpu, Network, SystemMetrics, Usage};

    fn sample(cpu: f64) -> MetricSample {
        MetricSample {
            system: SystemMetrics {
                cpu: Cpu {
                    percent: cpu,
                    count: 2,
                    frequency: 1800.0,
                },
                memory: Usage::default(),
                swap: Usage::default(),
                disk: Usage::default(),
                network: Network::default(),
                uptime: "0:10:00".into(),
                hostname: None,
                os: None,
            },
            services: vec![],
            logs: vec!["2024-01-01 10:00:00 [ERROR] disk full".into(), "noise".into()],
        }
    }

    fn decode_failure() -> FetchError {
        FetchError::Decode(serde_json::from_str::<MetricSample>("{").unwrap_err())
    }

    #[test]
    fn failed_tick_leaves_state_untouched() {
        let mut s = Session::default();
        s.apply(1, Ok(sample(95.0)), "10:00:00", 0).unwrap();
        let before = s.clone();
        assert!(s.apply(2, Err(FetchError::Status(502)), "10:00:05", 5_000).is_none());
        assert!(s.apply(3, Err(decode_failure()), "10:00:10", 10_000).is_none());
        assert!(s
            .apply(4, Err(FetchError::Transport("refused".into())), "10:00:15", 15_000)
            .is_none());
        assert_eq!(s, before);
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut s = Session::default();
        assert!(s.apply(5, Ok(sample(10.0)), "a", 0).is_some());
        let before = s.clone();
        assert!(s.apply(4, Ok(sample(99.0)), "b", 1).is_none());
        assert!(s.apply(5, Ok(sample(99.0)), "b", 1).is_none());
        assert_eq!(s, before);
        assert!(s.apply(6, Ok(sample(10.0)), "c", 2).is_some());
        assert_eq!(s.last_applied(), Some(6));
    }

    #[test]
    fn escalating_cpu_across_cooldown_periods() {
        let mut s = Session::default();
        let mut seen = Vec::new();
        for (i, cpu) in [60.0, 75.0, 95.0].into_iter().enumerate() {
            let t = i as i64 * ALERT_COOLDOWN_MS;
            let up = s.apply(i as u64 + 1, Ok(sample(cpu)), "t", t).unwrap();
            seen.extend(up.admitted.iter().map(|a| (i + 1, a.kind, a.level)));
        }
        assert_eq!(
            seen,
            vec![
                (2, AlertType::Cpu, AlertLevel::Warning),
                (3, AlertType::Cpu, AlertLevel::Alert),
            ]
        );
        assert_eq!(s.history().len(), 3);
    }

    #[test]
    fn logs_are_parsed_per_line() {
        let mut s = Session::default();
        let up = s.apply(1, Ok(sample(0.0)), "t", 0).unwrap();
        assert!(matches!(up.logs[0], LogLine::Structured(_)));
        assert_eq!(up.logs[1], LogLine::Raw("noise".into()));
    }
}
