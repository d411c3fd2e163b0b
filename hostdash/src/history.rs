//! Bounded rolling histories feeding the charts.

use std::collections::VecDeque;

use crate::types::SystemMetrics;

/// Points kept per series.
pub const HISTORY_CAP: usize = 30;

pub fn push_capped<T>(dq: &mut VecDeque<T>, v: T, cap: usize) {
    if dq.len() == cap {
        dq.pop_front();
    }
    dq.push_back(v);
}

/// Fixed-capacity FIFO of `(timestamp label, value)` pairs.
///
/// Labels and values live in parallel deques so a snapshot can hand both
/// sequences to a chart without copying.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingSeries<T> {
    labels: VecDeque<String>,
    values: VecDeque<T>,
    cap: usize,
}

impl<T> RollingSeries<T> {
    pub fn new(cap: usize) -> Self {
        let cap = cap.max(1);
        Self {
            labels: VecDeque::with_capacity(cap),
            values: VecDeque::with_capacity(cap),
            cap,
        }
    }

    pub fn append(&mut self, label: impl Into<String>, value: T) {
        push_capped(&mut self.labels, label.into(), self.cap);
        push_capped(&mut self.values, value, self.cap);
    }

    pub fn snapshot(&self) -> Snapshot<'_, T> {
        Snapshot {
            labels: &self.labels,
            values: &self.values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    pub fn latest(&self) -> Option<&T> {
        self.values.back()
    }
}

/// Read-only view over a series, oldest point first.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a, T> {
    labels: &'a VecDeque<String>,
    values: &'a VecDeque<T>,
}

impl<'a, T> Snapshot<'a, T> {
    pub fn labels(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.labels.iter().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &'a T> + 'a {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn first_label(&self) -> Option<&'a str> {
        self.labels.front().map(String::as_str)
    }

    pub fn last_label(&self) -> Option<&'a str> {
        self.labels.back().map(String::as_str)
    }
}

impl<'a> Snapshot<'a, f64> {
    /// `(index, value)` points for a line chart.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesName {
    Cpu,
    Memory,
    NetSent,
    NetRecv,
}

impl SeriesName {
    pub const ALL: [SeriesName; 4] = [
        SeriesName::Cpu,
        SeriesName::Memory,
        SeriesName::NetSent,
        SeriesName::NetRecv,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SeriesName::Cpu => "cpu",
            SeriesName::Memory => "memory",
            SeriesName::NetSent => "network-sent",
            SeriesName::NetRecv => "network-recv",
        }
    }
}

/// The four chart series, always advanced together so they stay time-aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    cpu: RollingSeries<f64>,
    memory: RollingSeries<f64>,
    net_sent: RollingSeries<f64>,
    net_recv: RollingSeries<f64>,
}

impl History {
    pub fn new(cap: usize) -> Self {
        Self {
            cpu: RollingSeries::new(cap),
            memory: RollingSeries::new(cap),
            net_sent: RollingSeries::new(cap),
            net_recv: RollingSeries::new(cap),
        }
    }

    pub fn push(&mut self, label: &str, m: &SystemMetrics) {
        self.cpu.append(label, m.cpu.percent);
        self.memory.append(label, m.memory.percent);
        self.net_sent.append(label, m.network.bytes_sent_per_sec);
        self.net_recv.append(label, m.network.bytes_recv_per_sec);
    }

    pub fn series(&self, name: SeriesName) -> &RollingSeries<f64> {
        match name {
            SeriesName::Cpu => &self.cpu,
            SeriesName::Memory => &self.memory,
            SeriesName::NetSent => &self.net_sent,
            SeriesName::NetRecv => &self.net_recv,
        }
    }

    pub fn len(&self) -> usize {
        self.cpu.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cpu.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(HISTORY_CAP)
    }
}
