//! Bounded rolling history of CPU/RAM samples for the trend chart.

use std::collections::VecDeque;
use std::time::Instant;

use crate::types::Snapshot;

/// Samples kept by the full dashboard.
pub const DEFAULT_CAPACITY: usize = 120;
/// Samples kept by the compact layout.
pub const COMPACT_CAPACITY: usize = 100;

/// Evicts from the front until there is room, then appends.
pub fn push_capped<T>(dq: &mut VecDeque<T>, v: T, cap: usize) {
    while dq.len() >= cap {
        if dq.pop_front().is_none() {
            break;
        }
    }
    dq.push_back(v);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistorySample {
    pub t: Instant,
    pub cpu: f64,
    pub ram: f64,
}

impl HistorySample {
    pub fn from_snapshot(s: &Snapshot, t: Instant) -> Self {
        Self {
            t,
            cpu: s.cpu_percent,
            ram: s.mem.percent,
        }
    }
}

/// Fixed-capacity FIFO, oldest first. Order is arrival order and is used
/// as-is for the chart's X axis.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    samples: VecDeque<HistorySample>,
    cap: usize,
}

impl HistoryBuffer {
    pub fn new(cap: usize) -> Self {
        let cap = cap.max(1);
        Self {
            samples: VecDeque::with_capacity(cap),
            cap,
        }
    }

    pub fn push(&mut self, sample: HistorySample) {
        push_capped(&mut self.samples, sample, self.cap);
    }

    pub fn samples(&self) -> impl ExactSizeIterator<Item = &HistorySample> + '_ {
        self.samples.iter()
    }

    pub fn latest(&self) -> Option<&HistorySample> {
        self.samples.back()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
