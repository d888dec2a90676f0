use std::mem;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::stats::{RunningStats, StatisticSet};

/// Thread-safe accumulator of elapsed time samples
///
/// Request handling code records samples through cheap cloned handles while a
/// single flusher periodically cuts a snapshot with [`collect_and_reset`].
/// Both operations share one mutex whose hold time is a handful of arithmetic
/// instructions, so producers are never blocked behind network calls.
///
/// The cut is atomic: a sample racing the flusher lands either in the
/// snapshot being cut or in the next period, never in both and never in
/// neither.
///
/// [`collect_and_reset`]: SampleAggregator::collect_and_reset
#[derive(Clone, Debug, Default)]
pub struct SampleAggregator {
    stats: Arc<Mutex<RunningStats>>,
}

impl SampleAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one elapsed time sample, in milliseconds, into the running
    /// statistics
    ///
    /// Safe to call from any number of threads; never performs I/O.
    #[inline]
    pub fn record(&self, value: f64) {
        self.stats.lock().record(value);
    }

    /// Cuts the snapshot for the period that just ended and resets the
    /// accumulator to empty in the same critical section
    ///
    /// Returns [`None`] when no samples arrived since the previous cut.
    pub fn collect_and_reset(&self) -> Option<StatisticSet> {
        mem::take(&mut *self.stats.lock()).into_statistics()
    }
}
