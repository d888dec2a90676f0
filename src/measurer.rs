use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::aggregate::SampleAggregator;

const MILLIS_PER_SEC: f64 = 1_000.0;

/// Elapsed time measurer
///
/// Wraps the unit of work a request handler performs and records the elapsed
/// time into the aggregator once it completes. Recording happens after the
/// work finishes and involves no I/O, so the handler path stays unblocked.
pub struct ElapsedTimeMeasurer {
    aggregator: SampleAggregator,
}

impl ElapsedTimeMeasurer {
    pub fn new(aggregator: SampleAggregator) -> Self {
        Self { aggregator }
    }

    pub async fn measure<T>(&self, action: impl Future<Output = T>) -> T {
        let start = Instant::now();
        let result = action.await;

        self.aggregator.record(elapsed_millis(start.elapsed()));

        result
    }

    /// Records an externally measured elapsed time
    pub fn add_measurement(&self, elapsed: Duration) {
        self.aggregator.record(elapsed_millis(elapsed));
    }
}

fn elapsed_millis(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * MILLIS_PER_SEC
}
