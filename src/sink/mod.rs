pub use error::*;
#[cfg(any(feature = "test_util", test))]
pub use recording::*;

mod error;
#[cfg(any(feature = "test_util", test))]
mod recording;

use crate::metric::MetricPayload;

/// Client of the remote metrics backend
///
/// The emitter performs exactly one `put_metrics` call per period, strictly
/// after the snapshot was cut and the aggregator lock released. Retry and
/// backoff, if any, belong to the implementation.
#[trait_variant::make(Send)]
pub trait MetricsSink {
    async fn put_metrics(&self, payload: MetricPayload) -> Result<(), SinkError>;
}
