use std::sync::Arc;

use parking_lot::Mutex;

use crate::metric::MetricPayload;

use super::{MetricsSink, SinkError};

/// Recording sink
///
/// Captures every payload for later verification in tests, optionally
/// failing each send instead.
#[derive(Clone, Default)]
pub struct RecordingSink {
    sent: Arc<Mutex<Vec<MetricPayload>>>,
    failing: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sink that rejects every payload without capturing it
    pub fn failing() -> Self {
        Self {
            sent: Arc::default(),
            failing: true,
        }
    }

    pub fn sent(&self) -> Vec<MetricPayload> {
        self.sent.lock().clone()
    }
}

impl MetricsSink for RecordingSink {
    async fn put_metrics(&self, payload: MetricPayload) -> Result<(), SinkError> {
        if self.failing {
            return Err(SinkError::Rejected("recording sink set to fail".into()));
        }

        self.sent.lock().push(payload);
        Ok(())
    }
}
