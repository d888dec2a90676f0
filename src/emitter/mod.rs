pub use schedule::*;

mod schedule;

use std::fmt;
use std::time::{Duration, SystemTime};

use smallvec::SmallVec;
use tokio::sync::watch;
use tokio::time::{interval_at, timeout, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::aggregate::SampleAggregator;
use crate::metadata::{resolve_dimensions, MetadataError, MetadataResolver};
use crate::metric::{
    DimensionSet, MetricDatum, MetricPayload, MetricValue, Unit, ELAPSED_TIME_METRIC,
};
use crate::sink::MetricsSink;
use crate::stats::StatisticSet;

/// Namespace metrics are published under when none is configured
pub const DEFAULT_NAMESPACE: &str = "ElapsedTimeRelay";

const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Translates each period's aggregated statistics into one metric payload
///
/// Each [`tick`] cuts exactly one snapshot from the aggregator and sends one
/// payload to the sink, with one data point per configured dimension set. An
/// empty period produces scalar zero data points instead of a statistic set.
///
/// [`tick`]: PeriodicEmitter::tick
pub struct PeriodicEmitter<S> {
    aggregator: SampleAggregator,
    sink: S,
    namespace: String,
    dimension_sets: SmallVec<[DimensionSet; 2]>,
}

impl<S> PeriodicEmitter<S>
where
    S: MetricsSink,
{
    pub fn new(
        aggregator: SampleAggregator,
        sink: S,
        dimension_sets: SmallVec<[DimensionSet; 2]>,
    ) -> Self {
        Self {
            aggregator,
            sink,
            namespace: DEFAULT_NAMESPACE.into(),
            dimension_sets,
        }
    }

    /// Changes the namespace metrics are published under
    pub fn with_namespace(self, namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..self
        }
    }

    /// Creates an emitter with dimension sets resolved from deployment
    /// metadata
    ///
    /// Fails only when the primary instance identity cannot be determined.
    pub async fn resolve<R>(
        aggregator: SampleAggregator,
        sink: S,
        resolver: &R,
    ) -> Result<Self, MetadataError>
    where
        R: MetadataResolver,
    {
        let dimension_sets = resolve_dimensions(resolver).await?;

        Ok(Self::new(aggregator, sink, dimension_sets))
    }

    /// Flushes the period that just ended
    ///
    /// The snapshot is cut and the aggregator reset before any network call,
    /// so a failed send drops that period's data instead of retrying it.
    pub async fn tick(&self) {
        let statistics = self.aggregator.collect_and_reset();
        let payload = self.build_payload(statistics, SystemTime::now());

        debug!(
            namespace = %payload.namespace,
            data_points = payload.data.len(),
            statistics = statistics.is_some(),
            "sending metric payload"
        );

        if let Err(send_error) = self.sink.put_metrics(payload).await {
            error!(
                error = %send_error,
                "failed to send metric payload, dropping this period's statistics"
            );
        }
    }

    fn build_payload(
        &self,
        statistics: Option<StatisticSet>,
        timestamp: SystemTime,
    ) -> MetricPayload {
        let value = match statistics {
            Some(statistics) => MetricValue::Statistics(statistics),
            None => MetricValue::Scalar(0.0),
        };

        MetricPayload {
            namespace: self.namespace.clone(),
            data: self
                .dimension_sets
                .iter()
                .cloned()
                .map(|dimensions| MetricDatum {
                    metric_name: ELAPSED_TIME_METRIC,
                    dimensions,
                    timestamp,
                    unit: Unit::Milliseconds,
                    value,
                })
                .collect(),
        }
    }
}

impl<S> fmt::Display for PeriodicEmitter<S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{} in namespace {} under [",
            ELAPSED_TIME_METRIC, self.namespace
        )?;
        for (index, dimension_set) in self.dimension_sets.iter().enumerate() {
            if index > 0 {
                write!(formatter, ", ")?;
            }
            for dimension in dimension_set {
                write!(formatter, "{dimension}")?;
            }
        }
        write!(formatter, "]")
    }
}

/// Running periodic emission schedule
///
/// A single task owns the emitter, so ticks never overlap; a tick that
/// becomes due while a send is still in flight is skipped rather than queued,
/// bounding worst case emission latency to one period.
#[derive(Debug)]
pub struct EmitterTask {
    shutdown: watch::Sender<bool>,
    task: tokio::task::JoinHandle<()>,
}

impl EmitterTask {
    /// Validates the schedule and arms the periodic timer
    ///
    /// Validation failures surface before the first tick, keeping a
    /// misconfigured emitter out of service entirely.
    pub fn spawn<S>(
        emitter: PeriodicEmitter<S>,
        schedule: ScheduleSettings,
    ) -> Result<Self, ScheduleError>
    where
        S: MetricsSink + Sync + 'static,
    {
        schedule.validate()?;

        info!(
            emitter = %emitter,
            initial_delay = ?schedule.initial_delay(),
            period = ?schedule.period(),
            "scheduled periodic metric emission"
        );

        let (shutdown, mut signal) = watch::channel(false);
        let task = tokio::spawn(async move {
            let mut ticks = interval_at(
                Instant::now() + schedule.initial_delay(),
                schedule.period(),
            );
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = ticks.tick() => emitter.tick().await,
                    _ = signal.changed() => break,
                }
            }
        });

        Ok(Self { shutdown, task })
    }

    /// Stops the schedule
    ///
    /// No further ticks occur after this call; an in-flight emission may
    /// finish but is only awaited for a bounded grace interval.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);

        if timeout(SHUTDOWN_GRACE, self.task).await.is_err() {
            warn!(
                grace = ?SHUTDOWN_GRACE,
                "emitter task did not finish within the shutdown grace interval"
            );
        }
    }
}
