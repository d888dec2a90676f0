#![warn(missing_debug_implementations, unreachable_pub)]

pub mod aggregate;
pub mod emitter;
pub mod metadata;
pub mod metric;
pub mod sink;
pub mod stats;

mod measurer;

pub use measurer::ElapsedTimeMeasurer;

pub mod prelude {
    pub use crate::aggregate::SampleAggregator;
    pub use crate::emitter::{
        EmitterTask, PeriodicEmitter, ScheduleError, ScheduleSettings, TimeUnit,
        DEFAULT_NAMESPACE,
    };
    pub use crate::measurer::ElapsedTimeMeasurer;
    pub use crate::metadata::{
        resolve_dimensions, MetadataError, MetadataResolver, GROUP_NAME_DIMENSION,
        INSTANCE_ID_DIMENSION,
    };
    pub use crate::metric::{
        Dimension, DimensionSet, MetricDatum, MetricPayload, MetricValue, Unit,
        ELAPSED_TIME_METRIC,
    };
    #[cfg(any(feature = "test_util", test))]
    pub use crate::sink::RecordingSink;
    pub use crate::sink::{MetricsSink, SinkError};
    pub use crate::stats::{RunningStats, StatisticSet};
}
