use std::fmt;
use std::time::SystemTime;

use smallvec::SmallVec;

use crate::stats::StatisticSet;

/// Name of the single metric stream this crate publishes
pub const ELAPSED_TIME_METRIC: &str = "ElapsedTime";

/// One label identifying the scope of an emitted metric
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimension {
    name: String,
    value: String,
}

impl Dimension {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}={}", self.name, self.value)
    }
}

/// Dimensions attached to one metric data point
///
/// An aggregator publishes under one or two single-dimension sets, so the
/// values stay inline.
pub type DimensionSet = SmallVec<[Dimension; 1]>;

/// Unit of every value in the elapsed time stream
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    #[default]
    Milliseconds,
}

impl Unit {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Milliseconds => "Milliseconds",
        }
    }
}

/// Value carried by one data point
///
/// A period with samples carries the full statistic set; an empty period is
/// published as a scalar zero because a statistic set with zero samples is
/// not representable on the backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Scalar(f64),
    Statistics(StatisticSet),
}

/// One metric data point, stamped at the moment the period snapshot was cut
#[derive(Debug, Clone, PartialEq)]
pub struct MetricDatum {
    pub metric_name: &'static str,
    pub dimensions: DimensionSet,
    pub timestamp: SystemTime,
    pub unit: Unit,
    pub value: MetricValue,
}

/// The payload of one logical send to the metrics backend
#[derive(Debug, Clone, PartialEq)]
pub struct MetricPayload {
    pub namespace: String,
    pub data: SmallVec<[MetricDatum; 2]>,
}
