use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Shortest initial delay and period the schedule accepts
///
/// Min/max/count/sum backends aggregate per minute, so a finer schedule only
/// multiplies network calls without adding resolution.
pub const MINIMUM_GRANULARITY: Duration = Duration::from_secs(60);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("unknown time unit {0:?}, expected one of SECONDS, MINUTES or HOURS")]
    UnknownTimeUnit(String),

    #[error("{name} of {configured:?} is below the minimum granularity of {minimum:?}")]
    BelowMinimum {
        name: &'static str,
        configured: Duration,
        minimum: Duration,
    },
}

/// Unit of the configured initial delay and period
#[derive(Default, Debug, PartialEq, Eq, Copy, Clone)]
pub enum TimeUnit {
    Seconds,
    #[default]
    Minutes,
    Hours,
}

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 3_600;

impl TimeUnit {
    pub fn to_duration(&self, amount: u64) -> Duration {
        match self {
            Self::Seconds => Duration::from_secs(amount),
            Self::Minutes => Duration::from_secs(amount.saturating_mul(SECS_PER_MINUTE)),
            Self::Hours => Duration::from_secs(amount.saturating_mul(SECS_PER_HOUR)),
        }
    }
}

impl FromStr for TimeUnit {
    type Err = ScheduleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "SECONDS" => Ok(Self::Seconds),
            "MINUTES" => Ok(Self::Minutes),
            "HOURS" => Ok(Self::Hours),
            _ => Err(ScheduleError::UnknownTimeUnit(value.into())),
        }
    }
}

/// Emission schedule
///
/// Defaults to a one minute initial delay followed by one flush per minute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduleSettings {
    initial_delay: u64,
    period: u64,
    time_unit: TimeUnit,
}

impl ScheduleSettings {
    /// Changes the delay before the first flush
    pub fn with_initial_delay(self, initial_delay: u64) -> Self {
        Self {
            initial_delay,
            ..self
        }
    }

    /// Changes the interval between successive flushes
    pub fn with_period(self, period: u64) -> Self {
        Self { period, ..self }
    }

    pub fn with_time_unit(self, time_unit: TimeUnit) -> Self {
        Self { time_unit, ..self }
    }

    pub fn initial_delay(&self) -> Duration {
        self.time_unit.to_duration(self.initial_delay)
    }

    pub fn period(&self) -> Duration {
        self.time_unit.to_duration(self.period)
    }

    /// Rejects schedules finer than [`MINIMUM_GRANULARITY`]
    ///
    /// Performed at startup, before the timer is armed.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        for (name, configured) in [
            ("initial_delay", self.initial_delay()),
            ("period", self.period()),
        ] {
            if configured < MINIMUM_GRANULARITY {
                return Err(ScheduleError::BelowMinimum {
                    name,
                    configured,
                    minimum: MINIMUM_GRANULARITY,
                });
            }
        }

        Ok(())
    }
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            initial_delay: 1,
            period: 1,
            time_unit: TimeUnit::default(),
        }
    }
}
