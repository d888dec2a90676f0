/// Running aggregate of elapsed time samples
///
/// Starts empty with sentinel minimum and maximum values, so the first
/// recorded sample always replaces both. An empty aggregate produces no
/// [`StatisticSet`], which keeps "no samples" distinct from "samples of zero".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunningStats {
    minimum: f64,
    maximum: f64,
    count: u64,
    sum: f64,
}

impl Default for RunningStats {
    fn default() -> Self {
        Self {
            minimum: f64::INFINITY,
            maximum: f64::NEG_INFINITY,
            count: 0,
            sum: 0.0,
        }
    }
}

impl RunningStats {
    /// Folds a single sample into the running minimum, maximum, count and sum
    #[inline]
    pub fn record(&mut self, value: f64) {
        if value < self.minimum {
            self.minimum = value;
        }
        if value > self.maximum {
            self.maximum = value;
        }
        self.count += 1;
        self.sum += value;
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Finishes the aggregate into an emittable statistic set
    ///
    /// Returns [`None`] when nothing was recorded, as minimum and maximum of
    /// an empty period are undefined rather than zero.
    pub fn into_statistics(self) -> Option<StatisticSet> {
        match self.count {
            0 => None,
            _ => Some(StatisticSet {
                minimum: self.minimum,
                maximum: self.maximum,
                sample_count: self.count,
                sum: self.sum,
            }),
        }
    }
}

/// Statistics of one non-empty period, as accepted by min/max/count/sum
/// metric backends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatisticSet {
    pub minimum: f64,
    pub maximum: f64,
    pub sample_count: u64,
    pub sum: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty_with_sentinel_bounds() {
        let stats = RunningStats::default();

        assert!(stats.is_empty());
        assert_eq!(stats.minimum, f64::INFINITY);
        assert_eq!(stats.maximum, f64::NEG_INFINITY);
    }

    #[test]
    fn aggregates_minimum_maximum_count_and_sum() {
        let mut stats = RunningStats::default();

        for value in [100.0, 300.0, 500.0, 200.0, 100.0] {
            stats.record(value);
        }

        assert_eq!(
            stats.into_statistics(),
            Some(StatisticSet {
                minimum: 100.0,
                maximum: 500.0,
                sample_count: 5,
                sum: 1200.0,
            })
        );
    }

    #[test]
    fn produces_no_statistics_when_empty() {
        assert_eq!(RunningStats::default().into_statistics(), None);
    }

    #[test]
    fn treats_recorded_zeroes_as_data() {
        let mut stats = RunningStats::default();

        stats.record(0.0);
        stats.record(0.0);

        assert_eq!(
            stats.into_statistics(),
            Some(StatisticSet {
                minimum: 0.0,
                maximum: 0.0,
                sample_count: 2,
                sum: 0.0,
            })
        );
    }

    #[test]
    fn single_sample_bounds_both_ends() {
        let mut stats = RunningStats::default();

        stats.record(42.5);

        let statistics = stats.into_statistics().unwrap();
        assert_eq!(statistics.minimum, 42.5);
        assert_eq!(statistics.maximum, 42.5);
        assert_eq!(statistics.sample_count, 1);
        assert_eq!(statistics.sum, 42.5);
    }
}
