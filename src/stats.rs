//! Statistical analysis of frame intervals.
//!
//! [`FrameStats`] summarises a sequence of frame intervals in milliseconds:
//! min, max, mean, population variance and percentiles. The profiler builds
//! its [`PerformanceMetrics`](crate::PerformanceMetrics) on top of these
//! numbers.
//!
//! # Example
//!
//! ```rust
//! use wobblaz_motion::stats::FrameStats;
//!
//! let stats = FrameStats::from_intervals(&[10.0, 15.0, 12.0, 20.0, 11.0]);
//!
//! assert_eq!(stats.count, 5);
//! assert_eq!(stats.max, 20.0);
//! assert_eq!(stats.median, 12.0);
//! println!("{}", stats.summary());
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Summary statistics for a set of frame intervals (milliseconds).
///
/// An empty input yields all-zero statistics rather than panicking.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrameStats {
    /// Number of intervals.
    pub count: usize,
    /// Sum of all intervals.
    pub total: f64,
    /// Shortest interval.
    pub min: f64,
    /// Longest interval.
    pub max: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Population variance.
    pub variance: f64,
    /// Median (50th percentile).
    pub median: f64,
    /// 95th percentile.
    pub p95: f64,
    /// 99th percentile.
    pub p99: f64,
}

impl FrameStats {
    /// Computes statistics from intervals in recording order.
    pub fn from_intervals(intervals: &[f64]) -> Self {
        if intervals.is_empty() {
            return Self::default();
        }

        let count = intervals.len();
        let total: f64 = intervals.iter().sum();
        let mean = total / count as f64;
        let variance = population_variance(intervals, mean);

        let mut sorted = intervals.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        Self {
            count,
            total,
            min: sorted[0],
            max: sorted[count - 1],
            mean,
            variance,
            median: percentile(&sorted, 50.0),
            p95: percentile(&sorted, 95.0),
            p99: percentile(&sorted, 99.0),
        }
    }

    /// Population standard deviation.
    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }

    /// Returns a formatted summary string.
    ///
    /// # Example Output
    ///
    /// ```text
    /// Frame Statistics (60 frames):
    /// Min: 16.00ms
    /// Max: 40.00ms
    /// Mean: 20.00ms
    /// Variance: 80.00
    /// Median: 16.00ms
    /// p95: 40.00ms
    /// p99: 40.00ms
    /// ```
    pub fn summary(&self) -> String {
        format!(
            "Frame Statistics ({} frames):\n\
             Min: {:.2}ms\n\
             Max: {:.2}ms\n\
             Mean: {:.2}ms\n\
             Variance: {:.2}\n\
             Median: {:.2}ms\n\
             p95: {:.2}ms\n\
             p99: {:.2}ms",
            self.count,
            self.min,
            self.max,
            self.mean,
            self.variance,
            self.median,
            self.p95,
            self.p99
        )
    }
}

/// Population variance of `values` around `mean`.
///
/// Returns `0.0` for an empty slice.
pub fn population_variance(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}

/// Calculates a percentile from sorted data.
///
/// Uses linear interpolation for percentiles that fall between samples.
/// Returns `0.0` for empty data.
pub fn percentile(sorted_data: &[f64], percentile: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }

    let index = (percentile.clamp(0.0, 100.0) / 100.0) * (sorted_data.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted_data[lower]
    } else {
        let weight = index - lower as f64;
        sorted_data[lower] * (1.0 - weight) + sorted_data[upper] * weight
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_frame_stats() {
        let stats = FrameStats::from_intervals(&[10.0, 15.0, 12.0, 20.0, 11.0]);

        assert_eq!(stats.count, 5);
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 20.0);
        assert_relative_eq!(stats.mean, 13.6);
        assert_relative_eq!(stats.total, 68.0);
    }

    #[test]
    fn test_frame_stats_empty() {
        let stats = FrameStats::from_intervals(&[]);
        assert_eq!(stats, FrameStats::default());
    }

    #[test]
    fn test_population_variance() {
        // 50 x 16ms then 10 x 40ms: mean 20, variance (50*16 + 10*400) / 60.
        let mut intervals = vec![16.0; 50];
        intervals.extend(vec![40.0; 10]);

        let stats = FrameStats::from_intervals(&intervals);
        assert_relative_eq!(stats.mean, 20.0);
        assert_relative_eq!(stats.variance, 80.0);
        assert_relative_eq!(stats.std_dev(), 80.0_f64.sqrt());
    }

    #[test]
    fn test_uniform_variance_zero() {
        let stats = FrameStats::from_intervals(&[16.0; 30]);
        assert_eq!(stats.variance, 0.0);
    }

    #[test]
    fn test_percentile_calculation() {
        let data = [10.0, 20.0, 30.0, 40.0, 50.0];

        assert_eq!(percentile(&data, 50.0), 30.0);
        assert_eq!(percentile(&data, 0.0), 10.0);
        assert_eq!(percentile(&data, 100.0), 50.0);
    }

    #[test]
    fn test_percentile_interpolation() {
        let data = [10.0, 20.0, 30.0, 40.0];

        // index 0.75 between 10 and 20
        assert_relative_eq!(percentile(&data, 25.0), 17.5);
    }

    #[test]
    fn test_percentile_empty() {
        assert_eq!(percentile(&[], 50.0), 0.0);
    }

    #[test]
    fn test_summary() {
        let stats = FrameStats::from_intervals(&[10.0, 20.0]);
        let summary = stats.summary();

        assert!(summary.contains("2 frames"));
        assert!(summary.contains("Min:"));
        assert!(summary.contains("Variance:"));
    }
}
