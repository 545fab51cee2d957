use std::ops::AddAssign;

use imageproc::point::Point;
use serde::{Deserialize, Serialize};

/// One traced boundary, in pixel coordinates.
pub type Contour = Vec<Point<i32>>;

/// Hysteresis thresholds for the edge detector.
///
/// Always satisfies `0 <= low <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    low: f64,
    high: f64,
}

impl Thresholds {
    pub const DEFAULT_LOW: f64 = 5.0;
    pub const DEFAULT_HIGH: f64 = 50.0;

    /// Build a pair from two values in any order.
    ///
    /// Falls back to the default pair when either value is negative or not finite.
    pub fn new(a: f64, b: f64) -> Self {
        Self::from_values(&[a, b])
    }

    /// Build a pair from a list of user supplied values.
    ///
    /// Values that are negative or not finite are ignored. With fewer than two
    /// usable values the default pair is returned, otherwise the smallest value
    /// becomes `low` and the largest becomes `high`.
    pub fn from_values(values: &[f64]) -> Self {
        let valid: Vec<f64> = values
            .iter()
            .copied()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .collect();

        if valid.len() < 2 {
            return Self::default();
        }

        let low = valid.iter().copied().fold(f64::INFINITY, f64::min);
        let high = valid.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self { low, high }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            low: Self::DEFAULT_LOW,
            high: Self::DEFAULT_HIGH,
        }
    }
}

/// Summary of a batch run, merged bottom-up at every join point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub processed: usize,
    pub written: usize,
    pub skipped: usize,
}

impl BatchReport {
    pub fn merge(mut self, other: BatchReport) -> BatchReport {
        self += other;
        self
    }
}

impl AddAssign for BatchReport {
    fn add_assign(&mut self, other: BatchReport) {
        self.processed += other.processed;
        self.written += other.written;
        self.skipped += other.skipped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_are_ordered() {
        let t = Thresholds::new(80.0, 20.0);
        assert_eq!(t.low(), 20.0);
        assert_eq!(t.high(), 80.0);
    }

    #[test]
    fn test_single_value_falls_back_to_default() {
        let t = Thresholds::from_values(&[42.0]);
        assert_eq!(t, Thresholds::default());
        assert_eq!(t.low(), 5.0);
        assert_eq!(t.high(), 50.0);
    }

    #[test]
    fn test_empty_and_invalid_values_fall_back_to_default() {
        assert_eq!(Thresholds::from_values(&[]), Thresholds::default());
        assert_eq!(
            Thresholds::from_values(&[f64::NAN, -3.0, 7.0]),
            Thresholds::default()
        );
    }

    #[test]
    fn test_min_and_max_of_many_values() {
        let t = Thresholds::from_values(&[30.0, 10.0, 90.0, 45.0]);
        assert_eq!(t.low(), 10.0);
        assert_eq!(t.high(), 90.0);
    }

    #[test]
    fn test_report_merge() {
        let a = BatchReport { processed: 3, written: 2, skipped: 1 };
        let b = BatchReport { processed: 4, written: 4, skipped: 0 };
        assert_eq!(a.merge(b), BatchReport { processed: 7, written: 6, skipped: 1 });
    }
}
