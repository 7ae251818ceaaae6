/*
 * Galileo Network Analytics (GNA) Toolkit
 *
 * Copyright 2024-2025 Fidelis Farm & Technologies, LLC
 * All Rights Reserved.
 * See license information in LICENSE.
 */

use std::cmp::Ordering;
use std::fmt::Debug;

/// Trait for numeric types that can be discretized
pub trait UmccValue: Copy + Debug + PartialOrd + PartialEq {
    /// Convert to f64 for contrast calculations
    fn to_f64(self) -> f64;

    /// Check if value is valid (not NaN/infinite for floats)
    fn is_valid(self) -> bool;

    /// Total ordering used when sorting samples, NaN sorts last
    fn sort_cmp(&self, other: &Self) -> Ordering;
}

impl UmccValue for i64 {
    fn to_f64(self) -> f64 {
        self as f64
    }

    fn is_valid(self) -> bool {
        true // i64 is always valid
    }

    fn sort_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl UmccValue for f64 {
    fn to_f64(self) -> f64 {
        self
    }

    fn is_valid(self) -> bool {
        self.is_finite()
    }

    fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self.is_nan(), other.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => self.partial_cmp(other).unwrap_or(Ordering::Equal),
        }
    }
}

/// Sorted copy of a sample, ascending
pub fn sorted_sample<T: UmccValue>(data: &[T]) -> Vec<T> {
    let mut sorted_data = data.to_vec();
    sorted_data.sort_by(|a, b| a.sort_cmp(b));
    sorted_data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_sample_f64() {
        let data = vec![3.0, -1.0, 2.5, 0.0];
        assert_eq!(sorted_sample(&data), vec![-1.0, 0.0, 2.5, 3.0]);
        // original left untouched
        assert_eq!(data, vec![3.0, -1.0, 2.5, 0.0]);
    }

    #[test]
    fn test_sorted_sample_nan_last() {
        let data = vec![2.0, f64::NAN, 1.0];
        let sorted = sorted_sample(&data);
        assert_eq!(sorted[0], 1.0);
        assert_eq!(sorted[1], 2.0);
        assert!(sorted[2].is_nan());
    }

    #[test]
    fn test_validity() {
        assert!(5i64.is_valid());
        assert!(1.5f64.is_valid());
        assert!(!f64::NAN.is_valid());
        assert!(!f64::INFINITY.is_valid());
    }
}
