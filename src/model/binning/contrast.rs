/*
 * Galileo Network Analytics (GNA) Toolkit
 *
 * Copyright 2024-2025 Fidelis Farm & Technologies, LLC
 * All Rights Reserved.
 * See license information in LICENSE.
 */

use crate::model::binning::value::UmccValue;

/// Score assigned to positions that can never be a split point
pub const SENTINEL_SCORE: f64 = 1.0;

/// Davies-Bouldin style contrast for every split position of a sorted sample.
///
/// Entry `i` scores the split that puts `sorted[..i]` on the left and
/// `sorted[i..]` on the right: the sum of both mean absolute deviations
/// divided by the distance between the two centroids. Lower is better.
/// The first and last entries are always `SENTINEL_SCORE`.
///
/// Identical centroids produce a non-finite score (`inf` or `NaN`); the
/// value is returned as is.
pub fn db_contrast<T: UmccValue>(sorted: &[T]) -> Vec<f64> {
    let n = sorted.len();
    let mut scores = vec![SENTINEL_SCORE; n];
    if n < 3 {
        return scores;
    }

    let mut left_sum = 0.0;
    let mut right_sum: f64 = sorted.iter().map(|&x| x.to_f64()).sum();

    for i in 1..n - 1 {
        let boundary = sorted[i - 1].to_f64();
        left_sum += boundary;
        right_sum -= boundary;

        let centroid_left = left_sum / i as f64;
        let centroid_right = right_sum / (n - i) as f64;

        let spread_left = mean_absolute_deviation(&sorted[..i], centroid_left);
        let spread_right = mean_absolute_deviation(&sorted[i..], centroid_right);
        let centroid_gap = (centroid_left - centroid_right).abs();

        scores[i] = (spread_left + spread_right) / centroid_gap;
    }

    scores
}

fn mean_absolute_deviation<T: UmccValue>(data: &[T], centroid: f64) -> f64 {
    data.iter()
        .map(|&x| (x.to_f64() - centroid).abs())
        .sum::<f64>()
        / data.len() as f64
}

/// Lowest score among the split positions that leave `min_samples` on each side.
///
/// Candidates are the closed range `[min_samples + 1, len - min_samples]`,
/// clamped to the scored positions. Ties go to the lowest index and the first
/// `NaN` wins outright. Returns `None` when no candidate exists.
pub fn best_split(scores: &[f64], min_samples: usize) -> Option<(usize, f64)> {
    let n = scores.len();
    if n == 0 {
        return None;
    }
    let low = min_samples.saturating_add(1);
    let high = n.saturating_sub(min_samples).min(n - 1);
    if low > high {
        return None;
    }

    let mut best: Option<(usize, f64)> = None;
    for (idx, &score) in scores.iter().enumerate().take(high + 1).skip(low) {
        if score.is_nan() {
            return Some((idx, score));
        }
        match best {
            Some((_, lowest)) if score >= lowest => {}
            _ => best = Some((idx, score)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_contrast(x: &[f64]) -> Vec<f64> {
        let n = x.len();
        let mut res = vec![1.0; n];
        for i in 1..n.saturating_sub(1) {
            let cl = x[..i].iter().sum::<f64>() / i as f64;
            let cr = x[i..].iter().sum::<f64>() / (n - i) as f64;
            let dl = x[..i].iter().map(|v| (v - cl).abs()).sum::<f64>() / i as f64;
            let dr = x[i..].iter().map(|v| (v - cr).abs()).sum::<f64>() / (n - i) as f64;
            res[i] = (dl + dr) / (cl - cr).abs();
        }
        res
    }

    #[test]
    fn test_sentinels() {
        let scores = db_contrast(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(scores.len(), 4);
        assert_eq!(scores[0], SENTINEL_SCORE);
        assert_eq!(scores[3], SENTINEL_SCORE);
    }

    #[test]
    fn test_degenerate_lengths() {
        let empty: Vec<f64> = vec![];
        assert!(db_contrast(&empty).is_empty());
        assert_eq!(db_contrast(&[7.0]), vec![1.0]);
        assert_eq!(db_contrast(&[7.0, 8.0]), vec![1.0, 1.0]);
    }

    #[test]
    fn test_known_values() {
        // split before index 2: {1,1} vs {5,5}, no spread at all
        let scores = db_contrast(&[1.0, 1.0, 5.0, 5.0]);
        assert_eq!(scores[2], 0.0);

        // split before index 1: {1} vs {1,5,5}, centroid 11/3
        let right = 11.0 / 3.0;
        let spread = (right - 1.0) + 2.0 * (5.0 - right);
        let expected = (spread / 3.0) / (right - 1.0);
        assert!((scores[1] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_running_sums_match_full_recompute() {
        let data = vec![0.3, 0.5, 0.9, 1.7, 2.0, 2.2, 6.5, 7.0, 7.1, 9.4, 12.0];
        let fast = db_contrast(&data);
        let slow = naive_contrast(&data);
        for (a, b) in fast.iter().zip(slow.iter()) {
            assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
        }
    }

    #[test]
    fn test_integer_samples() {
        let data: Vec<i64> = vec![1, 1, 2, 9, 10, 10];
        let as_float: Vec<f64> = data.iter().map(|&v| v as f64).collect();
        assert_eq!(db_contrast(&data), db_contrast(&as_float));
    }

    #[test]
    fn test_constant_sample_is_not_finite() {
        let scores = db_contrast(&[4.0; 6]);
        for score in &scores[1..5] {
            assert!(score.is_nan());
        }
    }

    #[test]
    fn test_best_split_range() {
        // index 1 is the global minimum but lies inside the margin
        let scores = vec![1.0, 0.0, 0.2, 0.5, 0.1, 0.3, 0.4, 0.9, 1.0];
        assert_eq!(best_split(&scores, 1), Some((4, 0.1)));
        assert_eq!(best_split(&scores, 3), Some((4, 0.1)));
        assert_eq!(best_split(&scores, 4), Some((5, 0.3)));
        // range [6, 4] is empty
        assert_eq!(best_split(&scores, 5), None);
    }

    #[test]
    fn test_best_split_upper_bound_inclusive() {
        let scores = vec![1.0, 0.9, 0.9, 0.9, 0.8, 0.9, 0.05, 1.0];
        // min_samples = 2 covers [3, 6]
        assert_eq!(best_split(&scores, 2), Some((6, 0.05)));
    }

    #[test]
    fn test_best_split_ties_and_nan() {
        let ties = vec![1.0, 0.3, 0.3, 0.3, 1.0];
        assert_eq!(best_split(&ties, 0), Some((1, 0.3)));

        let with_nan = vec![1.0, 0.1, f64::NAN, 0.0, 1.0];
        let (idx, score) = best_split(&with_nan, 0).unwrap();
        assert_eq!(idx, 2);
        assert!(score.is_nan());
    }

    #[test]
    fn test_best_split_empty() {
        assert_eq!(best_split(&[], 3), None);
        assert_eq!(best_split(&[1.0], 0), None);
    }
}
