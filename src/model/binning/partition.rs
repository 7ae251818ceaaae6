/*
 * Galileo Network Analytics (GNA) Toolkit
 *
 * Copyright 2024-2025 Fidelis Farm & Technologies, LLC
 * All Rights Reserved.
 * See license information in LICENSE.
 */

use crate::model::binning::contrast::{best_split, db_contrast};
use crate::model::binning::value::UmccValue;
use std::cmp::Ordering;

/// Splits accepted regardless of contrast until this many edges exist
pub const MINIMUM_EDGES: usize = 2;

/// One scored candidate partition and what the search decided about it
#[derive(Debug, Clone, PartialEq)]
pub struct SplitRecord<T: UmccValue> {
    pub size: usize,
    pub index: usize,
    pub threshold: T,
    pub contrast: f64,
    pub accepted: bool,
    /// accepted only because fewer than MINIMUM_EDGES edges existed
    pub forced: bool,
}

#[derive(Debug, Clone)]
pub struct Partitioning<T: UmccValue> {
    pub edges: Vec<T>,
    pub splits: Vec<SplitRecord<T>>,
}

/// Edges of a sorted sample found by recursive contrast partitioning
pub fn partition<T: UmccValue>(sorted: &[T], max_contrast: f64, min_samples: usize) -> Vec<T> {
    partition_with_trace(sorted, max_contrast, min_samples).edges
}

/// Recursive partitioning over an explicit work stack.
///
/// Each candidate larger than `2 * min_samples` is split at its best
/// contrast position. The split is kept when its contrast is below
/// `max_contrast`, or unconditionally while fewer than `MINIMUM_EDGES` edges
/// have been found. A kept split contributes its threshold as an edge and
/// pushes the values strictly below and strictly above it as new candidates.
pub fn partition_with_trace<T: UmccValue>(
    sorted: &[T],
    max_contrast: f64,
    min_samples: usize,
) -> Partitioning<T> {
    let mut edges: Vec<T> = Vec::new();
    let mut splits: Vec<SplitRecord<T>> = Vec::new();
    let mut stack: Vec<&[T]> = vec![sorted];

    while let Some(curr) = stack.pop() {
        if curr.len() <= min_samples.saturating_mul(2) {
            continue;
        }

        let scores = db_contrast(curr);
        let Some((index, contrast)) = best_split(&scores, min_samples) else {
            continue;
        };
        let threshold = curr[index];

        let passes = contrast < max_contrast;
        let accepted = passes || edges.len() < MINIMUM_EDGES;
        splits.push(SplitRecord {
            size: curr.len(),
            index,
            threshold,
            contrast,
            accepted,
            forced: accepted && !passes,
        });
        if !accepted {
            continue;
        }

        insert_edge(&mut edges, threshold);

        // sorted input: values below and above the threshold are contiguous,
        // trailing NaN belongs to neither side
        let below = curr.partition_point(|&x| x < threshold);
        let rest = &curr[curr.partition_point(|&x| x <= threshold)..];
        let above = rest.partition_point(|&x| x > threshold);

        stack.push(&curr[..below]);
        stack.push(&rest[..above]);
    }

    Partitioning { edges, splits }
}

/// Ordered insert, equal values go after existing ones
fn insert_edge<T: UmccValue>(edges: &mut Vec<T>, edge: T) {
    let position = edges.partition_point(|e| e.sort_cmp(&edge) != Ordering::Greater);
    edges.insert(position, edge);
}
