/*
 * Galileo Network Analytics (GNA) Toolkit
 *
 * Copyright 2024-2025 Fidelis Farm & Technologies, LLC
 * All Rights Reserved.
 * See license information in LICENSE.
 */

use crate::model::binning::partition::{partition_with_trace, SplitRecord};
use crate::model::binning::value::{sorted_sample, UmccValue};
use crate::pipeline::parse_options;

pub const DEFAULT_MAX_CONTRAST: f64 = 0.45;
pub const DEFAULT_MIN_SAMPLES: usize = 3;
pub const DEFAULT_SCALE: bool = true;

#[derive(Debug, Clone)]
pub struct UmccResult<T: UmccValue> {
    pub edges: Vec<T>,
    pub splits: Vec<SplitRecord<T>>,
    /// population of each bin, edges.len() + 1 entries
    pub frequencies: Vec<usize>,
    /// smallest and largest sample value in each bin, None when the bin is empty
    pub bin_ranges: Vec<Option<(T, T)>>,
}

impl<T: UmccValue> UmccResult<T> {
    pub fn bin_count(&self) -> usize {
        self.edges.len() + 1
    }

    pub fn forced_splits(&self) -> usize {
        self.splits.iter().filter(|split| split.forced).count()
    }
}

/// Bin of every sample, in the sample's original order
#[derive(Debug, Clone, PartialEq)]
pub enum BinAssignment {
    Index(Vec<usize>),
    Scaled(Vec<f64>),
}

impl BinAssignment {
    pub fn len(&self) -> usize {
        match self {
            BinAssignment::Index(bins) => bins.len(),
            BinAssignment::Scaled(bins) => bins.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_f64(&self) -> Vec<f64> {
        match self {
            BinAssignment::Index(bins) => bins.iter().map(|&bin| bin as f64).collect(),
            BinAssignment::Scaled(bins) => bins.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UmccBinner<T: UmccValue> {
    pub max_contrast: f64,
    pub min_samples: usize,
    pub scale: bool,
    _phantom: std::marker::PhantomData<T>,
}

impl<T: UmccValue> Default for UmccBinner<T> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONTRAST, DEFAULT_MIN_SAMPLES, DEFAULT_SCALE)
    }
}

impl<T: UmccValue> UmccBinner<T> {
    pub fn new(max_contrast: f64, min_samples: usize, scale: bool) -> Self {
        Self {
            max_contrast,
            min_samples,
            scale,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Build a binner from a `key=value;key=value` options string.
    ///
    /// Recognized keys are `max_contrast`, `min_samples` and `scale`; missing
    /// keys keep their defaults.
    pub fn from_options(options_string: &str) -> Result<Self, String> {
        let mut options = parse_options(options_string)?;
        for key in options.keys() {
            if !matches!(*key, "max_contrast" | "min_samples" | "scale") {
                return Err(format!("unknown option '{}'", key));
            }
        }
        options.entry("max_contrast").or_insert("0.45");
        options.entry("min_samples").or_insert("3");
        options.entry("scale").or_insert("true");

        let max_contrast = options["max_contrast"]
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid max_contrast '{}': {}", options["max_contrast"], e))?;
        if max_contrast.is_nan() {
            return Err("max_contrast must be a number".to_string());
        }

        let min_samples = options["min_samples"]
            .trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid min_samples '{}': {}", options["min_samples"], e))?;
        if min_samples < 1 {
            return Err("min_samples must be at least 1".to_string());
        }

        let scale = options["scale"]
            .trim()
            .parse::<bool>()
            .map_err(|e| format!("invalid scale '{}': {}", options["scale"], e))?;

        Ok(Self::new(max_contrast, min_samples, scale))
    }

    /// Find the bin edges of a sample and summarize the bins they produce
    pub fn fit(&self, data: &[T]) -> UmccResult<T> {
        let sorted_data = sorted_sample(data);
        let partitioning = partition_with_trace(&sorted_data, self.max_contrast, self.min_samples);
        let edges = partitioning.edges;

        let mut frequencies = vec![0; edges.len() + 1];
        let mut bin_ranges: Vec<Option<(T, T)>> = vec![None; edges.len() + 1];
        // sorted order: the first value seen in a bin is its minimum, the last its maximum
        for (&value, bin) in sorted_data.iter().zip(digitize(&edges, &sorted_data)) {
            frequencies[bin] += 1;
            bin_ranges[bin] = match bin_ranges[bin] {
                None => Some((value, value)),
                Some((low, _)) => Some((low, value)),
            };
        }

        UmccResult {
            edges,
            splits: partitioning.splits,
            frequencies,
            bin_ranges,
        }
    }

    /// Predict which bin a value belongs to
    pub fn predict(&self, result: &UmccResult<T>, value: T) -> usize {
        bin_index(&result.edges, value)
    }

    /// Discretize a sample with this binner's settings
    pub fn discretize(&self, data: &[T]) -> BinAssignment {
        let result = self.fit(data);
        self.assign(&result, data)
    }

    /// Bin assignment of `data` under edges found by an earlier fit
    pub fn assign(&self, result: &UmccResult<T>, data: &[T]) -> BinAssignment {
        let bins = digitize(&result.edges, data);
        if self.scale {
            BinAssignment::Scaled(scale_bins(&bins))
        } else {
            BinAssignment::Index(bins)
        }
    }

    /// Lower edge, upper edge and population of every bin
    pub fn bin_report(&self, result: &UmccResult<T>) -> Vec<(Option<T>, Option<T>, usize)> {
        let mut report = Vec::with_capacity(result.frequencies.len());
        for (i, &count) in result.frequencies.iter().enumerate() {
            let lower = if i == 0 { None } else { Some(result.edges[i - 1]) };
            let upper = result.edges.get(i).copied();
            report.push((lower, upper, count));
        }
        report
    }
}

/// Number of edges at or below `value`; NaN goes past the last edge
pub fn bin_index<T: UmccValue>(edges: &[T], value: T) -> usize {
    if value.partial_cmp(&value).is_none() {
        return edges.len();
    }
    edges.partition_point(|&edge| edge <= value)
}

/// Bin of every value under a sorted edge set, aligned with `data`
pub fn digitize<T: UmccValue>(edges: &[T], data: &[T]) -> Vec<usize> {
    data.iter().map(|&value| bin_index(edges, value)).collect()
}

/// Divide every bin by the largest one. All zero bins stay zero.
pub fn scale_bins(bins: &[usize]) -> Vec<f64> {
    let max_bin = bins.iter().copied().max().unwrap_or(0);
    if max_bin == 0 {
        return vec![0.0; bins.len()];
    }
    bins.iter()
        .map(|&bin| bin as f64 / max_bin as f64)
        .collect()
}

/// UMCC discretization of a sample
pub fn umcc_discretize<T: UmccValue>(
    data: &[T],
    max_contrast: f64,
    min_samples: usize,
    scale: bool,
) -> BinAssignment {
    UmccBinner::new(max_contrast, min_samples, scale).discretize(data)
}

// Type aliases for convenience
pub type F64UmccBinner = UmccBinner<f64>;
pub type IntegerUmccBinner = UmccBinner<i64>;
