// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

/// Piecewise-constant fit in interval form.
///
/// `right[j]` is the exclusive right bound of segment `j`, `values[j]`
/// its fitted level (the segment's weighted median) and `dists[j]` its
/// weighted absolute deviation from that level. The three vectors
/// always have equal length.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Segmentation {
    pub right: Vec<usize>,
    pub values: Vec<f64>,
    pub dists: Vec<f64>,
}

impl Segmentation {
    /// Number of segments.
    pub fn len(&self) -> usize {
        self.right.len()
    }

    pub fn is_empty(&self) -> bool {
        self.right.is_empty()
    }

    /// Number of level changes, one less than the segment count.
    pub fn change_count(&self) -> usize {
        self.right.len().saturating_sub(1)
    }

    /// Sum of per-segment deviations, the data term of the Potts objective.
    pub fn total_dist(&self) -> f64 {
        self.dists.iter().sum()
    }
}
