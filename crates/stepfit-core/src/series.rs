// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::StepError;

/// One (value, weight) sample of the input sequence.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Observation {
    pub value: f64,
    pub weight: f64,
}

/// Immutable, owned sequence of weighted observations.
///
/// Built once at construction and never mutated afterwards; a new
/// series must be constructed for new data. A weight of zero is
/// permitted and contributes nothing to median position or deviation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedSeries {
    observations: Vec<Observation>,
}

impl WeightedSeries {
    /// Builds a validated series from equal-length value and weight slices.
    pub fn new(values: &[f64], weights: &[f64]) -> Result<Self, StepError> {
        if values.len() != weights.len() {
            return Err(StepError::invalid_input(format!(
                "length mismatch: got {} values and {} weights",
                values.len(),
                weights.len()
            )));
        }

        let mut observations = Vec::with_capacity(values.len());
        for (k, (&value, &weight)) in values.iter().zip(weights).enumerate() {
            if !value.is_finite() {
                return Err(StepError::invalid_input(format!(
                    "value at index {k} is not a finite number: {value}"
                )));
            }
            if !weight.is_finite() || weight < 0.0 {
                return Err(StepError::invalid_input(format!(
                    "weight at index {k} must be finite and non-negative; got {weight}"
                )));
            }
            observations.push(Observation { value, weight });
        }

        Ok(Self { observations })
    }

    /// Builds a series with every weight fixed at 1.
    pub fn unweighted(values: &[f64]) -> Result<Self, StepError> {
        let weights = vec![1.0; values.len()];
        Self::new(values, &weights)
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Inclusive sub-range `[left, right]`.
    ///
    /// Panics if `left > right` or `right >= len()`; callers validate
    /// query indices before slicing.
    pub fn range(&self, left: usize, right: usize) -> &[Observation] {
        &self.observations[left..=right]
    }
}

#[cfg(test)]
mod tests {
    use super::{Observation, WeightedSeries};
    use crate::StepError;

    #[test]
    fn builds_from_matching_slices() {
        let series = WeightedSeries::new(&[1.0, 2.0, 3.0], &[1.0, 0.5, 2.0])
            .expect("valid input should build");
        assert_eq!(series.len(), 3);
        assert!(!series.is_empty());
        assert_eq!(
            series.observations()[1],
            Observation {
                value: 2.0,
                weight: 0.5
            }
        );
    }

    #[test]
    fn unweighted_fixes_weights_at_one() {
        let series = WeightedSeries::unweighted(&[4.0, 5.0]).expect("valid input should build");
        assert!(series.observations().iter().all(|o| o.weight == 1.0));
    }

    #[test]
    fn empty_series_is_permitted() {
        let series = WeightedSeries::new(&[], &[]).expect("empty input should build");
        assert!(series.is_empty());
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = WeightedSeries::new(&[1.0, 2.0], &[1.0]).expect_err("mismatch must fail");
        assert!(matches!(err, StepError::InvalidInput(_)));
        assert!(err.to_string().contains("length mismatch"));
    }

    #[test]
    fn rejects_non_finite_values_and_weights() {
        let nan_value =
            WeightedSeries::new(&[1.0, f64::NAN], &[1.0, 1.0]).expect_err("NaN value must fail");
        assert!(nan_value.to_string().contains("index 1"));

        let inf_weight = WeightedSeries::new(&[1.0], &[f64::INFINITY])
            .expect_err("infinite weight must fail");
        assert!(inf_weight.to_string().contains("finite and non-negative"));
    }

    #[test]
    fn rejects_negative_weight_but_allows_zero() {
        let err = WeightedSeries::new(&[1.0], &[-0.5]).expect_err("negative weight must fail");
        assert!(matches!(err, StepError::InvalidInput(_)));

        let series =
            WeightedSeries::new(&[1.0], &[0.0]).expect("zero weight should be permitted");
        assert_eq!(series.observations()[0].weight, 0.0);
    }

    #[test]
    fn range_returns_inclusive_slice() {
        let series =
            WeightedSeries::unweighted(&[1.0, 2.0, 3.0, 4.0]).expect("valid input should build");
        let window = series.range(1, 2);
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].value, 2.0);
        assert_eq!(window[1].value, 3.0);
    }
}
