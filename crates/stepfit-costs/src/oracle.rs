// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::cache::RangeCache;
use crate::median::weighted_median_dist;
use stepfit_core::{StepError, WeightedSeries};

/// Memoized range-median oracle over one immutable observation series.
///
/// Owns the series and its cache table together; both are freed when
/// the oracle is dropped. Queries go `mu_dist -> RangeCache ->
/// weighted_median_dist`, so the cache only ever holds pure function
/// results and can never change an answer, only its latency.
///
/// Single-threaded by design: queries take `&mut self` because a miss
/// writes the freshly computed entry back into the table. Embedders
/// that share an oracle across threads must serialize access
/// externally.
#[derive(Clone, Debug)]
pub struct RangeMedian {
    series: WeightedSeries,
    cache: RangeCache,
}

impl RangeMedian {
    pub fn new(series: WeightedSeries) -> Result<Self, StepError> {
        let cache = RangeCache::for_series_len(series.len())?;
        Ok(Self { series, cache })
    }

    pub fn from_values(values: &[f64], weights: &[f64]) -> Result<Self, StepError> {
        Self::new(WeightedSeries::new(values, weights)?)
    }

    /// Oracle over a plain series, every weight fixed at 1.
    pub fn unweighted(values: &[f64]) -> Result<Self, StepError> {
        Self::new(WeightedSeries::unweighted(values)?)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn series(&self) -> &WeightedSeries {
        &self.series
    }

    fn check_range(&self, left: usize, right: usize) -> Result<(), StepError> {
        let n = self.series.len();
        if left > right || right >= n {
            return Err(StepError::out_of_range(format!(
                "query range [{left}, {right}] is not within a series of length {n}"
            )));
        }
        Ok(())
    }

    /// Weighted median and deviation of the inclusive range `[left, right]`.
    pub fn mu_dist(&mut self, left: usize, right: usize) -> Result<(f64, f64), StepError> {
        self.check_range(left, right)?;

        if let Some(hit) = self.cache.get(left, right) {
            return Ok(hit);
        }

        let (mu, dist) = weighted_median_dist(self.series.range(left, right));
        self.cache.set(left, right, mu, dist);
        Ok((mu, dist))
    }

    /// Weighted median of the inclusive range `[left, right]`.
    pub fn mu(&mut self, left: usize, right: usize) -> Result<f64, StepError> {
        self.mu_dist(left, right).map(|(mu, _)| mu)
    }

    /// Weighted deviation of the inclusive range `[left, right]`.
    pub fn dist(&mut self, left: usize, right: usize) -> Result<f64, StepError> {
        self.mu_dist(left, right).map(|(_, dist)| dist)
    }

    /// Historical warm-up hook, retained for interface compatibility.
    /// Deliberately does nothing: the partition solver's access pattern
    /// concentrates on short windows, so per-query computation plus the
    /// range cache already covers it.
    pub fn precompute(&mut self, _max_size: usize, _min_pos: usize, _max_pos: usize) {}
}

#[cfg(test)]
mod tests {
    use super::RangeMedian;
    use crate::median::weighted_median_dist;
    use stepfit_core::StepError;

    #[test]
    fn unweighted_known_answers() {
        let mut oracle =
            RangeMedian::unweighted(&[1.0, 2.0, 3.0]).expect("oracle should build");
        assert_eq!(oracle.mu(0, 2).expect("query should succeed"), 2.0);
        assert_eq!(oracle.dist(0, 2).expect("query should succeed"), 2.0);
        assert_eq!(oracle.dist(1, 1).expect("query should succeed"), 0.0);
    }

    #[test]
    fn weighted_known_answers() {
        let mut oracle =
            RangeMedian::from_values(&[1.0, 2.0], &[1.0, 3.0]).expect("oracle should build");
        assert_eq!(oracle.mu(0, 1).expect("query should succeed"), 2.0);
        assert_eq!(oracle.dist(0, 1).expect("query should succeed"), 1.0);
    }

    #[test]
    fn repeated_queries_are_bit_identical() {
        let values = [0.3, 1.7, 0.9, 4.2, 4.1, 0.2];
        let weights = [1.0, 2.0, 0.5, 1.0, 3.0, 1.0];
        let mut oracle = RangeMedian::from_values(&values, &weights).expect("oracle should build");

        let cold = oracle.mu_dist(1, 4).expect("cold query should succeed");
        let warm = oracle.mu_dist(1, 4).expect("warm query should succeed");
        assert_eq!(cold, warm);
    }

    #[test]
    fn cached_results_equal_direct_evaluation() {
        let values = [3.0, -1.0, 2.5, 2.5, 8.0];
        let weights = [1.0, 0.0, 2.0, 1.5, 0.25];
        let mut oracle = RangeMedian::from_values(&values, &weights).expect("oracle should build");

        for left in 0..values.len() {
            for right in left..values.len() {
                let through_cache = oracle
                    .mu_dist(left, right)
                    .expect("in-range query should succeed");
                let direct = weighted_median_dist(oracle.series().range(left, right));
                assert_eq!(through_cache, direct, "range [{left}, {right}]");
            }
        }
    }

    #[test]
    fn rejects_reversed_and_overrunning_ranges() {
        let mut oracle = RangeMedian::unweighted(&[1.0, 2.0, 3.0]).expect("oracle should build");

        let reversed = oracle.mu(2, 1).expect_err("left > right must fail");
        assert!(matches!(reversed, StepError::OutOfRange(_)));

        let overrun = oracle.dist(0, 3).expect_err("right >= n must fail");
        assert!(matches!(overrun, StepError::OutOfRange(_)));
        assert!(overrun.to_string().contains("length 3"));
    }

    #[test]
    fn empty_series_rejects_every_query() {
        let mut oracle = RangeMedian::unweighted(&[]).expect("empty oracle should build");
        assert!(oracle.is_empty());
        let err = oracle.mu(0, 0).expect_err("query on empty series must fail");
        assert!(matches!(err, StepError::OutOfRange(_)));
    }

    #[test]
    fn precompute_is_a_successful_noop() {
        let mut oracle = RangeMedian::unweighted(&[1.0, 2.0]).expect("oracle should build");
        oracle.precompute(20, 0, 2);
        assert_eq!(oracle.mu(0, 1).expect("query should succeed"), 1.5);
    }
}
