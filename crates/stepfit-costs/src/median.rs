// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use stepfit_core::Observation;

/// Weighted median and weighted absolute deviation of a window.
///
/// Returns `(mu, dist)` where `mu` splits the window into two halves of
/// equal total weight and `dist = sum(weight * |value - mu|)`.
///
/// The window is copied and sorted ascending by value; the sort is
/// stable, so observations with equal values keep their input order
/// (equal values contribute equally, the result does not depend on
/// their order). Scanning the sorted copy accumulates weight until the
/// midpoint `total_weight / 2` is reached:
///
/// - strictly past the midpoint: `mu` is that observation's value;
/// - exactly at the midpoint: `mu` is the average of that value and the
///   next one (the even-weight-split rule), or the value itself when no
///   next observation exists;
/// - never reached (floating-point summation shortfall): `mu` falls
///   back to the largest value.
///
/// An empty window yields `(0, 0)`. With every weight at 1 this
/// degenerates to the textbook median and mean-absolute-deviation sum.
///
/// Cost is O(k log k) in the window length k, from the sort.
pub fn weighted_median_dist(observations: &[Observation]) -> (f64, f64) {
    if observations.is_empty() {
        return (0.0, 0.0);
    }

    let mut sorted = observations.to_vec();
    sorted.sort_by(|a, b| a.value.total_cmp(&b.value));

    let total_weight: f64 = sorted.iter().map(|o| o.weight).sum();
    let midpoint = total_weight / 2.0;

    let mut mu = sorted[sorted.len() - 1].value;
    let mut running_weight = 0.0;
    for (k, observation) in sorted.iter().enumerate() {
        running_weight += observation.weight;
        if running_weight > midpoint {
            mu = observation.value;
            break;
        }
        if running_weight == midpoint {
            mu = match sorted.get(k + 1) {
                Some(next) => (observation.value + next.value) / 2.0,
                None => observation.value,
            };
            break;
        }
    }

    let dist = observations
        .iter()
        .map(|o| o.weight * (o.value - mu).abs())
        .sum();

    (mu, dist)
}
