// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::partition::{bellman_partition, validate_window};
use stepfit_core::{Segmentation, StepError};
use stepfit_costs::RangeMedian;

// Interval-size cap used by the approximate solver; truncation it
// introduces is repaired afterwards by merge_pieces.
pub(crate) const APPROX_MAX_SIZE: usize = 20;

/// Window and size constraints for [`solve_potts`].
///
/// `min_pos`/`max_pos` default to the full series.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PottsConfig {
    pub min_size: usize,
    pub max_size: usize,
    pub min_pos: Option<usize>,
    pub max_pos: Option<usize>,
}

impl Default for PottsConfig {
    fn default() -> Self {
        Self {
            min_size: 2,
            max_size: usize::MAX,
            min_pos: None,
            max_pos: None,
        }
    }
}

/// Fits a penalized stepwise-constant function (Potts model) to the
/// oracle's series by minimizing
///
/// ```text
/// F[x] = gamma * J(x) + sum(weight * |y - x|)
/// ```
///
/// where `J(x)` counts the level changes of the fit `x`. The dynamic
/// program is exact within the configured window and size constraints.
///
/// An empty series yields an empty fit. When `min_size` covers the
/// whole window, the fit is a single segment spanning the series. A
/// window that admits no size-respecting partition at all is reported
/// as `InvalidBounds`.
pub fn solve_potts(
    oracle: &mut RangeMedian,
    gamma: f64,
    config: &PottsConfig,
) -> Result<Segmentation, StepError> {
    if oracle.is_empty() {
        return Ok(Segmentation::default());
    }

    let min_pos = config.min_pos.unwrap_or(0);
    let max_pos = config.max_pos.unwrap_or(oracle.len());
    validate_window(oracle, config.min_size, config.max_size, min_pos, max_pos)?;

    if config.min_size >= max_pos - min_pos {
        let n = oracle.len();
        let (mu, dist) = oracle.mu_dist(0, n - 1)?;
        return Ok(Segmentation {
            right: vec![n],
            values: vec![mu],
            dists: vec![dist],
        });
    }

    let (best_cost, backpointers) = bellman_partition(
        oracle,
        gamma,
        config.min_size,
        config.max_size,
        min_pos,
        max_pos,
    )?;

    if !best_cost[max_pos - min_pos].is_finite() {
        return Err(StepError::invalid_bounds(format!(
            "no feasible partition of [{min_pos}, {max_pos}) with segment sizes in [{}, {}]",
            config.min_size, config.max_size
        )));
    }

    segmentation_from_partition(oracle, &backpointers, min_pos, max_pos)
}

// Converts the backpointer representation into an interval list by
// walking predecessors backward from the window's end.
pub(crate) fn segmentation_from_partition(
    oracle: &mut RangeMedian,
    backpointers: &[isize],
    min_pos: usize,
    max_pos: usize,
) -> Result<Segmentation, StepError> {
    let mut right = Vec::new();
    let mut values = Vec::new();
    let mut dists = Vec::new();

    let mut r = max_pos as isize - 1;
    while r >= min_pos as isize {
        let l = backpointers[r as usize - min_pos];
        let start = (l + 1) as usize;
        let (mu, dist) = oracle.mu_dist(start, r as usize)?;
        right.push(r as usize + 1);
        values.push(mu);
        dists.push(dist);
        r = l;
    }

    right.reverse();
    values.reverse();
    dists.reverse();
    Ok(Segmentation {
        right,
        values,
        dists,
    })
}

/// Combines consecutive segments of a full-range fit whenever that
/// lowers the Potts cost, then nudges the surviving boundaries within
/// `max_size` positions if that lowers the data term further. Repairs
/// the sub-optimality the approximate solver's interval-size cap can
/// introduce.
pub fn merge_pieces(
    oracle: &mut RangeMedian,
    gamma: f64,
    segmentation: Segmentation,
    max_size: usize,
) -> Result<Segmentation, StepError> {
    let mut right = segmentation.right;

    loop {
        let mut min_change = 0.0;
        let mut min_change_j = right.len();

        let mut l = 0usize;
        for j in 1..right.len() {
            if (min_change_j as isize) < j as isize - 2 {
                break;
            }

            let merged = oracle.dist(l, right[j] - 1)?;
            let split = oracle.dist(l, right[j - 1] - 1)?
                + oracle.dist(right[j - 1], right[j] - 1)?
                + gamma;
            let change = merged - split;
            if change <= min_change {
                min_change = change;
                min_change_j = j - 1;
            }
            l = right[j - 1];
        }

        if min_change_j < right.len() {
            right.remove(min_change_j);
        } else {
            break;
        }
    }

    // The size-capped solve can misplace boundaries by up to the cap;
    // try offsets in that radius and keep any strict improvement.
    let mut l = 0usize;
    for j in 1..right.len() {
        let mut prev_score =
            oracle.dist(l, right[j - 1] - 1)? + oracle.dist(right[j - 1], right[j] - 1)?;
        let mut new_off: isize = 0;
        let radius = max_size as isize;
        for off in -radius..=radius {
            let mid = right[j - 1] as isize + off;
            if mid - 1 <= l as isize || mid >= right[j] as isize - 1 || off == 0 {
                continue;
            }
            let new_score =
                oracle.dist(l, (mid - 1) as usize)? + oracle.dist(mid as usize, right[j] - 1)?;
            if new_score < prev_score {
                new_off = off;
                prev_score = new_score;
            }
        }

        if new_off != 0 {
            right[j - 1] = (right[j - 1] as isize + new_off) as usize;
        }
        l = right[j - 1];
    }

    let mut values = Vec::with_capacity(right.len());
    let mut dists = Vec::with_capacity(right.len());
    let mut l = 0usize;
    for &r in &right {
        let (mu, dist) = oracle.mu_dist(l, r - 1)?;
        values.push(mu);
        dists.push(dist);
        l = r;
    }

    Ok(Segmentation {
        right,
        values,
        dists,
    })
}

/// Approximate Potts fit in linear time: the exact solver with the
/// interval size capped, followed by [`merge_pieces`]. The default
/// gamma is `3 * dist(0, n-1) * ln(n) / n`.
pub fn solve_potts_approx(
    oracle: &mut RangeMedian,
    gamma: Option<f64>,
    config: &PottsConfig,
) -> Result<Segmentation, StepError> {
    let n = oracle.len();
    if n == 0 {
        return Ok(Segmentation::default());
    }

    let gamma = match gamma {
        Some(gamma) => gamma,
        None => {
            let dist = oracle.dist(0, n - 1)?;
            3.0 * dist * (n as f64).ln() / n as f64
        }
    };

    let capped = PottsConfig {
        max_size: APPROX_MAX_SIZE,
        ..config.clone()
    };
    let fit = solve_potts(oracle, gamma, &capped)?;
    merge_pieces(oracle, gamma, fit, APPROX_MAX_SIZE)
}
