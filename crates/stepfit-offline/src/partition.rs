// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use stepfit_core::StepError;
use stepfit_costs::RangeMedian;

pub(crate) fn validate_window(
    oracle: &RangeMedian,
    min_size: usize,
    max_size: usize,
    min_pos: usize,
    max_pos: usize,
) -> Result<(), StepError> {
    if min_size == 0 || min_size > max_size {
        return Err(StepError::invalid_bounds(format!(
            "segment sizes require 0 < min_size <= max_size; got min_size={min_size}, max_size={max_size}"
        )));
    }
    let n = oracle.len();
    if min_pos > max_pos || max_pos > n {
        return Err(StepError::invalid_bounds(format!(
            "window requires min_pos <= max_pos <= n; got min_pos={min_pos}, max_pos={max_pos}, n={n}"
        )));
    }
    Ok(())
}

/// Bellman recursion for the optimal penalized partition.
///
/// Returns `(best_cost, backpointers)`: `best_cost[i]` is the minimum
/// total cost covering the window up to position `min_pos + i`
/// (`best_cost[0] = -gamma`, so one gamma is charged per segment
/// actually used), and `backpointers[right - min_pos]` holds
/// `left - 1` for the best segment `[left, right]`. Positions that no
/// size-respecting segment can reach keep an infinite cost; their
/// backpointers stay at the `min_pos - 1` placeholder.
pub(crate) fn bellman_partition(
    oracle: &mut RangeMedian,
    gamma: f64,
    min_size: usize,
    max_size: usize,
    min_pos: usize,
    max_pos: usize,
) -> Result<(Vec<f64>, Vec<isize>), StepError> {
    validate_window(oracle, min_size, max_size, min_pos, max_pos)?;

    let span = max_pos - min_pos;
    let mut best_cost = vec![f64::INFINITY; span + 1];
    best_cost[0] = -gamma;
    let mut backpointers = vec![min_pos as isize - 1; span];

    for right in min_pos..max_pos {
        let window_start = (right + 1).saturating_sub(max_size).max(min_pos);
        let window_end = (right + 2).saturating_sub(min_size).max(min_pos);

        for left in window_start..window_end {
            let (_, dist) = oracle.mu_dist(left, right)?;
            let candidate = best_cost[left - min_pos] + gamma + dist;
            // Non-strict: among equal costs the largest left wins,
            // favoring a shorter final segment.
            if candidate <= best_cost[right + 1 - min_pos] {
                best_cost[right + 1 - min_pos] = candidate;
                backpointers[right - min_pos] = left as isize - 1;
            }
        }
    }

    Ok((best_cost, backpointers))
}

/// Minimum-cost partition of `[min_pos, max_pos)` into contiguous
/// segments with lengths in `[min_size, max_size]`, each charged its
/// weighted deviation plus `gamma`.
///
/// Returns the backpointer array: entry `right - min_pos` is the
/// start-minus-one index of the best segment ending at `right`. The
/// segment list follows by reading `backpointers[current - min_pos]`
/// from `current = max_pos - 1` and stepping to the returned
/// predecessor until it drops below `min_pos`.
///
/// The recursion queries the range-median oracle through its cache;
/// O((max_pos-min_pos)·(max_size-min_size)) queries in total.
pub fn find_best_partition(
    oracle: &mut RangeMedian,
    gamma: f64,
    min_size: usize,
    max_size: usize,
    min_pos: usize,
    max_pos: usize,
) -> Result<Vec<isize>, StepError> {
    bellman_partition(oracle, gamma, min_size, max_size, min_pos, max_pos)
        .map(|(_, backpointers)| backpointers)
}
