// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use stepfit_core::StepError;

// Table size per observation, tuned for the short-window access pattern
// of the partition solver; the additive constant leans prime because
// slot selection is a modulo.
const SLOTS_PER_OBSERVATION: usize = 37;
const SLOT_BASE: usize = 401;

#[derive(Clone, Copy, Debug, PartialEq)]
struct RangeEntry {
    left: usize,
    right: usize,
    mu: f64,
    dist: f64,
}

/// Fixed-capacity memoizer for `(left, right) -> (mu, dist)` results.
///
/// A plain table of optional entries addressed by a pairing-function
/// hash: no probing, no chaining, no eviction policy. `set` overwrites
/// whatever occupies the slot, so a colliding range silently discards
/// the earlier entry; `get` answers only on an exact `(left, right)`
/// match. Misses cost a recomputation, hits can never return a stale or
/// wrong result.
#[derive(Clone, Debug)]
pub struct RangeCache {
    slots: Vec<Option<RangeEntry>>,
}

impl RangeCache {
    /// Sizes the table for a series of `n` observations.
    pub fn for_series_len(n: usize) -> Result<Self, StepError> {
        let capacity = n
            .checked_mul(SLOTS_PER_OBSERVATION)
            .and_then(|c| c.checked_add(SLOT_BASE))
            .ok_or_else(|| {
                StepError::resource_exhausted(format!(
                    "cache table size overflow for series of length {n}"
                ))
            })?;
        Ok(Self {
            slots: vec![None; capacity],
        })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    // Cantor-style enumeration of ordered pairs, reduced modulo the
    // table size. Widening to u128 keeps the intermediate products
    // exact for any sequence length that fits in memory.
    fn slot(&self, left: usize, right: usize) -> usize {
        debug_assert!(left <= right, "slot requires left <= right");
        let d = (right - left) as u128;
        let s = d + left as u128;
        let k = s * (s + 1) / 2 + d;
        (k % self.slots.len() as u128) as usize
    }

    /// Exact-match lookup; empty slots and colliding ranges both miss.
    pub fn get(&self, left: usize, right: usize) -> Option<(f64, f64)> {
        match self.slots[self.slot(left, right)] {
            Some(entry) if entry.left == left && entry.right == right => {
                Some((entry.mu, entry.dist))
            }
            _ => None,
        }
    }

    /// Unconditionally overwrites the slot for `(left, right)`.
    pub fn set(&mut self, left: usize, right: usize, mu: f64, dist: f64) {
        let index = self.slot(left, right);
        self.slots[index] = Some(RangeEntry {
            left,
            right,
            mu,
            dist,
        });
    }
}
