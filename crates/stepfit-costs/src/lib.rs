// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

pub mod cache;
pub mod median;
pub mod oracle;

pub use cache::RangeCache;
pub use median::weighted_median_dist;
pub use oracle::RangeMedian;

/// Segment cost oracle namespace placeholder.
pub fn crate_name() -> &'static str {
    let _ = stepfit_core::crate_name();
    "stepfit-costs"
}
