// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

pub mod autogamma;
pub mod partition;
pub mod potts;
pub mod regressions;

pub use autogamma::{StepFit, golden_search, solve_potts_autogamma};
pub use partition::find_best_partition;
pub use potts::{PottsConfig, merge_pieces, solve_potts, solve_potts_approx};
pub use regressions::{Regression, detect_regressions, filter_outliers};

/// Offline solver namespace placeholder.
pub fn crate_name() -> &'static str {
    let _ = (stepfit_core::crate_name(), stepfit_costs::crate_name());
    "stepfit-offline"
}
