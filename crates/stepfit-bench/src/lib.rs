// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

/// Benchmark namespace placeholder.
pub fn crate_name() -> &'static str {
    let _ = (
        stepfit_core::crate_name(),
        stepfit_costs::crate_name(),
        stepfit_offline::crate_name(),
    );
    "stepfit-bench"
}
