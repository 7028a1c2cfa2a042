// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

pub mod error;
pub mod segmentation;
pub mod series;

pub use error::StepError;
pub use segmentation::Segmentation;
pub use series::{Observation, WeightedSeries};

/// Core shared types for stepfit.
pub fn crate_name() -> &'static str {
    "stepfit-core"
}
