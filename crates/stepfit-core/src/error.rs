// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use thiserror::Error;

/// Failure taxonomy shared by every stepfit crate.
///
/// All failures are reported synchronously to the immediate caller;
/// nothing is retried internally and nothing is swallowed. An aborted
/// operation leaves no partial state behind beyond cache entries that
/// were already legitimately computed.
#[derive(Error, Debug)]
pub enum StepError {
    /// Construction-time shape or value problem in the input data.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Query indices outside `[0, n)` or `left > right`.
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// Partition size or position constraints violated.
    #[error("invalid bounds: {0}")]
    InvalidBounds(String),

    /// Allocation sizing overflowed or exceeded what the host can hold.
    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),
}

impl StepError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::OutOfRange(message.into())
    }

    pub fn invalid_bounds(message: impl Into<String>) -> Self {
        Self::InvalidBounds(message.into())
    }

    pub fn resource_exhausted(message: impl Into<String>) -> Self {
        Self::ResourceExhausted(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::StepError;

    #[test]
    fn display_is_stable_per_variant() {
        assert_eq!(
            StepError::invalid_input("length mismatch").to_string(),
            "invalid input: length mismatch"
        );
        assert_eq!(
            StepError::out_of_range("right=9, n=4").to_string(),
            "out of range: right=9, n=4"
        );
        assert_eq!(
            StepError::invalid_bounds("min_size=0").to_string(),
            "invalid bounds: min_size=0"
        );
        assert_eq!(
            StepError::resource_exhausted("cache table overflow").to_string(),
            "resource exhausted: cache table overflow"
        );
    }

    #[test]
    fn constructors_map_to_matching_variants() {
        assert!(matches!(
            StepError::invalid_input("x"),
            StepError::InvalidInput(_)
        ));
        assert!(matches!(
            StepError::out_of_range("x"),
            StepError::OutOfRange(_)
        ));
        assert!(matches!(
            StepError::invalid_bounds("x"),
            StepError::InvalidBounds(_)
        ));
        assert!(matches!(
            StepError::resource_exhausted("x"),
            StepError::ResourceExhausted(_)
        ));
    }
}
