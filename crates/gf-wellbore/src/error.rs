//! Error types for wellbore marching.

use gf_core::GfError;
use gf_fluids::FluidError;
use thiserror::Error;

/// Errors that stop a march before any profile exists.
///
/// Lookup failures at interior nodes are not errors: they become
/// [`crate::ProfileNode::Undefined`] entries in the profile.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WellboreError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Reservoir state could not be resolved: {source}")]
    Reservoir {
        #[source]
        source: FluidError,
    },
}

pub type WellboreResult<T> = Result<T, WellboreError>;

impl From<GfError> for WellboreError {
    fn from(e: GfError) -> Self {
        match e {
            GfError::InvalidArg { what }
            | GfError::NonFinite { what, .. }
            | GfError::OutOfRange { what, .. } => WellboreError::InvalidArg { what },
            GfError::Invariant { .. } => WellboreError::InvalidArg {
                what: "internal invariant violated",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reservoir_error_keeps_source() {
        let err = WellboreError::Reservoir {
            source: FluidError::NotSupported {
                what: "superheated vapour",
            },
        };
        assert!(err.to_string().contains("superheated vapour"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn core_errors_become_invalid_args() {
        let err: WellboreError = GfError::NonFinite {
            what: "slip parameter",
            value: f64::NAN,
        }
        .into();
        assert_eq!(
            err,
            WellboreError::InvalidArg {
                what: "slip parameter"
            }
        );
    }
}
