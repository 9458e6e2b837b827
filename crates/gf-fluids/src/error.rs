//! Fluid property errors.

use gf_core::GfError;
use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur during a property lookup.
///
/// Any of these is a failed lookup from the caller's point of view: the state
/// could not be resolved by the oracle.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Non-physical values (negative density, pressure, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Value out of the backend's valid range.
    #[error("Value out of range for {what}")]
    OutOfRange { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Operation not supported (e.g. superheated vapour in the table backend).
    #[error("Not supported: {what}")]
    NotSupported { what: &'static str },

    /// Backend (CoolProp) error.
    #[error("Backend error: {message}")]
    Backend { message: String },
}

impl From<GfError> for FluidError {
    fn from(err: GfError) -> Self {
        match err {
            GfError::NonFinite { what, .. } => FluidError::NonPhysical { what },
            GfError::InvalidArg { what } => FluidError::InvalidArg { what },
            GfError::OutOfRange { what, .. } => FluidError::OutOfRange { what },
            GfError::Invariant { what } => FluidError::Backend { message: what },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FluidError::NonPhysical { what: "pressure" };
        assert!(err.to_string().contains("pressure"));

        let err = FluidError::Backend {
            message: "CoolProp failed".into(),
        };
        assert!(err.to_string().contains("CoolProp"));
    }

    #[test]
    fn gf_error_to_fluid_error() {
        let err: FluidError = GfError::NonFinite {
            what: "quality",
            value: f64::NAN,
        }
        .into();
        assert_eq!(err, FluidError::NonPhysical { what: "quality" });
    }
}
