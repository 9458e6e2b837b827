//! Error types for surface-plant sweeps.

use gf_core::GfError;
use gf_fluids::FluidError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlantError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Property lookup failed: {source}")]
    Fluid {
        #[source]
        source: FluidError,
    },
}

pub type PlantResult<T> = Result<T, PlantError>;

impl From<FluidError> for PlantError {
    fn from(source: FluidError) -> Self {
        PlantError::Fluid { source }
    }
}

impl From<GfError> for PlantError {
    fn from(e: GfError) -> Self {
        match e {
            GfError::InvalidArg { what }
            | GfError::NonFinite { what, .. }
            | GfError::OutOfRange { what, .. } => PlantError::InvalidArg { what },
            GfError::Invariant { .. } => PlantError::InvalidArg {
                what: "internal invariant violated",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fluid_error_converts() {
        let err: PlantError = FluidError::OutOfRange {
            what: "state outside saturation table",
        }
        .into();
        assert!(matches!(err, PlantError::Fluid { .. }));
        assert!(err.to_string().contains("saturation table"));
    }
}
