//! Working-fluid definitions.

use std::fmt;
use std::str::FromStr;

use crate::error::FluidError;

/// Working fluid of the well.
///
/// Geothermal brine is modelled as pure water.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Species {
    /// Water (H₂O)
    #[default]
    Water,
}

impl Species {
    pub const ALL: [Species; 1] = [Species::Water];

    pub fn key(&self) -> &'static str {
        match self {
            Species::Water => "Water",
        }
    }

    /// Map to rfluids Pure enum (internal use for CoolProp backend).
    pub(crate) fn rfluids_pure(&self) -> rfluids::substance::Pure {
        use rfluids::substance::Pure;
        match self {
            Species::Water => Pure::Water,
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Species {
    type Err = FluidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "water" | "h2o" => Ok(Species::Water),
            _ => Err(FluidError::NotSupported {
                what: "only water is supported as working fluid",
            }),
        }
    }
}
