//! CoolProp-based property oracle.

use crate::error::{FluidError, FluidResult};
use crate::oracle::{PropertyOracle, validation};
use crate::species::Species;
use crate::state::{PhaseProperties, Property, StateInput};
use rfluids::prelude::*;

/// CoolProp backend for property lookups.
///
/// Thread-safe: rfluids Fluid instances are created per lookup and never shared.
pub struct CoolPropOracle {}

impl CoolPropOracle {
    /// Create a new CoolProp oracle.
    pub fn new() -> Self {
        Self {}
    }

    /// Create a Fluid instance at the given state.
    fn fluid_in(&self, species: Species, input: StateInput) -> FluidResult<Fluid> {
        validation::validate_input(&input)?;

        let (first, second) = match input {
            StateInput::PT { p, t } => (
                FluidInput::pressure(p.value),
                FluidInput::temperature(t.value),
            ),
            StateInput::PQ { p, q } => (FluidInput::pressure(p.value), FluidInput::quality(q)),
            StateInput::TQ { t, q } => (FluidInput::temperature(t.value), FluidInput::quality(q)),
            StateInput::PH { p, h } => (FluidInput::pressure(p.value), FluidInput::enthalpy(h)),
        };

        Fluid::from(species.rfluids_pure())
            .in_state(first, second)
            .map_err(|e| FluidError::Backend {
                message: format!("rfluids error at {}: {}", input, e),
            })
    }

    /// Read one output from an already-resolved fluid.
    fn output(fluid: &mut Fluid, target: Property) -> FluidResult<f64> {
        let value = match target {
            Property::Pressure => fluid.pressure(),
            Property::Temperature => fluid.temperature(),
            Property::Enthalpy => fluid.enthalpy(),
            Property::Density => fluid.density(),
            Property::Viscosity => fluid.dynamic_viscosity(),
            Property::Quality => fluid.quality(),
        }
        .map_err(|e| FluidError::Backend {
            message: format!("rfluids error getting {}: {}", target, e),
        })?;

        validation::validate_output(target, value)
    }
}

impl Default for CoolPropOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyOracle for CoolPropOracle {
    fn name(&self) -> &str {
        "CoolProp"
    }

    fn supports(&self, species: Species) -> bool {
        matches!(species, Species::Water)
    }

    fn property(&self, target: Property, input: StateInput, species: Species) -> FluidResult<f64> {
        let mut fluid = self.fluid_in(species, input)?;
        Self::output(&mut fluid, target)
    }

    fn phase_properties(&self, input: StateInput, species: Species) -> FluidResult<PhaseProperties> {
        // One backend state, three outputs
        let mut fluid = self.fluid_in(species, input)?;
        let h = Self::output(&mut fluid, Property::Enthalpy)?;
        let rho = Self::output(&mut fluid, Property::Density)?;
        let mu = Self::output(&mut fluid, Property::Viscosity)?;
        validation::validate_phase(h, rho, mu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gf_core::units::pa;

    #[test]
    fn oracle_name() {
        let oracle = CoolPropOracle::new();
        assert_eq!(oracle.name(), "CoolProp");
    }

    #[test]
    fn supports_water() {
        let oracle = CoolPropOracle::new();
        assert!(oracle.supports(Species::Water));
    }

    #[test]
    fn rejects_invalid_quality_before_backend() {
        let oracle = CoolPropOracle::new();
        let err = oracle
            .property(
                Property::Enthalpy,
                StateInput::PQ {
                    p: pa(1.0e5),
                    q: 1.5,
                },
                Species::Water,
            )
            .unwrap_err();
        assert!(matches!(err, FluidError::InvalidArg { .. }));
    }
}
