//! Assembled march output.

use crate::detector::FlashEvent;
use crate::error::{WellboreError, WellboreResult};
use crate::state::{FlashState, ProfileNode};
use gf_core::units::{MassRate, SpecEnthalpy};
use serde::{Deserialize, Serialize};

/// Counters for conditions the march recovered from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarchDiagnostics {
    /// Trial pressures raised to the floor.
    pub floor_clamps: usize,
    /// Two-phase nodes with `h_g <= h_f`, quality forced to 0.
    pub degenerate_saturation: usize,
    /// Nodes left undefined by a failed lookup.
    pub lookup_failures: usize,
}

/// Ordered node sequence from reservoir to wellhead.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultProfile {
    nodes: Vec<ProfileNode>,
    flash_event: Option<FlashEvent>,
    diagnostics: MarchDiagnostics,
    reservoir_enthalpy: SpecEnthalpy,
}

impl ResultProfile {
    pub(crate) fn new(
        nodes: Vec<ProfileNode>,
        flash_event: Option<FlashEvent>,
        diagnostics: MarchDiagnostics,
        reservoir_enthalpy: SpecEnthalpy,
    ) -> Self {
        Self {
            nodes,
            flash_event,
            diagnostics,
            reservoir_enthalpy,
        }
    }

    pub fn nodes(&self) -> &[ProfileNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn flash_event(&self) -> Option<FlashEvent> {
        self.flash_event
    }

    pub fn diagnostics(&self) -> MarchDiagnostics {
        self.diagnostics
    }

    pub fn reservoir_enthalpy(&self) -> SpecEnthalpy {
        self.reservoir_enthalpy
    }

    /// Defined nodes in depth order.
    pub fn resolved(&self) -> impl Iterator<Item = &FlashState> + '_ {
        self.nodes.iter().filter_map(ProfileNode::as_resolved)
    }

    pub fn reservoir(&self) -> Option<&FlashState> {
        self.nodes.first().and_then(ProfileNode::as_resolved)
    }

    /// Shallowest defined node.
    pub fn wellhead(&self) -> Option<&FlashState> {
        self.nodes.iter().rev().find_map(ProfileNode::as_resolved)
    }

    /// Wellhead conditions for the surface plant.
    pub fn handoff(&self, total_mass_flow: MassRate) -> WellboreResult<WellheadHandoff> {
        if !total_mass_flow.value.is_finite() || total_mass_flow.value <= 0.0 {
            return Err(WellboreError::InvalidArg {
                what: "total mass flow must be positive and finite",
            });
        }
        let head = self.wellhead().ok_or(WellboreError::InvalidArg {
            what: "profile has no defined node",
        })?;
        Ok(WellheadHandoff {
            wellhead_pressure_pa: head.pressure.value,
            wellhead_quality: head.quality,
            total_mass_flow_kg_s: total_mass_flow.value,
        })
    }
}

/// Record passed from the wellbore to the surface plant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WellheadHandoff {
    pub wellhead_pressure_pa: f64,
    pub wellhead_quality: f64,
    pub total_mass_flow_kg_s: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{NodeFault, Regime, UndefinedNode};
    use gf_core::units::{bar, degc, kg_m3, kgps, m, pa_s};

    fn state(index: usize, depth: f64, p_bar: f64, quality: f64) -> FlashState {
        FlashState {
            index,
            depth: m(depth),
            pressure: bar(p_bar),
            temperature: degc(200.0),
            enthalpy: 1.0e6,
            enthalpy_gain: 0.0,
            quality,
            void_fraction: 0.0,
            mixture_density: kg_m3(800.0),
            homogeneous_density: kg_m3(800.0),
            mixture_viscosity: pa_s(1e-4),
            regime: if quality > 0.0 {
                Regime::TwoPhase
            } else {
                Regime::Liquid
            },
        }
    }

    #[test]
    fn wellhead_skips_trailing_undefined_node() {
        let nodes = vec![
            ProfileNode::Resolved(state(0, 100.0, 45.0, 0.0)),
            ProfileNode::Resolved(state(1, 50.0, 20.0, 0.1)),
            ProfileNode::Undefined(UndefinedNode {
                index: 2,
                depth: m(0.0),
                pressure: bar(20.0),
                fault: NodeFault::lookup("boom"),
            }),
        ];
        let profile = ResultProfile::new(nodes, None, MarchDiagnostics::default(), 1.0e6);

        assert_eq!(profile.wellhead().unwrap().index, 1);
        assert_eq!(profile.resolved().count(), 2);
        assert_eq!(profile.reservoir().unwrap().index, 0);

        let handoff = profile.handoff(kgps(50.0)).unwrap();
        assert_eq!(handoff.wellhead_pressure_pa, 20.0e5);
        assert_eq!(handoff.wellhead_quality, 0.1);
        assert_eq!(handoff.total_mass_flow_kg_s, 50.0);
    }

    #[test]
    fn handoff_rejects_bad_mass_flow() {
        let profile = ResultProfile::new(
            vec![ProfileNode::Resolved(state(0, 0.0, 5.0, 0.0))],
            None,
            MarchDiagnostics::default(),
            1.0e6,
        );
        assert!(profile.handoff(kgps(0.0)).is_err());
        assert!(profile.handoff(kgps(f64::NAN)).is_err());
    }
}
