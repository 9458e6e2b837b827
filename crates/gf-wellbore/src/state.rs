//! Per-node records of a march.

use gf_core::units::{Density, DynVisc, Length, Pressure, SpecEnthalpy, Temperature};
use std::fmt;

/// Flow regime at a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Regime {
    /// Single-phase compressed liquid (x = 0).
    Liquid,
    /// Flashing two-phase mixture (x > 0).
    TwoPhase,
}

impl Regime {
    pub fn label(self) -> &'static str {
        match self {
            Self::Liquid => "liquid",
            Self::TwoPhase => "two-phase",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Thermodynamic and flow state at one defined node.
#[derive(Debug, Clone, PartialEq)]
pub struct FlashState {
    pub index: usize,
    /// Depth below the wellhead.
    pub depth: Length,
    /// Absolute pressure, never below the floor.
    pub pressure: Pressure,
    /// Reservoir temperature while liquid, saturation temperature once flashing.
    pub temperature: Temperature,
    /// Reservoir enthalpy [J/kg]; the rise is isoenthalpic.
    pub enthalpy: SpecEnthalpy,
    /// Enthalpy reconstructed by the closure minus reservoir enthalpy [J/kg].
    pub enthalpy_gain: f64,
    /// Vapour mass fraction in [0, 1].
    pub quality: f64,
    /// Vapour volume fraction in [0, 1].
    pub void_fraction: f64,
    /// Void-fraction-weighted density used by the momentum update.
    pub mixture_density: Density,
    /// Quality-weighted harmonic density used for reporting.
    pub homogeneous_density: Density,
    pub mixture_viscosity: DynVisc,
    pub regime: Regime,
}

impl FlashState {
    /// Specific volume [m³/kg] from the homogeneous density.
    pub fn specific_volume(&self) -> f64 {
        1.0 / self.homogeneous_density.value
    }
}

/// Why a node could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    PropertyLookup,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PropertyLookup => f.write_str("property lookup"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeFault {
    pub kind: FaultKind,
    pub message: String,
}

impl NodeFault {
    pub fn lookup(message: impl Into<String>) -> Self {
        Self {
            kind: FaultKind::PropertyLookup,
            message: message.into(),
        }
    }
}

impl fmt::Display for NodeFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.kind, self.message)
    }
}

/// A node whose properties could not be resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct UndefinedNode {
    pub index: usize,
    pub depth: Length,
    /// Last valid pressure carried into this node.
    pub pressure: Pressure,
    pub fault: NodeFault,
}

/// One entry of a profile.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileNode {
    Resolved(FlashState),
    Undefined(UndefinedNode),
}

impl ProfileNode {
    pub fn index(&self) -> usize {
        match self {
            Self::Resolved(s) => s.index,
            Self::Undefined(u) => u.index,
        }
    }

    pub fn depth(&self) -> Length {
        match self {
            Self::Resolved(s) => s.depth,
            Self::Undefined(u) => u.depth,
        }
    }

    pub fn pressure(&self) -> Pressure {
        match self {
            Self::Resolved(s) => s.pressure,
            Self::Undefined(u) => u.pressure,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub fn as_resolved(&self) -> Option<&FlashState> {
        match self {
            Self::Resolved(s) => Some(s),
            Self::Undefined(_) => None,
        }
    }

    pub fn regime(&self) -> Option<Regime> {
        self.as_resolved().map(|s| s.regime)
    }

    pub fn fault(&self) -> Option<&NodeFault> {
        match self {
            Self::Resolved(_) => None,
            Self::Undefined(u) => Some(&u.fault),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gf_core::units::{bar, degc, kg_m3, m, pa_s};

    fn liquid_node() -> FlashState {
        FlashState {
            index: 0,
            depth: m(2500.0),
            pressure: bar(45.0),
            temperature: degc(250.0),
            enthalpy: 1.086e6,
            enthalpy_gain: 0.0,
            quality: 0.0,
            void_fraction: 0.0,
            mixture_density: kg_m3(800.0),
            homogeneous_density: kg_m3(800.0),
            mixture_viscosity: pa_s(1.06e-4),
            regime: Regime::Liquid,
        }
    }

    #[test]
    fn specific_volume_is_inverse_homogeneous_density() {
        assert!((liquid_node().specific_volume() - 1.25e-3).abs() < 1e-15);
    }

    #[test]
    fn node_accessors() {
        let resolved = ProfileNode::Resolved(liquid_node());
        assert!(resolved.is_defined());
        assert_eq!(resolved.regime(), Some(Regime::Liquid));
        assert!(resolved.fault().is_none());

        let undefined = ProfileNode::Undefined(UndefinedNode {
            index: 4,
            depth: m(100.0),
            pressure: bar(12.0),
            fault: NodeFault::lookup("table miss"),
        });
        assert!(!undefined.is_defined());
        assert_eq!(undefined.index(), 4);
        assert_eq!(undefined.pressure(), bar(12.0));
        assert_eq!(undefined.regime(), None);
        assert_eq!(
            undefined.fault().unwrap().to_string(),
            "property lookup failed: table miss"
        );
    }
}
