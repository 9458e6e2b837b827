//! Two-phase mixing closures.
//!
//! Two density rules coexist and are not interchangeable:
//! [`slip_mixture_density`] weights by void fraction and drives the momentum
//! update, [`homogeneous_density`] weights by quality and is reported as the
//! mixture's specific volume.

use gf_core::numeric::clip_unit;
use gf_fluids::PhaseProperties;

/// Default drift-flux distribution parameter.
pub const DEFAULT_SLIP: f64 = 1.2;

/// Drift-flux void fraction for quality `x`.
///
/// `α = (C0·x/ρ_G) / (C0·x/ρ_G + (1 − x)/ρ_L)`, zero for `x <= 0`.
pub fn drift_flux_void_fraction(x: f64, rho_l: f64, rho_g: f64, c0: f64) -> f64 {
    if !(x > 0.0) {
        return 0.0;
    }
    let vapor = c0 * x / rho_g;
    let liquid = (1.0 - x) / rho_l;
    let total = vapor + liquid;
    if !(total > 0.0) || !total.is_finite() {
        return 0.0;
    }
    clip_unit(vapor / total)
}

/// Void-fraction-weighted mixture density [kg/m³].
pub fn slip_mixture_density(alpha: f64, rho_l: f64, rho_g: f64) -> f64 {
    alpha * rho_g + (1.0 - alpha) * rho_l
}

/// Quality-weighted harmonic mixture density [kg/m³].
pub fn homogeneous_density(x: f64, rho_l: f64, rho_g: f64) -> f64 {
    1.0 / (x / rho_g + (1.0 - x) / rho_l)
}

/// Quality-weighted mixture viscosity [Pa·s].
pub fn mixture_viscosity(x: f64, mu_l: f64, mu_g: f64) -> f64 {
    (1.0 - x) * mu_l + x * mu_g
}

/// Mixture properties of one two-phase node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mixture {
    pub void_fraction: f64,
    pub slip_density: f64,
    pub homogeneous_density: f64,
    pub viscosity: f64,
}

/// Drift-flux closure with a fixed distribution parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftFlux {
    pub c0: f64,
}

impl Default for DriftFlux {
    fn default() -> Self {
        Self { c0: DEFAULT_SLIP }
    }
}

impl DriftFlux {
    pub fn new(c0: f64) -> Self {
        Self { c0 }
    }

    /// Combine saturated liquid and vapour at quality `x`.
    pub fn mix(&self, x: f64, liquid: &PhaseProperties, vapor: &PhaseProperties) -> Mixture {
        let rho_l = liquid.rho.value;
        let rho_g = vapor.rho.value;
        let alpha = drift_flux_void_fraction(x, rho_l, rho_g, self.c0);
        Mixture {
            void_fraction: alpha,
            slip_density: slip_mixture_density(alpha, rho_l, rho_g),
            homogeneous_density: homogeneous_density(x, rho_l, rho_g),
            viscosity: mixture_viscosity(x, liquid.mu.value, vapor.mu.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gf_core::units::{kg_m3, pa_s};
    use proptest::prelude::*;

    #[test]
    fn liquid_has_no_void() {
        assert_eq!(drift_flux_void_fraction(0.0, 900.0, 5.0, 1.2), 0.0);
        assert_eq!(drift_flux_void_fraction(-0.1, 900.0, 5.0, 1.2), 0.0);
    }

    #[test]
    fn pure_vapour_is_all_void() {
        assert_eq!(drift_flux_void_fraction(1.0, 900.0, 5.0, 1.2), 1.0);
    }

    #[test]
    fn densities_at_the_limits() {
        assert_eq!(slip_mixture_density(0.0, 900.0, 5.0), 900.0);
        assert_eq!(slip_mixture_density(1.0, 900.0, 5.0), 5.0);
        assert!((homogeneous_density(0.0, 900.0, 5.0) - 900.0).abs() < 1e-9);
        assert!((homogeneous_density(1.0, 900.0, 5.0) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn slip_density_below_homogeneous_for_c0_above_one() {
        let liquid = PhaseProperties::new(700e3, kg_m3(900.0), pa_s(1.5e-4));
        let vapor = PhaseProperties::new(2.76e6, kg_m3(5.0), pa_s(1.5e-5));
        let mix = DriftFlux::default().mix(0.1, &liquid, &vapor);
        // α ≈ 0.960, ρ_slip ≈ 40.8, ρ_h ≈ 47.6
        assert!((mix.void_fraction - 0.960).abs() < 1e-3);
        assert!((mix.slip_density - 40.8).abs() < 0.1);
        assert!((mix.homogeneous_density - 47.6).abs() < 0.1);
        assert!(mix.slip_density < mix.homogeneous_density);
        assert!((mix.viscosity - (0.9 * 1.5e-4 + 0.1 * 1.5e-5)).abs() < 1e-18);
    }

    proptest! {
        #[test]
        fn void_fraction_is_bounded(
            x in 0.0..=1.0f64,
            rho_l in 500.0..1000.0f64,
            rho_g in 0.05..100.0f64,
            c0 in 1.0..1.5f64,
        ) {
            let alpha = drift_flux_void_fraction(x, rho_l, rho_g, c0);
            prop_assert!((0.0..=1.0).contains(&alpha));
            if x == 0.0 {
                prop_assert_eq!(alpha, 0.0);
            }
            let rho_m = slip_mixture_density(alpha, rho_l, rho_g);
            prop_assert!(rho_m >= rho_g - 1e-9 && rho_m <= rho_l + 1e-9);
        }

        #[test]
        fn unit_slip_is_homogeneous(
            x in 0.0..=1.0f64,
            rho_l in 500.0..1000.0f64,
            rho_g in 0.05..100.0f64,
        ) {
            let alpha = drift_flux_void_fraction(x, rho_l, rho_g, 1.0);
            let rho_h = homogeneous_density(x, rho_l, rho_g);
            // With C0 = 1, α equals the homogeneous vapour volume fraction
            let alpha_h = x * rho_h / rho_g;
            prop_assert!((alpha - alpha_h).abs() < 1e-9);
            let rho_m = slip_mixture_density(alpha, rho_l, rho_g);
            prop_assert!((rho_m - rho_h).abs() <= 1e-9 * rho_l);
        }

        #[test]
        fn slip_lightens_the_mixture(
            x in 0.01..0.99f64,
            rho_l in 500.0..1000.0f64,
            rho_g in 0.05..100.0f64,
            c0 in 1.05..1.5f64,
        ) {
            let alpha = drift_flux_void_fraction(x, rho_l, rho_g, c0);
            let rho_m = slip_mixture_density(alpha, rho_l, rho_g);
            let rho_h = homogeneous_density(x, rho_l, rho_g);
            prop_assert!(rho_m < rho_h);
        }
    }
}
