//! Tabulated saturated-water property oracle.
//!
//! Saturation properties of water from the triple-point region up to the
//! critical point, at 25 K spacing (IAPWS reference values). Between rows the
//! saturation curve is interpolated with saturation pressure and vapour density
//! taken logarithmically, everything else linearly.
//!
//! Compressed liquid at (P, T) is approximated by saturated liquid at T with the
//! incompressible pressure correction `h = h_f + (P - P_sat) / ρ_f`. Superheated
//! vapour is outside this table and fails the lookup.
//!
//! This oracle is the offline backend: it needs no native library, answers in
//! microseconds, and reproduces CoolProp to within a few percent over the range
//! a geothermal well sees.

use crate::error::{FluidError, FluidResult};
use crate::oracle::{PropertyOracle, validation};
use crate::species::Species;
use crate::state::{PhaseProperties, Property, StateInput};
use gf_core::units::constants::CELSIUS_OFFSET_K;

/// One saturation row in table units.
struct SatRow {
    /// Temperature [°C]
    t_c: f64,
    /// Saturation pressure [kPa]
    p_kpa: f64,
    /// Specific volume of saturated liquid [m³/kg]
    v_f: f64,
    /// Specific volume of saturated vapour [m³/kg]
    v_g: f64,
    /// Enthalpy of saturated liquid [kJ/kg]
    h_f: f64,
    /// Enthalpy of saturated vapour [kJ/kg]
    h_g: f64,
    /// Viscosity of saturated liquid [µPa·s]
    mu_f: f64,
    /// Viscosity of saturated vapour [µPa·s]
    mu_g: f64,
}

const fn row(
    t_c: f64,
    p_kpa: f64,
    v_f: f64,
    v_g: f64,
    h_f: f64,
    h_g: f64,
    mu_f: f64,
    mu_g: f64,
) -> SatRow {
    SatRow {
        t_c,
        p_kpa,
        v_f,
        v_g,
        h_f,
        h_g,
        mu_f,
        mu_g,
    }
}

#[rustfmt::skip]
const SATURATION_TABLE: [SatRow; 15] = [
    row(25.0,    3.1698,  0.001003, 43.340,   104.83,  2546.5, 890.0,  9.87),
    row(50.0,    12.352,  0.001012, 12.026,   209.34,  2591.3, 547.0, 10.60),
    row(75.0,    38.597,  0.001026,  4.1291,  314.03,  2634.0, 378.0, 11.30),
    row(100.0,   101.42,  0.001043,  1.6720,  419.17,  2675.6, 281.7, 12.27),
    row(125.0,   232.23,  0.001065,  0.77012, 525.07,  2713.1, 221.5, 13.00),
    row(150.0,   476.16,  0.001091,  0.39248, 632.18,  2745.9, 182.0, 13.90),
    row(175.0,   892.60,  0.001121,  0.21659, 741.02,  2772.0, 154.4, 14.70),
    row(200.0,   1554.9,  0.001157,  0.12721, 852.26,  2792.0, 134.4, 15.50),
    row(225.0,   2549.7,  0.001199,  0.07846, 966.78,  2801.9, 118.5, 16.50),
    row(250.0,   3976.2,  0.001252,  0.05008, 1085.7,  2800.9, 106.0, 17.50),
    row(275.0,   5949.1,  0.001317,  0.03279, 1210.9,  2785.0,  95.1, 18.70),
    row(300.0,   8587.9,  0.001404,  0.02166, 1344.8,  2749.6,  85.9, 20.30),
    row(325.0,   12057.0, 0.001528,  0.01420, 1493.4,  2684.1,  76.7, 22.40),
    row(350.0,   16529.0, 0.001741,  0.008806, 1671.2, 2563.6,  66.5, 26.00),
    row(373.946, 22064.0, 0.003106,  0.003106, 2084.3, 2084.3,  44.0, 44.00),
];

/// Highest pressure accepted for compressed liquid [Pa].
const MAX_LIQUID_PRESSURE_PA: f64 = 1.0e8;

/// Saturation state in SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SatPoint {
    t_k: f64,
    p_pa: f64,
    rho_f: f64,
    rho_g: f64,
    h_f: f64,
    h_g: f64,
    mu_f: f64,
    mu_g: f64,
}

impl SatPoint {
    fn from_row(r: &SatRow) -> Self {
        Self {
            t_k: r.t_c + CELSIUS_OFFSET_K,
            p_pa: r.p_kpa * 1e3,
            rho_f: 1.0 / r.v_f,
            rho_g: 1.0 / r.v_g,
            h_f: r.h_f * 1e3,
            h_g: r.h_g * 1e3,
            mu_f: r.mu_f * 1e-6,
            mu_g: r.mu_g * 1e-6,
        }
    }

    /// Interpolate between two rows at segment fraction `f`.
    fn blend(lo: &Self, hi: &Self, f: f64) -> Self {
        Self {
            t_k: lerp(lo.t_k, hi.t_k, f),
            p_pa: log_lerp(lo.p_pa, hi.p_pa, f),
            rho_f: lerp(lo.rho_f, hi.rho_f, f),
            rho_g: log_lerp(lo.rho_g, hi.rho_g, f),
            h_f: lerp(lo.h_f, hi.h_f, f),
            h_g: lerp(lo.h_g, hi.h_g, f),
            mu_f: lerp(lo.mu_f, hi.mu_f, f),
            mu_g: lerp(lo.mu_g, hi.mu_g, f),
        }
    }
}

// Exact at both ends, so the critical row reproduces h_f == h_g.
fn lerp(a: f64, b: f64, f: f64) -> f64 {
    (1.0 - f) * a + f * b
}

fn log_lerp(a: f64, b: f64, f: f64) -> f64 {
    (a.ln() + f * (b.ln() - a.ln())).exp()
}

/// A fully resolved state.
#[derive(Debug, Clone, Copy)]
struct Resolved {
    p: f64,
    t: f64,
    h: f64,
    rho: f64,
    mu: f64,
    /// -1 for single-phase states, as CoolProp reports them.
    q: f64,
}

impl Resolved {
    fn get(&self, target: Property) -> f64 {
        match target {
            Property::Pressure => self.p,
            Property::Temperature => self.t,
            Property::Enthalpy => self.h,
            Property::Density => self.rho,
            Property::Viscosity => self.mu,
            Property::Quality => self.q,
        }
    }
}

/// Saturated-water table backend.
#[derive(Debug, Clone)]
pub struct SteamTableOracle {
    points: Vec<SatPoint>,
}

impl SteamTableOracle {
    pub fn new() -> Self {
        Self {
            points: SATURATION_TABLE.iter().map(SatPoint::from_row).collect(),
        }
    }

    /// Temperature range covered by the table [K].
    pub fn temperature_range(&self) -> (f64, f64) {
        (self.first().t_k, self.last().t_k)
    }

    /// Pressure range covered by the table [Pa].
    pub fn pressure_range(&self) -> (f64, f64) {
        (self.first().p_pa, self.last().p_pa)
    }

    fn first(&self) -> &SatPoint {
        &self.points[0]
    }

    fn last(&self) -> &SatPoint {
        &self.points[self.points.len() - 1]
    }

    /// Locate `value` on the monotonic column `key`, returning the lower row
    /// index and the fraction of `key` travelled within the segment.
    fn segment(&self, value: f64, key: impl Fn(&SatPoint) -> f64) -> FluidResult<(usize, f64)> {
        let lo = key(self.first());
        let hi = key(self.last());
        if !value.is_finite() || value < lo || value > hi {
            return Err(FluidError::OutOfRange {
                what: "state outside saturation table",
            });
        }

        for i in 0..self.points.len() - 1 {
            let a = key(&self.points[i]);
            let b = key(&self.points[i + 1]);
            if value <= b {
                let f = if b > a { (value - a) / (b - a) } else { 0.0 };
                return Ok((i, f.clamp(0.0, 1.0)));
            }
        }

        Ok((self.points.len() - 2, 1.0))
    }

    fn at_fraction(&self, i: usize, f: f64) -> SatPoint {
        SatPoint::blend(&self.points[i], &self.points[i + 1], f)
    }

    fn at_temperature(&self, t_k: f64) -> FluidResult<SatPoint> {
        let (i, f) = self.segment(t_k, |p| p.t_k)?;
        Ok(self.at_fraction(i, f))
    }

    fn at_pressure(&self, p_pa: f64) -> FluidResult<SatPoint> {
        if !(p_pa > 0.0) {
            return Err(FluidError::NonPhysical {
                what: "pressure must be positive and finite",
            });
        }
        let (i, f) = self.segment(p_pa.ln(), |p| p.p_pa.ln())?;
        let mut point = self.at_fraction(i, f);
        point.p_pa = p_pa;
        Ok(point)
    }

    fn two_phase(sat: &SatPoint, q: f64) -> Resolved {
        Resolved {
            p: sat.p_pa,
            t: sat.t_k,
            h: sat.h_f + q * (sat.h_g - sat.h_f),
            rho: 1.0 / (q / sat.rho_g + (1.0 - q) / sat.rho_f),
            mu: (1.0 - q) * sat.mu_f + q * sat.mu_g,
            q,
        }
    }

    fn compressed_liquid(sat: &SatPoint, p_pa: f64) -> Resolved {
        Resolved {
            p: p_pa,
            t: sat.t_k,
            h: sat.h_f + (p_pa - sat.p_pa) / sat.rho_f,
            rho: sat.rho_f,
            mu: sat.mu_f,
            q: -1.0,
        }
    }

    /// Invert the compressed-liquid enthalpy for temperature at fixed pressure.
    fn liquid_from_ph(&self, p_pa: f64, h: f64, t_upper: f64) -> FluidResult<Resolved> {
        let enthalpy_at = |t: f64| -> FluidResult<f64> {
            let sat = self.at_temperature(t)?;
            Ok(Self::compressed_liquid(&sat, p_pa).h)
        };

        let mut t_low = self.first().t_k;
        let mut t_high = t_upper;
        if enthalpy_at(t_low)? > h {
            return Err(FluidError::OutOfRange {
                what: "liquid enthalpy below table range",
            });
        }

        for _ in 0..60 {
            let t_mid = 0.5 * (t_low + t_high);
            if enthalpy_at(t_mid)? < h {
                t_low = t_mid;
            } else {
                t_high = t_mid;
            }
        }

        let sat = self.at_temperature(0.5 * (t_low + t_high))?;
        Ok(Self::compressed_liquid(&sat, p_pa))
    }

    fn resolve(&self, input: StateInput) -> FluidResult<Resolved> {
        validation::validate_input(&input)?;

        match input {
            StateInput::TQ { t, q } => {
                let sat = self.at_temperature(t.value)?;
                Ok(Self::two_phase(&sat, q))
            }
            StateInput::PQ { p, q } => {
                let sat = self.at_pressure(p.value)?;
                Ok(Self::two_phase(&sat, q))
            }
            StateInput::PT { p, t } => {
                let sat = self.at_temperature(t.value)?;
                if p.value > MAX_LIQUID_PRESSURE_PA {
                    return Err(FluidError::OutOfRange {
                        what: "pressure above compressed-liquid range",
                    });
                }
                if p.value < sat.p_pa {
                    return Err(FluidError::NotSupported {
                        what: "superheated vapour is outside the saturation table",
                    });
                }
                Ok(Self::compressed_liquid(&sat, p.value))
            }
            StateInput::PH { p, h } => {
                let sat = self.at_pressure(p.value)?;
                if h < sat.h_f {
                    return self.liquid_from_ph(p.value, h, sat.t_k);
                }
                let h_fg = sat.h_g - sat.h_f;
                if h_fg > 0.0 && h <= sat.h_g {
                    return Ok(Self::two_phase(&sat, (h - sat.h_f) / h_fg));
                }
                if h_fg <= 0.0 && h <= sat.h_f {
                    return Ok(Self::two_phase(&sat, 0.0));
                }
                Err(FluidError::NotSupported {
                    what: "superheated vapour is outside the saturation table",
                })
            }
        }
    }
}

impl Default for SteamTableOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyOracle for SteamTableOracle {
    fn name(&self) -> &str {
        "SteamTable"
    }

    fn supports(&self, species: Species) -> bool {
        matches!(species, Species::Water)
    }

    fn property(&self, target: Property, input: StateInput, species: Species) -> FluidResult<f64> {
        if !self.supports(species) {
            return Err(FluidError::NotSupported {
                what: "steam table covers water only",
            });
        }
        let state = self.resolve(input)?;
        validation::validate_output(target, state.get(target))
    }

    fn phase_properties(&self, input: StateInput, species: Species) -> FluidResult<PhaseProperties> {
        if !self.supports(species) {
            return Err(FluidError::NotSupported {
                what: "steam table covers water only",
            });
        }
        let state = self.resolve(input)?;
        validation::validate_phase(state.h, state.rho, state.mu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SaturatedPhase;
    use gf_core::units::{bar, degc, k, pa};

    fn rel_err(a: f64, b: f64) -> f64 {
        (a - b).abs() / b.abs()
    }

    #[test]
    fn table_columns_are_monotonic() {
        for pair in SATURATION_TABLE.windows(2) {
            assert!(pair[1].t_c > pair[0].t_c);
            assert!(pair[1].p_kpa > pair[0].p_kpa);
            assert!(pair[1].h_f > pair[0].h_f);
            assert!(pair[1].v_g < pair[0].v_g);
        }
    }

    #[test]
    fn saturation_pressure_at_row() {
        let oracle = SteamTableOracle::new();
        let p = oracle.saturation_pressure(degc(100.0), Species::Water).unwrap();
        assert!(rel_err(p.value, 101_420.0) < 1e-9);
    }

    #[test]
    fn saturation_temperature_at_one_bar() {
        let oracle = SteamTableOracle::new();
        let t = oracle.saturation_temperature(bar(1.0), Species::Water).unwrap();
        // 99.6 °C
        assert!((t.value - 372.76).abs() < 0.5, "T_sat = {} K", t.value);
    }

    #[test]
    fn saturation_round_trip() {
        let oracle = SteamTableOracle::new();
        for t_c in [60.0, 137.0, 212.5, 250.0, 333.0] {
            let p = oracle.saturation_pressure(degc(t_c), Species::Water).unwrap();
            let t = oracle.saturation_temperature(p, Species::Water).unwrap();
            assert!((t.value - degc(t_c).value).abs() < 1e-6);
        }
    }

    #[test]
    fn saturated_lines_at_ten_bar() {
        let oracle = SteamTableOracle::new();
        let liquid = oracle
            .saturated(bar(10.0), SaturatedPhase::Liquid, Species::Water)
            .unwrap();
        let vapor = oracle
            .saturated(bar(10.0), SaturatedPhase::Vapor, Species::Water)
            .unwrap();
        // IAPWS: h_f = 762.5 kJ/kg, h_g = 2777.1 kJ/kg, rho_g = 5.15 kg/m³
        assert!(rel_err(liquid.h, 762_500.0) < 0.02);
        assert!(rel_err(vapor.h, 2_777_100.0) < 0.01);
        assert!(rel_err(vapor.rho.value, 5.15) < 0.05);
        assert!(liquid.mu.value > vapor.mu.value);
    }

    #[test]
    fn compressed_liquid_enthalpy_exceeds_saturation() {
        let oracle = SteamTableOracle::new();
        let h_res = oracle
            .enthalpy_pt(bar(45.0), degc(250.0), Species::Water)
            .unwrap();
        assert!(h_res > 1_085_700.0);
        assert!(h_res < 1_090_000.0);
    }

    #[test]
    fn superheated_state_fails() {
        let oracle = SteamTableOracle::new();
        let err = oracle
            .enthalpy_pt(bar(1.0), degc(200.0), Species::Water)
            .unwrap_err();
        assert!(matches!(err, FluidError::NotSupported { .. }));
    }

    #[test]
    fn out_of_table_fails() {
        let oracle = SteamTableOracle::new();
        assert!(matches!(
            oracle.saturation_pressure(k(700.0), Species::Water),
            Err(FluidError::OutOfRange { .. })
        ));
        assert!(matches!(
            oracle.saturation_temperature(pa(500.0), Species::Water),
            Err(FluidError::OutOfRange { .. })
        ));
    }

    #[test]
    fn critical_row_is_degenerate() {
        let oracle = SteamTableOracle::new();
        let p_crit = pa(22_064_000.0);
        let liquid = oracle
            .saturated(p_crit, SaturatedPhase::Liquid, Species::Water)
            .unwrap();
        let vapor = oracle
            .saturated(p_crit, SaturatedPhase::Vapor, Species::Water)
            .unwrap();
        assert!(vapor.h - liquid.h <= 0.0);
    }

    #[test]
    fn ph_two_phase_quality() {
        let oracle = SteamTableOracle::new();
        let liquid = oracle
            .saturated(bar(5.0), SaturatedPhase::Liquid, Species::Water)
            .unwrap();
        let vapor = oracle
            .saturated(bar(5.0), SaturatedPhase::Vapor, Species::Water)
            .unwrap();
        let h = liquid.h + 0.25 * (vapor.h - liquid.h);
        let q = oracle
            .property(Property::Quality, StateInput::PH { p: bar(5.0), h }, Species::Water)
            .unwrap();
        assert!((q - 0.25).abs() < 1e-9);
    }

    #[test]
    fn ph_liquid_inverts_pt() {
        let oracle = SteamTableOracle::new();
        let p = bar(45.0);
        let h = oracle.enthalpy_pt(p, degc(180.0), Species::Water).unwrap();
        let t = oracle
            .property(Property::Temperature, StateInput::PH { p, h }, Species::Water)
            .unwrap();
        assert!((t - degc(180.0).value).abs() < 1e-3, "T = {t}");
    }

    #[test]
    fn enthalpy_interpolation_is_monotonic_in_pressure() {
        let oracle = SteamTableOracle::new();
        let mut last = f64::MIN;
        for i in 0..200 {
            let p = pa(5.0e3 * 1.03_f64.powi(i));
            if p.value > 2.0e7 {
                break;
            }
            let h_f = oracle
                .saturated(p, SaturatedPhase::Liquid, Species::Water)
                .unwrap()
                .h;
            assert!(h_f > last);
            last = h_f;
        }
    }
}
