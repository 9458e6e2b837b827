//! CoolProp integration tests.
//!
//! Broad tolerances keep these independent of the CoolProp version while still
//! enforcing physical plausibility. The steam table is cross-checked against
//! CoolProp over the range a geothermal well sees.

use gf_core::units::{bar, degc};
use gf_fluids::{
    CoolPropOracle, Property, PropertyOracle, SaturatedPhase, Species, StateInput,
    SteamTableOracle,
};

#[test]
fn water_boils_near_100c_at_1atm() {
    let oracle = CoolPropOracle::new();
    let t = oracle
        .saturation_temperature(bar(1.01325), Species::Water)
        .unwrap();

    assert!(
        (t.value - 373.124).abs() < 0.5,
        "T_sat = {} K",
        t.value
    );
}

#[test]
fn reservoir_liquid_is_dense() {
    let oracle = CoolPropOracle::new();
    let props = oracle
        .single_phase(bar(45.0), degc(250.0), Species::Water)
        .unwrap();

    // Compressed liquid at 45 bar, 250 °C
    assert!(props.rho.value > 750.0 && props.rho.value < 850.0);
    assert!(props.h > 1.0e6 && props.h < 1.2e6);
    assert!(props.mu.value > 5.0e-5 && props.mu.value < 2.0e-4);
}

#[test]
fn latent_heat_shrinks_with_pressure() {
    let oracle = CoolPropOracle::new();
    let mut last = f64::MAX;

    for p_bar in [1.0, 5.0, 10.0, 20.0, 40.0] {
        let liquid = oracle
            .saturated(bar(p_bar), SaturatedPhase::Liquid, Species::Water)
            .unwrap();
        let vapor = oracle
            .saturated(bar(p_bar), SaturatedPhase::Vapor, Species::Water)
            .unwrap();
        let h_fg = vapor.h - liquid.h;

        assert!(h_fg > 0.0);
        assert!(h_fg < last, "h_fg should fall with pressure");
        assert!(liquid.rho.value > vapor.rho.value);
        last = h_fg;
    }
}

#[test]
fn two_phase_quality_round_trip() {
    let oracle = CoolPropOracle::new();
    let p = bar(8.0);
    let h = oracle
        .property(Property::Enthalpy, StateInput::PQ { p, q: 0.3 }, Species::Water)
        .unwrap();
    let q = oracle
        .property(Property::Quality, StateInput::PH { p, h }, Species::Water)
        .unwrap();

    assert!((q - 0.3).abs() < 1e-6, "q = {q}");
}

#[test]
fn steam_table_tracks_coolprop() {
    let reference = CoolPropOracle::new();
    let table = SteamTableOracle::new();

    for t_c in [80.0, 150.0, 210.0, 250.0, 300.0] {
        let t = degc(t_c);
        let p_ref = reference.saturation_pressure(t, Species::Water).unwrap();
        let p_tab = table.saturation_pressure(t, Species::Water).unwrap();
        let rel = (p_tab.value - p_ref.value).abs() / p_ref.value;
        assert!(rel < 0.02, "P_sat({t_c} °C): table {} vs {}", p_tab.value, p_ref.value);
    }

    for p_bar in [2.0, 6.0, 12.0, 30.0] {
        for phase in [SaturatedPhase::Liquid, SaturatedPhase::Vapor] {
            let h_ref = reference.saturated(bar(p_bar), phase, Species::Water).unwrap().h;
            let h_tab = table.saturated(bar(p_bar), phase, Species::Water).unwrap().h;
            let rel = (h_tab - h_ref).abs() / h_ref;
            assert!(rel < 0.01, "h({p_bar} bar, {phase:?}): table {h_tab} vs {h_ref}");
        }
    }
}
