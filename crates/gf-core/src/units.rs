// gf-core/src/units.rs

use uom::si::f64::{
    Acceleration as UomAcceleration, DynamicViscosity as UomDynamicViscosity,
    Length as UomLength, MassDensity as UomMassDensity, MassRate as UomMassRate,
    Power as UomPower, Pressure as UomPressure,
    TemperatureInterval as UomTemperatureInterval,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type Accel = UomAcceleration;
pub type DynVisc = UomDynamicViscosity;
pub type Length = UomLength;
pub type Density = UomMassDensity;
pub type MassRate = UomMassRate;
pub type Power = UomPower;
pub type Pressure = UomPressure;
pub type TempInterval = UomTemperatureInterval;
pub type Temperature = UomThermodynamicTemperature;

/// Specific enthalpy [J/kg].
///
/// Not part of uom's standard set, so we use f64 with clear documentation.
pub type SpecEnthalpy = f64;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn bar(v: f64) -> Pressure {
    use uom::si::pressure::bar;
    Pressure::new::<bar>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn degc(v: f64) -> Temperature {
    k(v + constants::CELSIUS_OFFSET_K)
}

#[inline]
pub fn delta_k(v: f64) -> TempInterval {
    use uom::si::temperature_interval::kelvin;
    TempInterval::new::<kelvin>(v)
}

#[inline]
pub fn kgps(v: f64) -> MassRate {
    use uom::si::mass_rate::kilogram_per_second;
    MassRate::new::<kilogram_per_second>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn kg_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn pa_s(v: f64) -> DynVisc {
    use uom::si::dynamic_viscosity::pascal_second;
    DynVisc::new::<pascal_second>(v)
}

#[inline]
pub fn kw(v: f64) -> Power {
    use uom::si::power::kilowatt;
    Power::new::<kilowatt>(v)
}

#[inline]
pub fn mps2(v: f64) -> Accel {
    use uom::si::acceleration::meter_per_second_squared;
    Accel::new::<meter_per_second_squared>(v)
}

/// Pressure in bar, for reporting.
#[inline]
pub fn to_bar(p: Pressure) -> f64 {
    use uom::si::pressure::bar;
    p.get::<bar>()
}

pub mod constants {
    use super::*;

    pub const CELSIUS_OFFSET_K: f64 = 273.15;

    /// Gravitational acceleration used by geothermal well calculations.
    pub const GRAVITY_MPS2: f64 = 9.81;

    /// Lowest absolute pressure any wellbore node may take [Pa].
    pub const PRESSURE_FLOOR_PA: f64 = 1.0e5;

    #[inline]
    pub fn gravity() -> Accel {
        mps2(GRAVITY_MPS2)
    }

    #[inline]
    pub fn pressure_floor() -> Pressure {
        pa(PRESSURE_FLOOR_PA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _p = pa(101_325.0);
        let _t = k(300.0);
        let _mdot = kgps(1.2);
        let _l = m(2.0);
        let _rho = kg_m3(998.0);
        let _mu = pa_s(1.0e-3);
        let _w = kw(10.0);
        let _dt = delta_k(7.0);
        let _g = constants::gravity();
    }

    #[test]
    fn bar_and_celsius_conversions() {
        assert!((bar(45.0).value - 45.0e5).abs() < 1e-6);
        assert!((to_bar(pa(1.0e5)) - 1.0).abs() < 1e-12);
        assert!((degc(250.0).value - 523.15).abs() < 1e-9);
        assert!((kw(2.0).value - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn floor_is_one_bar() {
        assert_eq!(constants::pressure_floor().value, 1.0e5);
    }
}
