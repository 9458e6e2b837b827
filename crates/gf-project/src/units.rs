//! Unit-aware quantity parsing for case files.
//!
//! Case files accept either a bare number in SI base units or a string with a
//! unit tag (`"45 bar"`, `"250 C"`, `"2500 m"`, `"3%"`). [`parse_quantity`] is
//! the single boundary where text becomes an SI value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dimension/quantity family of a case value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    /// Absolute temperature (canonical: K)
    Temperature,
    /// Temperature difference (canonical: K)
    TemperatureDifference,
    /// Absolute pressure (canonical: Pa)
    Pressure,
    /// Length / depth (canonical: m)
    Length,
    /// Mass flow rate (canonical: kg/s)
    MassFlow,
    /// Specific enthalpy (canonical: J/kg)
    SpecificEnthalpy,
    /// Acceleration (canonical: m/s²)
    Acceleration,
    /// Fraction in [0, 1], plain or percent
    Fraction,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Temperature => "Temperature",
            Self::TemperatureDifference => "Temperature Difference",
            Self::Pressure => "Absolute Pressure",
            Self::Length => "Length",
            Self::MassFlow => "Mass Flow",
            Self::SpecificEnthalpy => "Specific Enthalpy",
            Self::Acceleration => "Acceleration",
            Self::Fraction => "Fraction",
        };
        f.write_str(name)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Unknown unit '{unit}' for {quantity}")]
    UnknownUnit { unit: String, quantity: Quantity },

    #[error("Ambiguous unit '{unit}': {reason}")]
    AmbiguousUnit { unit: String, reason: String },

    #[error("Value {value} out of range: {reason}")]
    OutOfRange { value: f64, reason: String },
}

/// A case value: SI number or text with a unit tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuantityDef {
    Si(f64),
    Text(String),
}

impl QuantityDef {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Canonical SI value.
    pub fn resolve(&self, quantity: Quantity) -> Result<f64, UnitError> {
        match self {
            Self::Si(v) => check_si(*v, quantity),
            Self::Text(s) => parse_quantity(s, quantity),
        }
    }
}

impl From<f64> for QuantityDef {
    fn from(v: f64) -> Self {
        Self::Si(v)
    }
}

impl fmt::Display for QuantityDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Si(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Parse `raw_text` as `quantity`, returning the SI value.
pub fn parse_quantity(raw_text: &str, quantity: Quantity) -> Result<f64, UnitError> {
    let trimmed = raw_text.trim();
    let value = match quantity {
        Quantity::Temperature => parse_temperature(trimmed)?,
        Quantity::TemperatureDifference => parse_temperature_difference(trimmed)?,
        Quantity::Pressure => parse_pressure(trimmed)?,
        Quantity::Length => parse_length(trimmed)?,
        Quantity::MassFlow => parse_mass_flow(trimmed)?,
        Quantity::SpecificEnthalpy => parse_specific_enthalpy(trimmed)?,
        Quantity::Acceleration => parse_acceleration(trimmed)?,
        Quantity::Fraction => parse_fraction(trimmed)?,
    };
    check_si(value, quantity)
}

/// Range checks shared by numeric and text inputs.
fn check_si(value: f64, quantity: Quantity) -> Result<f64, UnitError> {
    if !value.is_finite() {
        return Err(UnitError::OutOfRange {
            value,
            reason: format!("{quantity} must be finite"),
        });
    }
    match quantity {
        Quantity::Temperature if value <= 0.0 => Err(UnitError::OutOfRange {
            value,
            reason: "Absolute temperature must be > 0 K".to_string(),
        }),
        Quantity::Pressure if value < 0.0 => Err(UnitError::OutOfRange {
            value,
            reason: "Absolute pressure must be >= 0".to_string(),
        }),
        Quantity::Fraction if !(0.0..=1.0).contains(&value) => Err(UnitError::OutOfRange {
            value,
            reason: "Fraction must be between 0 and 1".to_string(),
        }),
        _ => Ok(value),
    }
}

fn unknown(unit: &str, quantity: Quantity) -> UnitError {
    UnitError::UnknownUnit {
        unit: unit.to_string(),
        quantity,
    }
}

fn parse_temperature(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;
    match unit.to_lowercase().as_str() {
        "" | "k" | "kelvin" => Ok(value),
        "c" | "°c" | "degc" | "celsius" => Ok(value + 273.15),
        "f" | "°f" | "degf" | "fahrenheit" => Ok((value + 459.67) * 5.0 / 9.0),
        "r" | "°r" | "rankine" => Ok(value * 5.0 / 9.0),
        other => Err(unknown(other, Quantity::Temperature)),
    }
}

fn parse_temperature_difference(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;
    match unit.to_lowercase().as_str() {
        "" | "k" | "c" | "°c" | "degc" | "delta_c" => Ok(value),
        "f" | "°f" | "r" | "°r" | "delta_f" => Ok(value * 5.0 / 9.0),
        other => Err(unknown(other, Quantity::TemperatureDifference)),
    }
}

fn parse_pressure(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;
    match unit.to_lowercase().as_str() {
        "" | "pa" | "pascal" => Ok(value),
        "kpa" => Ok(value * 1e3),
        "mpa" => Ok(value * 1e6),
        "bar" | "bara" => Ok(value * 1e5),
        "mbar" | "millibar" => Ok(value * 100.0),
        "atm" => Ok(value * 101_325.0),
        "psia" => Ok(value * 6_894.76),
        "barg" => Ok((value + 1.013_25) * 1e5),
        "psig" => Ok((value + 14.696) * 6_894.76),
        "psi" => Err(UnitError::AmbiguousUnit {
            unit: "psi".to_string(),
            reason: "Use 'psia' (absolute) or 'psig' (gauge)".to_string(),
        }),
        other => Err(unknown(other, Quantity::Pressure)),
    }
}

fn parse_length(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;
    match unit.to_lowercase().as_str() {
        "" | "m" | "meter" | "metre" => Ok(value),
        "km" => Ok(value * 1e3),
        "cm" => Ok(value / 1e2),
        "ft" | "feet" => Ok(value * 0.3048),
        other => Err(unknown(other, Quantity::Length)),
    }
}

fn parse_mass_flow(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;
    match unit.to_lowercase().as_str() {
        "" | "kg/s" => Ok(value),
        "kg/h" | "kg/hr" => Ok(value / 3600.0),
        "t/h" | "tph" => Ok(value / 3.6),
        "lbm/s" => Ok(value * 0.453_592),
        "lbm/h" | "lbm/hr" => Ok(value * 0.453_592 / 3600.0),
        other => Err(unknown(other, Quantity::MassFlow)),
    }
}

fn parse_specific_enthalpy(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;
    match unit.to_lowercase().as_str() {
        "" | "j/kg" => Ok(value),
        "kj/kg" => Ok(value * 1e3),
        "mj/kg" => Ok(value * 1e6),
        "btu/lbm" => Ok(value * 2_326.0),
        other => Err(unknown(other, Quantity::SpecificEnthalpy)),
    }
}

fn parse_acceleration(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;
    match unit.to_lowercase().as_str() {
        "" | "m/s2" | "m/s^2" | "m/s²" => Ok(value),
        "g" | "g0" => Ok(value * 9.806_65),
        "ft/s2" | "ft/s^2" => Ok(value * 0.3048),
        other => Err(unknown(other, Quantity::Acceleration)),
    }
}

fn parse_fraction(input: &str) -> Result<f64, UnitError> {
    let parse = |s: &str| {
        s.trim().parse::<f64>().map_err(|_| {
            UnitError::ParseError(format!("Could not parse fraction from '{}'", input))
        })
    };
    match input.strip_suffix('%') {
        Some(pct) => Ok(parse(pct)? / 100.0),
        None => parse(input),
    }
}

/// Split `"45 bar"` into `(45.0, "bar")`.
fn split_value_and_unit(input: &str) -> Result<(f64, String), UnitError> {
    let trimmed = input.trim();

    // Exponent markers count as numeric only when followed by a digit or sign
    let bytes = trimmed.as_bytes();
    let split_idx = trimmed
        .char_indices()
        .find(|&(i, c)| {
            let numeric = c.is_ascii_digit() || matches!(c, '.' | '-' | '+');
            let exponent = matches!(c, 'e' | 'E')
                && i > 0
                && bytes
                    .get(i + 1)
                    .is_some_and(|b| b.is_ascii_digit() || *b == b'-' || *b == b'+');
            !(numeric || exponent)
        })
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());

    let (num_part, unit_part) = trimmed.split_at(split_idx);
    let value: f64 = num_part.trim().parse().map_err(|_| {
        UnitError::ParseError(format!("Could not parse numeric value from '{}'", input))
    })?;

    Ok((value, unit_part.trim().to_string()))
}
