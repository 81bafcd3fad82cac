//! Temperature conversion
//!
//! Temperature scales do not share a multiplier, so each pair has its own
//! formula.

use crate::error::ConversionError;
use crate::{Category, Unit};

/// Offset between the Kelvin and Celsius scales
pub const KELVIN_OFFSET: f64 = 273.15;

/// Convert between Celsius, Fahrenheit and Kelvin
pub fn convert_temperature(value: f64, from: Unit, to: Unit) -> Result<f64, ConversionError> {
    use Unit::{Celsius, Fahrenheit, Kelvin};

    Category::Temperature.check(from)?;
    Category::Temperature.check(to)?;

    let result = match (from, to) {
        (Celsius, Fahrenheit) => value * 9.0 / 5.0 + 32.0,
        (Celsius, Kelvin) => value + KELVIN_OFFSET,
        (Fahrenheit, Celsius) => (value - 32.0) * 5.0 / 9.0,
        (Fahrenheit, Kelvin) => (value - 32.0) * 5.0 / 9.0 + KELVIN_OFFSET,
        (Kelvin, Celsius) => value - KELVIN_OFFSET,
        (Kelvin, Fahrenheit) => (value - KELVIN_OFFSET) * 9.0 / 5.0 + 32.0,
        // same scale on both sides; check() above excludes everything else
        _ => value,
    };
    Ok(result)
}
