//! Measure Units - Length, Weight and Temperature conversion
//!
//! Categories and their units:
//! - Length: Meters, Kilometers, Feet, Miles, Yards, Inches, Centimeters, Millimeters
//! - Weight: Kilograms, Grams, Milligrams, Pounds, Ounces
//! - Temperature: Celsius, Fahrenheit, Kelvin
//!
//! Length and weight convert through a reference unit (1 meter, 1 kilogram)
//! using fixed multipliers. Temperature uses pairwise formulas.

mod unit;
mod error;
mod ratios;
mod temperature;
mod engine;
mod parse;
mod helpers;
mod functions;

pub use unit::{Category, Unit};
pub use error::ConversionError;
pub use ratios::{RatioLookup, RatioTable, LENGTH, WEIGHT};
pub use temperature::{convert_temperature, KELVIN_OFFSET};
pub use engine::{convert, Conversion, ConversionRequest, Converter};
pub use parse::{parse_unit, parse_category, parse_conversion, parse_quantity};

use measure_plugin::PluginRegistry;

/// Load unit functions into registry
pub fn load_units_library(registry: PluginRegistry) -> PluginRegistry {
    registry
        // Conversion (6 functions)
        .with_function(functions::Convert)
        .with_function(functions::ConvertLength)
        .with_function(functions::ConvertWeight)
        .with_function(functions::ConvertTemperature)
        .with_function(functions::InUnits)
        .with_function(functions::Describe)

        // Inspection (3 functions)
        .with_function(functions::Units)
        .with_function(functions::Categories)
        .with_function(functions::ReferenceUnit)
}

/// Create registry with the unit functions
pub fn units_registry() -> PluginRegistry {
    load_units_library(PluginRegistry::new())
}
