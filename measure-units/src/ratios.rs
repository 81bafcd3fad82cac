//! Multiplier tables for ratio-based categories
//!
//! Each entry says how many of a unit make one reference unit
//! (1 meter for length, 1 kilogram for weight). A conversion divides by the
//! source multiplier to reach the reference unit, then scales to the target.

use crate::error::ConversionError;
use crate::{Category, Unit};

/// Anything that can look up a unit's multiplier against a reference unit
pub trait RatioLookup {
    fn category(&self) -> Category;

    fn ratio(&self, unit: Unit) -> Option<f64>;

    /// `(value / ratio[from]) * ratio[to]`
    fn scale(&self, value: f64, from: Unit, to: Unit) -> Result<f64, ConversionError> {
        let invalid = |unit| ConversionError::InvalidUnit { unit, category: self.category() };
        let from_ratio = self.ratio(from).ok_or_else(|| invalid(from))?;
        let to_ratio = self.ratio(to).ok_or_else(|| invalid(to))?;
        Ok((value / from_ratio) * to_ratio)
    }
}

/// Read-only unit → multiplier mapping
#[derive(Debug)]
pub struct RatioTable {
    category: Category,
    entries: &'static [(Unit, f64)],
}

impl RatioTable {
    const fn new(category: Category, entries: &'static [(Unit, f64)]) -> Self {
        Self { category, entries }
    }

    pub fn entries(&self) -> &'static [(Unit, f64)] {
        self.entries
    }
}

impl RatioLookup for RatioTable {
    fn category(&self) -> Category {
        self.category
    }

    fn ratio(&self, unit: Unit) -> Option<f64> {
        self.entries.iter().find(|(u, _)| *u == unit).map(|(_, r)| *r)
    }
}

/// Length multipliers per 1 meter
pub static LENGTH: RatioTable = RatioTable::new(Category::Length, &[
    (Unit::Meters, 1.0),
    (Unit::Kilometers, 0.001),
    (Unit::Centimeters, 100.0),
    (Unit::Millimeters, 1000.0),
    (Unit::Feet, 3.28084),
    (Unit::Miles, 0.000621371),
    (Unit::Yards, 1.09361),
    (Unit::Inches, 39.3701),
]);

/// Weight multipliers per 1 kilogram
pub static WEIGHT: RatioTable = RatioTable::new(Category::Weight, &[
    (Unit::Kilograms, 1.0),
    (Unit::Grams, 1000.0),
    (Unit::Milligrams, 1_000_000.0),
    (Unit::Pounds, 2.20462),
    (Unit::Ounces, 35.274),
]);
