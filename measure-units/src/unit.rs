//! Units and the categories they belong to

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use crate::error::ConversionError;
use crate::ratios::{RatioTable, LENGTH, WEIGHT};

/// Top-level conversion domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Length,
    Weight,
    Temperature,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Length, Category::Weight, Category::Temperature];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Length => "Length",
            Category::Weight => "Weight",
            Category::Temperature => "Temperature",
        }
    }

    /// Units of this category, in selection order
    pub fn units(&self) -> &'static [Unit] {
        use Unit::*;
        match self {
            Category::Length => &[Meters, Kilometers, Feet, Miles, Yards, Inches, Centimeters, Millimeters],
            Category::Weight => &[Kilograms, Grams, Milligrams, Pounds, Ounces],
            Category::Temperature => &[Celsius, Fahrenheit, Kelvin],
        }
    }

    /// The unit whose multiplier is 1
    pub fn reference_unit(&self) -> Unit {
        match self {
            Category::Length => Unit::Meters,
            Category::Weight => Unit::Kilograms,
            Category::Temperature => Unit::Celsius,
        }
    }

    /// Multiplier table, for ratio-based categories only
    pub fn ratio_table(&self) -> Option<&'static RatioTable> {
        match self {
            Category::Length => Some(&LENGTH),
            Category::Weight => Some(&WEIGHT),
            Category::Temperature => None,
        }
    }

    pub fn contains(&self, unit: Unit) -> bool {
        unit.category() == *self
    }

    /// Fails with `InvalidUnit` when `unit` is outside this category
    pub fn check(&self, unit: Unit) -> Result<Unit, ConversionError> {
        if self.contains(unit) {
            Ok(unit)
        } else {
            Err(ConversionError::InvalidUnit { unit, category: *self })
        }
    }

    /// Category a unit belongs to
    pub fn of(unit: Unit) -> Category {
        unit.category()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Category {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "length" | "distance" => Ok(Category::Length),
            "weight" | "mass" => Ok(Category::Weight),
            "temperature" | "temp" => Ok(Category::Temperature),
            _ => Err(ConversionError::UnknownCategory(s.trim().to_string())),
        }
    }
}

/// A measurement unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    // Length
    Meters,
    Kilometers,
    Feet,
    Miles,
    Yards,
    Inches,
    Centimeters,
    Millimeters,
    // Weight
    Kilograms,
    Grams,
    Milligrams,
    Pounds,
    Ounces,
    // Temperature
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl Unit {
    pub const ALL: [Unit; 16] = [
        Unit::Meters, Unit::Kilometers, Unit::Feet, Unit::Miles,
        Unit::Yards, Unit::Inches, Unit::Centimeters, Unit::Millimeters,
        Unit::Kilograms, Unit::Grams, Unit::Milligrams, Unit::Pounds, Unit::Ounces,
        Unit::Celsius, Unit::Fahrenheit, Unit::Kelvin,
    ];

    pub fn category(&self) -> Category {
        use Unit::*;
        match self {
            Meters | Kilometers | Feet | Miles | Yards | Inches | Centimeters | Millimeters => Category::Length,
            Kilograms | Grams | Milligrams | Pounds | Ounces => Category::Weight,
            Celsius | Fahrenheit | Kelvin => Category::Temperature,
        }
    }

    /// Display name, as shown in result strings
    pub fn name(&self) -> &'static str {
        use Unit::*;
        match self {
            Meters => "Meters",
            Kilometers => "Kilometers",
            Feet => "Feet",
            Miles => "Miles",
            Yards => "Yards",
            Inches => "Inches",
            Centimeters => "Centimeters",
            Millimeters => "Millimeters",
            Kilograms => "Kilograms",
            Grams => "Grams",
            Milligrams => "Milligrams",
            Pounds => "Pounds",
            Ounces => "Ounces",
            Celsius => "Celsius",
            Fahrenheit => "Fahrenheit",
            Kelvin => "Kelvin",
        }
    }

    pub fn symbol(&self) -> &'static str {
        use Unit::*;
        match self {
            Meters => "m",
            Kilometers => "km",
            Feet => "ft",
            Miles => "mi",
            Yards => "yd",
            Inches => "in",
            Centimeters => "cm",
            Millimeters => "mm",
            Kilograms => "kg",
            Grams => "g",
            Milligrams => "mg",
            Pounds => "lb",
            Ounces => "oz",
            Celsius => "C",
            Fahrenheit => "F",
            Kelvin => "K",
        }
    }

    /// Other accepted spellings (lowercase)
    pub fn aliases(&self) -> &'static [&'static str] {
        use Unit::*;
        match self {
            Meters => &["meter", "metre", "metres"],
            Kilometers => &["kilometer", "kilometre", "kilometres"],
            Feet => &["foot"],
            Miles => &["mile"],
            Yards => &["yard"],
            Inches => &["inch"],
            Centimeters => &["centimeter", "centimetre", "centimetres"],
            Millimeters => &["millimeter", "millimetre", "millimetres"],
            Kilograms => &["kilogram", "kilo", "kilos"],
            Grams => &["gram"],
            Milligrams => &["milligram"],
            Pounds => &["pound", "lbs"],
            Ounces => &["ounce"],
            Celsius => &["degc", "centigrade"],
            Fahrenheit => &["degf"],
            Kelvin => &["kelvins"],
        }
    }

    fn matches(&self, lowered: &str) -> bool {
        self.name().eq_ignore_ascii_case(lowered)
            || self.symbol().eq_ignore_ascii_case(lowered)
            || self.aliases().contains(&lowered)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Unit {
    type Err = ConversionError;

    /// Accepts display names, singulars, symbols and a leading degree sign
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lowered = trimmed.trim_start_matches('°').trim().to_lowercase();
        if lowered.is_empty() {
            return Err(ConversionError::UnknownUnit(trimmed.to_string()));
        }
        Unit::ALL
            .iter()
            .copied()
            .find(|u| u.matches(&lowered))
            .ok_or_else(|| ConversionError::UnknownUnit(trimmed.to_string()))
    }
}
