//! Conversion engine and the caller-side policy around it

use std::fmt;
use serde::{Serialize, Deserialize};
use measure_core::{SameUnitPolicy, Settings, DEFAULT_DECIMALS, MAX_DECIMALS};
use tracing::debug;

use crate::error::ConversionError;
use crate::ratios::{RatioLookup, LENGTH, WEIGHT};
use crate::temperature::convert_temperature;
use crate::{Category, Unit};

/// Convert `value` from one unit of `category` to another.
///
/// Pure: identical units return `value` unchanged. The same-unit policy is
/// applied by [`Converter`], not here.
pub fn convert(category: Category, value: f64, from: Unit, to: Unit) -> Result<f64, ConversionError> {
    category.check(from)?;
    category.check(to)?;

    if from == to {
        return Ok(value);
    }

    match category {
        Category::Length => LENGTH.scale(value, from, to),
        Category::Weight => WEIGHT.scale(value, from, to),
        Category::Temperature => convert_temperature(value, from, to),
    }
}

/// A validated conversion request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub category: Category,
    pub value: f64,
    pub from: Unit,
    pub to: Unit,
}

impl ConversionRequest {
    /// Both units must belong to `category`; `value` must be finite and >= 0.
    pub fn new(category: Category, value: f64, from: Unit, to: Unit) -> Result<Self, ConversionError> {
        category.check(from)?;
        category.check(to)?;
        if !value.is_finite() || value < 0.0 {
            return Err(ConversionError::InvalidValue(value));
        }
        Ok(Self { category, value, from, to })
    }

    /// Build a request taking the category from the source unit
    pub fn infer(value: f64, from: Unit, to: Unit) -> Result<Self, ConversionError> {
        Self::new(Category::of(from), value, from, to)
    }

    pub fn is_same_unit(&self) -> bool {
        self.from == self.to
    }
}

/// A completed conversion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub request: ConversionRequest,
    pub result: f64,
    pub decimals: usize,
}

impl Conversion {
    /// Result rounded to the display precision
    pub fn rounded(&self) -> f64 {
        let factor = 10f64.powi(self.decimals as i32);
        (self.result * factor).round() / factor
    }
}

impl fmt::Display for Conversion {
    /// `"{value} {from} = {result} {to}"`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} = {:.*} {}",
            format_input(self.request.value),
            self.request.from,
            self.decimals,
            self.result,
            self.request.to
        )
    }
}

/// Input values always show a fractional part: `1.0`, `0.5`, `212.0`.
/// Very large or small magnitudes switch to exponent form without a sign
/// on the exponent (`1e16`, not `1e+16`).
fn format_input(value: f64) -> String {
    format!("{:?}", value)
}

/// Applies the same-unit policy and the display precision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Converter {
    policy: SameUnitPolicy,
    decimals: usize,
}

impl Default for Converter {
    fn default() -> Self {
        Self {
            policy: SameUnitPolicy::Reject,
            decimals: DEFAULT_DECIMALS,
        }
    }
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::default()
            .with_policy(settings.same_unit)
            .with_decimals(settings.decimals)
    }

    pub fn with_policy(mut self, policy: SameUnitPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals.min(MAX_DECIMALS);
        self
    }

    pub fn policy(&self) -> SameUnitPolicy {
        self.policy
    }

    pub fn decimals(&self) -> usize {
        self.decimals
    }

    pub fn convert(&self, request: &ConversionRequest) -> Result<Conversion, ConversionError> {
        if request.is_same_unit() && self.policy == SameUnitPolicy::Reject {
            debug!(unit = %request.from, "same-unit conversion rejected");
            return Err(ConversionError::SameUnit(request.from));
        }

        let result = convert(request.category, request.value, request.from, request.to)?;
        if !result.is_finite() {
            return Err(ConversionError::OutOfRange {
                value: request.value,
                from: request.from,
                to: request.to,
            });
        }
        debug!(
            category = %request.category,
            value = request.value,
            from = %request.from,
            to = %request.to,
            result,
            "converted"
        );

        Ok(Conversion {
            request: *request,
            result,
            decimals: self.decimals,
        })
    }

    /// Display string, or the rejection message for identical units
    pub fn describe(&self, request: &ConversionRequest) -> Result<String, ConversionError> {
        self.convert(request).map(|c| c.to_string())
    }
}
