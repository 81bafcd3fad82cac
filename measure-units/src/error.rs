//! Conversion errors

use measure_core::MeasureError;
use thiserror::Error;
use crate::{Category, Unit};

/// Errors that can occur while building or running a conversion
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// Source and target unit are the same and the policy refuses it
    #[error("please select different units for conversion (both are {0})")]
    SameUnit(Unit),

    /// Unit does not belong to the requested category
    #[error("{unit} is not a {category} unit")]
    InvalidUnit { unit: Unit, category: Category },

    #[error("unknown unit: {0}")]
    UnknownUnit(String),

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("invalid conversion format: {0}, expected 'unit1->unit2'")]
    InvalidSpec(String),

    #[error("invalid quantity: {0}, expected '<number> <unit>'")]
    InvalidQuantity(String),

    /// Values must be finite and non-negative
    #[error("value must be a non-negative finite number, got {0}")]
    InvalidValue(f64),

    #[error("result of converting {value:e} {from} to {to} is out of range")]
    OutOfRange { value: f64, from: Unit, to: Unit },
}

impl From<ConversionError> for MeasureError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::SameUnit(unit) => MeasureError::same_unit(unit.name()),
            ConversionError::InvalidUnit { unit, category } => {
                MeasureError::invalid_unit(unit.name(), category.name())
            }
            ConversionError::UnknownUnit(text) => MeasureError::unknown_unit(&text),
            ConversionError::UnknownCategory(text) => MeasureError::unknown_category(&text),
            e @ (ConversionError::InvalidSpec(_) | ConversionError::InvalidQuantity(_)) => {
                MeasureError::parse_error(e.to_string())
            }
            e @ (ConversionError::InvalidValue(_) | ConversionError::OutOfRange { .. }) => {
                MeasureError::domain_error(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use measure_core::{codes, Severity};

    #[test]
    fn test_same_unit_maps_to_warning() {
        let err: MeasureError = ConversionError::SameUnit(Unit::Meters).into();
        assert_eq!(err.code, codes::SAME_UNIT);
        assert_eq!(err.severity, Severity::Warning);
    }

    #[test]
    fn test_invalid_unit_message() {
        let err = ConversionError::InvalidUnit { unit: Unit::Feet, category: Category::Weight };
        assert_eq!(err.to_string(), "Feet is not a Weight unit");
        let measure: MeasureError = err.into();
        assert_eq!(measure.code, codes::INVALID_UNIT);
    }

    #[test]
    fn test_value_error_is_domain_error() {
        let err: MeasureError = ConversionError::InvalidValue(-1.0).into();
        assert_eq!(err.code, codes::DOMAIN_ERROR);

        let err: MeasureError =
            ConversionError::OutOfRange { value: 1e306, from: Unit::Kilometers, to: Unit::Millimeters }.into();
        assert_eq!(err.code, codes::DOMAIN_ERROR);
    }
}
