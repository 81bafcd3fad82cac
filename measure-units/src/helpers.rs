//! Argument extraction shared by the conversion functions

use measure_core::{MeasureError, Value};
use crate::{Category, Unit};

/// Extract a Number; numeric text such as "2.5" is accepted
pub fn extract_number(value: &Value, func: &str, arg: &str) -> Result<f64, MeasureError> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Text(_) => match value.to_number() {
            Value::Number(n) => Ok(n),
            _ => Err(MeasureError::arg_type(func, arg, "Number", "Text")),
        },
        Value::Error(e) => Err(e.clone()),
        other => Err(MeasureError::arg_type(func, arg, "Number", other.type_name())),
    }
}

/// Extract a Text string
pub fn extract_text<'a>(value: &'a Value, func: &str, arg: &str) -> Result<&'a str, MeasureError> {
    match value {
        Value::Text(s) => Ok(s),
        Value::Error(e) => Err(e.clone()),
        other => Err(MeasureError::arg_type(func, arg, "Text", other.type_name())),
    }
}

pub fn extract_unit(value: &Value, func: &str, arg: &str) -> Result<Unit, MeasureError> {
    let text = extract_text(value, func, arg)?;
    text.parse::<Unit>()
        .map_err(|e| MeasureError::from(e).in_function(func).for_argument(arg))
}

pub fn extract_category(value: &Value, func: &str, arg: &str) -> Result<Category, MeasureError> {
    let text = extract_text(value, func, arg)?;
    text.parse::<Category>()
        .map_err(|e| MeasureError::from(e).in_function(func).for_argument(arg))
}

/// Optional argument: missing or Null means "not given"
pub fn optional_arg(args: &[Value], index: usize) -> Option<&Value> {
    args.get(index).filter(|v| !v.is_null())
}

pub fn check_arg_count(args: &[Value], func: &str, expected: usize) -> Result<(), MeasureError> {
    if args.len() < expected {
        return Err(MeasureError::arg_count(func, expected, args.len()));
    }
    Ok(())
}

/// Collapse a function result into a Value
pub fn into_value<T: Into<Value>>(result: Result<T, MeasureError>) -> Value {
    match result {
        Ok(v) => v.into(),
        Err(e) => Value::Error(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use measure_core::codes;

    #[test]
    fn test_extract_number() {
        assert_eq!(extract_number(&Value::Number(42.0), "f", "x"), Ok(42.0));
        assert_eq!(extract_number(&Value::Text("4.5".to_string()), "f", "x"), Ok(4.5));
    }

    #[test]
    fn test_extract_number_wrong_type() {
        let err = extract_number(&Value::Bool(true), "convert", "value").unwrap_err();
        assert_eq!(err.code, codes::ARG_TYPE);
        let err = extract_number(&Value::Text("ten".to_string()), "convert", "value").unwrap_err();
        assert_eq!(err.code, codes::ARG_TYPE);
    }

    #[test]
    fn test_extract_unit() {
        assert_eq!(extract_unit(&Value::Text("ft".to_string()), "f", "u"), Ok(Unit::Feet));
        let err = extract_unit(&Value::Text("parsec".to_string()), "convert", "to_unit").unwrap_err();
        assert_eq!(err.code, codes::UNKNOWN_UNIT);
        assert_eq!(err.context.unwrap().argument.as_deref(), Some("to_unit"));
    }

    #[test]
    fn test_optional_arg_skips_null() {
        let args = vec![Value::Number(1.0), Value::Null];
        assert!(optional_arg(&args, 1).is_none());
        assert!(optional_arg(&args, 2).is_none());
        assert!(optional_arg(&args, 0).is_some());
    }
}
