//! Conversion functions exposed through the plugin registry

use measure_plugin::prelude::*;
use crate::engine::{Conversion, ConversionRequest, Converter};
use crate::error::ConversionError;
use crate::helpers::{
    check_arg_count, extract_category, extract_number, extract_text, extract_unit, into_value,
    optional_arg,
};
use crate::parse::parse_conversion;
use crate::{Category, Unit};

fn conversion_error(func: &str, e: ConversionError) -> MeasureError {
    MeasureError::from(e).in_function(func)
}

/// Shared body of every `(value, from_unit, to_unit)` function.
/// `category` is taken from the source unit when not fixed by the caller.
fn run_conversion(
    func: &str,
    category: Option<Category>,
    value: f64,
    from: Unit,
    to: Unit,
    ctx: &EvalContext,
) -> Result<Conversion, MeasureError> {
    let category = category.unwrap_or_else(|| Category::of(from));
    let request = ConversionRequest::new(category, value, from, to)
        .map_err(|e| conversion_error(func, e))?;
    Converter::new()
        .with_policy(ctx.same_unit())
        .with_decimals(ctx.decimals())
        .convert(&request)
        .map_err(|e| conversion_error(func, e))
}

fn convert_positional(
    func: &str,
    category: Option<Category>,
    args: &[Value],
    ctx: &EvalContext,
) -> Result<Conversion, MeasureError> {
    check_arg_count(args, func, 3)?;
    let value = extract_number(&args[0], func, "value")?;
    let from = extract_unit(&args[1], func, "from_unit")?;
    let to = extract_unit(&args[2], func, "to_unit")?;
    run_conversion(func, category, value, from, to, ctx)
}

static CONVERSION_ARGS: [ArgMeta; 3] = [
    ArgMeta::required("value", "Number", "Non-negative value to convert"),
    ArgMeta::required("from_unit", "Text", "Source unit (e.g., \"Meters\", \"km\")"),
    ArgMeta::required("to_unit", "Text", "Target unit (e.g., \"Feet\", \"mi\")"),
];

// ============ convert ============

pub struct Convert;

static CONVERT_ARGS: [ArgMeta; 4] = [
    ArgMeta::required("value", "Number", "Non-negative value to convert"),
    ArgMeta::required("from_unit", "Text", "Source unit (e.g., \"Meters\", \"km\")"),
    ArgMeta::required("to_unit", "Text", "Target unit (e.g., \"Feet\", \"mi\")"),
    ArgMeta::optional("category", "Text", "Length, Weight or Temperature", "category of from_unit"),
];

static CONVERT_EXAMPLES: [&str; 3] = [
    "convert(1, \"Meters\", \"Feet\") → 3.28084",
    "convert(10, \"km\", \"mi\") → 6.21371",
    "convert(0, \"Celsius\", \"Fahrenheit\", \"Temperature\") → 32",
];

static CONVERT_RELATED: [&str; 3] = ["in_units", "describe", "units"];

impl FunctionPlugin for Convert {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "convert",
            description: "Convert a value from one unit to another in the same category",
            usage: "convert(value, from_unit, to_unit, [category])",
            args: &CONVERT_ARGS,
            returns: "Number",
            examples: &CONVERT_EXAMPLES,
            category: "units",
            related: &CONVERT_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        let category = match optional_arg(args, 3) {
            Some(v) => match extract_category(v, "convert", "category") {
                Ok(c) => Some(c),
                Err(e) => return Value::Error(e),
            },
            None => None,
        };
        into_value(convert_positional("convert", category, args, ctx).map(|c| c.result))
    }
}

// ============ convert_length / convert_weight / convert_temperature ============

macro_rules! category_function {
    ($ty:ident, $name:literal, $category:expr, $desc:literal, $examples:ident, [$($ex:literal),+]) => {
        pub struct $ty;

        static $examples: &[&str] = &[$($ex),+];

        impl FunctionPlugin for $ty {
            fn meta(&self) -> FunctionMeta {
                FunctionMeta {
                    name: $name,
                    description: $desc,
                    usage: concat!($name, "(value, from_unit, to_unit)"),
                    args: &CONVERSION_ARGS,
                    returns: "Number",
                    examples: $examples,
                    category: "units",
                    related: &["convert", "units"],
                }
            }

            fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
                into_value(convert_positional($name, Some($category), args, ctx).map(|c| c.result))
            }
        }
    };
}

category_function!(
    ConvertLength, "convert_length", Category::Length,
    "Convert between Meters, Kilometers, Feet, Miles, Yards, Inches, Centimeters and Millimeters",
    LENGTH_EXAMPLES, ["convert_length(1, \"Meters\", \"Feet\") → 3.28084"]
);

category_function!(
    ConvertWeight, "convert_weight", Category::Weight,
    "Convert between Kilograms, Grams, Milligrams, Pounds and Ounces",
    WEIGHT_EXAMPLES, ["convert_weight(1, \"Kilograms\", \"Pounds\") → 2.20462"]
);

category_function!(
    ConvertTemperature, "convert_temperature", Category::Temperature,
    "Convert between Celsius, Fahrenheit and Kelvin",
    TEMPERATURE_EXAMPLES, ["convert_temperature(212, \"Fahrenheit\", \"Celsius\") → 100"]
);

// ============ in_units ============

pub struct InUnits;

static IN_UNITS_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("value", "Number", "Value to convert"),
    ArgMeta::required("conversion", "Text", "Conversion spec like \"km->mi\" or \"C to F\""),
];

static IN_UNITS_EXAMPLES: [&str; 2] = [
    "in_units(100, \"km->mi\") → 62.1371",
    "in_units(0, \"C->F\") → 32",
];

static IN_UNITS_RELATED: [&str; 1] = ["convert"];

impl FunctionPlugin for InUnits {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "in_units",
            description: "Convert a value using a conversion spec",
            usage: "in_units(value, \"from->to\")",
            args: &IN_UNITS_ARGS,
            returns: "Number",
            examples: &IN_UNITS_EXAMPLES,
            category: "units",
            related: &IN_UNITS_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        let result = check_arg_count(args, "in_units", 2)
            .and_then(|_| {
                let value = extract_number(&args[0], "in_units", "value")?;
                let spec = extract_text(&args[1], "in_units", "conversion")?;
                let (from, to) = parse_conversion(spec).map_err(|e| conversion_error("in_units", e))?;
                run_conversion("in_units", None, value, from, to, ctx)
            })
            .map(|c| c.result);
        into_value(result)
    }
}

// ============ describe ============

pub struct Describe;

static DESCRIBE_EXAMPLES: [&str; 2] = [
    "describe(1, \"Meters\", \"Feet\") → \"1.0 Meters = 3.2808 Feet\"",
    "describe(0, \"Celsius\", \"Kelvin\") → \"0.0 Celsius = 273.1500 Kelvin\"",
];

static DESCRIBE_RELATED: [&str; 1] = ["convert"];

impl FunctionPlugin for Describe {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "describe",
            description: "Convert and format as \"{value} {from} = {result} {to}\"",
            usage: "describe(value, from_unit, to_unit)",
            args: &CONVERSION_ARGS,
            returns: "Text",
            examples: &DESCRIBE_EXAMPLES,
            category: "units",
            related: &DESCRIBE_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        into_value(convert_positional("describe", None, args, ctx).map(|c| c.to_string()))
    }
}

// ============ units ============

pub struct Units;

static UNITS_ARGS: [ArgMeta; 1] = [
    ArgMeta::required("category", "Text", "Length, Weight or Temperature"),
];

static UNITS_EXAMPLES: [&str; 1] = [
    "units(\"Temperature\") → [Celsius, Fahrenheit, Kelvin]",
];

static UNITS_RELATED: [&str; 2] = ["categories", "reference_unit"];

impl FunctionPlugin for Units {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "units",
            description: "List the units of a category",
            usage: "units(category)",
            args: &UNITS_ARGS,
            returns: "List",
            examples: &UNITS_EXAMPLES,
            category: "units",
            related: &UNITS_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let result = check_arg_count(args, "units", 1)
            .and_then(|_| extract_category(&args[0], "units", "category"))
            .map(|category| {
                Value::List(category.units().iter().map(|u| Value::Text(u.name().to_string())).collect())
            });
        into_value(result)
    }
}

// ============ categories ============

pub struct Categories;

static CATEGORIES_EXAMPLES: [&str; 1] = ["categories() → [Length, Weight, Temperature]"];

static CATEGORIES_RELATED: [&str; 1] = ["units"];

impl FunctionPlugin for Categories {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "categories",
            description: "List the conversion categories",
            usage: "categories()",
            args: &[],
            returns: "List",
            examples: &CATEGORIES_EXAMPLES,
            category: "units",
            related: &CATEGORIES_RELATED,
        }
    }

    fn call(&self, _args: &[Value], _ctx: &EvalContext) -> Value {
        Value::List(Category::ALL.iter().map(|c| Value::Text(c.name().to_string())).collect())
    }
}

// ============ reference_unit ============

pub struct ReferenceUnit;

static REFERENCE_UNIT_EXAMPLES: [&str; 2] = [
    "reference_unit(\"Length\") → \"Meters\"",
    "reference_unit(\"Weight\") → \"Kilograms\"",
];

static REFERENCE_UNIT_RELATED: [&str; 1] = ["units"];

impl FunctionPlugin for ReferenceUnit {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "reference_unit",
            description: "Unit whose multiplier is 1 in a category",
            usage: "reference_unit(category)",
            args: &UNITS_ARGS,
            returns: "Text",
            examples: &REFERENCE_UNIT_EXAMPLES,
            category: "units",
            related: &REFERENCE_UNIT_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let result = check_arg_count(args, "reference_unit", 1)
            .and_then(|_| extract_category(&args[0], "reference_unit", "category"))
            .map(|category| category.reference_unit().name().to_string());
        into_value(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn eval_ctx() -> EvalContext {
        EvalContext::new(Arc::new(PluginRegistry::new()))
    }

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    fn error_code(v: &Value) -> Option<&str> {
        v.as_error().map(|e| e.code.as_str())
    }

    #[test]
    fn test_convert_length() {
        let result = Convert.call(&[Value::Number(1.0), text("km"), text("m")], &eval_ctx());
        assert_eq!(result, Value::Number(1000.0));
    }

    #[test]
    fn test_convert_with_explicit_category() {
        let args = [Value::Number(0.0), text("Celsius"), text("Kelvin"), text("Temperature")];
        assert_eq!(Convert.call(&args, &eval_ctx()), Value::Number(273.15));

        let args = [Value::Number(1.0), text("Celsius"), text("Kelvin"), text("Length")];
        assert_eq!(error_code(&Convert.call(&args, &eval_ctx())), Some(codes::INVALID_UNIT));
    }

    #[test]
    fn test_convert_across_categories_is_invalid() {
        let result = Convert.call(&[Value::Number(1.0), text("kg"), text("ft")], &eval_ctx());
        assert_eq!(error_code(&result), Some(codes::INVALID_UNIT));
    }

    #[test]
    fn test_convert_same_unit_policy() {
        let args = [Value::Number(5.0), text("Meters"), text("Meters")];

        let rejected = Convert.call(&args, &eval_ctx());
        let err = rejected.as_error().unwrap();
        assert_eq!(err.code, codes::SAME_UNIT);
        assert!(err.is_warning());

        let ctx = eval_ctx().with_same_unit(SameUnitPolicy::Identity);
        assert_eq!(Convert.call(&args, &ctx), Value::Number(5.0));
    }

    #[test]
    fn test_convert_rejects_negative_value() {
        let result = Convert.call(&[Value::Number(-3.0), text("m"), text("ft")], &eval_ctx());
        assert_eq!(error_code(&result), Some(codes::DOMAIN_ERROR));
    }

    #[test]
    fn test_convert_argument_errors() {
        let result = Convert.call(&[Value::Number(1.0)], &eval_ctx());
        assert_eq!(error_code(&result), Some(codes::ARG_COUNT));

        let result = Convert.call(&[Value::Bool(true), text("m"), text("ft")], &eval_ctx());
        assert_eq!(error_code(&result), Some(codes::ARG_TYPE));

        let result = Convert.call(&[Value::Number(1.0), text("m"), text("cubits")], &eval_ctx());
        assert_eq!(error_code(&result), Some(codes::UNKNOWN_UNIT));
    }

    #[test]
    fn test_category_functions_fix_category() {
        let ctx = eval_ctx();
        let result = ConvertWeight.call(&[Value::Number(1.0), text("kg"), text("lb")], &ctx);
        assert_eq!(result, Value::Number(2.20462));

        let result = ConvertLength.call(&[Value::Number(1.0), text("kg"), text("lb")], &ctx);
        assert_eq!(error_code(&result), Some(codes::INVALID_UNIT));

        let result = ConvertTemperature.call(&[Value::Number(212.0), text("F"), text("C")], &ctx);
        assert_eq!(result, Value::Number(100.0));
    }

    #[test]
    fn test_in_units() {
        let result = InUnits.call(&[Value::Number(1000.0), text("m->km")], &eval_ctx());
        assert_eq!(result, Value::Number(1.0));

        let result = InUnits.call(&[Value::Number(1.0), text("m km")], &eval_ctx());
        assert_eq!(error_code(&result), Some(codes::PARSE_ERROR));
    }

    #[test]
    fn test_describe() {
        let result = Describe.call(&[Value::Number(10.0), text("Kilometers"), text("Miles")], &eval_ctx());
        assert_eq!(result.as_text(), Some("10.0 Kilometers = 6.2137 Miles"));

        let ctx = eval_ctx().with_decimals(2);
        let result = Describe.call(&[Value::Number(1.0), text("Kilograms"), text("Pounds")], &ctx);
        assert_eq!(result.as_text(), Some("1.0 Kilograms = 2.20 Pounds"));
    }

    #[test]
    fn test_units_and_categories() {
        let result = Units.call(&[text("temperature")], &eval_ctx());
        assert_eq!(
            result,
            Value::List(vec![text("Celsius"), text("Fahrenheit"), text("Kelvin")])
        );

        let result = Units.call(&[text("volume")], &eval_ctx());
        assert_eq!(error_code(&result), Some(codes::UNKNOWN_CATEGORY));

        let result = Categories.call(&[], &eval_ctx());
        assert_eq!(result.as_list().map(|l| l.len()), Some(3));
    }

    #[test]
    fn test_reference_unit() {
        let result = ReferenceUnit.call(&[text("weight")], &eval_ctx());
        assert_eq!(result.as_text(), Some("Kilograms"));
    }
}
