//! End-to-end conversion scenarios through the public API and the registry

use std::sync::Arc;

use measure_core::{codes, SameUnitPolicy, Settings, Value};
use measure_plugin::EvalContext;
use measure_units::{convert, units_registry, Category, ConversionError, ConversionRequest, Converter, Unit};

const SAMPLE_VALUES: [f64; 6] = [0.0, 0.1, 1.0, 12.5, 987.654, 1.0e6];

fn assert_close(actual: f64, expected: f64) {
    let tolerance = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} got {}",
        expected,
        actual
    );
}

fn display(category: Category, value: f64, from: Unit, to: Unit) -> String {
    let request = ConversionRequest::new(category, value, from, to).unwrap();
    Converter::new().describe(&request).unwrap()
}

#[test]
fn documented_scenarios() {
    let cases = [
        (Category::Length, 1.0, Unit::Meters, Unit::Feet, "1.0 Meters = 3.2808 Feet"),
        (Category::Length, 10.0, Unit::Kilometers, Unit::Miles, "10.0 Kilometers = 6.2137 Miles"),
        (Category::Weight, 1.0, Unit::Kilograms, Unit::Pounds, "1.0 Kilograms = 2.2046 Pounds"),
        (Category::Temperature, 0.0, Unit::Celsius, Unit::Fahrenheit, "0.0 Celsius = 32.0000 Fahrenheit"),
        (Category::Temperature, 212.0, Unit::Fahrenheit, Unit::Celsius, "212.0 Fahrenheit = 100.0000 Celsius"),
        (Category::Temperature, 0.0, Unit::Celsius, Unit::Kelvin, "0.0 Celsius = 273.1500 Kelvin"),
    ];

    for (category, value, from, to, expected) in cases {
        assert_eq!(display(category, value, from, to), expected);
    }
}

#[test]
fn ratio_categories_round_trip() {
    for category in [Category::Length, Category::Weight] {
        for &from in category.units() {
            for &to in category.units() {
                for value in SAMPLE_VALUES {
                    let there = convert(category, value, from, to).unwrap();
                    let back = convert(category, there, to, from).unwrap();
                    assert_close(back, value);
                }
            }
        }
    }
}

#[test]
fn temperature_round_trip() {
    let units = Category::Temperature.units();
    for &from in units {
        for &to in units {
            for value in SAMPLE_VALUES {
                let there = convert(Category::Temperature, value, from, to).unwrap();
                let back = convert(Category::Temperature, there, to, from).unwrap();
                assert_close(back, value);
            }
        }
    }
}

#[test]
fn identity_is_exact_in_every_category() {
    for category in Category::ALL {
        for &unit in category.units() {
            for value in SAMPLE_VALUES {
                assert_eq!(convert(category, value, unit, unit), Ok(value));
            }
        }
    }
}

#[test]
fn same_unit_follows_policy() {
    let request = ConversionRequest::new(Category::Length, 5.0, Unit::Meters, Unit::Meters).unwrap();

    let rejected = Converter::new().convert(&request);
    assert_eq!(rejected, Err(ConversionError::SameUnit(Unit::Meters)));

    let settings = Settings::default().with_same_unit(SameUnitPolicy::Identity);
    let passed = Converter::from_settings(&settings).convert(&request).unwrap();
    assert_eq!(passed.result, 5.0);
}

#[test]
fn unit_outside_category_is_invalid() {
    assert_eq!(
        convert(Category::Temperature, 1.0, Unit::Celsius, Unit::Grams),
        Err(ConversionError::InvalidUnit { unit: Unit::Grams, category: Category::Temperature })
    );
    assert!(ConversionRequest::new(Category::Length, 1.0, Unit::Ounces, Unit::Feet).is_err());
}

#[test]
fn registry_dispatch() {
    let registry = Arc::new(units_registry());
    let ctx = EvalContext::new(registry.clone());

    let args = [Value::Number(1.0), Value::from("Kilograms"), Value::from("Ounces")];
    let result = registry.call_function("convert", &args, &ctx);
    assert_close(result.as_number().unwrap(), 35.274);

    let args = [Value::Number(5.0), Value::from("Meters"), Value::from("Meters")];
    let result = registry.call_function("describe", &args, &ctx);
    assert_eq!(result.as_error().map(|e| e.code.as_str()), Some(codes::SAME_UNIT));

    let result = registry.call_function("conver", &args, &ctx);
    let err = result.as_error().unwrap();
    assert_eq!(err.code, codes::UNDEFINED_FUNC);
    assert!(err.suggestion.as_deref().unwrap_or("").contains("convert"));
}

#[test]
fn request_serializes_with_unit_names() {
    let request = ConversionRequest::new(Category::Weight, 2.0, Unit::Pounds, Unit::Grams).unwrap();
    let json = serde_json::to_value(request).unwrap();
    assert_eq!(json["category"], "Weight");
    assert_eq!(json["from"], "Pounds");
    assert_eq!(json["to"], "Grams");
}
