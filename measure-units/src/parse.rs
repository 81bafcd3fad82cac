//! Text parsing - units, categories, "km->mi" specs and "10 km" quantities

use crate::error::ConversionError;
use crate::{Category, Unit};

pub fn parse_unit(s: &str) -> Result<Unit, ConversionError> {
    s.parse()
}

pub fn parse_category(s: &str) -> Result<Category, ConversionError> {
    s.parse()
}

/// Parse a conversion specification like "kg->lb", "C → F" or "km to mi"
pub fn parse_conversion(s: &str) -> Result<(Unit, Unit), ConversionError> {
    let parts: Vec<&str> = if s.contains("->") {
        s.split("->").collect()
    } else if s.contains('→') {
        s.split('→').collect()
    } else if s.contains(" to ") {
        s.split(" to ").collect()
    } else if s.contains(" in ") {
        s.split(" in ").collect()
    } else {
        return Err(ConversionError::InvalidSpec(s.to_string()));
    };

    if parts.len() != 2 {
        return Err(ConversionError::InvalidSpec(s.to_string()));
    }

    let from_unit = parse_unit(parts[0])?;
    let to_unit = parse_unit(parts[1])?;

    Ok((from_unit, to_unit))
}

/// Length of the leading number in `s`, including an exponent like `1e3`
fn number_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut end = 0;
    while let Some(&b) = bytes.get(end) {
        let exponent = matches!(b, b'e' | b'E')
            && end > 0
            && bytes[end - 1].is_ascii_digit()
            && match bytes.get(end + 1) {
                Some(b'+' | b'-') => bytes.get(end + 2).is_some_and(u8::is_ascii_digit),
                Some(next) => next.is_ascii_digit(),
                None => false,
            };
        if b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+') || exponent {
            end += 1;
        } else {
            break;
        }
    }
    end
}

/// Parse a quantity string like "5 m", "100kg", "1e3 m" or "212 °F"
pub fn parse_quantity(s: &str) -> Result<(f64, Unit), ConversionError> {
    let s = s.trim();

    let split_pos = number_prefix_len(s);

    let num_str = s[..split_pos].trim();
    let unit_str = s[split_pos..].trim();

    if num_str.is_empty() || unit_str.is_empty() {
        return Err(ConversionError::InvalidQuantity(s.to_string()));
    }

    let value: f64 = num_str
        .parse()
        .map_err(|_| ConversionError::InvalidQuantity(s.to_string()))?;
    let unit = parse_unit(unit_str)?;

    Ok((value, unit))
}
