//! Measure Core - Fundamental types
//!
//! This crate provides the core types used throughout Measure:
//! - `Value`: Runtime values (numbers, text, lists, errors)
//! - `MeasureError`: Structured errors with codes and severity
//! - `Settings`: Same-unit policy and display precision

mod value;
mod error;
mod config;

pub use value::Value;
pub use error::{MeasureError, ErrorContext, Severity, codes};
pub use config::{Settings, SameUnitPolicy, DEFAULT_DECIMALS, MAX_DECIMALS, ENV_SAME_UNIT, ENV_DECIMALS};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Value, MeasureError, Severity, Settings, SameUnitPolicy};
    pub use crate::error::codes;
}
