//! Structured errors for conversion callers
//!
//! Errors are values. A failed conversion is reported to the caller as a
//! `MeasureError` carrying a machine-readable code, a message and, where it
//! helps, a suggestion for fixing the input.

use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const SAME_UNIT: &str = "SAME_UNIT";
    pub const INVALID_UNIT: &str = "INVALID_UNIT";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const UNKNOWN_CATEGORY: &str = "UNKNOWN_CATEGORY";
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const UNDEFINED_FUNC: &str = "UNDEFINED_FUNC";
    pub const ARG_COUNT: &str = "ARG_COUNT";
    pub const ARG_TYPE: &str = "ARG_TYPE";
    pub const DOMAIN_ERROR: &str = "DOMAIN_ERROR";
    pub const NOT_FOUND: &str = "NOT_FOUND";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Request was refused by policy; nothing was computed
    Warning,
    /// Request could not be computed
    Error,
}

/// Where an error occurred
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Function that produced the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,

    /// Argument that was rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub argument: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub notes: Vec<String>,
}

/// Structured error returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,

    pub severity: Severity,
}

impl MeasureError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            context: None,
            severity: Severity::Error,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn in_function(mut self, function: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.function = Some(function.into());
        self
    }

    pub fn for_argument(mut self, argument: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.argument = Some(argument.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.notes.push(note.into());
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// True when the error is a policy refusal rather than a failure
    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }

    // ========== Common Error Constructors ==========

    pub fn same_unit(unit: &str) -> Self {
        Self::new(codes::SAME_UNIT, "Please select different units for conversion.")
            .with_note(format!("source and target are both {}", unit))
            .with_severity(Severity::Warning)
    }

    pub fn invalid_unit(unit: &str, category: &str) -> Self {
        Self::new(codes::INVALID_UNIT, format!("{} is not a {} unit", unit, category))
            .with_suggestion(format!("Use units({}) to list valid units", category.to_lowercase()))
    }

    pub fn unknown_unit(text: &str) -> Self {
        Self::new(codes::UNKNOWN_UNIT, format!("Unknown unit: {}", text))
            .with_suggestion("Use units(category) to list valid units")
    }

    pub fn unknown_category(text: &str) -> Self {
        Self::new(codes::UNKNOWN_CATEGORY, format!("Unknown category: {}", text))
            .with_suggestion("Valid categories: Length, Weight, Temperature")
    }

    pub fn parse_error(details: impl Into<String>) -> Self {
        Self::new(codes::PARSE_ERROR, format!("Parse error: {}", details.into()))
    }

    pub fn undefined_func(name: &str) -> Self {
        Self::new(codes::UNDEFINED_FUNC, format!("Unknown function: {}", name))
            .with_suggestion("Use help() to list available functions")
    }

    pub fn arg_count(func: &str, expected: usize, got: usize) -> Self {
        Self::new(
            codes::ARG_COUNT,
            format!("{}() expects {} arguments, got {}", func, expected, got),
        )
        .with_suggestion(format!("Use help('{}') for usage", func))
        .in_function(func)
    }

    pub fn arg_type(func: &str, arg: &str, expected: &str, got: &str) -> Self {
        Self::new(
            codes::ARG_TYPE,
            format!("{}() argument '{}': expected {}, got {}", func, arg, expected, got),
        )
        .in_function(func)
        .for_argument(arg)
    }

    pub fn domain_error(details: impl Into<String>) -> Self {
        Self::new(codes::DOMAIN_ERROR, format!("Domain error: {}", details.into()))
    }

    pub fn not_found(name: &str) -> Self {
        Self::new(codes::NOT_FOUND, format!("No function named '{}'", name))
    }
}

impl std::fmt::Display for MeasureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for MeasureError {}
