//! Runtime settings read from the environment
//!
//! - `MEASURE_SAME_UNIT`: `reject` (default) or `identity`
//! - `MEASURE_DECIMALS`: decimals in display strings (default 4)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

pub const ENV_SAME_UNIT: &str = "MEASURE_SAME_UNIT";
pub const ENV_DECIMALS: &str = "MEASURE_DECIMALS";

pub const DEFAULT_DECIMALS: usize = 4;
pub const MAX_DECIMALS: usize = 12;

/// What to do when the source and target unit are the same
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameUnitPolicy {
    /// Refuse with a warning and compute nothing
    #[default]
    Reject,
    /// Return the input value unchanged
    Identity,
}

impl FromStr for SameUnitPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" | "warn" => Ok(SameUnitPolicy::Reject),
            "identity" | "allow" | "passthrough" => Ok(SameUnitPolicy::Identity),
            other => Err(format!("unknown same-unit policy '{}', expected reject or identity", other)),
        }
    }
}

impl fmt::Display for SameUnitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SameUnitPolicy::Reject => write!(f, "reject"),
            SameUnitPolicy::Identity => write!(f, "identity"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub same_unit: SameUnitPolicy,
    pub decimals: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            same_unit: SameUnitPolicy::default(),
            decimals: DEFAULT_DECIMALS,
        }
    }
}

impl Settings {
    pub fn with_same_unit(mut self, policy: SameUnitPolicy) -> Self {
        self.same_unit = policy;
        self
    }

    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals.min(MAX_DECIMALS);
        self
    }

    /// Load from process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup. Bad values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(raw) = lookup(ENV_SAME_UNIT) {
            match raw.parse::<SameUnitPolicy>() {
                Ok(policy) => settings.same_unit = policy,
                Err(e) => warn!("{}: {}; using {}", ENV_SAME_UNIT, e, settings.same_unit),
            }
        }

        if let Some(raw) = lookup(ENV_DECIMALS) {
            match raw.trim().parse::<usize>() {
                Ok(d) if d <= MAX_DECIMALS => settings.decimals = d,
                _ => warn!(
                    "{}: '{}' is not an integer in 0..={}; using {}",
                    ENV_DECIMALS, raw, MAX_DECIMALS, settings.decimals
                ),
            }
        }

        settings
    }
}
