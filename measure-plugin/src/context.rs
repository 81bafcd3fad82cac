//! Evaluation Context

use measure_core::{SameUnitPolicy, Settings};
use crate::PluginRegistry;
use std::sync::Arc;

/// Context passed to every plugin call
pub struct EvalContext {
    pub settings: Settings,
    pub registry: Arc<PluginRegistry>,
}

impl EvalContext {
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self {
            settings: Settings::default(),
            registry,
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_same_unit(mut self, policy: SameUnitPolicy) -> Self {
        self.settings.same_unit = policy;
        self
    }

    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.settings = self.settings.with_decimals(decimals);
        self
    }

    pub fn same_unit(&self) -> SameUnitPolicy {
        self.settings.same_unit
    }

    pub fn decimals(&self) -> usize {
        self.settings.decimals
    }
}
