//! Measure Plugin System
//!
//! Provides the `FunctionPlugin` trait that conversion functions implement,
//! and the registry that looks them up by name.

mod traits;
mod registry;
mod context;

pub use traits::{FunctionPlugin, FunctionMeta, ArgMeta};
pub use registry::PluginRegistry;
pub use context::EvalContext;

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{FunctionPlugin, FunctionMeta, ArgMeta, PluginRegistry, EvalContext};
    pub use measure_core::prelude::*;
}
