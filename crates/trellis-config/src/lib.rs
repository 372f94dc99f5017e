//! Bundler configuration assembly for single-page applications.
//!
//! Given per-build flags ([`BuildContext`]) and paths resolved once per process
//! ([`PathSet`]), [`ConfigFactory`] produces one [`Configuration`] describing
//! module resolution, entry points, output naming, asset rules and the plugin
//! chain. The configuration is handed to an external bundler engine; nothing
//! here runs a build.

pub mod conditional;
pub mod configuration;
pub mod context;
pub mod conventions;
pub mod error;
pub mod factory;
mod helpers;
pub mod paths;
pub mod plugins;
pub mod resolver;
pub mod rules;
pub mod settings;

// Re-export main types
pub use conditional::{Fragment, Gated, assemble, normalize_to_list, select_branch, when};
pub use configuration::*;
pub use context::BuildContext;
pub use error::*;
pub use factory::{ConfigFactory, FactoryOptions, SourceMapPolicy};
pub use paths::PathSet;
pub use plugins::{CleanScope, Plugin, PluginChainBuilder, PluginKind, PluginSpec};
pub use resolver::{DirectoryAccess, DirectoryResolver, MemoryFs, NativeFs};
pub use rules::{Handler, Pattern, Rule, RuleSet, RuleSetBuilder};
pub use settings::Settings;
