//! The configuration object handed to the bundler engine.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::plugins::{Plugin, PluginKind};
use crate::rules::RuleSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub resolve: ResolveOptions,

    /// Named entry points, in declaration order
    pub entry: IndexMap<String, Vec<String>>,

    pub mode: Mode,

    pub devtool: DevTool,

    pub output: OutputOptions,

    pub performance: PerformanceOptions,

    pub module: ModuleOptions,

    pub plugins: Vec<Plugin>,
}

impl Configuration {
    /// Compact JSON for the bundler engine
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Number of plugins of the given kind in the chain.
    pub fn plugin_count(&self, kind: PluginKind) -> usize {
        self.plugins
            .iter()
            .filter(|plugin| plugin.kind() == kind)
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolveOptions {
    pub extensions: Vec<String>,

    /// Module search directories, highest priority first
    pub modules: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    Production,
}

impl Mode {
    pub fn from_production(production: bool) -> Self {
        if production {
            Mode::Production
        } else {
            Mode::Development
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Development => "development",
            Mode::Production => "production",
        }
    }
}

/// Source map strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DevTool {
    /// Full mappings without embedded source content
    NosourcesSourceMap,
    /// Line-level mappings, rebuilt quickly
    CheapModuleEvalSourceMap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputOptions {
    pub path: PathBuf,
    pub public_path: String,
    pub filename: String,
    pub source_map_filename: String,
    pub chunk_filename: String,
}

impl OutputOptions {
    /// Content-hashed names in production, per-build hashes otherwise.
    pub fn new(path: PathBuf, public_path: String, production: bool) -> Self {
        let hash = if production { "[chunkhash]" } else { "[hash]" };
        Self {
            path,
            public_path,
            filename: format!("[name].{hash}.bundle.js"),
            source_map_filename: format!("[name].{hash}.bundle.map"),
            chunk_filename: format!("[name].{hash}.chunk.js"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PerformanceOptions {
    pub hints: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleOptions {
    pub rules: RuleSet,
}
