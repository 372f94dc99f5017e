use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::rules::Pattern;

/// A build plugin and its parameters.
///
/// Serialized as `{"plugin": "<kind>", "options": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "plugin", content = "options")]
pub enum Plugin {
    /// Delete prior build artifacts, never outside `root`
    #[serde(rename = "CleanWebpackPlugin")]
    CleanOutput { paths: Vec<String>, root: PathBuf },

    /// Framework conventions (view/module pairing, bootstrapper)
    #[serde(rename = "AureliaPlugin")]
    Framework,

    /// Bind global symbols to module exports
    #[serde(rename = "ProvidePlugin")]
    ProvideGlobals(IndexMap<String, String>),

    /// Declare implicit optional sub-module dependencies
    #[serde(rename = "ModuleDependenciesPlugin")]
    ModuleDependencies(IndexMap<String, Vec<String>>),

    /// Render the entry HTML document from a template
    #[serde(rename = "HtmlWebpackPlugin")]
    HtmlDocument(HtmlDocumentOptions),

    /// Extract stylesheets into standalone files
    #[serde(rename = "ExtractTextPlugin", rename_all = "camelCase")]
    ExtractStyles { filename: String, all_chunks: bool },

    /// Copy fixed files into the output directory
    #[serde(rename = "CopyWebpackPlugin")]
    CopyStatic(Vec<CopyPattern>),

    /// Interactive bundle size breakdown
    #[serde(rename = "BundleAnalyzerPlugin")]
    BundleAnalyzer,

    /// Files whose changes never trigger a rebuild
    #[serde(rename = "WatchIgnorePlugin")]
    WatchIgnore(Vec<Pattern>),
}

/// Plugin discriminant, for inspecting a chain without matching on parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginKind {
    CleanOutput,
    Framework,
    ProvideGlobals,
    ModuleDependencies,
    HtmlDocument,
    ExtractStyles,
    CopyStatic,
    BundleAnalyzer,
    WatchIgnore,
}

impl Plugin {
    pub fn kind(&self) -> PluginKind {
        match self {
            Plugin::CleanOutput { .. } => PluginKind::CleanOutput,
            Plugin::Framework => PluginKind::Framework,
            Plugin::ProvideGlobals(_) => PluginKind::ProvideGlobals,
            Plugin::ModuleDependencies(_) => PluginKind::ModuleDependencies,
            Plugin::HtmlDocument(_) => PluginKind::HtmlDocument,
            Plugin::ExtractStyles { .. } => PluginKind::ExtractStyles,
            Plugin::CopyStatic(_) => PluginKind::CopyStatic,
            Plugin::BundleAnalyzer => PluginKind::BundleAnalyzer,
            Plugin::WatchIgnore(_) => PluginKind::WatchIgnore,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HtmlDocumentOptions {
    pub template: PathBuf,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub minify: Option<MinifyOptions>,

    /// Values visible to the template
    pub metadata: DocumentMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinifyOptions {
    pub remove_comments: bool,
    pub collapse_whitespace: bool,
}

impl Default for MinifyOptions {
    fn default() -> Self {
        Self {
            remove_comments: true,
            collapse_whitespace: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub title: String,
    pub server: bool,
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyPattern {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// How much the output cleaner is allowed to delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CleanScope {
    /// The output directory itself
    #[default]
    OutputDir,
    /// Every file below the output directory, keeping the directory
    OutputContents,
    /// The output directory spelled from the root's parent (`../<root>/<out>`)
    ParentRelative,
}
