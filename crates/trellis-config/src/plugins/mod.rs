//! Build plugin chain.
//!
//! Every plugin is paired with the flag that gates it and the pairs are
//! evaluated into a flat list, so an excluded plugin leaves no placeholder.

mod types;

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::debug;

use crate::conditional::{Gated, assemble};
use crate::context::BuildContext;
use crate::conventions::{
    PROMISE_POLYFILL, PROMISE_SYMBOL, TESTING_SUPPORT_DEPENDENCIES, TESTING_SUPPORT_MODULE,
};
use crate::error::Result;
use crate::factory::FactoryOptions;
use crate::paths::PathSet;
use crate::rules::Pattern;

pub use types::{
    CleanScope, CopyPattern, DocumentMetadata, HtmlDocumentOptions, MinifyOptions, Plugin,
    PluginKind,
};

/// A plugin together with whether the current build includes it.
pub type PluginSpec = Gated<Plugin>;

/// Generated test scaffolding that must not trigger incremental rebuilds.
pub const TEST_SCAFFOLD_PATTERN: &str = r"\.generated\.spec\.js$";

#[derive(Debug)]
pub struct PluginChainBuilder<'a> {
    context: &'a BuildContext,
    paths: &'a PathSet,
    options: &'a FactoryOptions,
}

impl<'a> PluginChainBuilder<'a> {
    pub fn new(context: &'a BuildContext, paths: &'a PathSet, options: &'a FactoryOptions) -> Self {
        Self {
            context,
            paths,
            options,
        }
    }

    /// All candidate plugins in chain order, with their inclusion decided.
    pub fn specs(&self) -> Result<Vec<PluginSpec>> {
        let ctx = self.context;

        Ok(vec![
            Gated::always(self.cleaner()),
            Gated::always(Plugin::Framework),
            Gated::always(Plugin::ProvideGlobals(IndexMap::from([(
                PROMISE_SYMBOL.to_string(),
                PROMISE_POLYFILL.to_string(),
            )]))),
            Gated::always(Plugin::ModuleDependencies(IndexMap::from([(
                TESTING_SUPPORT_MODULE.to_string(),
                TESTING_SUPPORT_DEPENDENCIES
                    .iter()
                    .map(|dep| dep.to_string())
                    .collect(),
            )]))),
            Gated::always(self.html_document()),
            Gated::when(
                ctx.extract_css,
                Plugin::ExtractStyles {
                    filename: if ctx.production {
                        "[contenthash].css".to_string()
                    } else {
                        "[id].css".to_string()
                    },
                    all_chunks: true,
                },
            ),
            Gated::when(
                ctx.production && self.options.copy_favicon,
                Plugin::CopyStatic(vec![self.favicon_copy()]),
            ),
            Gated::when(ctx.analyze, Plugin::BundleAnalyzer),
            Gated::when(
                self.options.ignore_test_scaffold,
                Plugin::WatchIgnore(vec![Pattern::new(TEST_SCAFFOLD_PATTERN)?]),
            ),
        ])
    }

    /// The ordered plugin chain for this build.
    pub fn build(&self) -> Result<Vec<Plugin>> {
        let plugins = assemble(self.specs()?);
        debug!(
            plugins = plugins.len(),
            production = self.context.production,
            "built plugin chain"
        );
        Ok(plugins)
    }

    fn cleaner(&self) -> Plugin {
        let out_dir = &self.paths.out_dir;
        let target = match self.options.clean_scope {
            CleanScope::OutputDir => out_dir.display().to_string(),
            CleanScope::OutputContents => format!("{}/**/*", out_dir.display()),
            // Relative to the cleaner root, stepping out through its parent
            CleanScope::ParentRelative => {
                let root = &self.paths.root_dir;
                match (root.file_name(), out_dir.strip_prefix(root)) {
                    (Some(root_name), Ok(relative)) => Path::new("..")
                        .join(root_name)
                        .join(relative)
                        .display()
                        .to_string(),
                    _ => out_dir.display().to_string(),
                }
            }
        };

        Plugin::CleanOutput {
            paths: vec![target],
            root: self.paths.root_dir.clone(),
        }
    }

    fn html_document(&self) -> Plugin {
        Plugin::HtmlDocument(HtmlDocumentOptions {
            template: self.paths.template.clone(),
            minify: self.context.production.then(MinifyOptions::default),
            metadata: DocumentMetadata {
                title: self.paths.title.clone(),
                server: self.context.server,
                base_url: self.paths.base_url.clone(),
            },
        })
    }

    fn favicon_copy(&self) -> CopyPattern {
        let to = self
            .paths
            .favicon
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| self.paths.favicon.clone());

        CopyPattern {
            from: self.paths.favicon.clone(),
            to,
        }
    }
}
