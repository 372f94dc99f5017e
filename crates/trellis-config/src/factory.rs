//! Top-level configuration assembly.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::configuration::{
    Configuration, DevTool, Mode, ModuleOptions, OutputOptions, PerformanceOptions,
    ResolveOptions,
};
use crate::context::BuildContext;
use crate::conventions::{FRAMEWORK_BOOTSTRAPPER, PROMISE_POLYFILL, RESOLVE_EXTENSIONS};
use crate::error::{ConfigError, Result};
use crate::paths::PathSet;
use crate::plugins::{CleanScope, PluginChainBuilder};
use crate::resolver::{DirectoryAccess, NativeFs};
use crate::rules::RuleSetBuilder;
use crate::settings::Settings;

/// How the source map strategy is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceMapPolicy {
    /// `nosources-source-map` in every mode
    #[default]
    Fixed,
    /// Detailed maps in production, fast maps in development
    ByMode,
}

impl SourceMapPolicy {
    pub fn devtool(self, mode: Mode) -> DevTool {
        match (self, mode) {
            (SourceMapPolicy::Fixed, _) | (SourceMapPolicy::ByMode, Mode::Production) => {
                DevTool::NosourcesSourceMap
            }
            (SourceMapPolicy::ByMode, Mode::Development) => DevTool::CheapModuleEvalSourceMap,
        }
    }
}

/// Deployment-specific choices that differ between project setups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FactoryOptions {
    pub source_maps: SourceMapPolicy,

    /// Copy the favicon to the output root in production builds
    pub copy_favicon: bool,

    /// Keep generated test scaffolding from triggering rebuilds
    pub ignore_test_scaffold: bool,

    /// Create the output directory before returning the configuration
    pub create_out_dir: bool,

    pub clean_scope: CleanScope,
}

impl Default for FactoryOptions {
    fn default() -> Self {
        Self {
            source_maps: SourceMapPolicy::Fixed,
            copy_favicon: true,
            ignore_test_scaffold: false,
            create_out_dir: false,
            clean_scope: CleanScope::OutputDir,
        }
    }
}

impl FactoryOptions {
    /// Setup for projects that run their test harness against the dev build.
    pub fn workbench() -> Self {
        Self {
            source_maps: SourceMapPolicy::ByMode,
            copy_favicon: false,
            ignore_test_scaffold: true,
            create_out_dir: true,
            clean_scope: CleanScope::OutputContents,
        }
    }
}

/// Builds bundler configurations from resolved paths and per-build flags.
///
/// The [`PathSet`] is resolved once and reused for every build.
///
/// # Example
///
/// ```
/// use trellis_config::{BuildContext, ConfigFactory, MemoryFs, Mode, PathSet, Settings};
///
/// let fs = MemoryFs::new("/srv/site").with_dir("/srv/site/features");
/// let paths = PathSet::resolve(&Settings::default(), &fs).unwrap();
/// let factory = ConfigFactory::new(paths).with_access(fs);
///
/// let config = factory.build(&BuildContext::development()).unwrap();
/// assert_eq!(config.mode, Mode::Development);
/// ```
#[derive(Debug)]
pub struct ConfigFactory<A: DirectoryAccess = NativeFs> {
    paths: PathSet,
    options: FactoryOptions,
    access: A,
}

impl ConfigFactory<NativeFs> {
    pub fn new(paths: PathSet) -> Self {
        Self {
            paths,
            options: FactoryOptions::default(),
            access: NativeFs,
        }
    }

    /// Load settings from the environment and resolve paths on the host filesystem.
    pub fn from_env() -> Result<Self> {
        let settings = Settings::load()?;
        Self::from_settings(&settings)
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let paths = PathSet::resolve(settings, &NativeFs)?;
        Ok(Self::new(paths))
    }
}

impl<A: DirectoryAccess> ConfigFactory<A> {
    pub fn with_options(mut self, options: FactoryOptions) -> Self {
        self.options = options;
        self
    }

    /// Swap the filesystem used for output directory creation.
    pub fn with_access<B: DirectoryAccess>(self, access: B) -> ConfigFactory<B> {
        ConfigFactory {
            paths: self.paths,
            options: self.options,
            access,
        }
    }

    pub fn paths(&self) -> &PathSet {
        &self.paths
    }

    pub fn options(&self) -> &FactoryOptions {
        &self.options
    }

    pub fn access(&self) -> &A {
        &self.access
    }

    /// Assemble the configuration for one build.
    ///
    /// # Errors
    ///
    /// Fails if the output directory cannot be created (when
    /// [`FactoryOptions::create_out_dir`] is set).
    pub fn build(&self, context: &BuildContext) -> Result<Configuration> {
        if self.options.create_out_dir {
            self.ensure_out_dir()?;
        }

        let paths = &self.paths;
        let mode = Mode::from_production(context.production);

        let rules = RuleSetBuilder::new(context, paths).build()?;
        let plugins = PluginChainBuilder::new(context, paths, &self.options).build()?;

        let config = Configuration {
            resolve: ResolveOptions {
                extensions: RESOLVE_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
                modules: vec![
                    paths.feature_dir.clone(),
                    paths.component_dir.clone(),
                    paths.dependency_dir.clone(),
                ],
            },
            entry: IndexMap::from([
                ("app".to_string(), vec![FRAMEWORK_BOOTSTRAPPER.to_string()]),
                ("vendor".to_string(), vec![PROMISE_POLYFILL.to_string()]),
            ]),
            mode,
            devtool: self.options.source_maps.devtool(mode),
            output: OutputOptions::new(
                paths.out_dir.clone(),
                paths.base_url.clone(),
                context.production,
            ),
            performance: PerformanceOptions::default(),
            module: ModuleOptions { rules },
            plugins,
        };

        info!(
            mode = mode.as_str(),
            rules = config.module.rules.len(),
            plugins = config.plugins.len(),
            "assembled bundler configuration"
        );
        Ok(config)
    }

    fn ensure_out_dir(&self) -> Result<()> {
        let out_dir = &self.paths.out_dir;
        if self.access.exists(out_dir) {
            return Ok(());
        }

        debug!(path = %out_dir.display(), "creating output directory");
        self.access
            .create_dir_all(out_dir)
            .map_err(|err| ConfigError::io(out_dir, err))
    }
}
