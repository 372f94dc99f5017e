//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use trellis_config::{BuildContext, CleanScope, FactoryOptions};

/// Trellis - bundler configuration for single-page applications
#[derive(Parser, Debug)]
#[command(
    name = "trellis",
    version,
    about = "Assemble a bundler configuration for a single-page application",
    long_about = "Trellis resolves the project's source directories (checking their exact\n\
                  on-disk case), applies TRELLIS_* environment overrides, and prints one\n\
                  complete bundler configuration as JSON for the given build flags."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Optimized build with content-hashed file names
    #[arg(long)]
    pub production: bool,

    /// The bundle is served by a development server
    #[arg(long)]
    pub server: bool,

    /// Extract stylesheets into standalone files
    #[arg(long)]
    pub extract_css: bool,

    /// Instrument scripts for coverage
    #[arg(long)]
    pub coverage: bool,

    /// Include the bundle composition analyzer
    #[arg(long)]
    pub analyze: bool,

    /// Project setup the configuration targets
    #[arg(long, value_enum, default_value_t = Variant::Deploy)]
    pub variant: Variant,

    /// Override what the output cleaner may delete
    #[arg(long, value_enum)]
    pub clean_scope: Option<CleanScopeArg>,

    /// Pretty-print the JSON
    #[arg(long)]
    pub pretty: bool,

    /// Write the configuration to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Cli {
    pub fn build_context(&self) -> BuildContext {
        BuildContext {
            production: self.production,
            server: self.server,
            extract_css: self.extract_css,
            coverage: self.coverage,
            analyze: self.analyze,
        }
    }

    pub fn factory_options(&self) -> FactoryOptions {
        let mut options = match self.variant {
            Variant::Deploy => FactoryOptions::default(),
            Variant::Workbench => FactoryOptions::workbench(),
        };
        if let Some(scope) = self.clean_scope {
            options.clean_scope = scope.into();
        }
        options
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum Variant {
    /// Fixed source maps, favicon copied in production
    #[value(name = "deploy")]
    Deploy,

    /// Mode-dependent source maps, test scaffolding ignored, output directory created
    #[value(name = "workbench")]
    Workbench,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum CleanScopeArg {
    /// The output directory itself
    #[value(name = "output-dir")]
    OutputDir,

    /// Every file below the output directory
    #[value(name = "output-contents")]
    OutputContents,

    /// The output directory spelled from the root's parent
    #[value(name = "parent-relative")]
    ParentRelative,
}

impl From<CleanScopeArg> for CleanScope {
    fn from(scope: CleanScopeArg) -> Self {
        match scope {
            CleanScopeArg::OutputDir => CleanScope::OutputDir,
            CleanScopeArg::OutputContents => CleanScope::OutputContents,
            CleanScopeArg::ParentRelative => CleanScope::ParentRelative,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_config::SourceMapPolicy;

    #[test]
    fn flags_default_to_development_build() {
        let cli = Cli::try_parse_from(["trellis"]).unwrap();
        assert_eq!(cli.build_context(), BuildContext::development());
        assert_eq!(cli.factory_options(), FactoryOptions::default());
        assert!(!cli.pretty);
        assert!(cli.output.is_none());
    }

    #[test]
    fn build_flags_map_to_context() {
        let cli = Cli::try_parse_from([
            "trellis",
            "--production",
            "--extract-css",
            "--analyze",
            "--server",
        ])
        .unwrap();

        let ctx = cli.build_context();
        assert!(ctx.production);
        assert!(ctx.extract_css);
        assert!(ctx.analyze);
        assert!(ctx.server);
        assert!(!ctx.coverage);
    }

    #[test]
    fn workbench_variant_selects_its_options() {
        let cli = Cli::try_parse_from(["trellis", "--variant", "workbench"]).unwrap();
        let options = cli.factory_options();
        assert_eq!(options.source_maps, SourceMapPolicy::ByMode);
        assert!(options.create_out_dir);
        assert_eq!(options.clean_scope, CleanScope::OutputContents);
    }

    #[test]
    fn clean_scope_overrides_variant_default() {
        let cli = Cli::try_parse_from([
            "trellis",
            "--variant",
            "workbench",
            "--clean-scope",
            "parent-relative",
        ])
        .unwrap();
        assert_eq!(cli.factory_options().clean_scope, CleanScope::ParentRelative);
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["trellis", "--verbose", "--quiet"]).is_err());
    }

    #[test]
    fn unknown_variant_is_rejected() {
        assert!(Cli::try_parse_from(["trellis", "--variant", "staging"]).is_err());
    }
}
