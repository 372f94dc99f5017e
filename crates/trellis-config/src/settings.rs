//! Environment-driven settings.
//!
//! Values are layered with figment: built-in defaults first, then any
//! `TRELLIS_*` environment variable (`TRELLIS_OUT_DIR`, `TRELLIS_BASE_URL`, ...).

use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::helpers::{
    default_base_url, default_component_dir, default_dependency_dir, default_favicon,
    default_feature_dir, default_out_dir, default_template, lenient_optional_path,
    lenient_path, lenient_string,
};

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "TRELLIS_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Page title exposed to the HTML template
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,

    /// Project root (default: current working directory)
    #[serde(
        default,
        deserialize_with = "lenient_optional_path",
        skip_serializing_if = "Option::is_none"
    )]
    pub root_dir: Option<PathBuf>,

    /// Output directory, relative to the root
    #[serde(default = "default_out_dir", deserialize_with = "lenient_path")]
    pub out_dir: PathBuf,

    /// Public URL the bundle is served from
    #[serde(default = "default_base_url", deserialize_with = "lenient_string")]
    pub base_url: String,

    /// Feature source directory, as preferably spelled on disk
    #[serde(default = "default_feature_dir", deserialize_with = "lenient_path")]
    pub feature_dir: PathBuf,

    /// Component source directory, as preferably spelled on disk
    #[serde(default = "default_component_dir", deserialize_with = "lenient_path")]
    pub component_dir: PathBuf,

    /// Shared third-party dependency directory name
    #[serde(default = "default_dependency_dir", deserialize_with = "lenient_path")]
    pub dependency_dir: PathBuf,

    /// HTML template rendered into the entry document
    #[serde(default = "default_template", deserialize_with = "lenient_path")]
    pub template: PathBuf,

    /// Favicon copied to the output root in production
    #[serde(default = "default_favicon", deserialize_with = "lenient_path")]
    pub favicon: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: String::new(),
            root_dir: None,
            out_dir: default_out_dir(),
            base_url: default_base_url(),
            feature_dir: default_feature_dir(),
            component_dir: default_component_dir(),
            dependency_dir: default_dependency_dir(),
            template: default_template(),
            favicon: default_favicon(),
        }
    }
}

impl Settings {
    /// Defaults overridden by `TRELLIS_*` environment variables.
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load settings from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_figment(Self::figment())
    }

    /// Extract settings from a prepared figment (for layering extra providers).
    pub fn from_figment(figment: Figment) -> Result<Self> {
        Ok(figment.extract()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_match_conventional_layout() {
        let settings = Settings::default();
        assert_eq!(settings.title, "");
        assert!(settings.root_dir.is_none());
        assert_eq!(settings.out_dir, PathBuf::from("wwwroot"));
        assert_eq!(settings.base_url, "/");
        assert_eq!(settings.feature_dir, PathBuf::from("./Features"));
        assert_eq!(settings.component_dir, PathBuf::from("./Components"));
        assert_eq!(settings.dependency_dir, PathBuf::from("node_modules"));
        assert_eq!(settings.template, PathBuf::from("index.ejs"));
        assert_eq!(settings.favicon, PathBuf::from("static/favicon.ico"));
    }

    #[test]
    fn environment_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.set_env("TRELLIS_TITLE", "Dashboard");
            jail.set_env("TRELLIS_OUT_DIR", "dist/public");
            jail.set_env("TRELLIS_BASE_URL", "/app/");
            jail.set_env("TRELLIS_FEATURE_DIR", "./Modules");

            let settings = Settings::load().map_err(|err| err.to_string())?;
            assert_eq!(settings.title, "Dashboard");
            assert_eq!(settings.out_dir, PathBuf::from("dist/public"));
            assert_eq!(settings.base_url, "/app/");
            assert_eq!(settings.feature_dir, PathBuf::from("./Modules"));
            assert_eq!(settings.component_dir, PathBuf::from("./Components"));
            Ok(())
        });
    }

    #[test]
    fn numeric_and_boolean_values_are_taken_as_text() {
        Jail::expect_with(|jail| {
            jail.set_env("TRELLIS_TITLE", "2024");
            jail.set_env("TRELLIS_OUT_DIR", "2024");
            jail.set_env("TRELLIS_BASE_URL", "true");
            jail.set_env("TRELLIS_ROOT_DIR", "7");
            jail.set_env("TRELLIS_COMPONENT_DIR", "-3");

            let settings = Settings::load().map_err(|err| err.to_string())?;
            assert_eq!(settings.title, "2024");
            assert_eq!(settings.out_dir, PathBuf::from("2024"));
            assert_eq!(settings.base_url, "true");
            assert_eq!(settings.root_dir, Some(PathBuf::from("7")));
            assert_eq!(settings.component_dir, PathBuf::from("-3"));
            Ok(())
        });
    }

    #[test]
    fn boolean_title_is_kept() {
        Jail::expect_with(|jail| {
            jail.set_env("TRELLIS_TITLE", "false");

            let settings = Settings::load().map_err(|err| err.to_string())?;
            assert_eq!(settings.title, "false");
            Ok(())
        });
    }

    #[test]
    fn unset_environment_keeps_defaults() {
        Jail::expect_with(|_jail| {
            let settings = Settings::load().map_err(|err| err.to_string())?;
            assert_eq!(settings, Settings::default());
            Ok(())
        });
    }
}
