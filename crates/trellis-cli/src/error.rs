//! Error handling for the trellis CLI.
//!
//! [`CliError`] wraps configuration failures and output I/O failures;
//! [`cli_error_to_miette`] turns them into diagnostics at the top of `main`.

use std::path::PathBuf;

use miette::Report;
use thiserror::Error;
use trellis_config::ConfigError;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Settings, path resolution, or assembly failed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The configuration could not be written
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(ConfigError::Io { path, source }) => miette::miette!(
            "Filesystem error at {}: {}\n\nHint: Check that the project root and output directory are accessible",
            path.display(),
            source
        ),
        CliError::Config(ConfigError::Settings(e)) => miette::miette!(
            "Invalid settings: {}\n\nHint: Check the TRELLIS_* environment variables",
            e
        ),
        _ => miette::miette!("{}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_mention_the_path() {
        let err = CliError::Config(ConfigError::Io {
            path: PathBuf::from("/srv/site/wwwroot"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        });
        let report = cli_error_to_miette(err);
        assert!(report.to_string().contains("/srv/site/wwwroot"));
    }

    #[test]
    fn write_errors_display_path() {
        let err = CliError::Write {
            path: PathBuf::from("out/config.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("out/config.json"));
    }
}
