//! Logging setup for the trellis CLI.
//!
//! Structured logging through the `tracing` ecosystem. Diagnostics go to
//! stderr so stdout carries only the JSON configuration.
//!
//! # Features
//!
//! - **Verbosity control**: `--verbose` for debug, `--quiet` for errors only
//! - **Color support**: terminal detection with `--no-color`, `NO_COLOR` and
//!   `FORCE_COLOR` overrides
//! - **Environment filters**: `RUST_LOG` applies when neither flag is given
//!
//! # Example
//!
//! ```rust,no_run
//! use trellis_cli::logger::init_logger;
//! use tracing::{debug, info};
//!
//! init_logger(false, false, false);
//!
//! info!("assembling configuration");
//! debug!(root = "/srv/site", "resolved project paths");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "trellis=debug,trellis_config=debug,trellis_cli=debug";
const QUIET_FILTER: &str = "trellis=error,trellis_config=error,trellis_cli=error";
const DEFAULT_FILTER: &str = "trellis=info,trellis_config=info,trellis_cli=info";

/// Initialize the global tracing subscriber.
///
/// Call once at the start of the program, before any logging occurs.
///
/// # Arguments
///
/// * `verbose` - Debug-level logging for the trellis crates
/// * `quiet` - Only error-level logs
/// * `no_color` - Disable ANSI colors (also disabled when [`should_use_colors`]
///   says the terminal cannot show them)
///
/// # Verbosity Levels
///
/// The filter is chosen in this order:
/// 1. `--verbose`: DEBUG for `trellis`, `trellis_config` and `trellis_cli`
/// 2. `--quiet`: ERROR only
/// 3. `RUST_LOG`: a custom filter
/// 4. Default: INFO for the trellis crates
///
/// # Examples
///
/// ```rust,no_run
/// use trellis_cli::logger::init_logger;
///
/// // Default logging (INFO level)
/// init_logger(false, false, false);
/// ```
///
/// ```rust,no_run
/// use trellis_cli::logger::init_logger;
///
/// // Errors only, no colors (CI or piped output)
/// init_logger(false, true, true);
/// ```
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color || !should_use_colors());
}

/// Initialize logging with an explicit filter.
///
/// Useful in tests or when the caller needs precise control over filtering.
///
/// # Example
///
/// ```rust,no_run
/// use trellis_cli::logger::init_logger_with_filter;
/// use tracing_subscriber::EnvFilter;
///
/// let filter = EnvFilter::new("trellis_config=trace");
/// init_logger_with_filter(filter, false);
/// ```
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Whether stderr should receive ANSI colors.
///
/// # Environment Variables
///
/// - `NO_COLOR`: if set, disables colors (wins over `FORCE_COLOR`)
/// - `FORCE_COLOR`: if set, forces colors even when stderr is not a TTY
///
/// Otherwise the console crate checks the terminal's capabilities.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::Term::stderr().features().colors_supported()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn verbose_filter_enables_debug() {
        let filter = filter_for(true, false);
        assert!(filter.to_string().contains("trellis_config=debug"));
    }

    #[test]
    fn quiet_filter_keeps_errors_only() {
        let filter = filter_for(false, true);
        assert!(filter.to_string().contains("trellis_cli=error"));
    }

    #[test]
    #[serial]
    fn default_filter_applies_without_rust_log() {
        unsafe { std::env::remove_var("RUST_LOG") };
        let filter = filter_for(false, false);
        assert!(filter.to_string().contains("trellis_config=info"));
    }

    #[test]
    #[serial]
    fn no_color_wins_over_force_color() {
        unsafe {
            std::env::set_var("NO_COLOR", "1");
            std::env::set_var("FORCE_COLOR", "1");
        }
        assert!(!should_use_colors());
        unsafe {
            std::env::remove_var("NO_COLOR");
            std::env::remove_var("FORCE_COLOR");
        }
    }

    #[test]
    #[serial]
    fn force_color_enables_colors() {
        unsafe {
            std::env::remove_var("NO_COLOR");
            std::env::set_var("FORCE_COLOR", "1");
        }
        assert!(should_use_colors());
        unsafe {
            std::env::remove_var("FORCE_COLOR");
        }
    }
}
