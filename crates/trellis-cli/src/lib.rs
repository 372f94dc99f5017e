//! Command-line entry point for trellis.
//!
//! The binary is the process entry point for configuration assembly: it loads
//! settings from the environment once, resolves project paths once, and prints
//! the configuration for the requested build flags as JSON.
//!
//! - [`cli`] - Argument definitions
//! - [`commands`] - Configuration emission
//! - [`error`] - Error types and diagnostic conversion
//! - [`logger`] - Structured logging with tracing

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
