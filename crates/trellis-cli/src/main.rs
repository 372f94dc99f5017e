//! Trellis CLI - prints the bundler configuration for one build.
//!
//! Handles argument parsing and logging setup, then hands off to
//! [`commands::execute`].

use clap::Parser;
use miette::Result;
use trellis_cli::{cli, commands, error, logger};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);

    commands::execute(&args).map_err(error::cli_error_to_miette)
}
