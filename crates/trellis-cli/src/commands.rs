//! Configuration emission.

use std::fs;
use std::io::Write;

use tracing::{debug, info};
use trellis_config::{ConfigFactory, DirectoryAccess, Settings};

use crate::cli::Cli;
use crate::error::{CliError, Result};

/// Load settings from the environment, assemble, and emit the configuration.
pub fn execute(args: &Cli) -> Result<()> {
    let settings = Settings::load()?;
    debug!(?settings, "loaded settings");

    let factory = ConfigFactory::from_settings(&settings)?.with_options(args.factory_options());
    let json = render(args, &factory)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &json).map_err(|source| CliError::Write {
                path: path.clone(),
                source,
            })?;
            info!(path = %path.display(), "wrote configuration");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").map_err(|source| CliError::Write {
                path: "<stdout>".into(),
                source,
            })?;
        }
    }

    Ok(())
}

/// Build the configuration for the parsed flags and serialize it.
pub fn render<A: DirectoryAccess>(args: &Cli, factory: &ConfigFactory<A>) -> Result<String> {
    let config = factory.build(&args.build_context())?;

    let json = if args.pretty {
        config.to_json_pretty()?
    } else {
        config.to_json()?
    };
    Ok(json)
}
