//! Subcommand handlers.

pub mod config_cmd;
pub mod exec;
pub mod parse;
pub mod run;

use netbot_config::Config;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Load the config from `--config` or the platform path.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    let cfg = match &global.config {
        Some(path) => netbot_config::load_config_from(path)?,
        None => netbot_config::load_config()?,
    };
    Ok(cfg)
}
