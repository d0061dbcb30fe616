//! `netbot parse`: show what a command would do, without touching a device.

use netbot_core::{Allowlist, parser};

use crate::cli::{GlobalOpts, ParseArgs};
use crate::error::CliError;

pub fn handle(args: &ParseArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = super::load(global)?;
    let allowlist = Allowlist::new(cfg.devices.allowlist);

    let intent = parser::parse(&args.command.join(" "), &allowlist);
    println!("{}", serde_json::to_string_pretty(&intent)?);
    Ok(())
}
