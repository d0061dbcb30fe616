//! Config subcommand handlers.

use std::path::PathBuf;

use dialoguer::{Input, Select};

use netbot_config::{CHAT_TOKEN_KEY, Config, DEVICE_PASSWORD_KEY};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, SecretKind};
use crate::error::CliError;

const REDACTED: &str = "********";

// ── Helpers ─────────────────────────────────────────────────────────

fn target_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(netbot_config::config_path)
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn keyring_user(kind: SecretKind) -> &'static str {
    match kind {
        SecretKind::ChatToken => CHAT_TOKEN_KEY,
        SecretKind::DevicePassword => DEVICE_PASSWORD_KEY,
    }
}

/// Prompt for a secret and return it if it should be written to the file.
fn prompt_secret(kind: SecretKind, label: &str) -> Result<Option<String>, CliError> {
    let value = rpassword::prompt_password(format!("{label}: ")).map_err(prompt_err)?;
    if value.is_empty() {
        eprintln!("   (skipped)");
        return Ok(None);
    }

    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let selection = Select::new()
        .with_prompt(format!("Where to store the {}?", label.to_lowercase()))
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    if selection == 0 {
        netbot_config::store_secret(keyring_user(kind), &value)?;
        eprintln!("   ✓ Stored in system keyring");
        Ok(None)
    } else {
        Ok(Some(value))
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let path = target_path(global);
            eprintln!("netbot configuration wizard");
            eprintln!("   Config path: {}\n", path.display());

            let mut cfg = Config::default();

            cfg.student_id = Input::new()
                .with_prompt("Student id")
                .default(cfg.student_id.clone())
                .interact_text()
                .map_err(prompt_err)?;

            let room_id: String = Input::new()
                .with_prompt("Webex room id")
                .interact_text()
                .map_err(prompt_err)?;
            cfg.chat.room_id = Some(room_id);

            cfg.chat.token = prompt_secret(SecretKind::ChatToken, "Access token")?;

            let allowlist: String = Input::new()
                .with_prompt("Router addresses (comma separated)")
                .default(cfg.devices.allowlist.join(","))
                .interact_text()
                .map_err(prompt_err)?;
            cfg.devices.allowlist = allowlist
                .split(',')
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_owned)
                .collect();

            cfg.devices.username = Input::new()
                .with_prompt("Router username")
                .default(cfg.devices.username.clone())
                .interact_text()
                .map_err(prompt_err)?;

            cfg.devices.password = prompt_secret(SecretKind::DevicePassword, "Router password")?;

            netbot_config::to_bot_config(&cfg)?;
            netbot_config::save_config_to(&cfg, &path)?;

            eprintln!("\n✓ Configuration written to {}", path.display());
            eprintln!("  Check it: netbot parse 10.0.15.61 create");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let mut cfg = super::load(global)?;
            if cfg.chat.token.is_some() {
                cfg.chat.token = Some(REDACTED.into());
            }
            if cfg.devices.password.is_some() {
                cfg.devices.password = Some(REDACTED.into());
            }
            let rendered = toml::to_string_pretty(&cfg).map_err(|e| CliError::Validation {
                field: "config".into(),
                reason: format!("failed to serialize config: {e}"),
            })?;
            print!("{rendered}");
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            println!("{}", target_path(global).display());
            Ok(())
        }

        // ── SetSecret ───────────────────────────────────────────────
        ConfigCommand::SetSecret { secret } => {
            let label = match secret {
                SecretKind::ChatToken => "Access token: ",
                SecretKind::DevicePassword => "Router password: ",
            };
            let value = rpassword::prompt_password(label).map_err(prompt_err)?;
            if value.is_empty() {
                return Err(CliError::Validation {
                    field: "secret".into(),
                    reason: "value cannot be empty".into(),
                });
            }
            netbot_config::store_secret(keyring_user(secret), &value)?;
            eprintln!("✓ Secret stored in system keyring");
            Ok(())
        }
    }
}
