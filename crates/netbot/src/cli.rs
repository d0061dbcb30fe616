//! Clap derive structures for the `netbot` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use netbot_core::TransportKind;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// netbot -- drive lab routers from a chat room
#[derive(Debug, Parser)]
#[command(
    name = "netbot",
    version,
    about = "Chat-driven router automation bot",
    long_about = "Polls a Webex room for commands addressed to /<student_id> and runs them\n\
        against allowlisted routers over RESTCONF, NETCONF, SSH or Ansible.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "NETBOT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log output format
    #[arg(long, env = "NETBOT_LOG_FORMAT", default_value = "text", global = true)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per event
    Json,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Poll the chat room and answer commands until interrupted
    Run,

    /// Run a single command locally and print the reply
    Exec(ExecArgs),

    /// Print the parsed intent of a command as JSON
    Parse(ParseArgs),

    /// Manage configuration and stored secrets
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct ExecArgs {
    /// Transport to preselect (restconf or netconf)
    #[arg(long, short = 't')]
    pub transport: Option<TransportKind>,

    /// Command text without the /<student_id> prefix, e.g. `10.0.15.61 create`
    #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
    pub command: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Command text without the /<student_id> prefix
    #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
    pub command: Vec<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive configuration wizard
    Init,

    /// Print the effective configuration as TOML
    Show,

    /// Print the config file path
    Path,

    /// Store a secret in the system keyring
    SetSecret {
        /// Which secret to store
        secret: SecretKind,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SecretKind {
    /// Webex access token
    ChatToken,
    /// Router login password
    DevicePassword,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: clap_complete::Shell,
}
