// Process wrapper around `ansible-playbook`.
//
// Extra variables are passed as one JSON document so banner text with
// spaces, quotes or newlines reaches the playbook unmangled. Success is
// read from the PLAY RECAP table rather than from the exit code alone.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use serde::Serialize;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::Error;

/// How to invoke the playbook runner.
#[derive(Debug, Clone)]
pub struct PlaybookCommand {
    program: PathBuf,
    inventory: PathBuf,
    timeout: Duration,
}

/// One host line of the PLAY RECAP.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostRecap {
    pub host: String,
    pub ok: u32,
    pub changed: u32,
    pub unreachable: u32,
    pub failed: u32,
    pub skipped: u32,
}

impl HostRecap {
    pub fn is_clean(&self) -> bool {
        self.ok > 0 && self.failed == 0 && self.unreachable == 0
    }
}

/// Captured result of one playbook run.
#[derive(Debug, Clone)]
pub struct PlaybookRun {
    pub exit_ok: bool,
    pub stdout: String,
    pub stderr: String,
    pub recap: Vec<HostRecap>,
}

impl PlaybookRun {
    /// The run exited cleanly and every host in the recap is clean.
    pub fn succeeded(&self) -> bool {
        self.exit_ok && !self.recap.is_empty() && self.recap.iter().all(HostRecap::is_clean)
    }
}

impl PlaybookCommand {
    pub fn new(program: impl Into<PathBuf>, inventory: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            inventory: inventory.into(),
            timeout,
        }
    }

    /// Run `playbook` with `vars` as `--extra-vars`.
    ///
    /// Returns `Err` only when the process could not be run at all;
    /// a playbook that ran but failed is reported through [`PlaybookRun`].
    pub async fn run(&self, playbook: &Path, vars: &impl Serialize) -> Result<PlaybookRun, Error> {
        let extra_vars = serde_json::to_string(vars).map_err(|e| Error::Playbook {
            message: format!("cannot encode extra vars: {e}"),
        })?;
        debug!(
            program = %self.program.display(),
            playbook = %playbook.display(),
            "running playbook"
        );

        let child = Command::new(&self.program)
            .arg("-i")
            .arg(&self.inventory)
            .arg(playbook)
            .arg("--extra-vars")
            .arg(&extra_vars)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.timeout, child)
            .await
            .map_err(|_| Error::Timeout {
                timeout_secs: self.timeout.as_secs(),
            })?
            .map_err(|e| Error::Playbook {
                message: format!("cannot start {}: {e}", self.program.display()),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let recap = parse_recap(&stdout);
        if !output.status.success() {
            warn!(status = %output.status, "playbook exited unsuccessfully");
        }

        Ok(PlaybookRun {
            exit_ok: output.status.success(),
            stdout,
            stderr,
            recap,
        })
    }
}

/// Parse the `PLAY RECAP` section of `ansible-playbook` output.
///
/// Lines look like
/// `R1  : ok=3  changed=0  unreachable=0  failed=0  skipped=0 ...`;
/// unknown counters are ignored.
pub fn parse_recap(stdout: &str) -> Vec<HostRecap> {
    let Some(start) = stdout.find("PLAY RECAP") else {
        return Vec::new();
    };

    stdout[start..]
        .lines()
        .skip(1)
        .filter_map(|line| {
            let (host, counters) = line.split_once(" : ").or_else(|| line.split_once(':'))?;
            let host = host.trim();
            if host.is_empty() {
                return None;
            }
            let mut recap = HostRecap {
                host: host.to_owned(),
                ..HostRecap::default()
            };
            let mut seen = false;
            for pair in counters.split_whitespace() {
                let Some((key, value)) = pair.split_once('=') else {
                    continue;
                };
                let Ok(value) = value.parse::<u32>() else {
                    continue;
                };
                seen = true;
                match key {
                    "ok" => recap.ok = value,
                    "changed" => recap.changed = value,
                    "unreachable" => recap.unreachable = value,
                    "failed" => recap.failed = value,
                    "skipped" => recap.skipped = value,
                    _ => {}
                }
            }
            seen.then_some(recap)
        })
        .collect()
}
