// Ansible adapter: running-config export and banner writes.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use netbot_api::{PlaybookCommand, PlaybookRun};
use serde::Serialize;
use tracing::{info, warn};

use super::PlaybookRunner;
use crate::error::CoreError;
use crate::model::{DeviceAddress, Outcome};

/// Reply text for a successful banner write.
pub const BANNER_SET_OK: &str = "Ok: success";

#[derive(Serialize)]
struct PlaybookVars<'a> {
    router_ip: &'a str,
    student_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    artifact_path: Option<&'a Path>,
    #[serde(skip_serializing_if = "Option::is_none")]
    motd: Option<&'a str>,
}

pub struct AnsibleAdapter {
    command: PlaybookCommand,
    showrun_playbook: PathBuf,
    motd_playbook: PathBuf,
    artifact_dir: PathBuf,
    student_id: String,
}

impl AnsibleAdapter {
    pub fn new(
        command: PlaybookCommand,
        showrun_playbook: impl Into<PathBuf>,
        motd_playbook: impl Into<PathBuf>,
        artifact_dir: impl Into<PathBuf>,
        student_id: impl Into<String>,
    ) -> Self {
        Self {
            command,
            showrun_playbook: showrun_playbook.into(),
            motd_playbook: motd_playbook.into(),
            artifact_dir: artifact_dir.into(),
            student_id: student_id.into(),
        }
    }

    /// Where the show-running playbook is told to write, e.g.
    /// `show_run_66070101_10.0.15.61.txt`.
    pub fn artifact_path(&self, address: &DeviceAddress) -> PathBuf {
        self.artifact_dir
            .join(format!("show_run_{}_{address}.txt", self.student_id))
    }

    fn failed<T>(run: &PlaybookRun) -> Outcome<T> {
        warn!(
            exit_ok = run.exit_ok,
            recap = ?run.recap,
            stderr = %run.stderr.trim(),
            "playbook did not report success"
        );
        Outcome::Failed(CoreError::PlaybookFailed.to_string())
    }
}

#[async_trait]
impl PlaybookRunner for AnsibleAdapter {
    async fn show_running(&self, address: &DeviceAddress) -> Outcome<PathBuf> {
        let artifact = self.artifact_path(address);
        let vars = PlaybookVars {
            router_ip: address.as_str(),
            student_id: &self.student_id,
            artifact_path: Some(&artifact),
            motd: None,
        };

        let run = match self.command.run(&self.showrun_playbook, &vars).await {
            Ok(run) => run,
            Err(e) => return e.into(),
        };
        if !run.succeeded() {
            return Self::failed(&run);
        }
        match tokio::fs::try_exists(&artifact).await {
            Ok(true) => {
                info!(path = %artifact.display(), "running config exported");
                Outcome::Success(artifact)
            }
            Ok(false) => {
                warn!(path = %artifact.display(), "playbook succeeded but wrote no artifact");
                Outcome::Failed(CoreError::PlaybookFailed.to_string())
            }
            Err(e) => netbot_api::Error::from(e).into(),
        }
    }

    async fn banner_set(&self, address: &DeviceAddress, text: &str) -> Outcome {
        let vars = PlaybookVars {
            router_ip: address.as_str(),
            student_id: &self.student_id,
            artifact_path: None,
            motd: Some(text),
        };

        match self.command.run(&self.motd_playbook, &vars).await {
            Ok(run) if run.succeeded() => Outcome::Success(BANNER_SET_OK.to_owned()),
            Ok(run) => Self::failed(&run),
            Err(e) => e.into(),
        }
    }
}
