// Interactive-session adapter: literal show commands over SSH exec.

use async_trait::async_trait;
use netbot_api::SshClient;
use tracing::debug;

use super::DeviceShell;
use super::brief::{gigabit_summary, parse_brief};
use crate::error::CoreError;
use crate::model::{DeviceAddress, Outcome};

const SHOW_BRIEF: &str = "show ip interface brief";
const SHOW_BANNER: &str = "show banner motd";

pub struct ShellAdapter {
    client: SshClient,
}

impl ShellAdapter {
    pub fn new(client: SshClient) -> Self {
        Self { client }
    }
}

/// Banner text from `show banner motd` output, `None` when unset.
///
/// IOS prints nothing for an unset banner; some images print a
/// `%`-prefixed notice instead.
pub fn banner_text(output: &str) -> Option<String> {
    let text = output.trim_matches(|c: char| c == '\r' || c == '\n');
    if text.trim().is_empty() || text.trim_start().starts_with('%') {
        return None;
    }
    Some(text.replace("\r\n", "\n"))
}

#[async_trait]
impl DeviceShell for ShellAdapter {
    async fn gigabit_status(&self, address: &DeviceAddress) -> Outcome {
        match self.client.exec(address.as_str(), SHOW_BRIEF).await {
            Ok(output) => {
                let rows = parse_brief(&output);
                debug!(rows = rows.len(), "parsed interface brief");
                Outcome::Success(gigabit_summary(&rows))
            }
            Err(e) => e.into(),
        }
    }

    async fn banner_get(&self, address: &DeviceAddress) -> Outcome {
        match self.client.exec(address.as_str(), SHOW_BANNER).await {
            Ok(output) => banner_text(&output).map_or_else(
                || Outcome::NotFound(CoreError::BannerNotConfigured.to_string()),
                Outcome::Success,
            ),
            Err(e) => e.into(),
        }
    }
}
