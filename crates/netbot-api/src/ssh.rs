// SSH plumbing shared by the NETCONF client (subsystem channel) and the
// interactive-session client (exec channel).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use russh::client::{self, Handle, Msg};
use russh::{Channel, ChannelMsg, Disconnect};
use secrecy::ExposeSecret;
use tracing::{debug, trace};

use crate::auth::DeviceCredentials;
use crate::error::Error;

/// Host-key policy for lab routers: every key is accepted.
///
/// The routers regenerate keys on every re-image, so pinning is left to
/// the network boundary rather than this client.
pub struct AcceptAnyHostKey;

#[async_trait]
impl client::Handler for AcceptAnyHostKey {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        _server_public_key: &russh_keys::key::PublicKey,
    ) -> Result<bool, Self::Error> {
        Ok(true)
    }
}

/// Connection parameters for one SSH service (port + credentials + timeout).
#[derive(Debug, Clone)]
pub struct SshClient {
    credentials: DeviceCredentials,
    port: u16,
    timeout: Duration,
}

impl SshClient {
    pub fn new(credentials: DeviceCredentials, port: u16, timeout: Duration) -> Self {
        Self {
            credentials,
            port,
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Open and authenticate a session to `host`.
    pub async fn connect(&self, host: &str) -> Result<SshSession, Error> {
        debug!(host, port = self.port, "opening SSH session");

        let config = Arc::new(client::Config {
            inactivity_timeout: Some(self.timeout),
            ..Default::default()
        });

        let connect = async {
            let mut handle = client::connect(config, (host, self.port), AcceptAnyHostKey).await?;
            let accepted = handle
                .authenticate_password(
                    self.credentials.username.clone(),
                    self.credentials.password.expose_secret(),
                )
                .await?;
            Ok::<_, Error>((handle, accepted))
        };

        let (handle, accepted) = with_timeout(self.timeout, connect).await?;
        if !accepted {
            return Err(Error::Authentication {
                message: format!("SSH password rejected by {host}"),
            });
        }

        Ok(SshSession {
            handle,
            timeout: self.timeout,
        })
    }

    /// Run a single command on `host` and return its combined output.
    pub async fn exec(&self, host: &str, command: &str) -> Result<String, Error> {
        let session = self.connect(host).await?;
        let output = session.exec(command).await;
        session.close().await;
        output
    }
}

/// An authenticated SSH connection.
pub struct SshSession {
    handle: Handle<AcceptAnyHostKey>,
    timeout: Duration,
}

impl SshSession {
    /// Run `command` on a fresh exec channel, collecting stdout and stderr
    /// until the remote side closes the channel.
    pub async fn exec(&self, command: &str) -> Result<String, Error> {
        debug!(command, "SSH exec");

        let run = async {
            let mut channel = self.handle.channel_open_session().await?;
            channel.exec(true, command).await?;

            let mut output = Vec::new();
            while let Some(msg) = channel.wait().await {
                match msg {
                    ChannelMsg::Data { ref data } | ChannelMsg::ExtendedData { ref data, .. } => {
                        output.extend_from_slice(data);
                    }
                    ChannelMsg::ExitStatus { exit_status } => {
                        trace!(exit_status, "exec finished");
                    }
                    ChannelMsg::Eof | ChannelMsg::Close => break,
                    _ => {}
                }
            }
            Ok::<_, Error>(String::from_utf8_lossy(&output).into_owned())
        };

        with_timeout(self.timeout, run).await
    }

    /// Open a channel bound to the named subsystem (e.g. `netconf`).
    pub async fn subsystem(&self, name: &str) -> Result<Channel<Msg>, Error> {
        debug!(subsystem = name, "requesting SSH subsystem");

        let open = async {
            let channel = self.handle.channel_open_session().await?;
            channel.request_subsystem(true, name).await?;
            Ok::<_, Error>(channel)
        };

        with_timeout(self.timeout, open).await
    }

    /// Disconnect politely. Failures are logged and dropped; the TCP
    /// connection goes away with the handle either way.
    pub async fn close(self) {
        if let Err(e) = self
            .handle
            .disconnect(Disconnect::ByApplication, "", "en")
            .await
        {
            debug!(error = %e, "SSH disconnect failed");
        }
    }
}

/// Bound a future by `timeout`, mapping expiry to [`Error::Timeout`].
pub(crate) async fn with_timeout<T>(
    timeout: Duration,
    fut: impl Future<Output = Result<T, Error>>,
) -> Result<T, Error> {
    tokio::time::timeout(timeout, fut)
        .await
        .map_err(|_| Error::Timeout {
            timeout_secs: timeout.as_secs(),
        })?
}
