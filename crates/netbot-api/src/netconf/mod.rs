// NETCONF over SSH (RFC 6241 / RFC 6242), base:1.0 framing only.
//
// A session is opened per operation: hello exchange, one or two RPCs,
// close-session. The devices in scope accept this without locking.

pub mod framing;
pub mod payload;
pub mod xml;

use std::time::Duration;

use russh::client::Msg;
use russh::{Channel, ChannelMsg};
use tracing::{debug, trace};

use crate::auth::DeviceCredentials;
use crate::error::Error;
use crate::ssh::{SshClient, SshSession, with_timeout};

use self::framing::FrameBuffer;

/// Default NETCONF-over-SSH port.
pub const DEFAULT_PORT: u16 = 830;

/// Factory for NETCONF sessions against any allowed device.
#[derive(Debug, Clone)]
pub struct NetconfClient {
    ssh: SshClient,
}

impl NetconfClient {
    pub fn new(credentials: DeviceCredentials, port: u16, timeout: Duration) -> Self {
        Self {
            ssh: SshClient::new(credentials, port, timeout),
        }
    }

    /// Connect, open the `netconf` subsystem and exchange hellos.
    pub async fn open(&self, host: &str) -> Result<NetconfSession, Error> {
        let ssh = self.ssh.connect(host).await?;
        let channel = match ssh.subsystem("netconf").await {
            Ok(channel) => channel,
            Err(e) => {
                ssh.close().await;
                return Err(e);
            }
        };

        let mut session = NetconfSession {
            ssh,
            channel,
            frames: FrameBuffer::new(),
            next_id: 1,
            timeout: self.ssh.timeout(),
        };

        if let Err(e) = session.exchange_hello().await {
            session.ssh.close().await;
            return Err(e);
        }
        Ok(session)
    }
}

/// An open NETCONF session. Call [`close`](Self::close) when done.
pub struct NetconfSession {
    ssh: SshSession,
    channel: Channel<Msg>,
    frames: FrameBuffer,
    next_id: u32,
    timeout: Duration,
}

impl NetconfSession {
    async fn exchange_hello(&mut self) -> Result<(), Error> {
        let server_hello = with_timeout(self.timeout, self.receive()).await?;
        if !xml::has_element(&server_hello, "hello")? {
            return Err(Error::Xml("server did not open with <hello>".into()));
        }
        trace!("received server hello");
        self.send(&payload::hello()).await
    }

    /// `<get-config>` from `running` with a subtree filter; returns the raw reply.
    pub async fn get_config(&mut self, filter: &str) -> Result<String, Error> {
        self.rpc(&payload::get_config(filter)).await
    }

    /// `<get>` (config + state) with a subtree filter; returns the raw reply.
    pub async fn get(&mut self, filter: &str) -> Result<String, Error> {
        self.rpc(&payload::get(filter)).await
    }

    /// `<edit-config>` against `running`. Succeeds only on an `<ok/>` reply.
    pub async fn edit_config(&mut self, config: &str) -> Result<(), Error> {
        let reply = self.rpc(&payload::edit_config(config)).await?;
        if xml::has_element(&reply, "ok")? {
            Ok(())
        } else {
            Err(Error::Xml("edit-config reply carried neither <ok/> nor <rpc-error>".into()))
        }
    }

    /// Send `<close-session/>` and tear down the SSH connection.
    pub async fn close(mut self) {
        if let Err(e) = self.rpc(payload::close_session()).await {
            debug!(error = %e, "close-session failed");
        }
        self.ssh.close().await;
    }

    async fn rpc(&mut self, operation: &str) -> Result<String, Error> {
        let id = self.next_id;
        self.next_id += 1;
        debug!(message_id = id, "NETCONF rpc");

        let timeout = self.timeout;
        let exchange = async {
            self.send(&payload::rpc(id, operation)).await?;
            self.receive().await
        };
        let reply = with_timeout(timeout, exchange).await?;

        if let Some(message) = xml::rpc_error(&reply)? {
            return Err(Error::Netconf { message });
        }
        Ok(reply)
    }

    async fn send(&mut self, message: &str) -> Result<(), Error> {
        let framed = framing::frame(message);
        self.channel.data(framed.as_slice()).await?;
        Ok(())
    }

    async fn receive(&mut self) -> Result<String, Error> {
        loop {
            if let Some(message) = self.frames.next_message() {
                return Ok(message);
            }
            match self.channel.wait().await {
                Some(ChannelMsg::Data { ref data }) => self.frames.push(data),
                Some(ChannelMsg::Eof | ChannelMsg::Close) | None => {
                    return Err(Error::Netconf {
                        message: "session closed before reply was complete".into(),
                    });
                }
                Some(_) => {}
            }
        }
    }
}
