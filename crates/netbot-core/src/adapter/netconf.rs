// NETCONF adapter: existence and `enabled` from get-config, admin/oper
// state from get, mutations through edit-config. One session per call.

use async_trait::async_trait;
use netbot_api::netconf::payload::{self, LoopbackConfig};
use netbot_api::netconf::xml;
use netbot_api::{NetconfClient, NetconfSession};
use tracing::debug;

use super::InterfaceBackend;
use crate::model::{
    DeviceAddress, InterfaceAction, InterfaceState, LinkState, LoopbackSpec, Outcome,
    TransportKind, reduce_status,
};

type ApiResult<T> = Result<T, netbot_api::Error>;

// ── Session seams ───────────────────────────────────────────────────

/// The RPCs the adapter issues over one NETCONF session.
#[async_trait]
pub trait NetconfOps: Send {
    async fn get_config(&mut self, filter: &str) -> ApiResult<String>;

    async fn get(&mut self, filter: &str) -> ApiResult<String>;

    /// `Ok` only when the device answered `<ok/>`.
    async fn edit_config(&mut self, config: &str) -> ApiResult<()>;

    /// Best effort; failures are logged by the implementation.
    async fn close(self);
}

/// Opens NETCONF sessions to a router.
#[async_trait]
pub trait NetconfConnect: Send + Sync {
    type Session: NetconfOps;

    async fn open(&self, host: &str) -> ApiResult<Self::Session>;
}

#[async_trait]
impl NetconfOps for NetconfSession {
    async fn get_config(&mut self, filter: &str) -> ApiResult<String> {
        NetconfSession::get_config(self, filter).await
    }

    async fn get(&mut self, filter: &str) -> ApiResult<String> {
        NetconfSession::get(self, filter).await
    }

    async fn edit_config(&mut self, config: &str) -> ApiResult<()> {
        NetconfSession::edit_config(self, config).await
    }

    async fn close(self) {
        NetconfSession::close(self).await;
    }
}

#[async_trait]
impl NetconfConnect for NetconfClient {
    type Session = NetconfSession;

    async fn open(&self, host: &str) -> ApiResult<NetconfSession> {
        NetconfClient::open(self, host).await
    }
}

// ── Reply readers ───────────────────────────────────────────────────

/// Read a get-config reply: `None` when `name` is not configured, else
/// its `enabled` leaf. An absent leaf means the YANG default (`true`).
fn configured_from(reply: &str, name: &str) -> ApiResult<Option<bool>> {
    if xml::leaf_text(reply, "name")?.as_deref() != Some(name) {
        return Ok(None);
    }
    let enabled = xml::leaf_text(reply, "enabled")?.is_none_or(|v| v.trim() != "false");
    Ok(Some(enabled))
}

/// Read an interfaces-state reply: `None` when `name` has no state entry.
fn state_from(reply: &str, name: &str) -> ApiResult<Option<InterfaceState>> {
    if xml::leaf_text(reply, "name")?.as_deref() != Some(name) {
        return Ok(None);
    }
    let admin = xml::leaf_text(reply, "admin-status")?
        .as_deref()
        .map_or(LinkState::Unknown, LinkState::parse);
    let oper = xml::leaf_text(reply, "oper-status")?
        .as_deref()
        .map_or(LinkState::Unknown, LinkState::parse);
    Ok(Some(reduce_status(admin, oper)))
}

// ── Adapter ─────────────────────────────────────────────────────────

pub struct NetconfAdapter<C = NetconfClient> {
    connector: C,
    loopback: LoopbackSpec,
}

impl<C: NetconfConnect> NetconfAdapter<C> {
    pub fn new(connector: C, loopback: LoopbackSpec) -> Self {
        Self {
            connector,
            loopback,
        }
    }

    async fn run_action(&self, address: &DeviceAddress, action: InterfaceAction) -> Outcome {
        let mut session = match self.connector.open(address.as_str()).await {
            Ok(session) => session,
            Err(e) => return e.into(),
        };

        let result = match action {
            InterfaceAction::Create => self.create_in(&mut session).await,
            InterfaceAction::Delete => self.delete_in(&mut session).await,
            InterfaceAction::Enable => self.set_enabled_in(&mut session, true).await,
            InterfaceAction::Disable => self.set_enabled_in(&mut session, false).await,
            InterfaceAction::Status => self.status_in(&mut session).await,
        };
        session.close().await;
        result.unwrap_or_else(Outcome::from)
    }

    async fn configured(&self, session: &mut C::Session) -> ApiResult<Option<bool>> {
        let name = self.loopback.name();
        let reply = session.get_config(&payload::interface_filter(&name)).await?;
        configured_from(&reply, &name)
    }

    async fn create_in(&self, session: &mut C::Session) -> ApiResult<Outcome> {
        let lo = &self.loopback;
        if self.configured(session).await?.is_some() {
            return Ok(Outcome::Conflict(lo.conflict_text(InterfaceAction::Create)));
        }

        let (name, description) = (lo.name(), lo.description());
        let config = payload::create_loopback(&LoopbackConfig {
            name: &name,
            description: &description,
            address: &lo.ipv4_address,
            netmask: &lo.ipv4_netmask,
        });
        session.edit_config(&config).await?;
        Ok(Outcome::Success(lo.success_text(InterfaceAction::Create)))
    }

    async fn delete_in(&self, session: &mut C::Session) -> ApiResult<Outcome> {
        let lo = &self.loopback;
        if self.configured(session).await?.is_none() {
            return Ok(Outcome::Conflict(lo.conflict_text(InterfaceAction::Delete)));
        }
        session
            .edit_config(&payload::delete_interface(&lo.name()))
            .await?;
        Ok(Outcome::Success(lo.success_text(InterfaceAction::Delete)))
    }

    async fn set_enabled_in(&self, session: &mut C::Session, enabled: bool) -> ApiResult<Outcome> {
        let lo = &self.loopback;
        let action = if enabled {
            InterfaceAction::Enable
        } else {
            InterfaceAction::Disable
        };

        let Some(current) = self.configured(session).await? else {
            return Ok(Outcome::NotFound(lo.not_found_text(action)));
        };
        if current == enabled {
            debug!(enabled, "interface already in requested state");
            return Ok(Outcome::Conflict(lo.conflict_text(action)));
        }

        session
            .edit_config(&payload::set_enabled(&lo.name(), enabled))
            .await?;
        Ok(Outcome::Success(lo.success_text(action)))
    }

    async fn status_in(&self, session: &mut C::Session) -> ApiResult<Outcome> {
        let lo = &self.loopback;
        let name = lo.name();
        let reply = session
            .get(&payload::interface_state_filter(&name))
            .await?;
        Ok(match state_from(&reply, &name)? {
            Some(state) => Outcome::Success(lo.state_text(state)),
            None => Outcome::NotFound(lo.not_found_text(InterfaceAction::Status)),
        })
    }
}

#[async_trait]
impl<C: NetconfConnect> InterfaceBackend for NetconfAdapter<C> {
    fn kind(&self) -> TransportKind {
        TransportKind::Netconf
    }

    async fn create(&self, address: &DeviceAddress) -> Outcome {
        self.run_action(address, InterfaceAction::Create).await
    }

    async fn delete(&self, address: &DeviceAddress) -> Outcome {
        self.run_action(address, InterfaceAction::Delete).await
    }

    async fn enable(&self, address: &DeviceAddress) -> Outcome {
        self.run_action(address, InterfaceAction::Enable).await
    }

    async fn disable(&self, address: &DeviceAddress) -> Outcome {
        self.run_action(address, InterfaceAction::Disable).await
    }

    async fn status(&self, address: &DeviceAddress) -> Outcome {
        self.run_action(address, InterfaceAction::Status).await
    }
}
