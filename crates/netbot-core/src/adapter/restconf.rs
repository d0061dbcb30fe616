// RESTCONF adapter: the loopback as one `ietf-interfaces` resource.

use async_trait::async_trait;
use netbot_api::restconf::{Ipv4Address, Ipv4Config};
use netbot_api::{InterfaceConfig, PutDisposition, RestconfClient};
use tracing::debug;

use super::InterfaceBackend;
use crate::model::{
    DeviceAddress, InterfaceAction, LinkState, LoopbackSpec, Outcome, TransportKind,
    reduce_status,
};

const SOFTWARE_LOOPBACK: &str = "iana-if-type:softwareLoopback";

pub struct RestconfAdapter {
    client: RestconfClient,
    loopback: LoopbackSpec,
}

impl RestconfAdapter {
    pub fn new(client: RestconfClient, loopback: LoopbackSpec) -> Self {
        Self { client, loopback }
    }

    fn desired(&self) -> InterfaceConfig {
        InterfaceConfig {
            name: self.loopback.name(),
            if_type: Some(SOFTWARE_LOOPBACK.into()),
            description: Some(self.loopback.description()),
            enabled: Some(true),
            ipv4: Some(Ipv4Config {
                address: vec![Ipv4Address {
                    ip: self.loopback.ipv4_address.clone(),
                    netmask: self.loopback.ipv4_netmask.clone(),
                }],
            }),
            oper_status: None,
        }
    }

    async fn try_create(&self, host: &str) -> Result<Outcome, netbot_api::Error> {
        let lo = &self.loopback;
        if self.client.get_interface(host, &lo.name()).await?.is_some() {
            return Ok(Outcome::Conflict(lo.conflict_text(InterfaceAction::Create)));
        }
        Ok(match self.client.put_interface(host, &self.desired()).await? {
            PutDisposition::Created => Outcome::Success(lo.success_text(InterfaceAction::Create)),
            PutDisposition::Replaced => {
                Outcome::Conflict(lo.conflict_text(InterfaceAction::Create))
            }
        })
    }

    async fn try_delete(&self, host: &str) -> Result<Outcome, netbot_api::Error> {
        let lo = &self.loopback;
        Ok(if self.client.delete_interface(host, &lo.name()).await? {
            Outcome::Success(lo.success_text(InterfaceAction::Delete))
        } else {
            Outcome::Conflict(lo.conflict_text(InterfaceAction::Delete))
        })
    }

    async fn try_set_enabled(&self, host: &str, enabled: bool) -> Result<Outcome, netbot_api::Error> {
        let lo = &self.loopback;
        let action = if enabled {
            InterfaceAction::Enable
        } else {
            InterfaceAction::Disable
        };

        let Some(current) = self.client.get_interface(host, &lo.name()).await? else {
            return Ok(Outcome::NotFound(lo.not_found_text(action)));
        };
        // YANG default for `enabled` is true.
        if current.enabled.unwrap_or(true) == enabled {
            debug!(host, enabled, "interface already in requested state");
            return Ok(Outcome::Conflict(lo.conflict_text(action)));
        }

        self.client.set_enabled(host, &lo.name(), enabled).await?;
        Ok(Outcome::Success(lo.success_text(action)))
    }

    async fn try_status(&self, host: &str) -> Result<Outcome, netbot_api::Error> {
        let lo = &self.loopback;
        let Some(entry) = self.client.get_interface(host, &lo.name()).await? else {
            return Ok(Outcome::NotFound(lo.not_found_text(InterfaceAction::Status)));
        };

        let admin = LinkState::from_enabled(entry.enabled.unwrap_or(true));
        let oper = entry
            .oper_status
            .as_deref()
            .map_or(LinkState::Unknown, LinkState::parse);
        Ok(Outcome::Success(lo.state_text(reduce_status(admin, oper))))
    }
}

#[async_trait]
impl InterfaceBackend for RestconfAdapter {
    fn kind(&self) -> TransportKind {
        TransportKind::Restconf
    }

    async fn create(&self, address: &DeviceAddress) -> Outcome {
        self.try_create(address.as_str()).await.unwrap_or_else(Outcome::from)
    }

    async fn delete(&self, address: &DeviceAddress) -> Outcome {
        self.try_delete(address.as_str()).await.unwrap_or_else(Outcome::from)
    }

    async fn enable(&self, address: &DeviceAddress) -> Outcome {
        self.try_set_enabled(address.as_str(), true)
            .await
            .unwrap_or_else(Outcome::from)
    }

    async fn disable(&self, address: &DeviceAddress) -> Outcome {
        self.try_set_enabled(address.as_str(), false)
            .await
            .unwrap_or_else(Outcome::from)
    }

    async fn status(&self, address: &DeviceAddress) -> Outcome {
        self.try_status(address.as_str()).await.unwrap_or_else(Outcome::from)
    }
}
