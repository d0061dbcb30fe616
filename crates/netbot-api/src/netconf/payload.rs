// XML payload builders for the NETCONF operations the bridge performs.

use quick_xml::escape::escape;

const BASE_NS: &str = "urn:ietf:params:xml:ns:netconf:base:1.0";
const IF_NS: &str = "urn:ietf:params:xml:ns:yang:ietf-interfaces";
const IP_NS: &str = "urn:ietf:params:xml:ns:yang:ietf-ip";
const IANA_IF_NS: &str = "urn:ietf:params:xml:ns:yang:iana-if-type";

/// Loopback definition pushed by `create`.
#[derive(Debug, Clone, Copy)]
pub struct LoopbackConfig<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub address: &'a str,
    pub netmask: &'a str,
}

pub fn hello() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><hello xmlns="{BASE_NS}"><capabilities><capability>urn:ietf:params:netconf:base:1.0</capability></capabilities></hello>"#
    )
}

pub fn rpc(message_id: u32, operation: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><rpc message-id="{message_id}" xmlns="{BASE_NS}">{operation}</rpc>"#
    )
}

pub fn get_config(filter: &str) -> String {
    format!("<get-config><source><running/></source>{filter}</get-config>")
}

pub fn get(filter: &str) -> String {
    format!("<get>{filter}</get>")
}

pub fn edit_config(config: &str) -> String {
    format!("<edit-config><target><running/></target>{config}</edit-config>")
}

pub fn close_session() -> &'static str {
    "<close-session/>"
}

/// Subtree filter selecting one configured interface.
pub fn interface_filter(name: &str) -> String {
    format!(
        r#"<filter type="subtree"><interfaces xmlns="{IF_NS}"><interface><name>{}</name></interface></interfaces></filter>"#,
        escape(name)
    )
}

/// Subtree filter selecting one interface's operational state.
pub fn interface_state_filter(name: &str) -> String {
    format!(
        r#"<filter type="subtree"><interfaces-state xmlns="{IF_NS}"><interface><name>{}</name></interface></interfaces-state></filter>"#,
        escape(name)
    )
}

pub fn create_loopback(lo: &LoopbackConfig<'_>) -> String {
    format!(
        concat!(
            r#"<config><interfaces xmlns="{if_ns}"><interface>"#,
            "<name>{name}</name>",
            "<description>{description}</description>",
            r#"<type xmlns:ianaift="{iana}">ianaift:softwareLoopback</type>"#,
            "<enabled>true</enabled>",
            r#"<ipv4 xmlns="{ip_ns}"><address><ip>{address}</ip><netmask>{netmask}</netmask></address></ipv4>"#,
            "</interface></interfaces></config>"
        ),
        if_ns = IF_NS,
        iana = IANA_IF_NS,
        ip_ns = IP_NS,
        name = escape(lo.name),
        description = escape(lo.description),
        address = escape(lo.address),
        netmask = escape(lo.netmask),
    )
}

pub fn delete_interface(name: &str) -> String {
    format!(
        r#"<config><interfaces xmlns="{IF_NS}"><interface xmlns:nc="{BASE_NS}" nc:operation="delete"><name>{}</name></interface></interfaces></config>"#,
        escape(name)
    )
}

pub fn set_enabled(name: &str, enabled: bool) -> String {
    format!(
        r#"<config><interfaces xmlns="{IF_NS}"><interface><name>{}</name><type xmlns:ianaift="{IANA_IF_NS}">ianaift:softwareLoopback</type><enabled>{enabled}</enabled></interface></interfaces></config>"#,
        escape(name)
    )
}
