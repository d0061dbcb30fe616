// Small read-only helpers over NETCONF replies.
//
// Matching is by local name so replies that prefix the base namespace
// (`<nc:rpc-reply>`) and ones that use a default namespace read the same.

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::Error;

fn xml_err(e: impl std::fmt::Display) -> Error {
    Error::Xml(e.to_string())
}

/// Text content of the first element named `name`, or `None` if absent.
/// A self-closing element yields an empty string.
pub fn leaf_text(xml: &str, name: &str) -> Result<Option<String>, Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut inside = false;
    let mut text = String::new();
    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Start(e) if !inside && e.local_name().as_ref() == name.as_bytes() => {
                inside = true;
            }
            Event::Empty(e) if !inside && e.local_name().as_ref() == name.as_bytes() => {
                return Ok(Some(String::new()));
            }
            Event::Text(t) if inside => text.push_str(&t.unescape().map_err(xml_err)?),
            Event::End(e) if inside && e.local_name().as_ref() == name.as_bytes() => {
                return Ok(Some(text));
            }
            Event::Eof if inside => {
                return Err(Error::Xml(format!("unterminated <{name}> element")));
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

/// Whether any element named `name` appears in the document.
pub fn has_element(xml: &str, name: &str) -> Result<bool, Error> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == name.as_bytes() => {
                return Ok(true);
            }
            Event::Eof => return Ok(false),
            _ => {}
        }
    }
}

/// If the reply carries an `<rpc-error>`, return its `error-message`
/// (or the `error-tag` when no message is given).
pub fn rpc_error(xml: &str) -> Result<Option<String>, Error> {
    if !has_element(xml, "rpc-error")? {
        return Ok(None);
    }
    let message = match leaf_text(xml, "error-message")? {
        Some(msg) if !msg.is_empty() => msg,
        _ => leaf_text(xml, "error-tag")?.unwrap_or_else(|| "unspecified rpc-error".into()),
    };
    Ok(Some(message))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const STATE_REPLY: &str = r#"
        <rpc-reply xmlns="urn:ietf:params:xml:ns:netconf:base:1.0" message-id="2">
          <data>
            <interfaces-state xmlns="urn:ietf:params:xml:ns:yang:ietf-interfaces">
              <interface>
                <name>Loopback66070101</name>
                <admin-status>down</admin-status>
                <oper-status>down</oper-status>
              </interface>
            </interfaces-state>
          </data>
        </rpc-reply>"#;

    #[test]
    fn reads_leaf_values() {
        assert_eq!(
            leaf_text(STATE_REPLY, "admin-status").unwrap().as_deref(),
            Some("down")
        );
        assert_eq!(
            leaf_text(STATE_REPLY, "name").unwrap().as_deref(),
            Some("Loopback66070101")
        );
        assert_eq!(leaf_text(STATE_REPLY, "enabled").unwrap(), None);
    }

    #[test]
    fn prefixed_ok_is_detected() {
        let reply = r#"<nc:rpc-reply xmlns:nc="urn:ietf:params:xml:ns:netconf:base:1.0" message-id="3"><nc:ok/></nc:rpc-reply>"#;
        assert!(has_element(reply, "ok").unwrap());
        assert_eq!(rpc_error(reply).unwrap(), None);
    }

    #[test]
    fn empty_data_has_no_interface() {
        let reply = r#"<rpc-reply message-id="1"><data/></rpc-reply>"#;
        assert!(!has_element(reply, "interface").unwrap());
        assert_eq!(leaf_text(reply, "data").unwrap().as_deref(), Some(""));
    }

    #[test]
    fn rpc_error_message_is_extracted() {
        let reply = r#"
            <rpc-reply message-id="4">
              <rpc-error>
                <error-type>application</error-type>
                <error-tag>data-missing</error-tag>
                <error-message xml:lang="en">the interface does not exist</error-message>
              </rpc-error>
            </rpc-reply>"#;
        assert_eq!(
            rpc_error(reply).unwrap().as_deref(),
            Some("the interface does not exist")
        );
    }

    #[test]
    fn rpc_error_falls_back_to_tag() {
        let reply = "<rpc-reply><rpc-error><error-tag>lock-denied</error-tag></rpc-error></rpc-reply>";
        assert_eq!(rpc_error(reply).unwrap().as_deref(), Some("lock-denied"));
    }

    #[test]
    fn truncated_reply_is_malformed() {
        assert!(leaf_text("<rpc-reply><data><name>Loop", "name").is_err());
    }
}
