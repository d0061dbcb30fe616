// ── Command parser ──
//
// Text after the `/<id> ` prefix → `Intent`. Rules are tried in a fixed
// order; the first match wins. The address, when present, is always the
// first token, so token count plus keyword position is enough to decide.
//
//   restconf | netconf                 select transport
//   <allowlisted ip>                   no command found
//   <ip> showrun | showrun             show running config
//   <ip> motd <text...>                set banner
//   <ip> motd                          read banner
//   <ip> <action> | <action>           interface operation
//   <ip> gigabit_status | gigabit_status
//   anything else                      unknown command

use std::str::FromStr;

use crate::model::{Allowlist, InterfaceAction, Intent, ParseError, TransportKind};

const SHOWRUN: &str = "showrun";
const MOTD: &str = "motd";
const GIGABIT_STATUS: &str = "gigabit_status";

/// Parse one command. Never fails; unrecognised input yields
/// [`Intent::Invalid`].
///
/// The allowlist is consulted only to reject a lone address.
pub fn parse(text: &str, allowlist: &Allowlist) -> Intent {
    let tokens: Vec<&str> = text.split_whitespace().collect();

    if let [word] = tokens.as_slice() {
        if let Ok(transport) = TransportKind::from_str(word) {
            return Intent::SelectTransport { transport };
        }
        if allowlist.contains(word) {
            return invalid(ParseError::NoCommandFound);
        }
    }

    match tokens.as_slice() {
        [] => invalid(ParseError::Empty),

        [address, SHOWRUN] => Intent::ShowRunning {
            address: Some((*address).to_owned()),
        },
        [SHOWRUN] => Intent::ShowRunning { address: None },

        [address, MOTD, rest @ ..] if !rest.is_empty() => Intent::BannerSet {
            address: (*address).to_owned(),
            text: rest.join(" "),
        },
        [address, MOTD] => Intent::BannerGet {
            address: (*address).to_owned(),
        },

        [address, word] if InterfaceAction::from_str(word).is_ok() => {
            action_intent(Some(*address), word)
        }
        [word] if InterfaceAction::from_str(word).is_ok() => action_intent(None, word),

        [address, GIGABIT_STATUS] => Intent::GigabitStatus {
            address: Some((*address).to_owned()),
        },
        [GIGABIT_STATUS] => Intent::GigabitStatus { address: None },

        _ => invalid(ParseError::Unknown),
    }
}

fn action_intent(address: Option<&str>, word: &str) -> Intent {
    match InterfaceAction::from_str(word) {
        Ok(action) => Intent::Interface {
            address: address.map(str::to_owned),
            action,
        },
        Err(_) => invalid(ParseError::Unknown),
    }
}

fn invalid(error: ParseError) -> Intent {
    Intent::Invalid { error }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn p(text: &str) -> Intent {
        parse(text, &Allowlist::default())
    }

    fn iface(address: Option<&str>, action: InterfaceAction) -> Intent {
        Intent::Interface {
            address: address.map(str::to_owned),
            action,
        }
    }

    #[test]
    fn empty_input() {
        assert_eq!(p(""), invalid(ParseError::Empty));
        assert_eq!(p("   \t "), invalid(ParseError::Empty));
    }

    #[test]
    fn transport_selection() {
        assert_eq!(
            p("restconf"),
            Intent::SelectTransport {
                transport: TransportKind::Restconf
            }
        );
        assert_eq!(
            p(" netconf "),
            Intent::SelectTransport {
                transport: TransportKind::Netconf
            }
        );
        assert_eq!(p("restconf now"), invalid(ParseError::Unknown));
        assert_eq!(p("RESTCONF"), invalid(ParseError::Unknown));
    }

    #[test]
    fn lone_allowlisted_address_is_not_a_status_query() {
        assert_eq!(p("10.0.15.61"), invalid(ParseError::NoCommandFound));
        // Not on the list: falls through to the catch-all.
        assert_eq!(p("10.9.9.9"), invalid(ParseError::Unknown));
    }

    #[test]
    fn lone_address_rule_follows_the_configured_list() {
        let list = Allowlist::new(["192.0.2.1"]);
        assert_eq!(parse("192.0.2.1", &list), invalid(ParseError::NoCommandFound));
        assert_eq!(parse("10.0.15.61", &list), invalid(ParseError::Unknown));
    }

    #[test]
    fn showrun_with_and_without_address() {
        assert_eq!(
            p("10.0.15.63 showrun"),
            Intent::ShowRunning {
                address: Some("10.0.15.63".into())
            }
        );
        // Unlisted addresses are left for the dispatcher to reject.
        assert_eq!(
            p("1.2.3.4 showrun"),
            Intent::ShowRunning {
                address: Some("1.2.3.4".into())
            }
        );
        assert_eq!(p("showrun"), Intent::ShowRunning { address: None });
        assert_eq!(p("10.0.15.63 showrun extra"), invalid(ParseError::Unknown));
    }

    #[test]
    fn banner_set_rejoins_with_single_spaces() {
        assert_eq!(
            p("10.0.15.61 motd  Authorized   users only"),
            Intent::BannerSet {
                address: "10.0.15.61".into(),
                text: "Authorized users only".into(),
            }
        );
        assert_eq!(
            p(r"10.0.15.61 motd Hello\nWorld"),
            Intent::BannerSet {
                address: "10.0.15.61".into(),
                text: r"Hello\nWorld".into(),
            }
        );
    }

    #[test]
    fn banner_get() {
        assert_eq!(
            p("10.0.15.62 motd"),
            Intent::BannerGet {
                address: "10.0.15.62".into()
            }
        );
        assert_eq!(p("motd"), invalid(ParseError::Unknown));
    }

    #[test]
    fn interface_actions() {
        assert_eq!(
            p("10.0.15.64 create"),
            iface(Some("10.0.15.64"), InterfaceAction::Create)
        );
        assert_eq!(
            p("10.0.15.64 disable"),
            iface(Some("10.0.15.64"), InterfaceAction::Disable)
        );
        assert_eq!(p("status"), iface(None, InterfaceAction::Status));
        assert_eq!(p("delete"), iface(None, InterfaceAction::Delete));
        assert_eq!(p("10.0.15.64 create now"), invalid(ParseError::Unknown));
    }

    #[test]
    fn gigabit_status() {
        assert_eq!(
            p("10.0.15.61 gigabit_status"),
            Intent::GigabitStatus {
                address: Some("10.0.15.61".into())
            }
        );
        assert_eq!(p("gigabit_status"), Intent::GigabitStatus { address: None });
    }

    #[test]
    fn unknown_shapes() {
        for text in ["hello", "10.0.15.61 reboot", "create 10.0.15.61", "a b c d"] {
            assert_eq!(p(text), invalid(ParseError::Unknown), "{text}");
        }
    }

    #[test]
    fn keyword_in_address_slot_keeps_position_semantics() {
        // "showrun" as the first of two tokens is an address.
        assert_eq!(
            p("showrun status"),
            iface(Some("showrun"), InterfaceAction::Status)
        );
        // A selector keyword is only a selector when alone.
        assert_eq!(
            p("restconf create"),
            iface(Some("restconf"), InterfaceAction::Create)
        );
    }

    #[test]
    fn parsing_is_deterministic() {
        for text in [
            "restconf",
            "10.0.15.61",
            "10.0.15.61 status",
            "10.0.15.61 motd hi there",
            "showrun",
            "nonsense words",
        ] {
            assert_eq!(p(text), p(text));
        }
    }
}
