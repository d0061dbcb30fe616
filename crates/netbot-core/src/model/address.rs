use std::fmt;

use serde::Serialize;

use crate::error::CoreError;

/// Lab routers the bridge may touch when nothing else is configured.
pub const DEFAULT_ADDRESSES: [&str; 5] = [
    "10.0.15.61",
    "10.0.15.62",
    "10.0.15.63",
    "10.0.15.64",
    "10.0.15.65",
];

/// A device address that has passed the allowlist check.
///
/// Only [`Allowlist::check`] constructs one, so every adapter operation
/// taking a `&DeviceAddress` is unreachable for an unlisted target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DeviceAddress(String);

impl DeviceAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fixed set of permitted device addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allowlist {
    addresses: Vec<String>,
}

impl Default for Allowlist {
    fn default() -> Self {
        Self::new(DEFAULT_ADDRESSES)
    }
}

impl Allowlist {
    pub fn new<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut addresses: Vec<String> = addresses.into_iter().map(Into::into).collect();
        addresses.dedup();
        Self { addresses }
    }

    pub fn contains(&self, address: &str) -> bool {
        self.addresses.iter().any(|a| a == address)
    }

    /// Validate an optional raw address token.
    pub fn check(&self, raw: Option<&str>) -> Result<DeviceAddress, CoreError> {
        let address = raw.filter(|a| !a.is_empty()).ok_or(CoreError::AddressMissing)?;
        if self.contains(address) {
            Ok(DeviceAddress(address.to_owned()))
        } else {
            Err(CoreError::AddressNotAllowed {
                address: address.to_owned(),
            })
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.addresses.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_list_has_the_five_lab_routers() {
        let list = Allowlist::default();
        assert_eq!(list.len(), 5);
        assert!(list.contains("10.0.15.61"));
        assert!(list.contains("10.0.15.65"));
        assert!(!list.contains("10.0.15.66"));
    }

    #[test]
    fn check_distinguishes_missing_from_unlisted() {
        let list = Allowlist::default();
        assert_eq!(list.check(None), Err(CoreError::AddressMissing));
        assert_eq!(list.check(Some("")), Err(CoreError::AddressMissing));
        assert_eq!(
            list.check(Some("192.168.1.1")),
            Err(CoreError::AddressNotAllowed {
                address: "192.168.1.1".into()
            })
        );
        let ok = list.check(Some("10.0.15.62")).unwrap();
        assert_eq!(ok.as_str(), "10.0.15.62");
    }
}
