use secrecy::SecretString;

/// Login credentials shared by every device-facing client.
///
/// The lab routers use a single local account for RESTCONF, NETCONF and
/// interactive SSH, so one value is handed to each client.
#[derive(Debug, Clone)]
pub struct DeviceCredentials {
    pub username: String,
    pub password: SecretString,
}

impl DeviceCredentials {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}
