use super::yaml::YamlDoc;
use crate::error::ConfigError;
use std::fmt;
use std::path::Path;

pub const DEFAULT_CONTROLLER_FILE: &str = "apic.yaml";

/// Administrator username/password used to open a session
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Both fields must be non-empty. No other format checks are made.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self, ConfigError> {
        let username = username.into();
        let password = password.into();
        if username.is_empty() {
            return Err(ConfigError::EmptyValue { key: "apic_user" });
        }
        if password.is_empty() {
            return Err(ConfigError::EmptyValue { key: "apic_pwd" });
        }
        Ok(Self { username, password })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

/// Controller address and administrator credentials
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub address: String,
    pub credentials: Credentials,
}

impl ControllerConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_doc(&YamlDoc::load(path)?)
    }

    pub fn from_doc(doc: &YamlDoc) -> Result<Self, ConfigError> {
        let address = doc.string("apic_ip")?;
        if address.trim().is_empty() {
            return Err(ConfigError::EmptyValue { key: "apic_ip" });
        }
        let credentials = Credentials::new(doc.string("apic_user")?, doc.string("apic_pwd")?)?;

        Ok(Self {
            address,
            credentials,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<ControllerConfig, ConfigError> {
        ControllerConfig::from_doc(&YamlDoc::parse(Path::new("apic.yaml"), content)?)
    }

    #[test]
    fn test_load_controller_config() {
        let config = parse("apic_ip: 10.1.1.1\napic_user: admin\napic_pwd: secret\n").unwrap();
        assert_eq!(config.address, "10.1.1.1");
        assert_eq!(config.credentials.username, "admin");
        assert_eq!(config.credentials.password, "secret");
    }

    #[test]
    fn test_missing_password() {
        let err = parse("apic_ip: 10.1.1.1\napic_user: admin\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { key: "apic_pwd", .. }));
    }

    #[test]
    fn test_empty_username_rejected() {
        let err = parse("apic_ip: 10.1.1.1\napic_user: \"\"\napic_pwd: secret\n").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyValue { key: "apic_user" }));
    }

    #[test]
    fn test_debug_masks_password() {
        let creds = Credentials::new("admin", "hunter2").unwrap();
        let shown = format!("{:?}", creds);
        assert!(shown.contains("admin"));
        assert!(!shown.contains("hunter2"));
    }
}
