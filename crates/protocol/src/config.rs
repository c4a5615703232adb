use serde::{Deserialize, Serialize};

/// Error raised while validating the component configuration.
///
/// The variant payload names the offending field as the platform
/// spells it, so the message can be surfaced verbatim.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cfg.{0} is required and needs to be a non-empty string")]
    MissingField(&'static str),
}

/// Credentials and endpoint for one configured Filestore connection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub tenant_id: String,
    #[serde(default)]
    pub resource_server_url: String,
}

impl ComponentConfig {
    /// Checks that every required field is present and non-empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingField("apiKey"));
        }
        if self.tenant_id.trim().is_empty() {
            return Err(ConfigError::MissingField("tenantId"));
        }
        if self.resource_server_url.trim().is_empty() {
            return Err(ConfigError::MissingField("resourceServerUrl"));
        }
        Ok(())
    }

    /// Returns the server URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.resource_server_url.trim_end_matches('/')
    }
}
