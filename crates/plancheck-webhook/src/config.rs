//! Configuration file parsing for the webhook.
//!
//! Loads settings from TOML files (bind address, upstream endpoints and search
//! defaults), then lets environment variables override the credentials so they
//! never have to live in the file.

use plancheck_discovery::{assistant, discovery, AssistantEndpoint, DiscoveryEndpoint};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Environment variable holding the assistant credentials
pub const ENV_ASSISTANT_AUTH: &str = "WATSON_AUTH";
/// Environment variable holding the assistant skill id
pub const ENV_ASSISTANT_SKILL_ID: &str = "WATSON_SKILL_ID";
/// Environment variable holding the search credentials
pub const ENV_DISCOVERY_AUTH: &str = "DISCOVERY_AUTH";
/// Environment variable holding the search instance id
pub const ENV_DISCOVERY_INSTANCE_ID: &str = "DISCOVERY_INSTANCE_ID";
/// Environment variable holding the search project id
pub const ENV_DISCOVERY_PROJECT_ID: &str = "DISCOVERY_PROJECT_ID";
/// Environment variable overriding `address:port`
pub const ENV_BIND: &str = "PLANCHECK_BIND";

/// Webhook configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value is out of range or malformed
    #[error("Invalid configuration value: {0}")]
    Invalid(String),
}

/// Webhook configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 3000)
    pub bind_port: u16,

    /// Timeout for each upstream request, in seconds
    pub request_timeout_secs: u64,

    /// Assistant message API settings
    pub assistant: AssistantSettings,

    /// Document-search API settings
    pub discovery: DiscoverySettings,
}

/// Assistant message API settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssistantSettings {
    /// Service root URL
    pub url: String,
    /// Pre-encoded basic-auth credentials
    pub auth: String,
    /// Workspace (skill) id
    pub skill_id: String,
    /// API version date
    pub version: String,
}

/// Document-search API settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiscoverySettings {
    /// Service root URL
    pub url: String,
    /// Pre-encoded basic-auth credentials
    pub auth: String,
    /// Service instance id
    pub instance_id: String,
    /// Project id
    pub project_id: String,
    /// API version date
    pub version: String,
    /// Filter applied to every query
    pub filter: String,
    /// Documents requested per query
    pub count: u32,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 3000,
            request_timeout_secs: 30,
            assistant: AssistantSettings::default(),
            discovery: DiscoverySettings::default(),
        }
    }
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            url: "https://api.us-south.assistant.watson.cloud.ibm.com".to_string(),
            auth: String::new(),
            skill_id: String::new(),
            version: assistant::DEFAULT_VERSION.to_string(),
        }
    }
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            url: "https://api.us-south.discovery.watson.cloud.ibm.com".to_string(),
            auth: String::new(),
            instance_id: String::new(),
            project_id: String::new(),
            version: discovery::DEFAULT_VERSION.to_string(),
            filter: r#"document_type::"policy_certificate""#.to_string(),
            count: 3,
        }
    }
}

impl AssistantSettings {
    /// Endpoint description for the HTTP client
    pub fn endpoint(&self) -> AssistantEndpoint {
        AssistantEndpoint {
            base_url: self.url.clone(),
            skill_id: self.skill_id.clone(),
            version: self.version.clone(),
            auth: self.auth.clone(),
        }
    }
}

impl DiscoverySettings {
    /// Endpoint description for the HTTP client
    pub fn endpoint(&self) -> DiscoveryEndpoint {
        DiscoveryEndpoint {
            base_url: self.url.clone(),
            instance_id: self.instance_id.clone(),
            project_id: self.project_id.clone(),
            version: self.version.clone(),
            auth: self.auth.clone(),
        }
    }
}

impl WebhookConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: WebhookConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Override settings from environment variables.
    ///
    /// `lookup` is usually `|key| std::env::var(key).ok()`. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if let Some(value) = get(ENV_ASSISTANT_AUTH) {
            self.assistant.auth = value;
        }
        if let Some(value) = get(ENV_ASSISTANT_SKILL_ID) {
            self.assistant.skill_id = value;
        }
        if let Some(value) = get(ENV_DISCOVERY_AUTH) {
            self.discovery.auth = value;
        }
        if let Some(value) = get(ENV_DISCOVERY_INSTANCE_ID) {
            self.discovery.instance_id = value;
        }
        if let Some(value) = get(ENV_DISCOVERY_PROJECT_ID) {
            self.discovery.project_id = value;
        }
        if let Some(value) = get(ENV_BIND) {
            self.set_bind(&value)?;
        }

        Ok(())
    }

    /// Set address and port from an `address:port` string
    pub fn set_bind(&mut self, bind: &str) -> Result<(), ConfigError> {
        let (address, port) = bind
            .rsplit_once(':')
            .ok_or_else(|| ConfigError::Invalid(format!("bind must be address:port, got '{}'", bind)))?;
        let port = port
            .parse::<u16>()
            .map_err(|_| ConfigError::Invalid(format!("invalid port in '{}'", bind)))?;

        self.bind_address = address.to_string();
        self.bind_port = port;
        Ok(())
    }

    /// Validate value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.discovery.count == 0 {
            return Err(ConfigError::Invalid(
                "discovery.count must be greater than 0".to_string(),
            ));
        }
        if self.bind_address.is_empty() {
            return Err(ConfigError::Invalid("bind_address is empty".to_string()));
        }
        Ok(())
    }

    /// Names of credential settings that are still empty
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.assistant.auth.is_empty() {
            missing.push(ENV_ASSISTANT_AUTH);
        }
        if self.assistant.skill_id.is_empty() {
            missing.push(ENV_ASSISTANT_SKILL_ID);
        }
        if self.discovery.auth.is_empty() {
            missing.push(ENV_DISCOVERY_AUTH);
        }
        if self.discovery.instance_id.is_empty() {
            missing.push(ENV_DISCOVERY_INSTANCE_ID);
        }
        if self.discovery.project_id.is_empty() {
            missing.push(ENV_DISCOVERY_PROJECT_ID);
        }
        missing
    }

    /// Create a default configuration for testing
    pub fn default_test_config() -> Self {
        let mut config = Self::default();
        config.assistant.auth = "test-assistant-auth".to_string();
        config.assistant.skill_id = "test-skill".to_string();
        config.discovery.auth = "test-discovery-auth".to_string();
        config.discovery.instance_id = "test-instance".to_string();
        config.discovery.project_id = "test-project".to_string();
        config
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = WebhookConfig::default();
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.bind_port, 3000);
        assert_eq!(config.discovery.count, 3);
        assert_eq!(config.discovery.filter, "document_type::\"policy_certificate\"");
        assert_eq!(config.discovery.version, "2022-08-01");
        assert_eq!(config.assistant.version, "2019-02-28");
        assert!(config.validate().is_ok());
        assert_eq!(config.missing_credentials().len(), 5);
    }

    #[test]
    fn test_test_config_has_credentials() {
        let config = WebhookConfig::default_test_config();
        assert!(config.missing_credentials().is_empty());
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            bind_address = "0.0.0.0"
            bind_port = 9000
            request_timeout_secs = 10

            [assistant]
            skill_id = "skill-abc"

            [discovery]
            instance_id = "inst-1"
            project_id = "proj-1"
            count = 5
        "#;

        let config: WebhookConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.assistant.skill_id, "skill-abc");
        assert_eq!(config.assistant.version, "2019-02-28");
        assert_eq!(config.discovery.count, 5);
        assert_eq!(config.discovery.filter, "document_type::\"policy_certificate\"");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bind_port = 8181\n[discovery]\nproject_id = \"p\"").unwrap();

        let config = WebhookConfig::from_file(file.path()).unwrap();
        assert_eq!(config.bind_port, 8181);
        assert_eq!(config.discovery.project_id, "p");
    }

    #[test]
    fn test_from_missing_file() {
        let result = WebhookConfig::from_file("/definitely/not/here.toml");
        assert!(matches!(result, Err(ConfigError::FileRead(_))));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_ASSISTANT_AUTH, "a-auth"),
            (ENV_ASSISTANT_SKILL_ID, "skill"),
            (ENV_DISCOVERY_AUTH, "d-auth"),
            (ENV_DISCOVERY_INSTANCE_ID, ""),
            (ENV_BIND, "0.0.0.0:4000"),
        ]
        .into_iter()
        .collect();

        let mut config = WebhookConfig::default();
        config.discovery.instance_id = "from-file".to_string();
        config
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.assistant.auth, "a-auth");
        assert_eq!(config.assistant.skill_id, "skill");
        assert_eq!(config.discovery.auth, "d-auth");
        assert_eq!(config.discovery.instance_id, "from-file");
        assert_eq!(config.bind_addr(), "0.0.0.0:4000");
    }

    #[test]
    fn test_invalid_bind() {
        let mut config = WebhookConfig::default();
        assert!(config.set_bind("localhost").is_err());
        assert!(config.set_bind("localhost:http").is_err());
        assert!(config.set_bind("[::1]:8080").is_ok());
        assert_eq!(config.bind_address, "[::1]");
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let mut config = WebhookConfig::default();
        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = WebhookConfig::default();
        config.discovery.count = 0;
        assert!(config.validate().is_err());
    }
}
