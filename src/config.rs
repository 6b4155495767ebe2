//! Configuration settings.
//!
//! Settings are read through [`ConfigSource`] so the resolver can be driven from
//! the process environment (after `dotenv`) or from an in-memory map.

use crate::error::ResolverError;
use std::collections::HashMap;
use std::time::Duration;

pub const TENANT_ID: &str = "AZURE_TENANT_ID";
pub const CLIENT_ID: &str = "AZURE_CLIENT_ID";
pub const CLIENT_SECRET: &str = "AZURE_CLIENT_SECRET";
pub const MANAGEMENT_GROUP_ID: &str = "AZURE_MANAGEMENT_GROUP_ID";
pub const AUTHORITY_HOST: &str = "AZURE_AUTHORITY_HOST";
pub const RESOURCE_MANAGER_ENDPOINT: &str = "AZURE_RESOURCE_MANAGER_ENDPOINT";
pub const CACHE_TTL_SECS: &str = "SUBSCRIPTIONS_CACHE_TTL_SECS";
pub const LISTEN_ADDR: &str = "SUBSCRIPTIONS_LISTEN_ADDR";

pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";
pub const DEFAULT_RESOURCE_MANAGER_ENDPOINT: &str = "https://management.azure.com";
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:7007";

/// Cached results are served for one hour.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Read-only key/value settings.
pub trait ConfigSource: Send + Sync {
    fn get_optional_string(&self, key: &str) -> Option<String>;

    /// Trimmed value, `None` when absent or blank.
    fn get_trimmed(&self, key: &str) -> Option<String> {
        self.get_optional_string(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// Settings from process environment variables.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvConfig;

impl ConfigSource for EnvConfig {
    fn get_optional_string(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl ConfigSource for HashMap<String, String> {
    fn get_optional_string(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Everything needed to build the credential and the two ARM clients.
#[derive(Clone)]
pub struct AzureSettings {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub management_group_id: String,
    pub authority_host: String,
    pub resource_manager_endpoint: String,
}

impl AzureSettings {
    /// Collect the required settings, failing on the first missing or blank key.
    pub fn from_config(config: &dyn ConfigSource) -> Result<Self, ResolverError> {
        let required = |key: &str| {
            config
                .get_trimmed(key)
                .ok_or_else(|| ResolverError::Configuration(key.to_string()))
        };
        Ok(AzureSettings {
            tenant_id: required(TENANT_ID)?,
            client_id: required(CLIENT_ID)?,
            client_secret: required(CLIENT_SECRET)?,
            management_group_id: required(MANAGEMENT_GROUP_ID)?,
            authority_host: config
                .get_trimmed(AUTHORITY_HOST)
                .unwrap_or_else(|| DEFAULT_AUTHORITY_HOST.to_string()),
            resource_manager_endpoint: config
                .get_trimmed(RESOURCE_MANAGER_ENDPOINT)
                .unwrap_or_else(|| DEFAULT_RESOURCE_MANAGER_ENDPOINT.to_string()),
        })
    }
}

// Keep the secret out of debug logs.
impl std::fmt::Debug for AzureSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureSettings")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("management_group_id", &self.management_group_id)
            .field("authority_host", &self.authority_host)
            .field("resource_manager_endpoint", &self.resource_manager_endpoint)
            .finish()
    }
}

/// Cache TTL from [`CACHE_TTL_SECS`], falling back to [`DEFAULT_CACHE_TTL`].
pub fn cache_ttl(config: &dyn ConfigSource) -> Duration {
    match config.get_trimmed(CACHE_TTL_SECS) {
        None => DEFAULT_CACHE_TTL,
        Some(raw) => match raw.parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(e) => {
                log::warn!(
                    "Invalid {CACHE_TTL_SECS}='{raw}' ({e}), using {}s",
                    DEFAULT_CACHE_TTL.as_secs()
                );
                DEFAULT_CACHE_TTL
            }
        },
    }
}

pub fn listen_addr(config: &dyn ConfigSource) -> String {
    config
        .get_trimmed(LISTEN_ADDR)
        .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_config() -> HashMap<String, String> {
        HashMap::from([
            (TENANT_ID.to_string(), " tenant-1 ".to_string()),
            (CLIENT_ID.to_string(), "client-1".to_string()),
            (CLIENT_SECRET.to_string(), "s3cret".to_string()),
            (MANAGEMENT_GROUP_ID.to_string(), "root-g".to_string()),
        ])
    }

    #[test]
    fn test_settings_trimmed_with_defaults() {
        let settings = AzureSettings::from_config(&full_config()).expect("settings");
        assert_eq!(settings.tenant_id, "tenant-1");
        assert_eq!(settings.management_group_id, "root-g");
        assert_eq!(settings.authority_host, DEFAULT_AUTHORITY_HOST);
        assert_eq!(
            settings.resource_manager_endpoint,
            DEFAULT_RESOURCE_MANAGER_ENDPOINT
        );
    }

    #[test]
    fn test_blank_setting_rejected() {
        let mut config = full_config();
        config.insert(CLIENT_SECRET.to_string(), "   ".to_string());
        match AzureSettings::from_config(&config) {
            Err(ResolverError::Configuration(key)) => assert_eq!(key, CLIENT_SECRET),
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_setting_rejected() {
        let mut config = full_config();
        config.remove(MANAGEMENT_GROUP_ID);
        assert!(matches!(
            AzureSettings::from_config(&config),
            Err(ResolverError::Configuration(_))
        ));
    }

    #[test]
    fn test_debug_hides_secret() {
        let settings = AzureSettings::from_config(&full_config()).expect("settings");
        let debug = format!("{settings:?}");
        assert!(!debug.contains("s3cret"));
    }

    #[test]
    fn test_cache_ttl() {
        let mut config = full_config();
        assert_eq!(cache_ttl(&config), DEFAULT_CACHE_TTL);
        config.insert(CACHE_TTL_SECS.to_string(), "60".to_string());
        assert_eq!(cache_ttl(&config), Duration::from_secs(60));
        config.insert(CACHE_TTL_SECS.to_string(), "one hour".to_string());
        assert_eq!(cache_ttl(&config), DEFAULT_CACHE_TTL);
    }

    #[test]
    fn test_listen_addr_default() {
        assert_eq!(listen_addr(&full_config()), DEFAULT_LISTEN_ADDR);
    }
}
