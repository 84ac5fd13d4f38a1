//! Client configuration

use crate::error::ConfigError;
use std::fmt;
use std::time::Duration;
use url::Url;

/// Default host for everything except card tokenization
pub const DEFAULT_API_URL: &str = "https://api.omise.co/";

/// Default host for card tokenization
pub const DEFAULT_VAULT_URL: &str = "https://vault.omise.co/";

/// Default per-call deadline
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// API version sent in the `Omise-Version` header
pub const API_VERSION: &str = "2019-05-29";

pub const PUBLIC_KEY_PREFIX: &str = "pkey_";
pub const SECRET_KEY_PREFIX: &str = "skey_";

/// Environment variable names read by [`ClientConfig::from_env`]
pub mod env {
    pub const PUBLIC_KEY: &str = "OMISE_PUBLIC_KEY";
    pub const SECRET_KEY: &str = "OMISE_SECRET_KEY";
    pub const API_URL: &str = "OMISE_API_URL";
    pub const VAULT_URL: &str = "OMISE_VAULT_URL";
    pub const TIMEOUT_SECS: &str = "OMISE_TIMEOUT_SECS";
}

/// Configuration for [`Client`](crate::Client).
///
/// Read-only once a client is built from it.
#[derive(Clone)]
pub struct ClientConfig {
    /// Public key, used for tokens, sources and capability
    pub public_key: Option<String>,
    /// Secret key, used for charges and customers
    pub secret_key: Option<String>,
    /// Base URL of the API host
    pub api_url: Url,
    /// Base URL of the vault host
    pub vault_url: Url,
    /// Deadline for a single call
    pub timeout: Duration,
    /// Value of the `Omise-Version` header
    pub api_version: String,
    /// Value of the `User-Agent` header
    pub user_agent: String,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("public_key", &self.public_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url.as_str())
            .field("vault_url", &self.vault_url.as_str())
            .field("timeout", &self.timeout)
            .field("api_version", &self.api_version)
            .finish()
    }
}

/// `OmiseRust/<version> Rust/<os>`
pub fn default_user_agent() -> String {
    format!("OmiseRust/{} Rust/{}", crate::VERSION, std::env::consts::OS)
}

fn parse_base_url(name: &str, raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw).map_err(|e| ConfigError::invalid_url(name, e.to_string()))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::invalid_url(name, "URL must start with http:// or https://"));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

impl ClientConfig {
    /// Create a configuration with a public key and the default hosts
    pub fn new(public_key: impl Into<String>) -> Self {
        Self {
            public_key: Some(public_key.into()),
            ..Self::default()
        }
    }

    /// Read configuration from `OMISE_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from any variable lookup, validating the result
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let mut config = Self::default();
        config.public_key = var(env::PUBLIC_KEY);
        config.secret_key = var(env::SECRET_KEY);
        if let Some(api_url) = var(env::API_URL) {
            config = config.with_api_url(&api_url)?;
        }
        if let Some(vault_url) = var(env::VAULT_URL) {
            config = config.with_vault_url(&vault_url)?;
        }
        if let Some(timeout) = var(env::TIMEOUT_SECS) {
            let secs: u64 = timeout.trim().parse().map_err(|_| {
                ConfigError::other(format!("{} must be a whole number of seconds", env::TIMEOUT_SECS))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_public_key(mut self, public_key: impl Into<String>) -> Self {
        self.public_key = Some(public_key.into());
        self
    }

    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Set the API host. The URL must be http or https.
    pub fn with_api_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.api_url = parse_base_url("api_url", url)?;
        Ok(self)
    }

    /// Set the vault host. The URL must be http or https.
    pub fn with_vault_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.vault_url = parse_base_url("vault_url", url)?;
        Ok(self)
    }

    /// Point both hosts at one base URL
    pub fn with_base_url(self, url: &str) -> Result<Self, ConfigError> {
        self.with_api_url(url)?.with_vault_url(url)
    }

    /// Set the per-call deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(key) = &self.public_key {
            if !key.starts_with(PUBLIC_KEY_PREFIX) || key.len() == PUBLIC_KEY_PREFIX.len() {
                return Err(ConfigError::InvalidPublicKey {
                    message: format!("public key must start with {}", PUBLIC_KEY_PREFIX),
                });
            }
        }

        if let Some(key) = &self.secret_key {
            if !key.starts_with(SECRET_KEY_PREFIX) || key.len() == SECRET_KEY_PREFIX.len() {
                return Err(ConfigError::InvalidSecretKey {
                    message: format!("secret key must start with {}", SECRET_KEY_PREFIX),
                });
            }
        }

        if self.timeout.is_zero() {
            return Err(ConfigError::other("timeout must be greater than zero"));
        }

        if self.api_version.is_empty() {
            return Err(ConfigError::other("API version cannot be empty"));
        }

        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            public_key: None,
            secret_key: None,
            api_url: Url::parse(DEFAULT_API_URL).unwrap_or_else(|_| unreachable!()),
            vault_url: Url::parse(DEFAULT_VAULT_URL).unwrap_or_else(|_| unreachable!()),
            timeout: DEFAULT_TIMEOUT,
            api_version: API_VERSION.to_string(),
            user_agent: default_user_agent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("pkey_test_123");
        assert_eq!(config.api_url.as_str(), DEFAULT_API_URL);
        assert_eq!(config.vault_url.as_str(), DEFAULT_VAULT_URL);
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.api_version, "2019-05-29");
        assert!(config.user_agent.starts_with("OmiseRust/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_key_prefixes() {
        let config = ClientConfig::new("skey_test_123");
        assert!(matches!(config.validate(), Err(ConfigError::InvalidPublicKey { .. })));

        let config = ClientConfig::new("pkey_test_123").with_secret_key("pkey_test_456");
        assert!(matches!(config.validate(), Err(ConfigError::InvalidSecretKey { .. })));

        assert!(ClientConfig::new("pkey_").validate().is_err());
    }

    #[test]
    fn test_base_url_normalization() {
        let config = ClientConfig::default()
            .with_api_url("http://127.0.0.1:8080/omise")
            .unwrap();
        assert_eq!(config.api_url.as_str(), "http://127.0.0.1:8080/omise/");

        let error = ClientConfig::default().with_vault_url("ftp://vault").unwrap_err();
        assert!(matches!(error, ConfigError::InvalidUrl { .. }));
        assert!(ClientConfig::default().with_api_url("not a url").is_err());
    }

    #[test]
    fn test_from_lookup() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("OMISE_PUBLIC_KEY", "pkey_test_123"),
            ("OMISE_SECRET_KEY", "skey_test_456"),
            ("OMISE_VAULT_URL", "http://localhost:9000"),
            ("OMISE_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.public_key.as_deref(), Some("pkey_test_123"));
        assert_eq!(config.secret_key.as_deref(), Some("skey_test_456"));
        assert_eq!(config.vault_url.as_str(), "http://localhost:9000/");
        assert_eq!(config.api_url.as_str(), DEFAULT_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_from_lookup_rejects_bad_values() {
        let error = ClientConfig::from_lookup(lookup(&[("OMISE_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(matches!(error, ConfigError::Other { .. }));

        let error = ClientConfig::from_lookup(lookup(&[("OMISE_PUBLIC_KEY", "nope")])).unwrap_err();
        assert!(matches!(error, ConfigError::InvalidPublicKey { .. }));
    }

    #[test]
    fn test_debug_redacts_secret_key() {
        let config = ClientConfig::new("pkey_test_123").with_secret_key("skey_test_456");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("skey_test_456"));
    }
}
