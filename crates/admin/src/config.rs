//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `ADMIN_DEFAULT_EMAILS` - Comma separated fallback admin list (default: admin@ufsbd34.fr)
//! - `ADMIN_STORE_PATH` - JSON store file (default: data/admin-store.json)
//! - `ADMIN_STORE_KEY` - Key holding the admin list (default: adminEmails)
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `LOG_FORMAT` - `json` for structured logs, anything else for text
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (default: 1.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;
use ufsbd_admin_core::{AdminEmailList, Email};

/// Admin list used when the store holds nothing usable.
pub const DEFAULT_ADMIN_EMAILS: &[&str] = &["admin@ufsbd34.fr"];

/// Store key the admin list is persisted under.
pub const DEFAULT_STORE_KEY: &str = "adminEmails";

const DEFAULT_STORE_PATH: &str = "data/admin-store.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Settings for the access checks themselves.
///
/// Separate from [`AdminConfig`] so the checks can be built from code
/// without any environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessConfig {
    /// Fallback admin list (`defaultAdminEmails`), already normalized.
    pub default_admin_emails: AdminEmailList,
    /// Key the persisted admin list lives under.
    pub store_key: String,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            default_admin_emails: AdminEmailList::from_entries(DEFAULT_ADMIN_EMAILS),
            store_key: DEFAULT_STORE_KEY.to_owned(),
        }
    }
}

impl AccessConfig {
    /// Create an access config with the given default list and the default key.
    #[must_use]
    pub fn with_defaults(default_admin_emails: AdminEmailList) -> Self {
        Self {
            default_admin_emails,
            ..Self::default()
        }
    }

    fn from_env() -> Result<Self, ConfigError> {
        let default_admin_emails = match get_optional_env("ADMIN_DEFAULT_EMAILS") {
            Some(raw) => parse_admin_email_list(&raw, "ADMIN_DEFAULT_EMAILS")?,
            None => AdminEmailList::from_entries(DEFAULT_ADMIN_EMAILS),
        };
        let store_key = get_env_or_default("ADMIN_STORE_KEY", DEFAULT_STORE_KEY);
        if store_key.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "ADMIN_STORE_KEY".to_string(),
                "must not be empty".to_string(),
            ));
        }

        Ok(Self {
            default_admin_emails,
            store_key,
        })
    }
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Path of the JSON file backing the persisted store
    pub store_path: PathBuf,
    /// Access check settings
    pub access: AccessConfig,
    /// Emit JSON logs instead of human-readable text
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("ADMIN_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("ADMIN_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_PORT".to_string(), e.to_string()))?;
        let store_path = PathBuf::from(get_env_or_default("ADMIN_STORE_PATH", DEFAULT_STORE_PATH));
        let access = AccessConfig::from_env()?;
        let log_json = get_optional_env("LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json"));
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            store_path,
            access,
            log_json,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Load only the store location and access settings.
///
/// Used by the CLI, which has no server to bind.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but invalid.
pub fn store_settings_from_env() -> Result<(PathBuf, AccessConfig), ConfigError> {
    let _ = dotenvy::dotenv();
    let store_path = PathBuf::from(get_env_or_default("ADMIN_STORE_PATH", DEFAULT_STORE_PATH));
    Ok((store_path, AccessConfig::from_env()?))
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a comma separated list of admin emails.
///
/// Every entry must be a valid email; blank entries are skipped.
fn parse_admin_email_list(raw: &str, var_name: &str) -> Result<AdminEmailList, ConfigError> {
    let mut list = AdminEmailList::default();
    for entry in raw.split(',').filter(|e| !e.trim().is_empty()) {
        let email = Email::parse(entry).map_err(|e| {
            ConfigError::InvalidEnvVar(var_name.to_string(), format!("{entry:?}: {e}"))
        })?;
        list.insert(&email);
    }
    Ok(list)
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_access_config() {
        let config = AccessConfig::default();
        assert_eq!(config.store_key, "adminEmails");
        assert!(config.default_admin_emails.contains("admin@ufsbd34.fr"));
        assert_eq!(config.default_admin_emails.len(), 1);
    }

    #[test]
    fn test_parse_admin_email_list_normalizes() {
        let list =
            parse_admin_email_list(" Admin@UFSBD34.fr, president@ufsbd34.fr,,", "TEST_VAR").unwrap();
        let entries: Vec<&str> = list.iter().collect();
        assert_eq!(entries, vec!["admin@ufsbd34.fr", "president@ufsbd34.fr"]);
    }

    #[test]
    fn test_parse_admin_email_list_rejects_invalid() {
        let result = parse_admin_email_list("admin@ufsbd34.fr,not-an-email", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(var, _)) if var == "TEST_VAR"));
    }

    #[test]
    fn test_parse_admin_email_list_empty() {
        let list = parse_admin_email_list("", "TEST_VAR").unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_with_defaults_keeps_key() {
        let config = AccessConfig::with_defaults(AdminEmailList::from_entries(["a@b.c"]));
        assert_eq!(config.store_key, DEFAULT_STORE_KEY);
        assert!(config.default_admin_emails.contains("A@B.C"));
    }

    #[test]
    fn test_socket_addr() {
        let config = AdminConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3001,
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            access: AccessConfig::default(),
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3001);
    }
}
