use std::path::PathBuf;
use thiserror::Error;

// Environment keys for the hosted store
pub const STORE_URL_VAR: &str = "SUPABASE_URL";
pub const ANON_KEY_VAR: &str = "SUPABASE_KEY";
pub const SERVICE_ROLE_VAR: &str = "SUPABASE_SERVICE_ROLE";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    #[error("environment variable {name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Credentials and location of the hosted REST store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub base_url: String,
    pub anon_key: String,
    pub service_role_key: String,
}

impl StoreConfig {
    /// Reads the store settings from the process environment (after `.env`).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests never touch the real environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let base_url = required(STORE_URL_VAR)?;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid { name: STORE_URL_VAR, value: base_url });
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: required(ANON_KEY_VAR)?,
            service_role_key: required(SERVICE_ROLE_VAR)?,
        })
    }
}

/// Table names the gateway writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreTables {
    pub agents: String,
    pub leads: String,
    pub registry: String,
}

impl Default for StoreTables {
    fn default() -> Self {
        Self {
            agents: "agents".to_string(),
            leads: "leads".to_string(),
            registry: "agent_registry".to_string(),
        }
    }
}

impl StoreTables {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let pick = |key: &str, fallback: String| lookup(key).filter(|v| !v.is_empty()).unwrap_or(fallback);

        Self {
            agents: pick("SEN_AGENTS_TABLE", defaults.agents),
            leads: pick("SEN_LEADS_TABLE", defaults.leads),
            registry: pick("SEN_REGISTRY_TABLE", defaults.registry),
        }
    }
}

/// Everything the gateway process needs at startup.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    pub identity_path: PathBuf,
    pub tables: StoreTables,
    /// `None` when the store credentials are absent; store-backed routes then answer 503.
    pub store: Option<StoreConfig>,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("GATEWAY_PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid { name: "GATEWAY_PORT", value: raw })?,
            None => 3000,
        };

        let store = match StoreConfig::from_lookup(&lookup) {
            Ok(store) => Some(store),
            Err(ConfigError::Missing(name)) => {
                tracing::warn!("Store disabled: {} is not set", name);
                None
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            host: lookup("GATEWAY_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            identity_path: lookup("AGENT_IDENTITY_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("agent_identity.json")),
            tables: StoreTables::from_lookup(&lookup),
            store,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
