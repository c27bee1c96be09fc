//! Process settings read from the environment (and `.env` via dotenvy in the binary).

use crate::error::ConfigError;

pub const DEFAULT_BIND: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// PostgreSQL URL. `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub bind: String,
    pub max_connections: u32,
    /// Mount `/test-setup` and `/test-cleanup`.
    pub admin_routes: bool,
    /// Run `CREATE TABLE IF NOT EXISTS` at startup.
    pub create_schema: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_url: None,
            bind: DEFAULT_BIND.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            admin_routes: true,
            create_schema: true,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Settings::default();

        let max_connections = match get("CATALOG_MAX_CONNECTIONS") {
            Some(v) => v
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::InvalidValue {
                    key: "CATALOG_MAX_CONNECTIONS",
                    value: v,
                })?,
            None => defaults.max_connections,
        };

        Ok(Settings {
            database_url: get("DATABASE_URL"),
            bind: get("CATALOG_BIND").unwrap_or(defaults.bind),
            max_connections,
            admin_routes: parse_flag("CATALOG_ADMIN_ROUTES", get("CATALOG_ADMIN_ROUTES"), defaults.admin_routes)?,
            create_schema: parse_flag("CATALOG_CREATE_SCHEMA", get("CATALOG_CREATE_SCHEMA"), defaults.create_schema)?,
        })
    }
}

fn parse_flag(key: &'static str, value: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(v) = value else {
        return Ok(default);
    };
    match v.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue { key, value: v }),
    }
}
