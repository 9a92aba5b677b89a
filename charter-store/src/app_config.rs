use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub crm: CrmConfig,
    pub airportdb: AirportDbConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiration_seconds: u64,
    /// Demo stand-in credential; see DESIGN.md. Replace with a real identity
    /// provider before any production use.
    pub admin_email: String,
    pub admin_password: String,
}

/// HighLevel relay settings. The token and location id are server-held;
/// their absence fails the contact endpoint closed.
#[derive(Debug, Deserialize, Clone)]
pub struct CrmConfig {
    pub base_url: String,
    pub api_version: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub location_id: Option<String>,
}

/// AirportDB lookup settings. Without a token the search silently uses only
/// the local fallback list.
#[derive(Debug, Deserialize, Clone)]
pub struct AirportDbConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_token: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file
            // Default to 'development' env
            // Note that this file is _optional_
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file
            // This file shouldn't be checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of CHARTER)
            // Eg.. `CHARTER__SERVER__PORT=9000` would set the server port
            .add_source(config::Environment::with_prefix("CHARTER").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
