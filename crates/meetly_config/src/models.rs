// --- File: crates/meetly_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8086,
        }
    }
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g. sqlite:data/meetly.db, loaded via MEETLY_DATABASE__URL
}

// --- Identity Provider Config ---
// Holds the location of the identity provider API. The secret key is usually
// loaded directly from the IDENTITY_SECRET_KEY env var.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct IdentityConfig {
    #[serde(default = "default_identity_api_base_url")]
    pub api_base_url: String,
    /// OAuth provider slug whose access token is requested.
    #[serde(default = "default_identity_provider")]
    pub provider: String,
    #[serde(default, skip_serializing)]
    pub secret_key: Option<String>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_identity_api_base_url(),
            provider: default_identity_provider(),
            secret_key: None,
        }
    }
}

fn default_identity_api_base_url() -> String {
    "https://api.clerk.com/v1".to_string()
}

fn default_identity_provider() -> String {
    "oauth_google".to_string()
}

// --- Google Calendar Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GcalConfig {
    #[serde(default = "default_calendar_id")]
    pub calendar_id: String,
    /// Value of the `sendUpdates` parameter: "all", "externalOnly" or "none".
    #[serde(default = "default_send_updates")]
    pub send_updates: String,
    #[serde(default = "default_conference_solution")]
    pub conference_solution: String,
}

impl Default for GcalConfig {
    fn default() -> Self {
        Self {
            calendar_id: default_calendar_id(),
            send_updates: default_send_updates(),
            conference_solution: default_conference_solution(),
        }
    }
}

fn default_calendar_id() -> String {
    "primary".to_string()
}

fn default_send_updates() -> String {
    "all".to_string()
}

fn default_conference_solution() -> String {
    "hangoutsMeet".to_string()
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub identity: Option<IdentityConfig>,
    #[serde(default)]
    pub gcal: Option<GcalConfig>,
}
