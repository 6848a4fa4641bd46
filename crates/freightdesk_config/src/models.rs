use serde::{Deserialize, Serialize};

// --- Deployment Mode ---
/// Deployment flag that decides how the gateway base URL is resolved.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    /// Same-origin deployment behind a reverse proxy; requests go to `/api`.
    Production,
    /// Everything else; requests go to `http://<host>:5001/api`.
    #[default]
    Development,
}

impl DeploymentMode {
    pub fn is_production(self) -> bool {
        matches!(self, DeploymentMode::Production)
    }
}

// --- Gateway Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GatewaySettings {
    #[serde(default)]
    pub mode: DeploymentMode,
    /// Host name used to build the development base URL.
    #[serde(default = "default_host")]
    pub host: String,
    /// Origin the relative production base URL is joined onto, e.g. `https://app.example.com`.
    #[serde(default)]
    pub origin: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            mode: DeploymentMode::default(),
            host: default_host(),
            origin: None,
            timeout_secs: None,
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

// --- Session Config ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct SessionSettings {
    /// File backing the durable credential scope. Defaults to `.freightdesk/session.json`.
    #[serde(default)]
    pub durable_path: Option<String>,
}

// --- Database Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // usually "secret_from_env", loaded via FREIGHTDESK_SECRET_DATABASE_URL
}

// --- Logging Config ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct LoggingConfig {
    /// One of trace, debug, info, warn, error. Defaults to info.
    #[serde(default)]
    pub level: Option<String>,
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub gateway: GatewaySettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub logging: LoggingConfig,

    // --- Optional collaborators ---
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
}
