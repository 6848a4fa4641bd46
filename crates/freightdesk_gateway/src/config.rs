//! Gateway configuration: where requests go and which headers they start with.

use crate::error::GatewayError;
use freightdesk_common::{default_headers, DEFAULT_TIMEOUT_SECS};
use freightdesk_config::{DeploymentMode, GatewaySettings};
use reqwest::header::HeaderMap;
use reqwest::Url;

/// Port the API listens on outside production.
pub const DEVELOPMENT_API_PORT: u16 = 5001;

/// Path prefix every API route lives under.
pub const API_PREFIX: &str = "/api";

/// Resolve the API base URL for a deployment.
///
/// Production deployments sit behind a same-origin reverse proxy, so the base
/// is the relative `/api` regardless of `host`. Everything else talks to the
/// API server directly on port 5001.
pub fn resolve_base_url(mode: DeploymentMode, host: &str) -> String {
    match mode {
        DeploymentMode::Production => API_PREFIX.to_string(),
        DeploymentMode::Development => {
            // IPv6 literals need brackets before a port can follow.
            if host.contains(':') && !host.starts_with('[') {
                format!("http://[{}]:{}{}", host, DEVELOPMENT_API_PORT, API_PREFIX)
            } else {
                format!("http://{}:{}{}", host, DEVELOPMENT_API_PORT, API_PREFIX)
            }
        }
    }
}

/// Resolved, immutable configuration of a [`GatewayClient`](crate::GatewayClient).
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    base_url: String,
    origin: Url,
    default_headers: HeaderMap,
    timeout_secs: u64,
}

impl GatewayConfig {
    /// Resolve the configuration once from loaded settings.
    ///
    /// # Errors
    ///
    /// * production mode without an `origin` to resolve `/api` against
    /// * an `origin` that is not an absolute URL
    pub fn from_settings(settings: &GatewaySettings) -> Result<Self, GatewayError> {
        let base_url = resolve_base_url(settings.mode, &settings.host);

        let origin = match (&settings.origin, settings.mode) {
            (Some(origin), _) => Url::parse(origin)
                .map_err(|e| GatewayError::Config(format!("invalid origin {origin}: {e}")))?,
            (None, DeploymentMode::Development) => Url::parse(&base_url)
                .map_err(|e| GatewayError::Config(format!("invalid host {}: {e}", settings.host)))?,
            (None, DeploymentMode::Production) => {
                return Err(GatewayError::Config(
                    "production mode requires gateway.origin to resolve /api".to_string(),
                ))
            }
        };

        Ok(Self {
            base_url,
            origin,
            default_headers: default_headers(),
            timeout_secs: settings.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// The base URL as resolved at startup: `/api` or `http://<host>:5001/api`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Absolute URL for an API path such as `/shipments/42`.
    pub fn endpoint_url(&self, path: &str) -> Result<Url, GatewayError> {
        let joined = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        self.origin
            .join(&joined)
            .map_err(|e| GatewayError::InvalidRequest(format!("cannot build URL for {path}: {e}")))
    }
}
