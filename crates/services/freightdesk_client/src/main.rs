use freightdesk_common::{config_error, init_with_level, internal_error, level_from_name, Context, FreightdeskError};
use freightdesk_config::{load_config, AppConfig};
use freightdesk_gateway::endpoints::{LoginRequest, ShipmentQuery};
use freightdesk_gateway::session::DEFAULT_DURABLE_PATH;
use freightdesk_gateway::{GatewayClient, ScopedSessionStore, SessionListener, SessionStore};
use serde_json::Value;
use std::env;
use std::sync::Arc;
use tracing::{info, warn};

const LOGIN_EMAIL_VAR: &str = "FREIGHTDESK_LOGIN_EMAIL";
const LOGIN_PASSWORD_VAR: &str = "FREIGHTDESK_LOGIN_PASSWORD";
const LOGIN_OTP_VAR: &str = "FREIGHTDESK_LOGIN_OTP";
const FIRST_PAGE_LIMIT: u32 = 20;

#[tokio::main]
async fn main() -> Result<(), FreightdeskError> {
    let config = load_config().context("Failed to load configuration")?;
    init_with_level(level_from_name(config.logging.level.as_deref()));

    #[cfg(feature = "database")]
    check_database(&config).await;

    let client = build_client(&config)?;
    info!(base_url = client.config().base_url(), "gateway ready");

    match login_credentials()? {
        Some(credentials) => {
            login(&client, &credentials).await?;
            print_first_page(&client).await?;
        }
        None if client.sessions().read().is_some() => {
            info!("using stored session");
            print_first_page(&client).await?;
        }
        None => info!(
            "no stored session; set {} and {} to log in",
            LOGIN_EMAIL_VAR, LOGIN_PASSWORD_VAR
        ),
    }
    Ok(())
}

fn build_client(config: &AppConfig) -> Result<GatewayClient, FreightdeskError> {
    let durable_path = config
        .session
        .durable_path
        .clone()
        .unwrap_or_else(|| DEFAULT_DURABLE_PATH.to_string());
    let sessions: Arc<dyn SessionStore> = Arc::new(ScopedSessionStore::with_durable_file(durable_path));
    // A terminal has no navigation stack; going back to the start means logging in again.
    let listener: Arc<dyn SessionListener> = Arc::new(|| {
        warn!("session expired; run again with {} and {} set", LOGIN_EMAIL_VAR, LOGIN_PASSWORD_VAR)
    });
    Ok(GatewayClient::from_settings(&config.gateway, sessions, listener)?)
}

fn login_credentials() -> Result<Option<LoginRequest>, FreightdeskError> {
    credentials_from(|name| env::var(name).ok())
}

// Blank values count as unset, so an uncommented `.env` template is harmless.
fn credentials_from(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Option<LoginRequest>, FreightdeskError> {
    let value = |name: &str| lookup(name).filter(|v: &String| !v.trim().is_empty());
    match (value(LOGIN_EMAIL_VAR), value(LOGIN_PASSWORD_VAR)) {
        (Some(email), Some(password)) => Ok(Some(LoginRequest::new(email, password))),
        (None, None) => Ok(None),
        _ => Err(config_error(format!(
            "{} and {} must be set together",
            LOGIN_EMAIL_VAR, LOGIN_PASSWORD_VAR
        ))),
    }
}

async fn login(client: &GatewayClient, credentials: &LoginRequest) -> Result<(), FreightdeskError> {
    let response = client.auth().login(credentials, true).await?;
    if response.token.is_some() {
        return Ok(());
    }
    if !response.requires_two_factor {
        return Err(internal_error("login succeeded without issuing a token"));
    }
    let code = env::var(LOGIN_OTP_VAR)
        .map_err(|_| config_error(format!("two-factor code required; set {}", LOGIN_OTP_VAR)))?;
    client.auth().verify_two_factor(&code, true).await?;
    Ok(())
}

async fn print_first_page(client: &GatewayClient) -> Result<(), FreightdeskError> {
    let query = ShipmentQuery {
        page: Some(1),
        limit: Some(FIRST_PAGE_LIMIT),
        ..Default::default()
    };
    let shipments: Value = client.shipments().list(&query).await?;
    println!("{}", serde_json::to_string_pretty(&shipments)?);
    Ok(())
}

#[cfg(feature = "database")]
async fn check_database(config: &AppConfig) {
    use freightdesk_db::DbClient;

    if config.database.is_none() {
        info!("no database configured; skipping health check");
        return;
    }
    match DbClient::new(config).await {
        Ok(db) => {
            info!(healthy = db.is_healthy().await, "database pool ready");
            db.close().await;
        }
        Err(e) => freightdesk_common::log_error(e, "Database unavailable"),
    }
}
