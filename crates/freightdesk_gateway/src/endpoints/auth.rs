//! Authentication, password management, two-factor and session endpoints.
//!
//! Login and two-factor verification are the only operations that write to
//! the session store; logout is the only one that clears it explicitly.

use crate::client::GatewayClient;
use crate::error::GatewayError;
use crate::request::{segment, RequestDescriptor, LOGIN_PATH};
use crate::session::{SessionCredential, StorageScope};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt::Display;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// What the login and two-factor verification endpoints answer with.
///
/// `token` is absent when the account has two-factor enabled; the caller
/// then completes the login with [`AuthApi::verify_two_factor`].
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<Value>,
    #[serde(default, alias = "requiresTwoFactor")]
    pub requires_two_factor: bool,
}

pub struct AuthApi<'a> {
    client: &'a GatewayClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a GatewayClient) -> Self {
        Self { client }
    }

    /// `POST /auth/login`. On success the credential is stored durably when
    /// `remember` is set, otherwise for this process only.
    ///
    /// A 401 here is a rejected password and comes back as
    /// [`GatewayError::Api`]; any existing session is left alone.
    pub async fn login(
        &self,
        credentials: &LoginRequest,
        remember: bool,
    ) -> Result<LoginResponse, GatewayError> {
        let request = RequestDescriptor::post(LOGIN_PATH).with_json(credentials)?;
        let response: LoginResponse = self.client.json(&request).await?;
        self.store(&response, remember)?;
        if response.requires_two_factor {
            info!(email = %credentials.email, "login requires two-factor verification");
        } else {
            info!(email = %credentials.email, "logged in");
        }
        Ok(response)
    }

    /// `POST /auth/logout`. The local session is cleared whether or not the
    /// server call succeeds; the server's answer is still returned.
    pub async fn logout(&self) -> Result<(), GatewayError> {
        let result: Result<Value, GatewayError> =
            self.client.json(&RequestDescriptor::post("/auth/logout")).await;
        self.client.sessions().clear();
        match result {
            Ok(_) => {
                info!("logged out");
                Ok(())
            }
            Err(e) => {
                warn!("logout call failed, local session cleared anyway: {}", e);
                Err(e)
            }
        }
    }

    /// `GET /auth/me`
    pub async fn current_user<T: DeserializeOwned>(&self) -> Result<T, GatewayError> {
        self.client.json(&RequestDescriptor::get("/auth/me")).await
    }

    /// `POST /auth/forgot-password`
    pub async fn forgot_password<T: DeserializeOwned>(&self, email: &str) -> Result<T, GatewayError> {
        let request =
            RequestDescriptor::post("/auth/forgot-password").with_json(&json!({ "email": email }))?;
        self.client.json(&request).await
    }

    /// `POST /auth/reset-password`
    pub async fn reset_password<T: DeserializeOwned>(
        &self,
        reset_token: &str,
        new_password: &str,
    ) -> Result<T, GatewayError> {
        let request = RequestDescriptor::post("/auth/reset-password")
            .with_json(&json!({ "token": reset_token, "password": new_password }))?;
        self.client.json(&request).await
    }

    /// `PUT /auth/change-password`
    pub async fn change_password<T: DeserializeOwned>(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<T, GatewayError> {
        let request = RequestDescriptor::put("/auth/change-password").with_json(&json!({
            "currentPassword": current_password,
            "newPassword": new_password,
        }))?;
        self.client.json(&request).await
    }

    /// `POST /auth/2fa/setup`; typically answers with a provisioning URI / QR code.
    pub async fn setup_two_factor<T: DeserializeOwned>(&self) -> Result<T, GatewayError> {
        self.client.json(&RequestDescriptor::post("/auth/2fa/setup")).await
    }

    /// `POST /auth/2fa/verify`. Confirms enrollment, or finishes a login that
    /// returned `requires_two_factor`; a token in the answer is stored like
    /// a normal login.
    pub async fn verify_two_factor(
        &self,
        code: &str,
        remember: bool,
    ) -> Result<LoginResponse, GatewayError> {
        let request =
            RequestDescriptor::post("/auth/2fa/verify").with_json(&json!({ "code": code }))?;
        let response: LoginResponse = self.client.json(&request).await?;
        self.store(&response, remember)?;
        Ok(response)
    }

    /// `POST /auth/2fa/disable`
    pub async fn disable_two_factor<T: DeserializeOwned>(&self, code: &str) -> Result<T, GatewayError> {
        let request =
            RequestDescriptor::post("/auth/2fa/disable").with_json(&json!({ "code": code }))?;
        self.client.json(&request).await
    }

    /// `GET /auth/sessions`
    pub async fn sessions<T: DeserializeOwned>(&self) -> Result<T, GatewayError> {
        self.client.json(&RequestDescriptor::get("/auth/sessions")).await
    }

    /// `DELETE /auth/sessions/{id}`
    pub async fn revoke_session<T: DeserializeOwned>(
        &self,
        session_id: impl Display,
    ) -> Result<T, GatewayError> {
        let path = format!("/auth/sessions/{}", segment(session_id));
        self.client.json(&RequestDescriptor::delete(path)).await
    }

    fn store(&self, response: &LoginResponse, remember: bool) -> Result<(), GatewayError> {
        let Some(token) = &response.token else {
            return Ok(());
        };
        let scope = if remember {
            StorageScope::Durable
        } else {
            StorageScope::Ephemeral
        };
        self.client
            .sessions()
            .persist(SessionCredential::new(token.clone(), response.user.clone()), scope)
            .map_err(|e| {
                error!("failed to store session credential: {}", e);
                GatewayError::from(e)
            })
    }
}
