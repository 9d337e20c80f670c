//! `/auth` endpoints: register, login, current user.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::client::{ApiClient, ApiEnvelope};
use super::error::ApiError;
use crate::models::enums::Role;
use crate::models::User;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response: token plus enough of the user to cache without a
/// second round trip.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JwtResponse {
    pub token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl JwtResponse {
    fn to_user(&self) -> User {
        User {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            phone_number: None,
            roles: self.roles.clone(),
            is_active: true,
            created_at: None,
        }
    }
}

impl ApiClient {
    /// Create an account. The backend replies with an envelope whose data
    /// is the new user id, which the registration form does not need.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let env: ApiEnvelope<serde_json::Value> = self.post("/auth/register", request).await?;
        env.into_ack()
    }

    /// Authenticate. Unlike the enveloped endpoints, login returns the
    /// `JwtResponse` directly.
    pub async fn login(&self, request: &LoginRequest) -> Result<JwtResponse, ApiError> {
        self.post("/auth/login", request).await
    }

    /// Login and establish the session in one step. Returns the cached user.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<User, ApiError> {
        let jwt = self
            .login(&LoginRequest {
                username: username.into(),
                password: password.into(),
            })
            .await?;
        let user = jwt.to_user();
        self.session().establish(jwt.token, user.clone());
        info!(username = %user.username, "signed in");
        Ok(user)
    }

    /// Drop the local session. The backend keeps no server-side state for it.
    pub fn sign_out(&self) {
        self.session().clear();
    }

    /// Fetch the authoritative current user (e.g. after a profile edit).
    pub async fn current_user(&self) -> Result<User, ApiError> {
        let env: ApiEnvelope<User> = self.get("/auth/me").await?;
        env.into_data()
    }
}
