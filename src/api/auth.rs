// SPDX-License-Identifier: MIT

//! The `/auth/*` boundary: login, registration activation, password reset,
//! profile updates. The backend issues every token; success here feeds the
//! session store, which remains the single writer of session state.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::ApiClient;
use crate::error::{AppError, Result};
use crate::models::{Principal, SessionProfile};

/// Login payload.
#[derive(Debug, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
}

/// Tokens and cached profile issued by the backend on login or
/// registration activation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenGrant {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub data: Option<SessionProfile>,
}

/// Profile update payload.
#[derive(Debug, Serialize, Validate)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(email)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ApiClient {
    /// Log in and establish the session from the issued grant.
    pub async fn login(&self, request: &LoginRequest) -> Result<Principal> {
        request
            .validate()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let grant: TokenGrant = self.post_json("/auth/login", request).await?;
        self.install_grant(grant)
    }

    /// Activate a registration; the backend answers with a first grant.
    pub async fn activate_registration(&self, activation_code: &str) -> Result<Principal> {
        let grant: TokenGrant = self
            .post_json(
                "/auth/activate",
                &serde_json::json!({ "code": activation_code }),
            )
            .await?;
        self.install_grant(grant)
    }

    /// Ask the backend to start a password reset. No session change.
    pub async fn request_password_reset(&self, email: &str) -> Result<()> {
        self.post_no_content("/auth/password-reset", &serde_json::json!({ "email": email }))
            .await
    }

    /// Update the profile on the backend, then merge the confirmed fields
    /// into the published Principal.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<()> {
        update
            .validate()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        self.put_no_content("/users/me", update).await?;
        self.session()
            .merge_profile(update.name.as_deref(), update.email.as_deref());
        Ok(())
    }

    /// Logout is purely local: the session store clears every persisted
    /// key. The backend keeps no session state for this client.
    pub fn logout(&self) {
        self.session().invalidate();
    }

    fn install_grant(&self, grant: TokenGrant) -> Result<Principal> {
        self.session()
            .establish(
                &grant.access_token,
                grant.refresh_token.as_deref(),
                grant.data,
            )
            // An undecodable token from the backend leaves us anonymous.
            .ok_or(AppError::Unauthorized)
    }
}
