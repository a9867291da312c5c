//! Registration, login and the token check endpoint.

use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use recipebook_core::{hash_password, verify_password, DocumentId, Identity, StoreError};

use super::error::ApiError;
use super::extract::ApiJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreatedResponse {
    pub message: String,
    pub user_id: DocumentId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectedResponse {
    pub message: String,
    pub token_data: HashMap<String, Value>,
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<Credentials>,
) -> Result<(StatusCode, Json<UserCreatedResponse>), ApiError> {
    let email = body.email.trim().to_lowercase();
    if email.is_empty() || body.password.is_empty() {
        return Err(ApiError::BadRequest("Missing fields".to_string()));
    }

    let hash = hash_password(&body.password, state.password_cost()).await?;
    let user = state.users().create(&email, &hash).map_err(|e| match e {
        StoreError::Conflict(_) => ApiError::Conflict("Email already registered".to_string()),
        other => other.into(),
    })?;
    info!(user_id = %user.id, "User created");

    Ok((
        StatusCode::CREATED,
        Json(UserCreatedResponse {
            message: "User created".to_string(),
            user_id: user.id,
        }),
    ))
}

/// Exchange credentials for an access token.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<Credentials>,
) -> Result<Json<LoginResponse>, ApiError> {
    let tokens = state
        .tokens()
        .ok_or_else(|| ApiError::ServiceUnavailable("Token issuing is not configured".to_string()))?;

    let email = body.email.trim().to_lowercase();
    let Some(user) = state.users().find_by_email(&email)? else {
        warn!("Login attempt for unknown email");
        return Err(ApiError::InvalidLogin);
    };
    if !verify_password(&body.password, &user.password_hash).await? {
        warn!(user_id = %user.id, "Login attempt with wrong password");
        return Err(ApiError::InvalidLogin);
    }

    let access_token = tokens.issue(user.id.as_str(), &user.email)?;
    info!(user_id = %user.id, "User logged in");
    Ok(Json(LoginResponse { access_token }))
}

/// Echo the verified token data back to the caller.
pub async fn protected(Extension(identity): Extension<Identity>) -> Json<ProtectedResponse> {
    Json(ProtectedResponse {
        message: "You are authenticated".to_string(),
        token_data: identity.claims,
    })
}
