//! Google sign-in: find-or-create a user by email.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use common::User;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleAuthRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub google_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoogleAuthResponse {
    pub user: User,
    pub message: String,
}

/// `POST /google-auth` — 200 when the user already exists, 201 on creation.
pub async fn google_auth(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GoogleAuthRequest>,
) -> ApiResult<(StatusCode, Json<GoogleAuthResponse>)> {
    let request_id = Uuid::new_v4();

    let email = req.email.as_deref().filter(|v| !v.trim().is_empty());
    let google_id = req.google_id.as_deref().filter(|v| !v.trim().is_empty());
    let (Some(email), Some(google_id)) = (email, google_id) else {
        return Err(ApiError::InvalidRequest(
            "Missing email or googleId".to_string(),
        ));
    };

    let (user, created) = state.users.find_or_create(email, req.name.clone(), google_id);
    tracing::info!(request_id = %request_id, user_id = %user.id, created, "google auth");

    let (status, message) = if created {
        (StatusCode::CREATED, "User created and login successful")
    } else {
        (StatusCode::OK, "User exists, login successful")
    };

    Ok((
        status,
        Json(GoogleAuthResponse {
            user,
            message: message.to_string(),
        }),
    ))
}
