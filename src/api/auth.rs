//! Login endpoint

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::Result;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub username: String,
    pub role: String,
}

/// Stateless login: verifies credentials and issues a bearer token
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let (user, issued) = state.auth.login(&request.username, &request.password).await?;

    Ok(Json(LoginResponse {
        token: issued.token,
        token_type: issued.token_type,
        expires_in: issued.expires_in,
        username: user.username,
        role: user.role,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}
