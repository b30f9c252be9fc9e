//! User registration and lookup.

use crate::error::{Result, ResultExt};
use crate::models::{NewUser, UserResponse};
use crate::routes::AppJson;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users", post(register))
        .route("/api/users/{email}", get(get_by_email))
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub result: UserResponse,
}

/// Register a user; name and email must both be unused.
async fn register(
    State(state): State<Arc<AppState>>,
    AppJson(body): AppJson<NewUser>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    let user = state.users.register(body).await.or_fail("Registration failed")?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            result: user.into(),
        }),
    ))
}

/// Look up a user by email. An unknown email yields `null`, not 404.
async fn get_by_email(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<Option<UserResponse>>> {
    let user = state
        .users
        .find_by_email(&email)
        .await
        .or_fail("User not found")?;
    Ok(Json(user.map(UserResponse::from)))
}
