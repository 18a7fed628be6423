use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::models::{Role, UserProfile};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, success};
use crate::utils::validation::require;

/// Usernames and passwords are stored and compared exactly as entered.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

/// Self sign-up always creates a student account.
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Response, AppError> {
    require("username", &req.username)?;
    require("password", &req.password)?;

    let user = state
        .with_store(move |store| store.add_user(&req.username, &req.password, Role::Student))
        .await?;

    Ok(created(UserProfile::from(&user), "Account created"))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Response, AppError> {
    let user = state
        .with_store(move |store| store.validate_user(&req.username, &req.password))
        .await?
        .ok_or_else(|| AppError::AuthError("Invalid credentials".to_string()))?;

    info!(username = %user.username, "Login successful");
    Ok(success(UserProfile::from(&user), "Login successful"))
}
