use axum::response::Response;
use axum_extra::headers::authorization::Basic;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use serde::Serialize;

use crate::models::User;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::success;

pub mod auth;
pub mod events;
pub mod news;
pub mod reviews;
pub mod stats;
pub mod users;

/// `Authorization: Basic` credentials, when the request carried any.
pub type Credentials = Option<TypedHeader<Authorization<Basic>>>;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "khollpoll-api",
    };

    success(payload, "Health check successful")
}

/// Resolves the caller from the request's credentials.
pub(crate) async fn authenticate(
    state: &AppState,
    credentials: Credentials,
) -> Result<User, AppError> {
    let TypedHeader(Authorization(basic)) =
        credentials.ok_or_else(|| AppError::AuthError("Credentials required".to_string()))?;
    let username = basic.username().to_string();
    let password = basic.password().to_string();

    state
        .with_store(move |store| store.validate_user(&username, &password))
        .await?
        .ok_or_else(|| AppError::AuthError("Invalid credentials".to_string()))
}

pub(crate) async fn authenticate_admin(
    state: &AppState,
    credentials: Credentials,
) -> Result<User, AppError> {
    let user = authenticate(state, credentials).await?;
    if !user.is_admin() {
        return Err(AppError::Forbidden(format!(
            "'{}' is not allowed to do this",
            user.username
        )));
    }
    Ok(user)
}
