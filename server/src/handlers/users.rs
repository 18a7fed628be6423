use axum::extract::State;
use axum::response::Response;

use super::{authenticate_admin, Credentials};
use crate::models::UserProfile;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::success;

pub async fn list_users(
    State(state): State<AppState>,
    credentials: Credentials,
) -> Result<Response, AppError> {
    authenticate_admin(&state, credentials).await?;

    let users = state.with_store(|store| store.get_users()).await?;
    let profiles: Vec<UserProfile> = users.iter().map(UserProfile::from).collect();
    Ok(success(profiles, "Users retrieved"))
}
