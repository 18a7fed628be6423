use axum::extract::{Query, State};
use axum::response::Response;
use axum::Json;
use tracing::info;

use super::{authenticate_admin, Credentials};
use crate::models::{EventQuery, NewEvent, EVENT_CATEGORIES};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, success};
use crate::utils::validation::{require, require_category};

pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventQuery>,
) -> Result<Response, AppError> {
    let events = state.with_store(move |store| store.get_events(&query)).await?;
    let message = format!("Found {} event(s)", events.len());
    Ok(success(events, message))
}

pub async fn create_event(
    State(state): State<AppState>,
    credentials: Credentials,
    Json(event): Json<NewEvent>,
) -> Result<Response, AppError> {
    let admin = authenticate_admin(&state, credentials).await?;

    require("title", &event.title)?;
    require("organizer", &event.organizer)?;
    require("date", &event.date)?;
    require("venue", &event.venue)?;
    require_category(&event.category, &EVENT_CATEGORIES)?;

    let event = state.with_store(move |store| store.add_event(event)).await?;
    info!(by = %admin.username, title = %event.title, "Event added");

    Ok(created(event, "Event added"))
}
