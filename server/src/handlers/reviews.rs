use axum::extract::{Query, State};
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{authenticate, Credentials};
use crate::models::NewReview;
use crate::state::AppState;
use crate::store::RECENT_WINDOW_DAYS;
use crate::utils::error::AppError;
use crate::utils::response::{created, success};
use crate::utils::validation::validate_rating;

#[derive(Debug, Deserialize)]
pub struct ReviewListQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct AverageQuery {
    pub days: Option<u32>,
}

/// Body of the daily rating form. The reviewer is whoever is authenticated.
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub breakfast: Option<u8>,
    pub lunch: Option<u8>,
    pub snacks: Option<u8>,
    pub dinner: Option<u8>,
    #[serde(default)]
    pub comments: String,
}

#[derive(Serialize)]
struct RatedToday {
    rated: bool,
}

pub async fn list_reviews(
    State(state): State<AppState>,
    Query(query): Query<ReviewListQuery>,
) -> Result<Response, AppError> {
    let reviews = state
        .with_store(move |store| store.get_reviews(query.limit))
        .await?;
    Ok(success(reviews, "Reviews retrieved"))
}

pub async fn submit_review(
    State(state): State<AppState>,
    credentials: Credentials,
    Json(req): Json<ReviewRequest>,
) -> Result<Response, AppError> {
    let user = authenticate(&state, credentials).await?;

    let review = NewReview {
        user: user.username,
        breakfast: req.breakfast,
        lunch: req.lunch,
        snacks: req.snacks,
        dinner: req.dinner,
        comments: req.comments,
        ..NewReview::default()
    };

    for (meal, rating) in review.ratings() {
        if let Some(rating) = rating.filter(|r| !validate_rating(*r)) {
            return Err(AppError::ValidationError(format!(
                "{} rating must be between 1 and 5, got {}",
                meal.as_str(),
                rating
            )));
        }
    }

    let review = state
        .with_store(move |store| store.submit_daily_review(review))
        .await?;
    info!(user = %review.user, overall = ?review.overall_rating(), "Review submitted");

    Ok(created(review, "Review submitted"))
}

pub async fn rated_today(
    State(state): State<AppState>,
    credentials: Credentials,
) -> Result<Response, AppError> {
    let user = authenticate(&state, credentials).await?;
    let rated = state
        .with_store(move |store| store.has_rated_today(&user.username))
        .await?;

    Ok(success(RatedToday { rated }, "Daily rating status retrieved"))
}

pub async fn average_ratings(
    State(state): State<AppState>,
    Query(query): Query<AverageQuery>,
) -> Result<Response, AppError> {
    let days = query.days.unwrap_or(RECENT_WINDOW_DAYS);
    let averages = state
        .with_store(move |store| store.get_average_ratings(days))
        .await?;

    Ok(success(averages, format!("Average ratings for the last {days} days")))
}
