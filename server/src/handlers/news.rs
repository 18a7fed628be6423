use axum::extract::{Query, State};
use axum::response::Response;
use axum::Json;
use tracing::info;

use super::{authenticate_admin, Credentials};
use crate::models::{NewNewsArticle, NewsQuery, NEWS_CATEGORIES};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, success};
use crate::utils::validation::{require, require_category};

pub async fn list_news(
    State(state): State<AppState>,
    Query(query): Query<NewsQuery>,
) -> Result<Response, AppError> {
    let articles = state.with_store(move |store| store.get_news(&query)).await?;
    Ok(success(articles, "News retrieved"))
}

pub async fn publish_news(
    State(state): State<AppState>,
    credentials: Credentials,
    Json(mut article): Json<NewNewsArticle>,
) -> Result<Response, AppError> {
    let admin = authenticate_admin(&state, credentials).await?;

    if article.author.trim().is_empty() {
        article.author = admin.username.clone();
    }
    require("title", &article.title)?;
    require("content", &article.content)?;
    require_category(&article.category, &NEWS_CATEGORIES)?;

    let article = state
        .with_store(move |store| store.add_news(article))
        .await?;
    info!(by = %admin.username, title = %article.title, "News published");

    Ok(created(article, "Article published"))
}
