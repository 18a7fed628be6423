use axum::{routing::get, routing::post, Router};
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, Config, MakeRequestUuid, SecurityHeadersLayer};
use crate::handlers::{auth, events, health_check, news, reviews, stats, users};
use crate::state::AppState;

pub fn create_routes(state: AppState, config: &Config) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/users", get(users::list_users))
        .route("/reviews", get(reviews::list_reviews).post(reviews::submit_review))
        .route("/reviews/today", get(reviews::rated_today))
        .route("/reviews/averages", get(reviews::average_ratings))
        .route("/stats", get(stats::get_stats))
        .route("/events", get(events::list_events).post(events::create_event))
        .route("/news", get(news::list_news).post(news::publish_news))
        .with_state(state)
        .layer(SecurityHeadersLayer::new(config.production))
        .layer(create_cors_layer(&config.allowed_origins))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
