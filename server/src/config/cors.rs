use axum::http::{header, HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

const PREFLIGHT_MAX_AGE_SECS: u64 = 86400;

/// Records are only ever read or appended, so GET and POST are all a browser
/// client needs. Credentials (Basic auth) are only allowed for an explicit
/// origin list; without one the layer answers any origin but never with
/// credentials.
pub fn create_cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
        .max_age(std::time::Duration::from_secs(PREFLIGHT_MAX_AGE_SECS));

    match allowed_origins(origins) {
        Some(list) => {
            tracing::info!("CORS: Configured with {} allowed origin(s)", list.len());
            layer
                .allow_origin(AllowOrigin::list(list))
                .allow_credentials(true)
        }
        None => {
            tracing::warn!(
                "CORS: No valid origins configured, allowing any origin without credentials"
            );
            layer.allow_origin(AllowOrigin::any())
        }
    }
}

fn allowed_origins(origins: &[String]) -> Option<Vec<HeaderValue>> {
    let values: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => {
                tracing::debug!("CORS: Allowing origin: {}", origin);
                Some(value)
            }
            Err(e) => {
                tracing::warn!("CORS: Invalid origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}
