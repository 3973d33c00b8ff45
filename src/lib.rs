pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod rate_limit;
pub mod routes;
pub mod sink;
pub mod state;
pub mod submission;
pub mod views;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method, header};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::rate_limit::{IdempotencyGuard, SubmissionRateLimiter};
use crate::sink::RecordSink;
use crate::state::{AppState, SharedState};

pub fn build_app(config: Config, sink: Arc<dyn RecordSink>) -> (Router, SharedState) {
    if config.airtable.credentials().is_none() {
        tracing::warn!("AIRTABLE_PAT or AIRTABLE_BASE_ID not set; submissions will be refused");
    }

    let state: SharedState = Arc::new(AppState {
        idempotency: IdempotencyGuard::new(Duration::from_secs(config.limits.dedup_window_secs)),
        submission_limiter: SubmissionRateLimiter::new(),
        sink,
        config,
    });

    let mut api = routes::api_routes();
    if !state.config.cors_origins.is_empty() {
        let origins: Vec<HeaderValue> = state
            .config
            .cors_origins
            .iter()
            .filter_map(|o| HeaderValue::from_str(o).ok())
            .collect();
        api = api.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods([Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE])
                .max_age(Duration::from_secs(86400)),
        );
    }

    let app = Router::new()
        .merge(api)
        .merge(views::view_routes())
        .route("/health", axum::routing::get(health))
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    (app, state)
}

/// Periodically drop expired rate-limit windows and idempotency keys.
pub fn spawn_cleanup(state: SharedState) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        let max_age = Duration::from_secs(state.config.limits.rate_window_secs.max(1) * 2);
        loop {
            interval.tick().await;
            state.submission_limiter.cleanup(max_age);
            state.idempotency.cleanup();
        }
    })
}

async fn health() -> &'static str {
    "ok"
}
