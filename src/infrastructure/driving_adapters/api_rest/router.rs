//! Router Assembly
//!
//! Public routes: submissions, login and health. Submissions are rate limited
//! per client IP when limits are configured. Everything else goes through the
//! `JwtAuth` extractor.

use std::sync::Arc;

use axum::routing::{get, post, MethodRouter};
use axum::{middleware, Router};
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::SmartIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{applications, auth, bank_connections, health};
use super::middleware::{add_config_extension, request_id_middleware};
use super::AppState;
use crate::infrastructure::driven_adapters::config::RateLimitConfig;

/// Build the full API router.
///
/// With `rate_limit` set, the server must be started with
/// `into_make_service_with_connect_info::<SocketAddr>()` so the limiter can
/// fall back to the peer address when no proxy header is present.
pub fn build_router(state: AppState, rate_limit: Option<&RateLimitConfig>) -> Router {
    let governor_config = rate_limit.and_then(|limits| {
        let config = GovernorConfigBuilder::default()
            .per_second(limits.per_second)
            .burst_size(limits.burst_size)
            .key_extractor(SmartIpKeyExtractor)
            .finish();
        if config.is_none() {
            tracing::warn!("Invalid rate limit settings; submissions are not rate limited");
        }
        config.map(Arc::new)
    });

    let limited = |route: MethodRouter<AppState>| match &governor_config {
        Some(config) => route.layer(GovernorLayer { config: config.clone() }),
        None => route,
    };

    Router::new()
        .route(
            "/applications",
            limited(post(applications::submit_application)).get(applications::list_applications),
        )
        .route("/applications/stats", get(applications::get_application_stats))
        .route(
            "/applications/:id",
            get(applications::get_application_by_id)
                .put(applications::update_application_status)
                .delete(applications::delete_application),
        )
        .route(
            "/bank-connections",
            limited(post(bank_connections::create_bank_connection)).get(bank_connections::list_bank_connections),
        )
        .route("/bank-connections/:id", axum::routing::delete(bank_connections::delete_bank_connection))
        .route("/auth/login", post(auth::login))
        .route("/health", get(health::health))
        .layer(middleware::from_fn_with_state(state.clone(), add_config_extension))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
