//! API handlers for the calendar board REST endpoints

pub mod auth;
pub mod events;
pub mod health;
pub mod openapi;
pub mod users;
pub mod visitor_counts;

use axum::{
    http::HeaderValue,
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Prefix under which every API route is mounted
pub const API_PREFIX: &str = "/api";

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);

    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Visitor counter
        .route(
            "/visitor-count",
            get(visitor_counts::get_visitor_count).post(visitor_counts::increment_visitor_count),
        )
        .route("/visitor-count/history", get(visitor_counts::visitor_history))
        // Registration and login
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        // Users
        .route("/users", get(users::list_users))
        .route("/users/:id", delete(users::delete_user))
        .route("/users/:id/approve", put(users::approve_user))
        .route("/users/:id/events", get(users::user_events))
        .route("/users/:id/events/count", get(users::user_event_count))
        // Events
        .route("/events", get(events::list_events).post(events::create_event))
        .route("/events/recent", get(events::recent_events))
        .route(
            "/events/:id",
            put(events::update_event).delete(events::delete_event),
        )
        .with_state(state);

    Router::new()
        .nest(API_PREFIX, api)
        .merge(openapi::create_openapi_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
}

/// CORS policy from the configured origins; an empty list allows any origin
fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(allowed)
}
