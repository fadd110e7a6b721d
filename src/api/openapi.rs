//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, events, health, users, visitor_counts};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Calendar Board API",
        version = "0.1.0",
        description = "Shared calendar with admin-approved membership"
    ),
    servers(
        (url = "/api", description = "Calendar board API")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Visitor counter
        visitor_counts::get_visitor_count,
        visitor_counts::increment_visitor_count,
        visitor_counts::visitor_history,
        // Auth
        auth::register,
        auth::login,
        // Users
        users::list_users,
        users::approve_user,
        users::delete_user,
        users::user_events,
        users::user_event_count,
        // Events
        events::list_events,
        events::recent_events,
        events::create_event,
        events::update_event,
        events::delete_event,
    ),
    components(
        schemas(
            crate::models::user::User,
            crate::models::user::RegisterRequest,
            crate::models::user::LoginRequest,
            crate::models::event::Event,
            crate::models::event::CreateEvent,
            crate::models::event::UpdateEvent,
            crate::models::visitor_count::VisitorCount,
            crate::models::CountResponse,
            crate::models::MessageResponse,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "visitor_count", description = "Daily visitor counter"),
        (name = "auth", description = "Registration and login"),
        (name = "users", description = "Membership management"),
        (name = "events", description = "Calendar events")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/visitor-count",
            "/register",
            "/login",
            "/users",
            "/users/{id}/approve",
            "/users/{id}",
            "/users/{id}/events",
            "/users/{id}/events/count",
            "/events",
            "/events/recent",
            "/events/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
