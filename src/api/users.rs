//! User management endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::{
        event::Event,
        user::{ApproveQuery, User},
        CountResponse, MessageResponse,
    },
};

/// List all users, pending registrations included
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "List of users", body = Vec<User>)
    )
)]
pub async fn list_users(State(state): State<crate::AppState>) -> AppResult<Json<Vec<User>>> {
    let users = state.services.users.list().await?;
    Ok(Json(users))
}

/// Approve (`approved=true`) or reject (`approved=false`) a user
#[utoipa::path(
    put,
    path = "/users/{id}/approve",
    tag = "users",
    params(
        ("id" = i64, Path, description = "User ID"),
        ApproveQuery
    ),
    responses(
        (status = 200, description = "Decision applied", body = User),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Administrators cannot be rejected", body = crate::error::ErrorResponse)
    )
)]
pub async fn approve_user(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Query(query): Query<ApproveQuery>,
) -> AppResult<Json<User>> {
    let user = state.services.users.review(id, query.approved).await?;
    Ok(Json(user))
}

/// Delete a user and every event they created
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    state.services.users.delete(id).await?;
    Ok(Json(MessageResponse {
        message: "User deleted".to_string(),
    }))
}

/// Events created by a user
#[utoipa::path(
    get,
    path = "/users/{id}/events",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Events created by the user", body = Vec<Event>),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn user_events(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<Event>>> {
    let events = state.services.users.events(id).await?;
    Ok(Json(events))
}

/// Number of events created by a user
#[utoipa::path(
    get,
    path = "/users/{id}/events/count",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Event count", body = CountResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn user_event_count(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<CountResponse>> {
    let count = state.services.users.event_count(id).await?;
    Ok(Json(CountResponse { count }))
}
