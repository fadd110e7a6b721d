//! Calendar events endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        event::{CreateEvent, Event, RecentQuery, UpdateEvent, DEFAULT_RECENT_LIMIT},
        MessageResponse,
    },
};

/// List all events
#[utoipa::path(
    get,
    path = "/events",
    tag = "events",
    responses(
        (status = 200, description = "Events list", body = Vec<Event>)
    )
)]
pub async fn list_events(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Event>>> {
    let events = state.services.events.list().await?;
    Ok(Json(events))
}

/// Most recently created events, newest first
#[utoipa::path(
    get,
    path = "/events/recent",
    tag = "events",
    params(RecentQuery),
    responses(
        (status = 200, description = "Recent events", body = Vec<Event>),
        (status = 400, description = "Invalid limit", body = crate::error::ErrorResponse)
    )
)]
pub async fn recent_events(
    State(state): State<crate::AppState>,
    Query(query): Query<RecentQuery>,
) -> AppResult<Json<Vec<Event>>> {
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    let events = state.services.events.recent(limit).await?;
    Ok(Json(events))
}

/// Create an event
#[utoipa::path(
    post,
    path = "/events",
    tag = "events",
    request_body = CreateEvent,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_event(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateEvent>,
) -> AppResult<(StatusCode, Json<Event>)> {
    let event = state.services.events.create(&data).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Update an event
#[utoipa::path(
    put,
    path = "/events/{id}",
    tag = "events",
    params(("id" = i64, Path, description = "Event ID")),
    request_body = UpdateEvent,
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 404, description = "Event not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_event(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(data): Json<UpdateEvent>,
) -> AppResult<Json<Event>> {
    let event = state.services.events.update(id, &data).await?;
    Ok(Json(event))
}

/// Delete an event
#[utoipa::path(
    delete,
    path = "/events/{id}",
    tag = "events",
    params(("id" = i64, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event deleted", body = MessageResponse),
        (status = 404, description = "Event not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_event(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    state.services.events.delete(id).await?;
    Ok(Json(MessageResponse {
        message: "Event deleted".to_string(),
    }))
}
