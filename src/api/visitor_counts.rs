//! Visitor count endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Duration, Local, NaiveDate};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::{AppError, AppResult},
    models::{visitor_count::VisitorCount, CountResponse},
};

/// Days covered by the history endpoint when no range is given
const DEFAULT_HISTORY_DAYS: i64 = 30;

/// Query parameters for the visitor history
#[derive(Debug, Deserialize, IntoParams)]
pub struct VisitorHistoryQuery {
    /// Start date (YYYY-MM-DD), defaults to 30 days ago
    pub start_date: Option<NaiveDate>,
    /// End date (YYYY-MM-DD), defaults to today
    pub end_date: Option<NaiveDate>,
}

/// Visitors counted today
#[utoipa::path(
    get,
    path = "/visitor-count",
    tag = "visitor_count",
    responses(
        (status = 200, description = "Today's visitor count", body = CountResponse)
    )
)]
pub async fn get_visitor_count(State(state): State<crate::AppState>) -> AppResult<Json<CountResponse>> {
    let count = state.services.visitor_counts.today().await?;
    Ok(Json(CountResponse { count }))
}

/// Record a visit and return today's count
#[utoipa::path(
    post,
    path = "/visitor-count",
    tag = "visitor_count",
    responses(
        (status = 200, description = "Updated visitor count", body = CountResponse)
    )
)]
pub async fn increment_visitor_count(
    State(state): State<crate::AppState>,
) -> AppResult<Json<CountResponse>> {
    let count = state.services.visitor_counts.record_visit().await?;
    Ok(Json(CountResponse { count }))
}

/// Daily visitor counts over a date range
#[utoipa::path(
    get,
    path = "/visitor-count/history",
    tag = "visitor_count",
    params(VisitorHistoryQuery),
    responses(
        (status = 200, description = "Daily counts, newest first", body = Vec<VisitorCount>),
        (status = 400, description = "Invalid range", body = crate::error::ErrorResponse)
    )
)]
pub async fn visitor_history(
    State(state): State<crate::AppState>,
    Query(query): Query<VisitorHistoryQuery>,
) -> AppResult<Json<Vec<VisitorCount>>> {
    let end = query.end_date.unwrap_or_else(|| Local::now().date_naive());
    let start = match query.start_date {
        Some(start) => start,
        None => end
            .checked_sub_signed(Duration::days(DEFAULT_HISTORY_DAYS))
            .ok_or_else(|| AppError::Validation("end_date is out of range".to_string()))?,
    };

    if start > end {
        return Err(AppError::Validation("start_date must not be after end_date".to_string()));
    }

    let counts = state.services.visitor_counts.history(start, end).await?;
    Ok(Json(counts))
}
