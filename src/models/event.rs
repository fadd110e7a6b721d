//! Calendar event model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Wire and storage format of event dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Default size of the recent-events list
pub const DEFAULT_RECENT_LIMIT: i64 = 10;

/// Event record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    /// Event content
    pub title: String,
    /// Calendar day (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Nickname of the creator, fixed at creation
    pub created_by: String,
}

impl Event {
    /// The `YYYY-MM-DD` key used to place the event on a calendar day
    pub fn date_key(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// Create event request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvent {
    /// Ignored; the store assigns ids
    #[serde(default)]
    pub id: i64,
    #[validate(length(min = 1, message = "Please enter a date and a title"))]
    pub title: String,
    pub date: NaiveDate,
    pub created_by: String,
}

/// Update event request.
///
/// Clients send the full event; `id` and `createdBy` in the body are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEvent {
    #[validate(length(min = 1, message = "Please enter a title"))]
    pub title: String,
    pub date: NaiveDate,
}

/// Query parameters for the recent-events list
#[derive(Debug, Deserialize, IntoParams)]
pub struct RecentQuery {
    /// Maximum number of events (default 10)
    pub limit: Option<i64>,
}
