//! Data models shared by the server and the store clients

pub mod event;
pub mod user;
pub mod visitor_count;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use event::{CreateEvent, Event, UpdateEvent};
pub use user::{LoginRequest, RegisterRequest, User};
pub use visitor_count::VisitorCount;

/// `{ "count": n }` body used by the counting endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CountResponse {
    pub count: i64,
}

/// Confirmation body returned by deletions
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Flatten validation errors into a single user-facing message
pub fn validation_message(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .map(|e| match &e.message {
            Some(msg) => msg.to_string(),
            None => e.code.to_string(),
        })
        .collect();
    messages.sort();
    messages.dedup();
    messages.join("; ")
}
