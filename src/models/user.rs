//! User model and related request types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Maximum length of the registration note, in characters
pub const NOTE_MAX_CHARS: usize = 100;

/// Shown when a registration reuses an existing nickname
pub const NICKNAME_TAKEN: &str = "This nickname is already taken";

/// Registered user.
///
/// `password` holds the stored hash on the server and is never serialized;
/// records received by a client always have it set to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    /// Unique login key
    pub nickname: String,
    #[serde(skip_serializing, default)]
    pub password: Option<String>,
    /// Free-text note supplied at registration
    #[serde(default)]
    pub note: String,
    /// False until an admin approves the registration
    pub approved: bool,
    pub is_admin: bool,
}

impl User {
    /// A registration still waiting for an admin decision
    pub fn is_pending(&self) -> bool {
        !self.approved && !self.is_admin
    }
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Ignored; the store assigns ids
    #[serde(default)]
    pub id: i64,
    #[validate(length(min = 1, message = "Please enter a nickname and password"))]
    pub nickname: String,
    #[validate(length(min = 1, message = "Please enter a nickname and password"))]
    pub password: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "The note must be 100 characters or fewer"))]
    pub note: String,
}

impl RegisterRequest {
    pub fn new(nickname: impl Into<String>, password: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            id: 0,
            nickname: nickname.into(),
            password: password.into(),
            note: note.into(),
        }
    }
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Please enter a nickname and password"))]
    pub nickname: String,
    #[validate(length(min = 1, message = "Please enter a nickname and password"))]
    pub password: String,
}

impl LoginRequest {
    pub fn new(nickname: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            nickname: nickname.into(),
            password: password.into(),
        }
    }
}

/// Query string of the approve/reject endpoint
#[derive(Debug, Deserialize, IntoParams)]
pub struct ApproveQuery {
    /// `true` approves, `false` rejects
    pub approved: bool,
}
