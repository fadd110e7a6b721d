//! Store clients: typed access to the calendar board REST API
//!
//! The three traits mirror the three kinds of data a screen needs. Screens
//! and workflows are written against the traits; [`HttpStore`] implements
//! all of them over HTTP.

pub mod http;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    event::{CreateEvent, Event},
    user::{LoginRequest, RegisterRequest, User},
};

pub use http::HttpStore;

/// Everything that can go wrong on the client side.
///
/// The `Display` text of every variant is meant to be shown to the user.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Rejected locally before any request was sent
    #[error("{0}")]
    Validation(String),

    /// The current actor may not perform the action
    #[error("{0}")]
    Forbidden(String),

    /// Unknown nickname or wrong password
    #[error("{0}")]
    InvalidCredentials(String),

    /// Credentials are right but an admin has not approved the account yet
    #[error("{0}")]
    PendingApproval(String),

    /// A mutation failed; `detail` is the server's message
    #[error("{detail}")]
    Server { status: u16, detail: String },

    /// A read failed; carries a generic message
    #[error("{0}")]
    Read(String),

    #[error("Could not reach the server: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Event store client
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn list_events(&self) -> ClientResult<Vec<Event>>;

    /// Newest first, at most `limit`
    async fn recent_events(&self, limit: i64) -> ClientResult<Vec<Event>>;

    async fn add_event(&self, event: &CreateEvent) -> ClientResult<Event>;

    async fn edit_event(&self, event: &Event) -> ClientResult<Event>;

    async fn delete_event(&self, id: i64) -> ClientResult<()>;
}

/// User store client
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn register(&self, request: &RegisterRequest) -> ClientResult<User>;

    async fn login(&self, request: &LoginRequest) -> ClientResult<User>;

    async fn list_users(&self) -> ClientResult<Vec<User>>;

    async fn approve_user(&self, id: i64, approved: bool) -> ClientResult<User>;

    async fn delete_user(&self, id: i64) -> ClientResult<()>;

    async fn user_events(&self, id: i64) -> ClientResult<Vec<Event>>;

    async fn user_event_count(&self, id: i64) -> ClientResult<i64>;
}

/// Daily visitor counter client
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitorCounter: Send + Sync {
    async fn visitor_count(&self) -> ClientResult<i64>;

    /// Record this visit; returns today's count including it
    async fn increment_visitor_count(&self) -> ClientResult<i64>;
}
