//! reqwest implementation of the store clients

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use super::{ClientError, ClientResult, EventStore, UserStore, VisitorCounter};
use crate::{
    error::ErrorResponse,
    models::{
        event::{CreateEvent, Event},
        user::{LoginRequest, RegisterRequest, User},
        CountResponse, MessageResponse,
    },
};

/// HTTP store client.
///
/// `base_url` includes the API prefix, e.g. `http://localhost:8000/api`.
#[derive(Clone, Debug)]
pub struct HttpStore {
    http: Client,
    base_url: String,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a read request; failures carry `fallback` rather than server text
    async fn read<T: DeserializeOwned>(&self, request: RequestBuilder, fallback: &str) -> ClientResult<T> {
        let response = request.send().await?;
        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "{}", fallback);
            return Err(ClientError::Read(fallback.to_string()));
        }
        Ok(response.json().await?)
    }

    /// Send a mutation; failures carry the server's `detail` when it sent one
    async fn mutate<T: DeserializeOwned>(&self, request: RequestBuilder, fallback: &str) -> ClientResult<T> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let detail = match response.json::<ErrorResponse>().await {
            Ok(body) if !body.detail.is_empty() => body.detail,
            _ => fallback.to_string(),
        };
        tracing::warn!(%status, %detail, "request rejected");

        Err(match status {
            StatusCode::UNAUTHORIZED => ClientError::InvalidCredentials(detail),
            StatusCode::FORBIDDEN => ClientError::PendingApproval(detail),
            _ => ClientError::Server {
                status: status.as_u16(),
                detail,
            },
        })
    }
}

#[async_trait]
impl EventStore for HttpStore {
    async fn list_events(&self) -> ClientResult<Vec<Event>> {
        self.read(self.http.get(self.url("/events")), "Failed to load events")
            .await
    }

    async fn recent_events(&self, limit: i64) -> ClientResult<Vec<Event>> {
        let request = self
            .http
            .get(self.url("/events/recent"))
            .query(&[("limit", limit)]);
        self.read(request, "Failed to load events").await
    }

    async fn add_event(&self, event: &CreateEvent) -> ClientResult<Event> {
        let request = self.http.post(self.url("/events")).json(event);
        self.mutate(request, "Failed to add the event").await
    }

    /// Sends the whole event; the server keeps its own `id` and `createdBy`
    async fn edit_event(&self, event: &Event) -> ClientResult<Event> {
        let request = self
            .http
            .put(self.url(&format!("/events/{}", event.id)))
            .json(event);
        self.mutate(request, "Failed to edit the event").await
    }

    async fn delete_event(&self, id: i64) -> ClientResult<()> {
        let request = self.http.delete(self.url(&format!("/events/{}", id)));
        let _: MessageResponse = self.mutate(request, "Failed to delete the event").await?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for HttpStore {
    async fn register(&self, request: &RegisterRequest) -> ClientResult<User> {
        let request = self.http.post(self.url("/register")).json(request);
        self.mutate(request, "Registration failed").await
    }

    async fn login(&self, request: &LoginRequest) -> ClientResult<User> {
        let request = self.http.post(self.url("/login")).json(request);
        self.mutate(request, "Login failed").await
    }

    async fn list_users(&self) -> ClientResult<Vec<User>> {
        self.read(self.http.get(self.url("/users")), "Failed to load the member list")
            .await
    }

    async fn approve_user(&self, id: i64, approved: bool) -> ClientResult<User> {
        let request = self
            .http
            .put(self.url(&format!("/users/{}/approve", id)))
            .query(&[("approved", approved)]);
        self.mutate(request, "Failed to process the approval").await
    }

    async fn delete_user(&self, id: i64) -> ClientResult<()> {
        let request = self.http.delete(self.url(&format!("/users/{}", id)));
        let _: MessageResponse = self.mutate(request, "Failed to delete the member").await?;
        Ok(())
    }

    async fn user_events(&self, id: i64) -> ClientResult<Vec<Event>> {
        let request = self.http.get(self.url(&format!("/users/{}/events", id)));
        self.read(request, "Failed to load the member's events").await
    }

    async fn user_event_count(&self, id: i64) -> ClientResult<i64> {
        let request = self.http.get(self.url(&format!("/users/{}/events/count", id)));
        let body: CountResponse = self
            .read(request, "Failed to load the member's event count")
            .await?;
        Ok(body.count)
    }
}

#[async_trait]
impl VisitorCounter for HttpStore {
    async fn visitor_count(&self) -> ClientResult<i64> {
        let request = self.http.get(self.url("/visitor-count"));
        let body: CountResponse = self.read(request, "Failed to load the visitor count").await?;
        Ok(body.count)
    }

    async fn increment_visitor_count(&self) -> ClientResult<i64> {
        let request = self.http.post(self.url("/visitor-count"));
        let body: CountResponse = self
            .read(request, "Failed to record the visit")
            .await?;
        Ok(body.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let store = HttpStore::new("http://localhost:8000/api/");
        assert_eq!(store.url("/events"), "http://localhost:8000/api/events");
    }
}
