//! Events service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::event::{CreateEvent, Event, UpdateEvent},
    repository::Repository,
};

/// Upper bound accepted for the recent-events limit
const MAX_RECENT_LIMIT: i64 = 100;

#[derive(Clone)]
pub struct EventsService {
    repository: Repository,
}

impl EventsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Event>> {
        self.repository.events.list().await
    }

    pub async fn recent(&self, limit: i64) -> AppResult<Vec<Event>> {
        if !(1..=MAX_RECENT_LIMIT).contains(&limit) {
            return Err(AppError::Validation(format!(
                "limit must be between 1 and {}",
                MAX_RECENT_LIMIT
            )));
        }
        self.repository.events.recent(limit).await
    }

    pub async fn create(&self, data: &CreateEvent) -> AppResult<Event> {
        data.validate()?;
        let event = self.repository.events.create(data).await?;
        tracing::info!(event_id = event.id, date = %event.date, by = %event.created_by, "event created");
        Ok(event)
    }

    pub async fn update(&self, id: i64, data: &UpdateEvent) -> AppResult<Event> {
        data.validate()?;
        let event = self.repository.events.update(id, data).await?;
        tracing::info!(event_id = id, "event updated");
        Ok(event)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.events.delete(id).await?;
        tracing::info!(event_id = id, "event deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_pool;
    use chrono::NaiveDate;

    fn request(title: &str) -> CreateEvent {
        CreateEvent {
            id: 0,
            title: title.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            created_by: "abc".to_string(),
        }
    }

    #[tokio::test]
    async fn empty_title_is_rejected() {
        let events = EventsService::new(Repository::new(test_pool().await));
        let err = events.create(&request("")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(events.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn recent_limit_is_bounded() {
        let events = EventsService::new(Repository::new(test_pool().await));
        events.create(&request("t")).await.unwrap();
        assert!(matches!(events.recent(0).await, Err(AppError::Validation(_))));
        assert!(matches!(events.recent(MAX_RECENT_LIMIT + 1).await, Err(AppError::Validation(_))));
        assert_eq!(events.recent(1).await.unwrap().len(), 1);
    }
}
