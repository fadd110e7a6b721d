//! Events repository

use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::event::{CreateEvent, Event, UpdateEvent},
};

#[derive(Clone)]
pub struct EventsRepository {
    pool: Pool<Sqlite>,
}

impl EventsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// List all events in calendar order
    pub async fn list(&self) -> AppResult<Vec<Event>> {
        let rows = sqlx::query_as::<_, Event>(
            "SELECT id, title, date, created_by FROM events ORDER BY date, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Most recently created events first
    pub async fn recent(&self, limit: i64) -> AppResult<Vec<Event>> {
        let rows = sqlx::query_as::<_, Event>(
            "SELECT id, title, date, created_by FROM events ORDER BY id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Events created by the given nickname
    pub async fn list_by_creator(&self, nickname: &str) -> AppResult<Vec<Event>> {
        let rows = sqlx::query_as::<_, Event>(
            "SELECT id, title, date, created_by FROM events WHERE created_by = ? ORDER BY date, id",
        )
        .bind(nickname)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn count_by_creator(&self, nickname: &str) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events WHERE created_by = ?")
            .bind(nickname)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Create an event
    pub async fn create(&self, data: &CreateEvent) -> AppResult<Event> {
        let row = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (title, date, created_by)
            VALUES (?, ?, ?)
            RETURNING id, title, date, created_by
            "#,
        )
        .bind(&data.title)
        .bind(data.date)
        .bind(&data.created_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update title and date; the creator is left untouched
    pub async fn update(&self, id: i64, data: &UpdateEvent) -> AppResult<Event> {
        sqlx::query_as::<_, Event>(
            r#"
            UPDATE events SET title = ?, date = ?
            WHERE id = ?
            RETURNING id, title, date, created_by
            "#,
        )
        .bind(&data.title)
        .bind(data.date)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event {} not found", id)))
    }

    /// Delete an event
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Event {} not found", id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_pool;
    use chrono::NaiveDate;

    fn new_event(title: &str, day: u32, by: &str) -> CreateEvent {
        CreateEvent {
            id: 0,
            title: title.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            created_by: by.to_string(),
        }
    }

    #[tokio::test]
    async fn dates_are_stored_as_iso_text() {
        let pool = test_pool().await;
        let repo = EventsRepository::new(pool.clone());
        repo.create(&new_event("t", 5, "abc")).await.unwrap();

        let raw: String = sqlx::query_scalar("SELECT date FROM events")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(raw, "2024-03-05");
    }

    #[tokio::test]
    async fn recent_is_newest_first_and_capped() {
        let repo = EventsRepository::new(test_pool().await);
        for day in 1..=5 {
            repo.create(&new_event(&format!("e{}", day), day, "abc")).await.unwrap();
        }

        let recent = repo.recent(3).await.unwrap();
        let titles: Vec<_> = recent.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["e5", "e4", "e3"]);
    }

    #[tokio::test]
    async fn update_keeps_creator() {
        let repo = EventsRepository::new(test_pool().await);
        let created = repo.create(&new_event("old", 5, "abc")).await.unwrap();

        let updated = repo
            .update(
                created.id,
                &UpdateEvent {
                    title: "new".to_string(),
                    date: created.date,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "new");
        assert_eq!(updated.created_by, "abc");
    }

    #[tokio::test]
    async fn delete_missing_event_is_not_found() {
        let repo = EventsRepository::new(test_pool().await);
        assert!(matches!(repo.delete(7).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn creator_filters() {
        let repo = EventsRepository::new(test_pool().await);
        repo.create(&new_event("a", 1, "abc")).await.unwrap();
        repo.create(&new_event("b", 2, "xyz")).await.unwrap();
        repo.create(&new_event("c", 3, "abc")).await.unwrap();

        assert_eq!(repo.count_by_creator("abc").await.unwrap(), 2);
        assert_eq!(repo.list_by_creator("xyz").await.unwrap()[0].title, "b");
    }
}
