//! Visitor counts repository

use chrono::NaiveDate;
use sqlx::{Pool, Sqlite};

use crate::{error::AppResult, models::visitor_count::VisitorCount};

#[derive(Clone)]
pub struct VisitorCountsRepository {
    pool: Pool<Sqlite>,
}

impl VisitorCountsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Visits recorded on `day`, zero when none
    pub async fn get(&self, day: NaiveDate) -> AppResult<i64> {
        let count: Option<i64> =
            sqlx::query_scalar("SELECT count FROM visitor_counts WHERE count_date = ?")
                .bind(day)
                .fetch_optional(&self.pool)
                .await?;
        Ok(count.unwrap_or(0))
    }

    /// Record one visit on `day` and return the new total for that day
    pub async fn increment(&self, day: NaiveDate) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO visitor_counts (count_date, count) VALUES (?, 1)
            ON CONFLICT (count_date) DO UPDATE SET count = count + 1
            RETURNING count
            "#,
        )
        .bind(day)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Daily counts in a date range, newest first
    pub async fn list(&self, start_date: NaiveDate, end_date: NaiveDate) -> AppResult<Vec<VisitorCount>> {
        let rows = sqlx::query_as::<_, VisitorCount>(
            r#"
            SELECT count_date, count FROM visitor_counts
            WHERE count_date >= ? AND count_date <= ?
            ORDER BY count_date DESC
            "#,
        )
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
