//! Visitor counts service

use chrono::{Local, NaiveDate};

use crate::{error::AppResult, models::visitor_count::VisitorCount, repository::Repository};

#[derive(Clone)]
pub struct VisitorCountsService {
    repository: Repository,
}

impl VisitorCountsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Visits recorded today
    pub async fn today(&self) -> AppResult<i64> {
        self.repository.visitor_counts.get(today()).await
    }

    /// Record a visit for today; the counter starts over each day
    pub async fn record_visit(&self) -> AppResult<i64> {
        self.repository.visitor_counts.increment(today()).await
    }

    /// Daily counts for a date range
    pub async fn history(&self, start_date: NaiveDate, end_date: NaiveDate) -> AppResult<Vec<VisitorCount>> {
        self.repository.visitor_counts.list(start_date, end_date).await
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
