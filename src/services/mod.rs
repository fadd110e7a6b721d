//! Business logic services

pub mod events;
pub mod users;
pub mod visitor_counts;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub users: users::UsersService,
    pub events: events::EventsService,
    pub visitor_counts: visitor_counts::VisitorCountsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            users: users::UsersService::new(repository.clone()),
            events: events::EventsService::new(repository.clone()),
            visitor_counts: visitor_counts::VisitorCountsService::new(repository.clone()),
            repository,
        }
    }

    /// Check that the database answers
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        self.repository.ping().await
    }
}
