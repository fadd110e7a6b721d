//! Registration, login and membership review

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use validator::Validate;

use crate::{
    config::AdminConfig,
    error::{AppError, AppResult},
    models::{
        event::Event,
        user::{LoginRequest, RegisterRequest, User, NICKNAME_TAKEN},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create an unapproved registration
    pub async fn register(&self, request: &RegisterRequest) -> AppResult<User> {
        request.validate()?;

        if self.repository.users.nickname_exists(&request.nickname).await? {
            return Err(AppError::Conflict(NICKNAME_TAKEN.to_string()));
        }

        let hash = self.hash_password(&request.password)?;
        let user = self
            .repository
            .users
            .create(&request.nickname, &hash, &request.note, false, false)
            .await?;

        tracing::info!(user_id = user.id, nickname = %user.nickname, "registration received");
        Ok(user)
    }

    /// Check credentials. Unknown nicknames and wrong passwords fail the same
    /// way; a correct password on an unapproved account fails separately.
    pub async fn login(&self, request: &LoginRequest) -> AppResult<User> {
        request.validate()?;

        let invalid = || AppError::Authentication("Invalid nickname or password".to_string());

        let user = self
            .repository
            .users
            .get_by_nickname(&request.nickname)
            .await?
            .ok_or_else(invalid)?;

        if !self.verify_password(&user, &request.password)? {
            tracing::debug!(nickname = %request.nickname, "rejected login: bad password");
            return Err(invalid());
        }

        if user.is_pending() {
            return Err(AppError::PendingApproval(
                "Registration is awaiting admin approval".to_string(),
            ));
        }

        tracing::info!(user_id = user.id, "user logged in");
        Ok(user)
    }

    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.repository.users.list().await
    }

    /// Approve or reject a user.
    ///
    /// Rejecting a pending registration deletes it so the nickname becomes
    /// free again; rejecting an approved member only revokes the approval.
    /// The returned record reflects the decision either way.
    pub async fn review(&self, id: i64, approved: bool) -> AppResult<User> {
        let user = self.repository.users.get_by_id(id).await?;

        if user.is_admin {
            if approved {
                return Ok(user);
            }
            return Err(AppError::BusinessRule(
                "Administrator accounts cannot be rejected".to_string(),
            ));
        }

        if !approved && user.is_pending() {
            let removed = self.repository.users.delete(id).await?;
            tracing::info!(user_id = id, "registration rejected");
            return Ok(removed);
        }

        let user = self.repository.users.set_approved(id, approved).await?;
        tracing::info!(user_id = id, approved, "membership reviewed");
        Ok(user)
    }

    /// Delete a user and the events they created
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let user = self.repository.users.get_by_id(id).await?;
        if user.is_admin {
            return Err(AppError::BusinessRule(
                "Administrator accounts cannot be deleted".to_string(),
            ));
        }
        self.repository.users.delete(id).await?;
        tracing::info!(user_id = id, "user deleted");
        Ok(())
    }

    /// Events created by the user
    pub async fn events(&self, id: i64) -> AppResult<Vec<Event>> {
        let user = self.repository.users.get_by_id(id).await?;
        self.repository.events.list_by_creator(&user.nickname).await
    }

    pub async fn event_count(&self, id: i64) -> AppResult<i64> {
        let user = self.repository.users.get_by_id(id).await?;
        self.repository.events.count_by_creator(&user.nickname).await
    }

    /// Create the configured administrator if its nickname is still free
    pub async fn ensure_admin(&self, admin: &AdminConfig) -> AppResult<()> {
        if self.repository.users.nickname_exists(&admin.nickname).await? {
            return Ok(());
        }
        let hash = self.hash_password(&admin.password)?;
        self.repository
            .users
            .create(&admin.nickname, &hash, "administrator", true, true)
            .await?;
        tracing::info!(nickname = %admin.nickname, "administrator account created");
        Ok(())
    }

    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        if let Some(ref hash) = user.password {
            let parsed_hash = PasswordHash::new(hash)
                .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
            return Ok(Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok());
        }

        Ok(false)
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::user::NOTE_MAX_CHARS, repository::test_pool};

    async fn service() -> UsersService {
        UsersService::new(Repository::new(test_pool().await))
    }

    #[tokio::test]
    async fn duplicate_nickname_is_a_conflict() {
        let users = service().await;
        users.register(&RegisterRequest::new("abc", "pw", "")).await.unwrap();

        let err = users.register(&RegisterRequest::new("abc", "other", "")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn concurrent_duplicates_yield_one_conflict() {
        let users = service().await;
        let request = RegisterRequest::new("abc", "pw", "");
        let (first, second) = tokio::join!(users.register(&request), users.register(&request));

        let results = [first, second];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .any(|r| matches!(r, Err(AppError::Conflict(msg)) if msg == NICKNAME_TAKEN)));
    }

    #[tokio::test]
    async fn overlong_note_is_rejected() {
        let users = service().await;
        let err = users
            .register(&RegisterRequest::new("abc", "pw", "x".repeat(NOTE_MAX_CHARS + 1)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn password_is_stored_hashed() {
        let users = service().await;
        let user = users.register(&RegisterRequest::new("abc", "pw", "")).await.unwrap();
        let stored = user.password.unwrap();
        assert_ne!(stored, "pw");
        assert!(stored.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn login_distinguishes_pending_from_bad_credentials() {
        let users = service().await;
        users.register(&RegisterRequest::new("abc", "pw", "")).await.unwrap();

        let pending = users.login(&LoginRequest::new("abc", "pw")).await.unwrap_err();
        assert!(matches!(pending, AppError::PendingApproval(_)));

        let wrong = users.login(&LoginRequest::new("abc", "nope")).await.unwrap_err();
        assert!(matches!(wrong, AppError::Authentication(_)));

        let unknown = users.login(&LoginRequest::new("zzz", "pw")).await.unwrap_err();
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn approve_then_login() {
        let users = service().await;
        let user = users.register(&RegisterRequest::new("abc", "pw", "")).await.unwrap();

        let approved = users.review(user.id, true).await.unwrap();
        assert!(approved.approved);

        let logged_in = users.login(&LoginRequest::new("abc", "pw")).await.unwrap();
        assert_eq!(logged_in.id, user.id);
        assert!(!logged_in.is_admin);
    }

    #[tokio::test]
    async fn rejecting_pending_registration_deletes_it() {
        let users = service().await;
        let user = users.register(&RegisterRequest::new("abc", "pw", "")).await.unwrap();

        let rejected = users.review(user.id, false).await.unwrap();
        assert!(!rejected.approved);
        assert!(users.list().await.unwrap().is_empty());

        // The nickname can be registered again.
        users.register(&RegisterRequest::new("abc", "pw2", "")).await.unwrap();
    }

    #[tokio::test]
    async fn rejecting_approved_member_revokes_approval() {
        let users = service().await;
        let user = users.register(&RegisterRequest::new("abc", "pw", "")).await.unwrap();
        users.review(user.id, true).await.unwrap();

        let revoked = users.review(user.id, false).await.unwrap();
        assert!(revoked.is_pending());
        assert_eq!(users.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn admin_is_bootstrapped_once_and_cannot_be_rejected() {
        let users = service().await;
        let config = AdminConfig::default();
        users.ensure_admin(&config).await.unwrap();
        users.ensure_admin(&config).await.unwrap();

        let all = users.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert!(all[0].is_admin && all[0].approved);

        let err = users.review(all[0].id, false).await.unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));

        let admin = users
            .login(&LoginRequest::new(config.nickname.clone(), config.password.clone()))
            .await
            .unwrap();
        assert!(admin.is_admin);
    }
}
