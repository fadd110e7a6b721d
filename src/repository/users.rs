//! Users repository for database operations

use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::user::{User, NICKNAME_TAKEN},
};

/// Columns of a user row, in declaration order
const USER_COLUMNS: &str = "id, nickname, password, note, approved, is_admin";

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Sqlite>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// List every user, oldest registration first
    pub async fn list(&self) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY id",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<User> {
        sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::UserNotFound(format!("User with id {} not found", id)))
    }

    /// Get user by nickname (login key)
    pub async fn get_by_nickname(&self, nickname: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE nickname = ?",
            USER_COLUMNS
        ))
        .bind(nickname)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Check if a nickname is already taken
    pub async fn nickname_exists(&self, nickname: &str) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE nickname = ?")
            .bind(nickname)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    /// Insert a user; `password_hash` must already be hashed
    pub async fn create(
        &self,
        nickname: &str,
        password_hash: &str,
        note: &str,
        approved: bool,
        is_admin: bool,
    ) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (nickname, password, note, approved, is_admin)
            VALUES (?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(nickname)
        .bind(password_hash)
        .bind(note)
        .bind(approved)
        .bind(is_admin)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict(NICKNAME_TAKEN.to_string())
            }
            e => AppError::Database(e),
        })?;
        Ok(user)
    }

    /// Set the approval flag
    pub async fn set_approved(&self, id: i64, approved: bool) -> AppResult<User> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET approved = ? WHERE id = ? RETURNING {}",
            USER_COLUMNS
        ))
        .bind(approved)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::UserNotFound(format!("User with id {} not found", id)))
    }

    /// Delete a user together with the events they created
    pub async fn delete(&self, id: i64) -> AppResult<User> {
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(&format!(
            "DELETE FROM users WHERE id = ? RETURNING {}",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::UserNotFound(format!("User with id {} not found", id)))?;

        sqlx::query("DELETE FROM events WHERE created_by = ?")
            .bind(&user.nickname)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_pool;

    #[tokio::test]
    async fn create_and_lookup_by_nickname() {
        let repo = UsersRepository::new(test_pool().await);
        let created = repo.create("abc", "hash", "hello", false, false).await.unwrap();

        let found = repo.get_by_nickname("abc").await.unwrap().unwrap();
        assert_eq!(found, created);
        assert!(found.is_pending());
        assert!(repo.nickname_exists("abc").await.unwrap());
        assert!(!repo.nickname_exists("abd").await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_insert_is_a_conflict() {
        let repo = UsersRepository::new(test_pool().await);
        repo.create("abc", "hash", "", false, false).await.unwrap();
        let err = repo.create("abc", "hash", "", false, false).await.unwrap_err();
        match err {
            AppError::Conflict(msg) => assert_eq!(msg, NICKNAME_TAKEN),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn set_approved_on_missing_user_is_not_found() {
        let repo = UsersRepository::new(test_pool().await);
        let err = repo.set_approved(42, true).await.unwrap_err();
        assert!(matches!(err, AppError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn delete_removes_the_users_events() {
        let pool = test_pool().await;
        let repo = UsersRepository::new(pool.clone());
        let user = repo.create("abc", "hash", "", true, false).await.unwrap();
        sqlx::query("INSERT INTO events (title, date, created_by) VALUES ('a', '2024-03-05', 'abc'), ('b', '2024-03-06', 'other')")
            .execute(&pool)
            .await
            .unwrap();

        repo.delete(user.id).await.unwrap();

        let left: Vec<String> = sqlx::query_scalar("SELECT created_by FROM events")
            .fetch_all(&pool)
            .await
            .unwrap();
        assert_eq!(left, vec!["other".to_string()]);
        assert!(repo.list().await.unwrap().is_empty());
    }
}
