//! Users repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::user::User,
};

/// Row values for a new account; the password is already hashed
pub struct NewUser<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub email: Option<&'a str>,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub is_staff: bool,
}

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all users
    pub async fn list(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    pub async fn get_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    pub async fn username_exists(&self, username: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Insert a new user
    pub async fn create(&self, user: &NewUser<'_>) -> AppResult<User> {
        let row = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, email, first_name, last_name, is_staff)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(user.username)
        .bind(user.password_hash)
        .bind(user.email)
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(user.is_staff)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Delete user; returns the number of checkout logs removed with it
    pub async fn delete(&self, id: i32) -> AppResult<i64> {
        let (deleted, logs): (i64, i64) = sqlx::query_as(
            r#"
            WITH deleted AS (DELETE FROM users WHERE id = $1 RETURNING id)
            SELECT
                (SELECT COUNT(*) FROM deleted),
                (SELECT COUNT(*) FROM equipment_logs WHERE checked_out_by IN (SELECT id FROM deleted))
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        if deleted == 0 {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }
        Ok(logs)
    }
}
