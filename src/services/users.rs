//! Authentication and user management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{CreateUser, User, UserClaims},
    repository::{users::NewUser, Repository},
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
}

impl UsersService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Authenticate by username and password, returning a JWT and the user
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<(String, User)> {
        let user = self
            .repository
            .users
            .get_by_username(username)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid username or password".to_string()))?;

        if !verify_password(&user.password_hash, password)? {
            tracing::warn!(username, "Failed login attempt");
            return Err(AppError::Authentication("Invalid username or password".to_string()));
        }

        let token = self.create_token_for_user(&user)?;
        tracing::info!(user_id = user.id, "User logged in");
        Ok((token, user))
    }

    pub fn create_token_for_user(&self, user: &User) -> AppResult<String> {
        UserClaims::for_user(user, self.config.jwt_expiration_hours)
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.repository.users.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    /// Create a new user
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        data.validate()?;
        let username = data.username.as_deref().unwrap_or_default();
        let password = data.password.as_deref().unwrap_or_default();

        if self.repository.users.username_exists(username).await? {
            return Err(AppError::Conflict("A user with that username already exists".to_string()));
        }

        let password_hash = hash_password(password)?;
        let user = self
            .repository
            .users
            .create(&NewUser {
                username,
                password_hash: &password_hash,
                email: data.email.as_deref(),
                first_name: data.first_name.as_deref(),
                last_name: data.last_name.as_deref(),
                is_staff: data.is_staff.unwrap_or(false),
            })
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "User created");
        Ok(user)
    }

    /// Delete a user along with every checkout they made
    pub async fn delete(&self, id: i32, caller: &UserClaims) -> AppResult<()> {
        if caller.user_id == id {
            return Err(AppError::validation("You cannot delete your own account"));
        }
        let logs = self.repository.users.delete(id).await?;
        tracing::info!(user_id = id, deleted_logs = logs, "User deleted");
        Ok(())
    }

    /// Create the configured staff account when the users table is empty
    pub async fn ensure_admin(&self) -> AppResult<()> {
        if self.repository.users.count().await? > 0 {
            return Ok(());
        }

        let password_hash = hash_password(&self.config.admin_password)?;
        let user = self
            .repository
            .users
            .create(&NewUser {
                username: &self.config.admin_username,
                password_hash: &password_hash,
                email: None,
                first_name: None,
                last_name: None,
                is_staff: true,
            })
            .await?;

        tracing::warn!(
            username = %user.username,
            "No users found, created initial staff account; change its password"
        );
        Ok(())
    }
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
