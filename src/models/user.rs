//! User accounts and authentication claims

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppError;

/// User account; referenced by checkout logs
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Hashed password (argon2)
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub is_staff: bool,
    pub date_joined: DateTime<Utc>,
}

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 150, message = "Must be between 1 and 150 characters.")
    )]
    pub username: Option<String>,
    #[validate(
        required(message = "This field is required."),
        length(min = 1, message = "This field may not be blank.")
    )]
    pub password: Option<String>,
    #[validate(email(message = "Enter a valid email address."))]
    pub email: Option<String>,
    #[validate(length(max = 150))]
    pub first_name: Option<String>,
    #[validate(length(max = 150))]
    pub last_name: Option<String>,
    pub is_staff: Option<bool>,
}

/// JWT claims identifying the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    /// Username
    pub sub: String,
    pub user_id: i32,
    pub is_staff: bool,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    pub fn for_user(user: &User, lifetime_hours: u64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: user.username.clone(),
            user_id: user.id,
            is_staff: user.is_staff,
            exp: now + (lifetime_hours as i64 * 3600),
            iat: now,
        }
    }

    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    pub fn require_staff(&self) -> Result<(), AppError> {
        if self.is_staff {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Staff rights are required for this operation".to_string(),
            ))
        }
    }
}
