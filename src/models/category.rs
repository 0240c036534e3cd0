//! Category model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Tag grouping equipment
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

/// Create category request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 100, message = "Must be between 1 and 100 characters.")
    )]
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Update category request; absent fields are left untouched
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 100, message = "Must be between 1 and 100 characters."))]
    #[serde(default, deserialize_with = "super::non_null")]
    pub name: Option<String>,
    /// `null` clears the description
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
}
