//! Location model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Physical storage place for equipment (e.g. "2F meeting room A")
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Location {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

/// Create location request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLocation {
    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 100, message = "Must be between 1 and 100 characters.")
    )]
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Update location request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateLocation {
    #[validate(length(min = 1, max = 100, message = "Must be between 1 and 100 characters."))]
    #[serde(default, deserialize_with = "super::non_null")]
    pub name: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
}
