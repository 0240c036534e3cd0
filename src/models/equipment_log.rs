//! Equipment checkout/return record

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// One checkout episode, open until `checked_in_date` is set
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EquipmentLog {
    pub id: i32,
    /// Equipment ID
    #[sqlx(rename = "equipment_id")]
    pub equipment: i32,
    pub equipment_name: String,
    /// User ID
    pub checked_out_by: i32,
    /// Username of the borrower
    pub checked_out_by_name: String,
    /// Assigned at creation, never modified
    pub checked_out_date: DateTime<Utc>,
    pub expected_return_date: Option<NaiveDate>,
    /// Null while the checkout is open
    pub checked_in_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Lifecycle state of a checkout episode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    Open,
    Closed,
}

impl EquipmentLog {
    pub fn state(&self) -> CheckoutState {
        CheckoutState::from_checked_in(self.checked_in_date.as_ref())
    }
}

impl CheckoutState {
    pub fn from_checked_in(checked_in_date: Option<&DateTime<Utc>>) -> Self {
        match checked_in_date {
            Some(_) => CheckoutState::Closed,
            None => CheckoutState::Open,
        }
    }
}

/// Create (check out) request. Any caller-supplied `checked_out_date` is ignored.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct CreateEquipmentLog {
    /// Equipment ID
    #[validate(required(message = "This field is required."))]
    pub equipment: Option<i32>,
    /// User ID of the borrower
    #[validate(required(message = "This field is required."))]
    pub checked_out_by: Option<i32>,
    pub expected_return_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Update request; setting `checked_in_date` closes the checkout
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateEquipmentLog {
    #[serde(default, deserialize_with = "super::non_null")]
    pub equipment: Option<i32>,
    #[serde(default, deserialize_with = "super::non_null")]
    pub checked_out_by: Option<i32>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<NaiveDate>)]
    pub expected_return_date: Option<Option<NaiveDate>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub checked_in_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
}

impl UpdateEquipmentLog {
    pub fn is_empty(&self) -> bool {
        self.equipment.is_none()
            && self.checked_out_by.is_none()
            && self.expected_return_date.is_none()
            && self.checked_in_date.is_none()
            && self.notes.is_none()
    }
}
