//! Equipment model, status enum and response shapes

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Equipment status (any status may follow any other)
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "equipment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EquipmentStatus {
    #[default]
    Available,
    InUse,
    Maintenance,
    Broken,
    Discarded,
}

impl EquipmentStatus {
    pub const ALL: [EquipmentStatus; 5] = [
        EquipmentStatus::Available,
        EquipmentStatus::InUse,
        EquipmentStatus::Maintenance,
        EquipmentStatus::Broken,
        EquipmentStatus::Discarded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentStatus::Available => "available",
            EquipmentStatus::InUse => "in_use",
            EquipmentStatus::Maintenance => "maintenance",
            EquipmentStatus::Broken => "broken",
            EquipmentStatus::Discarded => "discarded",
        }
    }
}

impl FromStr for EquipmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("\"{}\" is not a valid choice.", s))
    }
}

impl fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Equipment detail shape: every stored field plus denormalized reference names
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i32,
    pub name: String,
    pub serial_number: Option<String>,
    /// Category ID (null once the category is deleted)
    #[sqlx(rename = "category_id")]
    pub category: Option<i32>,
    pub category_name: Option<String>,
    /// Location ID (null once the location is deleted)
    #[sqlx(rename = "location_id")]
    pub location: Option<i32>,
    pub location_name: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    /// Serialized as a string with two fractional digits
    #[schema(value_type = Option<String>, example = "100000.00")]
    pub purchase_price: Option<Decimal>,
    pub status: EquipmentStatus,
    pub description: Option<String>,
}

/// Equipment summary shape for list views
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EquipmentSummary {
    pub id: i32,
    pub name: String,
    pub category_name: Option<String>,
    pub location_name: Option<String>,
    pub status: EquipmentStatus,
}

impl From<Equipment> for EquipmentSummary {
    fn from(equipment: Equipment) -> Self {
        Self {
            id: equipment.id,
            name: equipment.name,
            category_name: equipment.category_name,
            location_name: equipment.location_name,
            status: equipment.status,
        }
    }
}

/// Equipment list filter
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct EquipmentQuery {
    /// Exact status match; empty or absent returns every row
    pub status: Option<String>,
}

impl EquipmentQuery {
    /// Status to filter on, `None` when the filter is absent or empty.
    /// An unrecognized value is an `Err`; it matches no equipment.
    pub fn status_filter(&self) -> Option<Result<EquipmentStatus, String>> {
        self.status
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(EquipmentStatus::from_str)
    }
}

/// Create equipment request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 100, message = "Must be between 1 and 100 characters.")
    )]
    pub name: Option<String>,
    #[validate(length(max = 100, message = "Ensure this field has no more than 100 characters."))]
    pub serial_number: Option<String>,
    /// Category ID
    pub category: Option<i32>,
    /// Location ID
    pub location: Option<i32>,
    pub purchase_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>, example = "100000.00")]
    pub purchase_price: Option<Decimal>,
    /// Defaults to `available`
    #[serde(default, deserialize_with = "super::non_null")]
    pub status: Option<EquipmentStatus>,
    pub description: Option<String>,
}

/// Update equipment request; `null` clears nullable fields, absent leaves them
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipment {
    #[validate(length(min = 1, max = 100, message = "Must be between 1 and 100 characters."))]
    #[serde(default, deserialize_with = "super::non_null")]
    pub name: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub serial_number: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub category: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub location: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<NaiveDate>)]
    pub purchase_date: Option<Option<NaiveDate>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub purchase_price: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "super::non_null")]
    pub status: Option<EquipmentStatus>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
}

impl UpdateEquipment {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.serial_number.is_none()
            && self.category.is_none()
            && self.location.is_none()
            && self.purchase_date.is_none()
            && self.purchase_price.is_none()
            && self.status.is_none()
            && self.description.is_none()
    }
}

/// Integer digits allowed by NUMERIC(10, 2)
const PRICE_MAX_INTEGER_DIGITS: u32 = 8;
const PRICE_DECIMAL_PLACES: u32 = 2;

/// Check a purchase price against NUMERIC(10, 2) and rescale it to two fractional digits
pub fn normalize_price(price: Decimal) -> Result<Decimal, ValidationError> {
    if price.normalize().scale() > PRICE_DECIMAL_PLACES {
        let mut err = ValidationError::new("max_decimal_places");
        err.message = Some("Ensure that there are no more than 2 decimal places.".into());
        return Err(err);
    }

    let limit = Decimal::from(10_i64.pow(PRICE_MAX_INTEGER_DIGITS));
    if price.abs().trunc() >= limit {
        let mut err = ValidationError::new("max_whole_digits");
        err.message =
            Some("Ensure that there are no more than 8 digits before the decimal point.".into());
        return Err(err);
    }

    let mut price = price;
    price.rescale(PRICE_DECIMAL_PLACES);
    Ok(price)
}
