//! Data models for the equipment tracker

pub mod category;
pub mod equipment;
pub mod equipment_log;
pub mod location;
pub mod user;

use serde::{de, Deserialize, Deserializer};

// Re-export commonly used types
pub use category::Category;
pub use equipment::{Equipment, EquipmentStatus, EquipmentSummary};
pub use equipment_log::EquipmentLog;
pub use location::Location;
pub use user::{User, UserClaims};

/// Deserialize an optional field that may be omitted but never set to `null`
pub(crate) fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<T>::deserialize(deserializer)? {
        Some(value) => Ok(Some(value)),
        None => Err(de::Error::custom("This field may not be null.")),
    }
}
