//! Checkout lifecycle service
//!
//! A log row is open while `checked_in_date` is null and closed once it is set.
//! Check-in is an ordinary update; there are no dedicated verbs.

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::equipment_log::{CheckoutState, CreateEquipmentLog, EquipmentLog, UpdateEquipmentLog},
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentLogsService {
    repository: Repository,
}

impl EquipmentLogsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<EquipmentLog>> {
        self.repository.equipment_logs.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<EquipmentLog> {
        self.repository.equipment_logs.get_by_id(id).await
    }

    /// Open a checkout episode
    pub async fn create(&self, data: &CreateEquipmentLog) -> AppResult<EquipmentLog> {
        data.validate()?;
        self.check_references(data.equipment, data.checked_out_by).await?;

        if let Some(equipment_id) = data.equipment {
            // Concurrent open checkouts are permitted; surface them in the logs
            let open = self
                .repository
                .equipment_logs
                .count_open_for_equipment(equipment_id)
                .await?;
            if open > 0 {
                tracing::warn!(
                    equipment_id,
                    open_checkouts = open,
                    "Equipment checked out while a previous checkout is still open"
                );
            }
        }

        let log = self.repository.equipment_logs.create(data).await?;
        tracing::info!(
            log_id = log.id,
            equipment_id = log.equipment,
            user_id = log.checked_out_by,
            "Checkout opened"
        );
        Ok(log)
    }

    /// Apply an update; setting `checked_in_date` closes the checkout
    pub async fn update(&self, id: i32, data: &UpdateEquipmentLog) -> AppResult<EquipmentLog> {
        let before = self.repository.equipment_logs.get_by_id(id).await?;
        self.check_references(data.equipment, data.checked_out_by).await?;

        let log = self.repository.equipment_logs.update(id, data).await?;

        match (before.state(), log.state()) {
            (CheckoutState::Open, CheckoutState::Closed) => {
                tracing::info!(log_id = id, equipment_id = log.equipment, "Checkout closed");
            }
            (CheckoutState::Closed, CheckoutState::Open) => {
                tracing::warn!(log_id = id, equipment_id = log.equipment, "Closed checkout reopened");
            }
            _ => {}
        }
        Ok(log)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.equipment_logs.delete(id).await?;
        tracing::info!(log_id = id, "Equipment log deleted");
        Ok(())
    }

    async fn check_references(&self, equipment: Option<i32>, user: Option<i32>) -> AppResult<()> {
        if let Some(equipment_id) = equipment {
            if !self.repository.equipment.exists(equipment_id).await? {
                return Err(AppError::invalid_field(
                    "equipment",
                    format!("Invalid pk \"{}\" - object does not exist.", equipment_id),
                ));
            }
        }
        if let Some(user_id) = user {
            if !self.repository.users.exists(user_id).await? {
                return Err(AppError::invalid_field(
                    "checked_out_by",
                    format!("Invalid pk \"{}\" - object does not exist.", user_id),
                ));
            }
        }
        Ok(())
    }
}
