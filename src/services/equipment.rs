//! Equipment registry service

use rust_decimal::Decimal;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::equipment::{
        normalize_price, CreateEquipment, Equipment, EquipmentQuery, EquipmentSummary,
        UpdateEquipment,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List equipment in detail shape, filtered by exact status when requested
    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<Equipment>> {
        let status = match query.status_filter() {
            None => None,
            Some(Ok(status)) => Some(status),
            Some(Err(reason)) => {
                tracing::debug!(%reason, "Status filter matches no equipment");
                return Ok(Vec::new());
            }
        };
        self.repository.equipment.list(status).await
    }

    /// List equipment in summary shape
    pub async fn list_summary(&self, query: &EquipmentQuery) -> AppResult<Vec<EquipmentSummary>> {
        let rows = self.list(query).await?;
        Ok(rows.into_iter().map(EquipmentSummary::from).collect())
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    pub async fn create(&self, mut data: CreateEquipment) -> AppResult<Equipment> {
        data.validate()?;
        data.purchase_price = data.purchase_price.map(checked_price).transpose()?;
        self.check_references(data.category, data.location).await?;

        let equipment = self.repository.equipment.create(&data).await?;
        tracing::info!(
            equipment_id = equipment.id,
            name = %equipment.name,
            status = %equipment.status,
            "Equipment created"
        );
        Ok(equipment)
    }

    pub async fn update(&self, id: i32, mut data: UpdateEquipment) -> AppResult<Equipment> {
        data.validate()?;
        if let Some(Some(price)) = data.purchase_price {
            data.purchase_price = Some(Some(checked_price(price)?));
        }
        self.check_references(data.category.flatten(), data.location.flatten())
            .await?;

        let equipment = self.repository.equipment.update(id, &data).await?;
        if let Some(status) = data.status {
            tracing::info!(equipment_id = id, status = %status, "Equipment status set");
        }
        Ok(equipment)
    }

    /// Delete equipment together with its checkout history
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let logs = self.repository.equipment.delete(id).await?;
        tracing::info!(equipment_id = id, deleted_logs = logs, "Equipment deleted");
        Ok(())
    }

    async fn check_references(&self, category: Option<i32>, location: Option<i32>) -> AppResult<()> {
        if let Some(category_id) = category {
            if !self.repository.categories.exists(category_id).await? {
                return Err(AppError::invalid_field(
                    "category",
                    format!("Invalid pk \"{}\" - object does not exist.", category_id),
                ));
            }
        }
        if let Some(location_id) = location {
            if !self.repository.locations.exists(location_id).await? {
                return Err(AppError::invalid_field(
                    "location",
                    format!("Invalid pk \"{}\" - object does not exist.", location_id),
                ));
            }
        }
        Ok(())
    }
}

fn checked_price(price: Decimal) -> AppResult<Decimal> {
    normalize_price(price).map_err(|e| {
        let message = e
            .message
            .map(|m| m.to_string())
            .unwrap_or_else(|| e.code.to_string());
        AppError::invalid_field("purchase_price", message)
    })
}
