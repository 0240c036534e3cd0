//! Location registry service

use validator::Validate;

use crate::{
    error::AppResult,
    models::location::{CreateLocation, Location, UpdateLocation},
    repository::Repository,
};

#[derive(Clone)]
pub struct LocationsService {
    repository: Repository,
}

impl LocationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Location>> {
        self.repository.locations.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Location> {
        self.repository.locations.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateLocation) -> AppResult<Location> {
        data.validate()?;
        let location = self.repository.locations.create(data).await?;
        tracing::info!(location_id = location.id, name = %location.name, "Location created");
        Ok(location)
    }

    pub async fn update(&self, id: i32, data: &UpdateLocation) -> AppResult<Location> {
        data.validate()?;
        self.repository.locations.update(id, data).await
    }

    /// Delete a location; equipment stored there keeps existing without a location
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let detached = self.repository.locations.delete(id).await?;
        tracing::info!(location_id = id, detached_equipment = detached, "Location deleted");
        Ok(())
    }
}
