//! Business logic services

pub mod categories;
pub mod equipment;
pub mod equipment_logs;
pub mod locations;
pub mod users;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub users: users::UsersService,
    pub categories: categories::CategoriesService,
    pub locations: locations::LocationsService,
    pub equipment: equipment::EquipmentService,
    pub equipment_logs: equipment_logs::EquipmentLogsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            users: users::UsersService::new(repository.clone(), auth_config),
            categories: categories::CategoriesService::new(repository.clone()),
            locations: locations::LocationsService::new(repository.clone()),
            equipment: equipment::EquipmentService::new(repository.clone()),
            equipment_logs: equipment_logs::EquipmentLogsService::new(repository.clone()),
            repository,
        }
    }

    /// Whether the database answers
    pub async fn is_ready(&self) -> bool {
        match self.repository.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Readiness check failed: {}", e);
                false
            }
        }
    }
}
