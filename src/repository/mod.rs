//! Repository layer for database operations

pub mod categories;
pub mod equipment;
pub mod equipment_logs;
pub mod locations;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub categories: categories::CategoriesRepository,
    pub locations: locations::LocationsRepository,
    pub equipment: equipment::EquipmentRepository,
    pub equipment_logs: equipment_logs::EquipmentLogsRepository,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            categories: categories::CategoriesRepository::new(pool.clone()),
            locations: locations::LocationsRepository::new(pool.clone()),
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            equipment_logs: equipment_logs::EquipmentLogsRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip to the database (readiness probe)
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
