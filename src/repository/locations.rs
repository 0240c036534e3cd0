//! Locations repository for database operations

use sqlx::{Pool, Postgres, QueryBuilder};

use crate::{
    error::{AppError, AppResult},
    models::location::{CreateLocation, Location, UpdateLocation},
};

#[derive(Clone)]
pub struct LocationsRepository {
    pool: Pool<Postgres>,
}

impl LocationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all locations
    pub async fn list(&self) -> AppResult<Vec<Location>> {
        let rows = sqlx::query_as::<_, Location>("SELECT * FROM locations ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get location by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Location> {
        sqlx::query_as::<_, Location>("SELECT * FROM locations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Location {} not found", id)))
    }

    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM locations WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Create location
    pub async fn create(&self, data: &CreateLocation) -> AppResult<Location> {
        let row = sqlx::query_as::<_, Location>(
            "INSERT INTO locations (name, description) VALUES ($1, $2) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update the fields present in `data`
    pub async fn update(&self, id: i32, data: &UpdateLocation) -> AppResult<Location> {
        if data.name.is_none() && data.description.is_none() {
            return self.get_by_id(id).await;
        }

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE locations SET ");
        let mut sets = builder.separated(", ");
        if let Some(ref name) = data.name {
            sets.push("name = ").push_bind_unseparated(name.clone());
        }
        if let Some(ref description) = data.description {
            sets.push("description = ").push_bind_unseparated(description.clone());
        }
        builder.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        builder
            .build_query_as::<Location>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Location {} not found", id)))
    }

    /// Delete location; returns the number of equipment rows whose location was cleared
    pub async fn delete(&self, id: i32) -> AppResult<i64> {
        let (deleted, detached): (i64, i64) = sqlx::query_as(
            r#"
            WITH deleted AS (DELETE FROM locations WHERE id = $1 RETURNING id)
            SELECT
                (SELECT COUNT(*) FROM deleted),
                (SELECT COUNT(*) FROM equipment WHERE location_id IN (SELECT id FROM deleted))
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        if deleted == 0 {
            return Err(AppError::NotFound(format!("Location {} not found", id)));
        }
        Ok(detached)
    }
}
