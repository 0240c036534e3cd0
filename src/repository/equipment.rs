//! Equipment repository for database operations

use sqlx::{Pool, Postgres, QueryBuilder};

use crate::{
    error::{AppError, AppResult},
    models::equipment::{CreateEquipment, Equipment, EquipmentStatus, UpdateEquipment},
};

/// Projection joining the referenced category and location names.
/// Expects the equipment rows to be exposed as `e`.
const SELECT_DETAIL: &str = r#"
    SELECT e.id, e.name, e.serial_number,
           e.category_id, c.name AS category_name,
           e.location_id, l.name AS location_name,
           e.purchase_date, e.purchase_price, e.status, e.description
    FROM e
    LEFT JOIN categories c ON c.id = e.category_id
    LEFT JOIN locations l ON l.id = e.location_id
"#;

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List equipment, optionally restricted to one status
    pub async fn list(&self, status: Option<EquipmentStatus>) -> AppResult<Vec<Equipment>> {
        let mut builder = QueryBuilder::<Postgres>::new("WITH e AS (SELECT * FROM equipment");
        if let Some(status) = status {
            builder.push(" WHERE status = ").push_bind(status);
        }
        builder.push(")").push(SELECT_DETAIL).push(" ORDER BY e.id");

        let rows = builder
            .build_query_as::<Equipment>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        let query = format!(
            "WITH e AS (SELECT * FROM equipment WHERE id = $1) {}",
            SELECT_DETAIL
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM equipment WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Create equipment; `purchase_price` must already be normalized
    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        let query = format!(
            r#"
            WITH e AS (
                INSERT INTO equipment
                    (name, serial_number, category_id, location_id,
                     purchase_date, purchase_price, status, description)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING *
            )
            {}
            "#,
            SELECT_DETAIL
        );

        let row = sqlx::query_as::<_, Equipment>(&query)
            .bind(&data.name)
            .bind(&data.serial_number)
            .bind(data.category)
            .bind(data.location)
            .bind(data.purchase_date)
            .bind(data.purchase_price)
            .bind(data.status.unwrap_or_default())
            .bind(&data.description)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    /// Update the fields present in `data`
    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        if data.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut builder = QueryBuilder::<Postgres>::new("WITH e AS (UPDATE equipment SET ");
        let mut sets = builder.separated(", ");

        macro_rules! set_field {
            ($field:expr, $column:literal) => {
                if let Some(ref value) = $field {
                    sets.push(concat!($column, " = "))
                        .push_bind_unseparated(value.clone());
                }
            };
        }

        set_field!(data.name, "name");
        set_field!(data.serial_number, "serial_number");
        set_field!(data.category, "category_id");
        set_field!(data.location, "location_id");
        set_field!(data.purchase_date, "purchase_date");
        set_field!(data.purchase_price, "purchase_price");
        set_field!(data.status, "status");
        set_field!(data.description, "description");

        builder
            .push(" WHERE id = ")
            .push_bind(id)
            .push(" RETURNING *)")
            .push(SELECT_DETAIL);

        builder
            .build_query_as::<Equipment>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Delete equipment; returns the number of checkout logs removed with it
    pub async fn delete(&self, id: i32) -> AppResult<i64> {
        let (deleted, logs): (i64, i64) = sqlx::query_as(
            r#"
            WITH deleted AS (DELETE FROM equipment WHERE id = $1 RETURNING id)
            SELECT
                (SELECT COUNT(*) FROM deleted),
                (SELECT COUNT(*) FROM equipment_logs WHERE equipment_id IN (SELECT id FROM deleted))
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        if deleted == 0 {
            return Err(AppError::NotFound(format!("Equipment {} not found", id)));
        }
        Ok(logs)
    }
}
