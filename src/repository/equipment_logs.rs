//! Equipment logs repository (checkout/return records)

use sqlx::{Pool, Postgres, QueryBuilder};

use crate::{
    error::{AppError, AppResult},
    models::equipment_log::{CreateEquipmentLog, EquipmentLog, UpdateEquipmentLog},
};

/// Projection over log rows exposed as `g`, with equipment name and borrower username
const SELECT_DETAIL: &str = r#"
    SELECT g.id, g.equipment_id, e.name AS equipment_name,
           g.checked_out_by, u.username AS checked_out_by_name,
           g.checked_out_date, g.expected_return_date, g.checked_in_date, g.notes
    FROM g
    JOIN equipment e ON e.id = g.equipment_id
    JOIN users u ON u.id = g.checked_out_by
"#;

#[derive(Clone)]
pub struct EquipmentLogsRepository {
    pool: Pool<Postgres>,
}

impl EquipmentLogsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all logs
    pub async fn list(&self) -> AppResult<Vec<EquipmentLog>> {
        let query = format!(
            "WITH g AS (SELECT * FROM equipment_logs) {} ORDER BY g.id",
            SELECT_DETAIL
        );
        let rows = sqlx::query_as::<_, EquipmentLog>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get log by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<EquipmentLog> {
        let query = format!(
            "WITH g AS (SELECT * FROM equipment_logs WHERE id = $1) {}",
            SELECT_DETAIL
        );
        sqlx::query_as::<_, EquipmentLog>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment log {} not found", id)))
    }

    /// Number of open checkouts (no check-in yet) for a piece of equipment
    pub async fn count_open_for_equipment(&self, equipment_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM equipment_logs WHERE equipment_id = $1 AND checked_in_date IS NULL",
        )
        .bind(equipment_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Open a checkout. `checked_out_date` is stamped by the database.
    pub async fn create(&self, data: &CreateEquipmentLog) -> AppResult<EquipmentLog> {
        let query = format!(
            r#"
            WITH g AS (
                INSERT INTO equipment_logs
                    (equipment_id, checked_out_by, checked_out_date, expected_return_date, notes)
                VALUES ($1, $2, NOW(), $3, $4)
                RETURNING *
            )
            {}
            "#,
            SELECT_DETAIL
        );

        let row = sqlx::query_as::<_, EquipmentLog>(&query)
            .bind(data.equipment)
            .bind(data.checked_out_by)
            .bind(data.expected_return_date)
            .bind(&data.notes)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    /// Update the fields present in `data`; `checked_out_date` is never written
    pub async fn update(&self, id: i32, data: &UpdateEquipmentLog) -> AppResult<EquipmentLog> {
        if data.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut builder = QueryBuilder::<Postgres>::new("WITH g AS (UPDATE equipment_logs SET ");
        let mut sets = builder.separated(", ");

        if let Some(equipment) = data.equipment {
            sets.push("equipment_id = ").push_bind_unseparated(equipment);
        }
        if let Some(user_id) = data.checked_out_by {
            sets.push("checked_out_by = ").push_bind_unseparated(user_id);
        }
        if let Some(expected) = data.expected_return_date {
            sets.push("expected_return_date = ").push_bind_unseparated(expected);
        }
        if let Some(checked_in) = data.checked_in_date {
            sets.push("checked_in_date = ").push_bind_unseparated(checked_in);
        }
        if let Some(ref notes) = data.notes {
            sets.push("notes = ").push_bind_unseparated(notes.clone());
        }

        builder
            .push(" WHERE id = ")
            .push_bind(id)
            .push(" RETURNING *)")
            .push(SELECT_DETAIL);

        builder
            .build_query_as::<EquipmentLog>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment log {} not found", id)))
    }

    /// Delete log
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipment_logs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipment log {} not found", id)));
        }
        Ok(())
    }
}
