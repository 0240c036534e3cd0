//! Categories repository for database operations

use sqlx::{Pool, Postgres, QueryBuilder};

use crate::{
    error::{AppError, AppResult},
    models::category::{Category, CreateCategory, UpdateCategory},
};

#[derive(Clone)]
pub struct CategoriesRepository {
    pool: Pool<Postgres>,
}

impl CategoriesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all categories
    pub async fn list(&self) -> AppResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get category by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Category> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Create category
    pub async fn create(&self, data: &CreateCategory) -> AppResult<Category> {
        let row = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, description) VALUES ($1, $2) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update the fields present in `data`
    pub async fn update(&self, id: i32, data: &UpdateCategory) -> AppResult<Category> {
        if data.name.is_none() && data.description.is_none() {
            return self.get_by_id(id).await;
        }

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE categories SET ");
        let mut sets = builder.separated(", ");
        if let Some(ref name) = data.name {
            sets.push("name = ").push_bind_unseparated(name.clone());
        }
        if let Some(ref description) = data.description {
            sets.push("description = ").push_bind_unseparated(description.clone());
        }
        builder.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        builder
            .build_query_as::<Category>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    /// Delete category; returns the number of equipment rows whose category was cleared
    pub async fn delete(&self, id: i32) -> AppResult<i64> {
        let (deleted, detached): (i64, i64) = sqlx::query_as(
            r#"
            WITH deleted AS (DELETE FROM categories WHERE id = $1 RETURNING id)
            SELECT
                (SELECT COUNT(*) FROM deleted),
                (SELECT COUNT(*) FROM equipment WHERE category_id IN (SELECT id FROM deleted))
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        if deleted == 0 {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }
        Ok(detached)
    }
}
