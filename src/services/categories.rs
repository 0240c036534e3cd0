//! Category registry service

use validator::Validate;

use crate::{
    error::AppResult,
    models::category::{Category, CreateCategory, UpdateCategory},
    repository::Repository,
};

#[derive(Clone)]
pub struct CategoriesService {
    repository: Repository,
}

impl CategoriesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Category>> {
        self.repository.categories.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Category> {
        self.repository.categories.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateCategory) -> AppResult<Category> {
        data.validate()?;
        let category = self.repository.categories.create(data).await?;
        tracing::info!(category_id = category.id, name = %category.name, "Category created");
        Ok(category)
    }

    pub async fn update(&self, id: i32, data: &UpdateCategory) -> AppResult<Category> {
        data.validate()?;
        self.repository.categories.update(id, data).await
    }

    /// Delete a category. Equipment in it survives with its category cleared.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let detached = self.repository.categories.delete(id).await?;
        tracing::info!(category_id = id, detached_equipment = detached, "Category deleted");
        Ok(())
    }
}
