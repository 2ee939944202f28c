// src/application/queries/categories.rs
use std::sync::Arc;

use crate::{
    application::error::ApplicationResult,
    domain::category::{CategoryRepository, CategoryView, build_category_tree},
};
use tracing::info;

pub struct CategoryQueryService {
    categories: Arc<dyn CategoryRepository>,
}

impl CategoryQueryService {
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    /// The category forest below `parent_id` (use `ROOT_PARENT_ID` for the whole tree).
    pub async fn category_tree(&self, parent_id: i64) -> ApplicationResult<Vec<CategoryView>> {
        let flat = self.categories.list_views().await?;
        let tree = build_category_tree(&flat, parent_id);
        info!(parent_id, categories = flat.len(), roots = tree.len(), "category tree built");
        Ok(tree)
    }
}
