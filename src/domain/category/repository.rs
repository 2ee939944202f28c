// src/domain/category/repository.rs
use crate::domain::category::{entity::CategoryView, value_objects::CategoryId};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Every live category as a flat list, in the order the tree should present siblings.
    async fn list_views(&self) -> DomainResult<Vec<CategoryView>>;

    async fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<CategoryView>>;
}
