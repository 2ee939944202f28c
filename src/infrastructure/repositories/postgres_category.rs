// src/infrastructure/repositories/postgres_category.rs
use super::map_sqlx;
use crate::domain::category::{CategoryId, CategoryRepository, CategoryView};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

#[derive(Clone)]
pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CategoryViewRow {
    id: i64,
    name: String,
    parent_id: i64,
    knowledge_base_id: i64,
    level: i32,
}

impl From<CategoryViewRow> for CategoryView {
    fn from(row: CategoryViewRow) -> Self {
        CategoryView {
            id: row.id,
            name: row.name,
            parent_id: row.parent_id,
            knowledge_base_id: row.knowledge_base_id,
            level: row.level,
            children: Vec::new(),
        }
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn list_views(&self) -> DomainResult<Vec<CategoryView>> {
        let rows = sqlx::query_as::<_, CategoryViewRow>(
            "SELECT id, name, parent_id, knowledge_base_id, level
             FROM view_category_tree
             ORDER BY level, sort_order, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(rows.into_iter().map(CategoryView::from).collect())
    }

    async fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<CategoryView>> {
        let row = sqlx::query_as::<_, CategoryViewRow>(
            "SELECT c.id, c.name, c.parent_id, c.knowledge_base_id, COALESCE(v.level, 0) AS level
             FROM categories c
             LEFT JOIN view_category_tree v ON v.id = c.id
             WHERE c.id = $1 AND c.deleted_at IS NULL",
        )
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(row.map(CategoryView::from))
    }
}
