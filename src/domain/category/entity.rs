// src/domain/category/entity.rs
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Read-only projection of a category as served by the tree view.
///
/// `children` is only ever filled in memory by [`super::build_category_tree`];
/// rows loaded from storage always carry an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryView {
    pub id: i64,
    pub name: String,
    pub parent_id: i64,
    pub knowledge_base_id: i64,
    pub level: i32,
    #[serde(default)]
    #[schema(no_recursion)]
    pub children: Vec<CategoryView>,
}

impl CategoryView {
    pub fn new(id: i64, name: impl Into<String>, parent_id: i64) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id,
            knowledge_base_id: 0,
            level: 0,
            children: Vec::new(),
        }
    }
}
