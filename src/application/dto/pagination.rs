use crate::domain::pagination::Page;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: serde::de::DeserializeOwned"
))]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page_index: i64,
    pub page_size: i64,
    pub total_pages: u64,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, total_count: u64, page: Page) -> Self {
        Self {
            items,
            total_count,
            page_index: page.index(),
            page_size: page.size(),
            total_pages: page.total_pages(total_count),
        }
    }

    pub fn empty(page: Page) -> Self {
        Self::new(Vec::new(), 0, page)
    }
}
