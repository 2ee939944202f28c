pub mod articles;
pub mod categories;
pub mod teams;

use crate::domain::pagination::{MIN_PAGE_INDEX, MIN_PAGE_SIZE};

fn default_page_index() -> i64 {
    MIN_PAGE_INDEX
}

fn default_page_size() -> i64 {
    MIN_PAGE_SIZE
}

/// Splits a comma-separated query value, dropping blank entries.
fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}
