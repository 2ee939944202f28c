// src/application/queries/lookup.rs
//! Best-effort display name resolution for article views.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{
    category::{CategoryId, CategoryRepository},
    user::{UserId, UserRepository},
};
use tracing::{debug, warn};

/// Resolves author nicknames and category names.
///
/// Lookups never fail the caller: a missing row or a store error yields `None`.
#[derive(Clone)]
pub struct DisplayNameResolver {
    users: Arc<dyn UserRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl DisplayNameResolver {
    pub fn new(users: Arc<dyn UserRepository>, categories: Arc<dyn CategoryRepository>) -> Self {
        Self { users, categories }
    }

    pub async fn author_name(&self, id: &UserId) -> Option<String> {
        match self.users.find_by_id(id).await {
            Ok(Some(user)) => Some(user.nickname.into()),
            Ok(None) => {
                debug!(author_id = %id, "author not found for display");
                None
            }
            Err(err) => {
                warn!(author_id = %id, error = %err, "author lookup failed");
                None
            }
        }
    }

    pub async fn category_name(&self, id: CategoryId) -> Option<String> {
        match self.categories.find_by_id(id).await {
            Ok(Some(category)) => Some(category.name),
            Ok(None) => {
                debug!(category_id = %id, "category not found for display");
                None
            }
            Err(err) => {
                warn!(category_id = %id, error = %err, "category lookup failed");
                None
            }
        }
    }

    /// A memoising view for resolving many rows within one request.
    pub fn cached(&self) -> CachedNames<'_> {
        CachedNames {
            resolver: self,
            authors: HashMap::new(),
            categories: HashMap::new(),
        }
    }
}

pub struct CachedNames<'a> {
    resolver: &'a DisplayNameResolver,
    authors: HashMap<UserId, Option<String>>,
    categories: HashMap<CategoryId, Option<String>>,
}

impl CachedNames<'_> {
    pub async fn author_name(&mut self, id: &UserId) -> Option<String> {
        if let Some(cached) = self.authors.get(id) {
            return cached.clone();
        }
        let name = self.resolver.author_name(id).await;
        self.authors.insert(id.clone(), name.clone());
        name
    }

    pub async fn category_name(&mut self, id: CategoryId) -> Option<String> {
        if let Some(cached) = self.categories.get(&id) {
            return cached.clone();
        }
        let name = self.resolver.category_name(id).await;
        self.categories.insert(id, name.clone());
        name
    }
}
