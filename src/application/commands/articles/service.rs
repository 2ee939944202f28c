// src/application/commands/articles/service.rs
use std::sync::Arc;

use crate::{
    application::{ports::time::Clock, queries::lookup::DisplayNameResolver},
    domain::article::{ArticleRepository, ArticleSearchIndex},
};

pub struct ArticleCommandService {
    pub(super) articles: Arc<dyn ArticleRepository>,
    pub(super) search_index: Arc<dyn ArticleSearchIndex>,
    pub(super) names: DisplayNameResolver,
    pub(super) clock: Arc<dyn Clock>,
}

impl ArticleCommandService {
    pub fn new(
        articles: Arc<dyn ArticleRepository>,
        search_index: Arc<dyn ArticleSearchIndex>,
        names: DisplayNameResolver,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            articles,
            search_index,
            names,
            clock,
        }
    }
}
