use std::sync::Arc;

use crate::{
    application::queries::lookup::DisplayNameResolver,
    domain::article::{ArticleRepository, ArticleSearchIndex},
};

pub struct ArticleQueryService {
    pub(super) articles: Arc<dyn ArticleRepository>,
    pub(super) search_index: Arc<dyn ArticleSearchIndex>,
    pub(super) names: DisplayNameResolver,
}

impl ArticleQueryService {
    pub fn new(
        articles: Arc<dyn ArticleRepository>,
        search_index: Arc<dyn ArticleSearchIndex>,
        names: DisplayNameResolver,
    ) -> Self {
        Self {
            articles,
            search_index,
            names,
        }
    }
}
