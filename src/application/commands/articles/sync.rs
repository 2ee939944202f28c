// src/application/commands/articles/sync.rs
use super::ArticleCommandService;
use crate::domain::{
    article::{Article, SearchDocument},
    errors::DomainResult,
};

/// What a sync call did to the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SyncAction {
    Upserted,
    Removed,
}

impl ArticleCommandService {
    /// Make the index agree with `article`: searchable rows are upserted,
    /// everything else is removed.
    pub(super) async fn sync_document(&self, article: &Article) -> DomainResult<SyncAction> {
        if article.is_searchable() {
            self.search_index
                .upsert(&SearchDocument::from(article))
                .await?;
            Ok(SyncAction::Upserted)
        } else {
            self.search_index.delete(article.id).await?;
            Ok(SyncAction::Removed)
        }
    }
}
