// src/application/commands/articles/delete.rs
use std::collections::BTreeSet;

use super::ArticleCommandService;
use crate::{
    application::{
        dto::{DeletedCountDto, Requester},
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::{
        ArticleId, ArticleStatus,
        specifications::{ArticleSpecification, CanBulkMutateArticlesSpec, CanMutateArticleSpec},
    },
};
use tracing::{info, warn};

pub struct DeleteArticleCommand {
    pub id: i64,
}

pub struct BatchDeleteArticlesCommand {
    pub ids: Vec<i64>,
}

impl ArticleCommandService {
    /// Soft-deletes one article. Returns 0 when it was already deleted.
    pub async fn delete_article(
        &self,
        actor: &Requester,
        command: DeleteArticleCommand,
    ) -> ApplicationResult<DeletedCountDto> {
        let id = ArticleId::new(command.id)?;
        let article = self
            .articles
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        if !CanMutateArticleSpec::new(&article, &actor.id, actor.role).is_satisfied() {
            return Err(ApplicationError::forbidden(
                "only the author or an admin may delete this article",
            ));
        }

        let deleted_count = self
            .articles
            .update_status(&[id], ArticleStatus::Deleted, self.clock.now())
            .await?;
        info!(article_id = %id, deleted_count, "article deleted");

        if let Err(err) = self.search_index.delete(id).await {
            warn!(article_id = %id, error = %err, "failed to remove deleted article from search index");
        }

        Ok(DeletedCountDto { deleted_count })
    }

    /// Soft-deletes every listed article without per-id existence checks.
    /// Matching documents are removed from the index on a best-effort basis.
    pub async fn batch_delete_articles(
        &self,
        actor: &Requester,
        command: BatchDeleteArticlesCommand,
    ) -> ApplicationResult<DeletedCountDto> {
        if !CanBulkMutateArticlesSpec::new(actor.role).is_satisfied() {
            return Err(ApplicationError::forbidden(
                "only admins may delete articles in bulk",
            ));
        }

        let ids = command
            .ids
            .into_iter()
            .map(ArticleId::new)
            .collect::<Result<BTreeSet<_>, _>>()?
            .into_iter()
            .collect::<Vec<_>>();

        if ids.is_empty() {
            return Ok(DeletedCountDto { deleted_count: 0 });
        }

        let deleted_count = self
            .articles
            .update_status(&ids, ArticleStatus::Deleted, self.clock.now())
            .await?;
        info!(requested = ids.len(), deleted_count, "articles deleted in bulk");

        if let Err(err) = self.search_index.delete_many(&ids).await {
            warn!(requested = ids.len(), error = %err, "failed to remove deleted articles from search index");
        }

        Ok(DeletedCountDto { deleted_count })
    }
}
