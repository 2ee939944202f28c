// src/application/commands/articles/update.rs
use super::{ArticleCommandService, create::normalize_uri};
use crate::{
    application::{
        dto::{ArticleDto, Requester},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        article::{
            ArticleChanges, ArticleContent, ArticleId, ArticleSummary, ArticleTitle,
            VisibilityRange,
            specifications::{ArticleSpecification, CanMutateArticleSpec},
        },
        category::CategoryId,
    },
};
use tracing::{info, warn};

pub struct UpdateArticleCommand {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub content_summary: String,
    pub category_id: i64,
    pub importance: i32,
    pub visibility_range: String,
    pub comments_disabled: bool,
    pub source_uri: Option<String>,
}

impl UpdateArticleCommand {
    fn into_changes(self) -> ApplicationResult<(ArticleId, ArticleChanges)> {
        let id = ArticleId::new(self.id)?;
        let changes = ArticleChanges {
            title: ArticleTitle::new(self.title)?,
            content: ArticleContent::new(self.content)?,
            content_summary: ArticleSummary::new(self.content_summary)?,
            category_id: CategoryId::new(self.category_id)?,
            importance: self.importance,
            visibility: VisibilityRange::new(self.visibility_range)?,
            comments_disabled: self.comments_disabled,
            source_uri: normalize_uri(self.source_uri),
        };
        Ok((id, changes))
    }
}

impl ArticleCommandService {
    /// Replaces the mutable fields of an article and republishes it.
    ///
    /// The index follows the new visibility: public articles are upserted,
    /// anything else is removed. As with create, an index failure is surfaced
    /// without undoing the stored update.
    pub async fn update_article(
        &self,
        actor: &Requester,
        command: UpdateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let (id, changes) = command.into_changes()?;

        let mut article = self
            .articles
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        if !CanMutateArticleSpec::new(&article, &actor.id, actor.role).is_satisfied() {
            return Err(ApplicationError::forbidden(
                "only the author or an admin may update this article",
            ));
        }

        if article.is_deleted() {
            return Err(ApplicationError::invalid_state(
                "deleted articles cannot be updated",
            ));
        }

        if changes.title != article.title
            && self
                .articles
                .title_taken(&changes.title, &article.author_id, Some(id))
                .await?
        {
            return Err(ApplicationError::conflict(format!(
                "article '{}' already exists for this author",
                changes.title
            )));
        }

        article.apply(changes, self.clock.now());
        let updated = self.articles.update(&article).await?;
        info!(article_id = %updated.id, "article updated");

        if let Err(err) = self.sync_document(&updated).await {
            warn!(article_id = %updated.id, error = %err, "failed to sync updated article");
            return Err(ApplicationError::search_index_sync(format!(
                "article {} was updated but the search index could not be synced: {err}",
                updated.id
            )));
        }

        let author = self.names.author_name(&updated.author_id).await;
        let category = self.names.category_name(updated.category_id).await;
        Ok(ArticleDto::assemble(updated, author, category)?)
    }
}
