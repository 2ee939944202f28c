// src/application/commands/articles/create.rs
use super::ArticleCommandService;
use crate::{
    application::{
        dto::{CreatedArticleDto, Requester},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        article::{
            ArticleContent, ArticleStatus, ArticleSummary, ArticleTitle, Attachment,
            AttachmentBlob, NewArticle, VisibilityRange,
        },
        category::CategoryId,
    },
};
use tracing::{info, warn};

pub struct CreateArticleCommand {
    pub title: String,
    pub content: String,
    pub content_summary: String,
    pub category_id: i64,
    pub importance: i32,
    pub visibility_range: String,
    pub comments_disabled: bool,
    pub source_uri: Option<String>,
    pub attachments: Vec<Attachment>,
}

impl CreateArticleCommand {
    pub fn builder() -> CreateArticleCommandBuilder {
        CreateArticleCommandBuilder::default()
    }
}

#[derive(Default)]
pub struct CreateArticleCommandBuilder {
    title: Option<String>,
    content: Option<String>,
    content_summary: String,
    category_id: Option<i64>,
    importance: i32,
    visibility_range: Option<String>,
    comments_disabled: bool,
    source_uri: Option<String>,
    attachments: Vec<Attachment>,
}

impl CreateArticleCommandBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn content_summary(mut self, summary: impl Into<String>) -> Self {
        self.content_summary = summary.into();
        self
    }

    pub fn category_id(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn importance(mut self, importance: i32) -> Self {
        self.importance = importance;
        self
    }

    pub fn visibility_range(mut self, visibility: impl Into<String>) -> Self {
        self.visibility_range = Some(visibility.into());
        self
    }

    pub fn comments_disabled(mut self, disabled: bool) -> Self {
        self.comments_disabled = disabled;
        self
    }

    pub fn source_uri(mut self, uri: impl Into<String>) -> Self {
        self.source_uri = Some(uri.into());
        self
    }

    pub fn attachment(mut self, file_name: impl Into<String>, file_url: impl Into<String>) -> Self {
        self.attachments.push(Attachment {
            file_name: file_name.into(),
            file_url: file_url.into(),
        });
        self
    }

    pub fn build(self) -> Result<CreateArticleCommand, &'static str> {
        Ok(CreateArticleCommand {
            title: self.title.ok_or("title is required")?,
            content: self.content.ok_or("content is required")?,
            content_summary: self.content_summary,
            category_id: self.category_id.ok_or("category_id is required")?,
            importance: self.importance,
            visibility_range: self.visibility_range.unwrap_or_else(|| "public".into()),
            comments_disabled: self.comments_disabled,
            source_uri: self.source_uri,
            attachments: self.attachments,
        })
    }
}

impl ArticleCommandService {
    /// Stores a new published article and mirrors it into the search index
    /// when it is public.
    ///
    /// An index failure is reported as [`ApplicationError::SearchIndexSync`]
    /// but the stored row is kept; the reconciliation sweep repairs the index.
    pub async fn create_article(
        &self,
        actor: &Requester,
        command: CreateArticleCommand,
    ) -> ApplicationResult<CreatedArticleDto> {
        let title = ArticleTitle::new(command.title)?;
        let content = ArticleContent::new(command.content)?;
        let content_summary = ArticleSummary::new(command.content_summary)?;
        let category_id = CategoryId::new(command.category_id)?;
        let visibility = VisibilityRange::new(command.visibility_range)?;

        if self
            .articles
            .title_taken(&title, &actor.id, None)
            .await?
        {
            return Err(ApplicationError::conflict(format!(
                "article '{title}' already exists for this author"
            )));
        }

        let attachments = AttachmentBlob::encode(&command.attachments)?;
        let now = self.clock.now();

        let created = self
            .articles
            .insert(NewArticle {
                title,
                content,
                content_summary,
                author_id: actor.id.clone(),
                category_id,
                importance: command.importance,
                visibility,
                comments_disabled: command.comments_disabled,
                source_uri: normalize_uri(command.source_uri),
                status: ArticleStatus::Published,
                attachments,
                created_at: now,
                updated_at: now,
            })
            .await?;

        info!(article_id = %created.id, author_id = %created.author_id, "article created");

        if created.is_searchable() {
            if let Err(err) = self.sync_document(&created).await {
                warn!(article_id = %created.id, error = %err, "failed to index new article");
                return Err(ApplicationError::search_index_sync(format!(
                    "article {} was saved but could not be indexed: {err}",
                    created.id
                )));
            }
        }

        Ok(CreatedArticleDto {
            article_id: created.id.into(),
        })
    }
}

pub(super) fn normalize_uri(uri: Option<String>) -> Option<String> {
    uri.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
