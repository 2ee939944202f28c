// src/domain/article/entity.rs
use crate::domain::article::attachments::AttachmentBlob;
use crate::domain::article::value_objects::{
    ArticleContent, ArticleId, ArticleStatus, ArticleSummary, ArticleTitle, VisibilityRange,
};
use crate::domain::category::CategoryId;
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Article {
    pub id: ArticleId,
    pub title: ArticleTitle,
    pub content: ArticleContent,
    pub content_summary: ArticleSummary,
    pub author_id: UserId,
    pub category_id: CategoryId,
    pub importance: i32,
    pub visibility: VisibilityRange,
    pub comments_disabled: bool,
    pub source_uri: Option<String>,
    pub status: ArticleStatus,
    pub attachments: AttachmentBlob,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Article {
    pub fn is_deleted(&self) -> bool {
        self.status == ArticleStatus::Deleted
    }

    /// Whether the article belongs in the search index.
    ///
    /// A range that names both `public` and `private` stays out: the private
    /// gate on reads would otherwise leak through search hits.
    pub fn is_searchable(&self) -> bool {
        self.status == ArticleStatus::Published
            && self.visibility.is_public()
            && !self.visibility.is_private()
    }

    pub fn is_authored_by(&self, user_id: &UserId) -> bool {
        &self.author_id == user_id
    }

    /// Overwrite every mutable field and force the article back to published.
    pub fn apply(&mut self, changes: ArticleChanges, now: DateTime<Utc>) {
        let ArticleChanges {
            title,
            content,
            content_summary,
            category_id,
            importance,
            visibility,
            comments_disabled,
            source_uri,
        } = changes;

        self.title = title;
        self.content = content;
        self.content_summary = content_summary;
        self.category_id = category_id;
        self.importance = importance;
        self.visibility = visibility;
        self.comments_disabled = comments_disabled;
        self.source_uri = source_uri;
        self.status = ArticleStatus::Published;
        self.updated_at = now;
    }
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: ArticleTitle,
    pub content: ArticleContent,
    pub content_summary: ArticleSummary,
    pub author_id: UserId,
    pub category_id: CategoryId,
    pub importance: i32,
    pub visibility: VisibilityRange,
    pub comments_disabled: bool,
    pub source_uri: Option<String>,
    pub status: ArticleStatus,
    pub attachments: AttachmentBlob,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mutable fields replaced by an update.
#[derive(Debug, Clone)]
pub struct ArticleChanges {
    pub title: ArticleTitle,
    pub content: ArticleContent,
    pub content_summary: ArticleSummary,
    pub category_id: CategoryId,
    pub importance: i32,
    pub visibility: VisibilityRange,
    pub comments_disabled: bool,
    pub source_uri: Option<String>,
}
