use crate::domain::article::{
    Article, Attachment, AttachmentCodecError, SearchDocument, SearchHit,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AttachmentDto {
    pub file_name: String,
    pub file_url: String,
}

impl From<Attachment> for AttachmentDto {
    fn from(value: Attachment) -> Self {
        Self {
            file_name: value.file_name,
            file_url: value.file_url,
        }
    }
}

impl From<AttachmentDto> for Attachment {
    fn from(value: AttachmentDto) -> Self {
        Self {
            file_name: value.file_name,
            file_url: value.file_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticleDto {
    pub article_id: i64,
    pub title: String,
    pub content: String,
    pub content_summary: String,
    /// Author nickname; empty when the author cannot be resolved.
    pub author: String,
    pub author_id: String,
    /// Category name; empty when the category cannot be resolved.
    pub category: String,
    pub category_id: i64,
    pub importance: i32,
    pub visibility_range: String,
    pub comments_disabled: bool,
    #[serde(default)]
    pub source_uri: Option<String>,
    pub attachments: Vec<AttachmentDto>,
    pub status: String,
    #[serde(with = "serde_time")]
    #[schema(value_type = String, example = "2024-01-01 00:00:00")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    #[schema(value_type = String, example = "2024-01-01 00:00:00")]
    pub updated_at: DateTime<Utc>,
}

impl ArticleDto {
    /// Display names are optional; a corrupt attachment blob is not.
    pub fn assemble(
        article: Article,
        author: Option<String>,
        category: Option<String>,
    ) -> Result<Self, AttachmentCodecError> {
        let attachments = article
            .attachments
            .decode()?
            .into_iter()
            .map(AttachmentDto::from)
            .collect();

        Ok(Self {
            article_id: article.id.into(),
            title: article.title.into(),
            content: article.content.into(),
            content_summary: article.content_summary.into(),
            author: author.unwrap_or_default(),
            author_id: article.author_id.into(),
            category: category.unwrap_or_default(),
            category_id: article.category_id.into(),
            importance: article.importance,
            visibility_range: article.visibility.into(),
            comments_disabled: article.comments_disabled,
            source_uri: article.source_uri,
            attachments,
            status: article.status.as_str().to_string(),
            created_at: article.created_at,
            updated_at: article.updated_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticleSearchHitDto {
    pub article_id: i64,
    pub title: String,
    pub content: String,
    pub content_summary: String,
    pub author: String,
    pub author_id: String,
    pub category: String,
    pub category_id: i64,
    pub importance: i32,
    pub visibility_range: String,
    pub has_attachments: bool,
    pub status: String,
    #[serde(with = "serde_time")]
    #[schema(value_type = String, example = "2024-01-01 00:00:00")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    #[schema(value_type = String, example = "2024-01-01 00:00:00")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub score: Option<f64>,
    /// Highlighted fragments keyed by field name.
    #[serde(default)]
    pub highlights: BTreeMap<String, Vec<String>>,
}

impl ArticleSearchHitDto {
    pub fn assemble(hit: SearchHit, author: Option<String>, category: Option<String>) -> Self {
        let SearchHit {
            document,
            score,
            highlights,
        } = hit;
        let SearchDocument {
            id,
            title,
            content,
            content_summary,
            author_id,
            category_id,
            status,
            visibility_range,
            importance,
            has_attachments,
            created_at,
            updated_at,
        } = document;

        Self {
            article_id: id,
            title,
            content,
            content_summary,
            author: author.unwrap_or_default(),
            author_id,
            category: category.unwrap_or_default(),
            category_id,
            importance,
            visibility_range,
            has_attachments,
            status: status.as_str().to_string(),
            created_at,
            updated_at,
            score,
            highlights,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreatedArticleDto {
    pub article_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeletedCountDto {
    pub deleted_count: u64,
}

/// Outcome of one search index reconciliation sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReconcileReportDto {
    pub scanned: u64,
    pub upserted: u64,
    pub removed: u64,
    pub failed: u64,
    /// `updated_at` of the oldest row whose index write failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oldest_failure: Option<DateTime<Utc>>,
}
