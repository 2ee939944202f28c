// src/domain/article/search.rs
//! Search index projection of an article and the query model used against it.

use crate::domain::article::entity::Article;
use crate::domain::article::value_objects::{ArticleId, ArticleStatus};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const HIGHLIGHT_PRE_TAG: &str = "<em>";
pub const HIGHLIGHT_POST_TAG: &str = "</em>";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchDocument {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub content_summary: String,
    pub author_id: String,
    pub category_id: i64,
    pub status: ArticleStatus,
    pub visibility_range: String,
    pub importance: i32,
    pub has_attachments: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Article> for SearchDocument {
    fn from(article: &Article) -> Self {
        Self {
            id: article.id.into(),
            title: article.title.as_str().to_string(),
            content: article.content.as_str().to_string(),
            content_summary: article.content_summary.as_str().to_string(),
            author_id: article.author_id.as_str().to_string(),
            category_id: article.category_id.into(),
            status: article.status,
            visibility_range: article.visibility.as_str().to_string(),
            importance: article.importance,
            has_attachments: !article.attachments.is_empty(),
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Title,
    Content,
    ContentSummary,
    CategoryId,
    Status,
    Importance,
    CreatedAt,
}

impl SearchField {
    pub const TEXT_FIELDS: [SearchField; 3] = [
        SearchField::Title,
        SearchField::Content,
        SearchField::ContentSummary,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Content => "content",
            SearchField::ContentSummary => "content_summary",
            SearchField::CategoryId => "category_id",
            SearchField::Status => "status",
            SearchField::Importance => "importance",
            SearchField::CreatedAt => "created_at",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchValue {
    Integer(i64),
    Keyword(String),
    Timestamp(DateTime<Utc>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Match {
        field: SearchField,
        text: String,
    },
    MatchPhrase {
        field: SearchField,
        text: String,
    },
    MultiMatch {
        fields: Vec<SearchField>,
        text: String,
        phrase: bool,
    },
    Term {
        field: SearchField,
        value: SearchValue,
    },
    Terms {
        field: SearchField,
        values: Vec<SearchValue>,
    },
    /// `gte` is inclusive, `lt` exclusive.
    Range {
        field: SearchField,
        gte: Option<SearchValue>,
        lt: Option<SearchValue>,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoolQuery {
    pub must: Vec<Clause>,
    pub should: Vec<Clause>,
    pub filter: Vec<Clause>,
    pub minimum_should_match: Option<u32>,
}

impl BoolQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn must(mut self, clause: Clause) -> Self {
        self.must.push(clause);
        self
    }

    pub fn should(mut self, clause: Clause) -> Self {
        self.should.push(clause);
        self
    }

    pub fn filter(mut self, clause: Clause) -> Self {
        self.filter.push(clause);
        self
    }

    pub fn minimum_should_match(mut self, count: u32) -> Self {
        self.minimum_should_match = Some(count);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.must.is_empty() && self.should.is_empty() && self.filter.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HighlightSpec {
    pub fields: Vec<SearchField>,
    pub pre_tag: String,
    pub post_tag: String,
}

impl HighlightSpec {
    pub fn emphasis(fields: impl IntoIterator<Item = SearchField>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
            pre_tag: HIGHLIGHT_PRE_TAG.to_string(),
            post_tag: HIGHLIGHT_POST_TAG.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: BoolQuery,
    pub highlight: Option<HighlightSpec>,
    pub from: i64,
    pub size: i64,
}

#[derive(Debug, Clone)]
pub struct SearchHit {
    pub document: SearchDocument,
    pub score: Option<f64>,
    /// Highlighted fragments keyed by field name.
    pub highlights: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    pub hits: Vec<SearchHit>,
    pub total: u64,
}

#[async_trait]
pub trait ArticleSearchIndex: Send + Sync {
    /// Creates or replaces the document with the same id.
    async fn upsert(&self, document: &SearchDocument) -> DomainResult<()>;

    /// Removing a document that is not indexed succeeds.
    async fn delete(&self, id: ArticleId) -> DomainResult<()>;

    async fn delete_many(&self, ids: &[ArticleId]) -> DomainResult<()>;

    async fn search(&self, request: &SearchRequest) -> DomainResult<SearchResults>;
}
