// src/domain/article/repository.rs
use crate::domain::article::entity::{Article, NewArticle};
use crate::domain::article::value_objects::{ArticleId, ArticleStatus, ArticleTitle};
use crate::domain::category::CategoryId;
use crate::domain::errors::DomainResult;
use crate::domain::pagination::Page;
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Narrowing applied to an author's own article list.
#[derive(Debug, Clone)]
pub struct AuthorArticleFilter {
    pub author_id: UserId,
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
    pub category_id: Option<CategoryId>,
    /// Inclusive lower bound on `created_at`.
    pub created_from: Option<DateTime<Utc>>,
    /// Exclusive upper bound on `created_at`.
    pub created_before: Option<DateTime<Utc>>,
}

impl AuthorArticleFilter {
    pub fn for_author(author_id: UserId) -> Self {
        Self {
            author_id,
            title: None,
            category_id: None,
            created_from: None,
            created_before: None,
        }
    }
}

/// Keyset position for walking rows in `(updated_at, id)` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeCursor {
    pub updated_at: DateTime<Utc>,
    pub last_id: i64,
}

impl ChangeCursor {
    pub fn starting_at(updated_at: DateTime<Utc>) -> Self {
        Self {
            updated_at,
            last_id: 0,
        }
    }

    pub fn after(article: &Article) -> Self {
        Self {
            updated_at: article.updated_at,
            last_id: article.id.into(),
        }
    }
}

#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Loads a row regardless of status, deleted rows included.
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>>;

    /// Whether a non-deleted article by `author_id` already uses `title`.
    /// `excluding` skips one id so an article can keep its own title on update.
    async fn title_taken(
        &self,
        title: &ArticleTitle,
        author_id: &UserId,
        excluding: Option<ArticleId>,
    ) -> DomainResult<bool>;

    async fn insert(&self, article: NewArticle) -> DomainResult<Article>;

    /// Persists every mutable field of `article`. Last writer wins.
    async fn update(&self, article: &Article) -> DomainResult<Article>;

    /// Moves the given rows to `status`, skipping rows already in it.
    /// Marking rows deleted also stamps `deleted_at`. Returns the affected count.
    async fn update_status(
        &self,
        ids: &[ArticleId],
        status: ArticleStatus,
        now: DateTime<Utc>,
    ) -> DomainResult<u64>;

    /// Published articles in the category that `viewer` may read: private
    /// ones only count for their author.
    async fn count_published_in_category(
        &self,
        category_id: CategoryId,
        viewer: Option<&UserId>,
    ) -> DomainResult<u64>;

    /// Same rows as `count_published_in_category`, newest first.
    async fn list_published_in_category(
        &self,
        category_id: CategoryId,
        viewer: Option<&UserId>,
        page: Page,
    ) -> DomainResult<Vec<Article>>;

    /// Non-deleted articles matching `filter`, newest first, with the total match count.
    async fn list_by_author(
        &self,
        filter: &AuthorArticleFilter,
        page: Page,
    ) -> DomainResult<(Vec<Article>, u64)>;

    /// Rows of any status ordered by `(updated_at, id)` strictly after `cursor`.
    async fn list_changed_after(
        &self,
        cursor: ChangeCursor,
        limit: i64,
    ) -> DomainResult<Vec<Article>>;
}
