// src/infrastructure/repositories/postgres_article.rs
use super::map_sqlx;
use crate::domain::article::{
    Article, ArticleContent, ArticleId, ArticleRepository, ArticleStatus, ArticleSummary,
    ArticleTitle, AttachmentBlob, AuthorArticleFilter, ChangeCursor, NewArticle, Visibility,
    VisibilityRange,
};
use crate::domain::category::CategoryId;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::pagination::Page;
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const ARTICLE_COLUMNS: &str = "id, title, content, content_summary, author_id, category_id, \
     importance, visibility_range, comments_disabled, source_uri, status, attachments, \
     created_at, updated_at, deleted_at";

/// Private rows stay visible to their author only. `$3` binds the private
/// tokens and `$4` the viewer id (NULL when anonymous); the split mirrors
/// `VisibilityRange::parse`.
const VISIBLE_TO_VIEWER: &str = "(NOT (regexp_split_to_array(lower(visibility_range), \
     '[,;|[:space:]]+') && $3::text[]) OR author_id = $4)";

fn private_tokens() -> Vec<String> {
    Visibility::PRIVATE_TOKENS.iter().map(|t| (*t).to_string()).collect()
}

#[derive(Clone)]
pub struct PostgresArticleRepository {
    pool: PgPool,
}

impl PostgresArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    content: String,
    content_summary: String,
    author_id: String,
    category_id: i64,
    importance: i32,
    visibility_range: String,
    comments_disabled: bool,
    source_uri: Option<String>,
    status: i16,
    attachments: Vec<u8>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<ArticleRow> for Article {
    type Error = DomainError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        Ok(Article {
            id: ArticleId::new(row.id)?,
            title: ArticleTitle::new(row.title)?,
            content: ArticleContent::new(row.content)?,
            content_summary: ArticleSummary::new(row.content_summary)?,
            author_id: UserId::new(row.author_id)?,
            category_id: CategoryId::new(row.category_id)?,
            importance: row.importance,
            visibility: VisibilityRange::parse(row.visibility_range),
            comments_disabled: row.comments_disabled,
            source_uri: row.source_uri,
            status: ArticleStatus::from_code(row.status)?,
            attachments: AttachmentBlob::from_bytes(row.attachments),
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}

fn into_articles(rows: Vec<ArticleRow>) -> DomainResult<Vec<Article>> {
    rows.into_iter().map(Article::try_from).collect()
}

fn to_u64(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}

impl PostgresArticleRepository {
    fn push_author_conditions<'a>(
        builder: &mut QueryBuilder<'a, Postgres>,
        filter: &'a AuthorArticleFilter,
    ) {
        builder.push(" WHERE author_id = ");
        builder.push_bind(filter.author_id.as_str());
        builder.push(" AND status <> ");
        builder.push_bind(ArticleStatus::Deleted.code());

        if let Some(title) = &filter.title {
            builder.push(" AND title ILIKE ");
            builder.push_bind(format!("%{}%", escape_like(title)));
        }
        if let Some(category_id) = filter.category_id {
            builder.push(" AND category_id = ");
            builder.push_bind(i64::from(category_id));
        }
        if let Some(from) = filter.created_from {
            builder.push(" AND created_at >= ");
            builder.push_bind(from);
        }
        if let Some(before) = filter.created_before {
            builder.push(" AND created_at < ");
            builder.push_bind(before);
        }
    }
}

fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[async_trait]
impl ArticleRepository for PostgresArticleRepository {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Article::try_from).transpose()
    }

    async fn title_taken(
        &self,
        title: &ArticleTitle,
        author_id: &UserId,
        excluding: Option<ArticleId>,
    ) -> DomainResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                 SELECT 1 FROM articles
                 WHERE title = $1 AND author_id = $2 AND status <> $3
                   AND ($4::BIGINT IS NULL OR id <> $4)
             )",
        )
        .bind(title.as_str())
        .bind(author_id.as_str())
        .bind(ArticleStatus::Deleted.code())
        .bind(excluding.map(i64::from))
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)
    }

    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let NewArticle {
            title,
            content,
            content_summary,
            author_id,
            category_id,
            importance,
            visibility,
            comments_disabled,
            source_uri,
            status,
            attachments,
            created_at,
            updated_at,
        } = article;

        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "INSERT INTO articles (title, content, content_summary, author_id, category_id,
                 importance, visibility_range, comments_disabled, source_uri, status,
                 attachments, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {ARTICLE_COLUMNS}"
        ))
        .bind(title.as_str())
        .bind(content.as_str())
        .bind(content_summary.as_str())
        .bind(author_id.as_str())
        .bind(i64::from(category_id))
        .bind(importance)
        .bind(visibility.as_str())
        .bind(comments_disabled)
        .bind(source_uri)
        .bind(status.code())
        .bind(attachments.into_bytes())
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Article::try_from(row)
    }

    async fn update(&self, article: &Article) -> DomainResult<Article> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "UPDATE articles SET
                 title = $2, content = $3, content_summary = $4, category_id = $5,
                 importance = $6, visibility_range = $7, comments_disabled = $8,
                 source_uri = $9, status = $10, updated_at = $11
             WHERE id = $1
             RETURNING {ARTICLE_COLUMNS}"
        ))
        .bind(i64::from(article.id))
        .bind(article.title.as_str())
        .bind(article.content.as_str())
        .bind(article.content_summary.as_str())
        .bind(i64::from(article.category_id))
        .bind(article.importance)
        .bind(article.visibility.as_str())
        .bind(article.comments_disabled)
        .bind(article.source_uri.as_deref())
        .bind(article.status.code())
        .bind(article.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound("article not found".into()))?;

        Article::try_from(row)
    }

    async fn update_status(
        &self,
        ids: &[ArticleId],
        status: ArticleStatus,
        now: DateTime<Utc>,
    ) -> DomainResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let raw_ids: Vec<i64> = ids.iter().copied().map(i64::from).collect();
        let deleted_at = (status == ArticleStatus::Deleted).then_some(now);

        let result = sqlx::query(
            "UPDATE articles
             SET status = $2, updated_at = $3, deleted_at = $4
             WHERE id = ANY($1) AND status <> $2",
        )
        .bind(&raw_ids)
        .bind(status.code())
        .bind(now)
        .bind(deleted_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(result.rows_affected())
    }

    async fn count_published_in_category(
        &self,
        category_id: CategoryId,
        viewer: Option<&UserId>,
    ) -> DomainResult<u64> {
        sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(1) FROM articles
             WHERE category_id = $1 AND status = $2 AND {VISIBLE_TO_VIEWER}"
        ))
        .bind(i64::from(category_id))
        .bind(ArticleStatus::Published.code())
        .bind(private_tokens())
        .bind(viewer.map(UserId::as_str))
        .fetch_one(&self.pool)
        .await
        .map(to_u64)
        .map_err(map_sqlx)
    }

    async fn list_published_in_category(
        &self,
        category_id: CategoryId,
        viewer: Option<&UserId>,
        page: Page,
    ) -> DomainResult<Vec<Article>> {
        let rows = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles
             WHERE category_id = $1 AND status = $2 AND {VISIBLE_TO_VIEWER}
             ORDER BY created_at DESC, id DESC
             OFFSET $5 LIMIT $6"
        ))
        .bind(i64::from(category_id))
        .bind(ArticleStatus::Published.code())
        .bind(private_tokens())
        .bind(viewer.map(UserId::as_str))
        .bind(page.offset())
        .bind(page.size())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        into_articles(rows)
    }

    async fn list_by_author(
        &self,
        filter: &AuthorArticleFilter,
        page: Page,
    ) -> DomainResult<(Vec<Article>, u64)> {
        let mut count_builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(1) FROM articles");
        Self::push_author_conditions(&mut count_builder, filter);
        let total = count_builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map(to_u64)
            .map_err(map_sqlx)?;

        if total == 0 {
            return Ok((Vec::new(), 0));
        }

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {ARTICLE_COLUMNS} FROM articles"));
        Self::push_author_conditions(&mut builder, filter);
        builder.push(" ORDER BY created_at DESC, id DESC OFFSET ");
        builder.push_bind(page.offset());
        builder.push(" LIMIT ");
        builder.push_bind(page.size());

        let rows = builder
            .build_query_as::<ArticleRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok((into_articles(rows)?, total))
    }

    async fn list_changed_after(
        &self,
        cursor: ChangeCursor,
        limit: i64,
    ) -> DomainResult<Vec<Article>> {
        let rows = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles
             WHERE (updated_at, id) > ($1, $2)
             ORDER BY updated_at, id
             LIMIT $3"
        ))
        .bind(cursor.updated_at)
        .bind(cursor.last_id)
        .bind(limit.clamp(1, 1_000))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        into_articles(rows)
    }
}
