// src/presentation/http/controllers/articles.rs
use crate::application::{
    commands::articles::{
        BatchDeleteArticlesCommand, CreateArticleCommand, DeleteArticleCommand,
        UpdateArticleCommand,
    },
    error::ApplicationError,
    dto::{
        ArticleDto, ArticleSearchHitDto, AttachmentDto, CreatedArticleDto, DeletedCountDto,
        PagedResult,
    },
    queries::articles::{
        GetArticleQuery, ListAuthorArticlesQuery, ListCategoryArticlesQuery, SearchArticlesQuery,
        SearchMode,
    },
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, MaybeAuthenticated};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use super::{default_page_index, default_page_size, split_list};

fn default_visibility() -> String {
    "public".into()
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateArticleRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub content_summary: String,
    pub category_id: i64,
    #[serde(default)]
    pub importance: i32,
    /// Comma-separated scopes: `public`, `private`, `team`.
    #[serde(default = "default_visibility")]
    pub visibility_range: String,
    #[serde(default)]
    pub comments_disabled: bool,
    #[serde(default)]
    pub source_uri: Option<String>,
    #[serde(default)]
    pub attachments: Vec<AttachmentDto>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateArticleRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub content_summary: String,
    pub category_id: i64,
    #[serde(default)]
    pub importance: i32,
    #[serde(default = "default_visibility")]
    pub visibility_range: String,
    #[serde(default)]
    pub comments_disabled: bool,
    #[serde(default)]
    pub source_uri: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BatchDeleteRequest {
    pub ids: Vec<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    #[serde(default = "default_page_index")]
    pub page_index: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AuthorArticleParams {
    pub title: Option<String>,
    pub category_id: Option<i64>,
    /// `YYYY-MM-DD`, inclusive.
    pub created_from: Option<String>,
    /// `YYYY-MM-DD`, inclusive.
    pub created_to: Option<String>,
    #[serde(default = "default_page_index")]
    pub page_index: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ArticleSearchParams {
    /// `normal` (or `0`) and `advanced` (or `1`).
    pub mode: Option<String>,
    /// Comma-separated keywords.
    pub keywords: Option<String>,
    #[serde(default)]
    pub phrase: bool,
    pub title: Option<String>,
    pub content: Option<String>,
    /// Comma-separated category ids.
    pub category_ids: Option<String>,
    pub created_from: Option<String>,
    pub created_to: Option<String>,
    pub importance: Option<i32>,
    #[serde(default = "default_page_index")]
    pub page_index: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn parse_mode(raw: Option<&str>) -> Result<SearchMode, ApplicationError> {
    match raw.map(str::trim).unwrap_or_default().to_lowercase().as_str() {
        "" | "0" | "normal" => Ok(SearchMode::Normal),
        "1" | "advanced" => Ok(SearchMode::Advanced),
        other => Err(ApplicationError::validation(
            format!("unknown search mode '{other}'"),
        )),
    }
}

impl TryFrom<ArticleSearchParams> for SearchArticlesQuery {
    type Error = ApplicationError;

    fn try_from(params: ArticleSearchParams) -> Result<Self, Self::Error> {
        let category_ids = split_list(params.category_ids.as_deref())
            .into_iter()
            .map(|raw| {
                raw.parse::<i64>().map_err(|_| {
                    ApplicationError::validation(format!(
                        "invalid category id '{raw}'"
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            mode: parse_mode(params.mode.as_deref())?,
            keywords: split_list(params.keywords.as_deref()),
            phrase: params.phrase,
            title: params.title,
            content: params.content,
            category_ids,
            created_from: params.created_from,
            created_to: params.created_to,
            importance: params.importance,
            page_index: params.page_index,
            page_size: params.page_size,
        })
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/articles/{id}",
    params(("id" = i64, Path, description = "Article identifier")),
    responses(
        (status = 200, description = "Article detail.", body = ArticleDto),
        (status = 403, description = "Private article of another author.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Article not found.", body = crate::presentation::http::error::ErrorResponse),
        (status = 422, description = "Article is not readable in its current status.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn get_article(
    Extension(state): Extension<HttpState>,
    MaybeAuthenticated(requester): MaybeAuthenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_queries
        .get_article(requester.as_ref(), GetArticleQuery { id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/articles",
    request_body = CreateArticleRequest,
    responses(
        (status = 201, description = "Article created.", body = CreatedArticleDto),
        (status = 400, description = "Invalid input.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Duplicate title for this author.", body = crate::presentation::http::error::ErrorResponse),
        (status = 502, description = "Stored, but the search index could not be updated.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("userId" = [])),
    tag = "Articles"
)]
pub async fn create_article(
    Extension(state): Extension<HttpState>,
    Authenticated(requester): Authenticated,
    Json(payload): Json<CreateArticleRequest>,
) -> HttpResult<(StatusCode, Json<CreatedArticleDto>)> {
    let command = CreateArticleCommand {
        title: payload.title,
        content: payload.content,
        content_summary: payload.content_summary,
        category_id: payload.category_id,
        importance: payload.importance,
        visibility_range: payload.visibility_range,
        comments_disabled: payload.comments_disabled,
        source_uri: payload.source_uri,
        attachments: payload.attachments.into_iter().map(Into::into).collect(),
    };

    let created = state
        .services
        .article_commands
        .create_article(&requester, command)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/api/v1/articles/{id}",
    params(("id" = i64, Path, description = "Article identifier")),
    request_body = UpdateArticleRequest,
    responses(
        (status = 200, description = "Article updated.", body = ArticleDto),
        (status = 400, description = "Invalid input.", body = crate::presentation::http::error::ErrorResponse),
        (status = 403, description = "Not the author or an admin.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Article not found.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Duplicate title for this author.", body = crate::presentation::http::error::ErrorResponse),
        (status = 422, description = "Article is deleted.", body = crate::presentation::http::error::ErrorResponse),
        (status = 502, description = "Stored, but the search index could not be updated.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("userId" = [])),
    tag = "Articles"
)]
pub async fn update_article(
    Extension(state): Extension<HttpState>,
    Authenticated(requester): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateArticleRequest>,
) -> HttpResult<Json<ArticleDto>> {
    let command = UpdateArticleCommand {
        id,
        title: payload.title,
        content: payload.content,
        content_summary: payload.content_summary,
        category_id: payload.category_id,
        importance: payload.importance,
        visibility_range: payload.visibility_range,
        comments_disabled: payload.comments_disabled,
        source_uri: payload.source_uri,
    };

    state
        .services
        .article_commands
        .update_article(&requester, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/articles/{id}",
    params(("id" = i64, Path, description = "Article identifier")),
    responses(
        (status = 200, description = "Number of articles deleted (0 when already deleted).", body = DeletedCountDto),
        (status = 403, description = "Not the author or an admin.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Article not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("userId" = [])),
    tag = "Articles"
)]
pub async fn delete_article(
    Extension(state): Extension<HttpState>,
    Authenticated(requester): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<DeletedCountDto>> {
    state
        .services
        .article_commands
        .delete_article(&requester, DeleteArticleCommand { id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/articles/batch-delete",
    request_body = BatchDeleteRequest,
    responses(
        (status = 200, description = "Number of articles deleted.", body = DeletedCountDto),
        (status = 403, description = "Admin role required.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("userId" = [])),
    tag = "Articles"
)]
pub async fn batch_delete_articles(
    Extension(state): Extension<HttpState>,
    Authenticated(requester): Authenticated,
    Json(payload): Json<BatchDeleteRequest>,
) -> HttpResult<Json<DeletedCountDto>> {
    state
        .services
        .article_commands
        .batch_delete_articles(&requester, BatchDeleteArticlesCommand { ids: payload.ids })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/articles/mine",
    params(AuthorArticleParams),
    responses(
        (status = 200, description = "Articles written by the caller.", body = PagedResult<ArticleDto>),
        (status = 400, description = "Invalid filter.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("userId" = [])),
    tag = "Articles"
)]
pub async fn list_my_articles(
    Extension(state): Extension<HttpState>,
    Authenticated(requester): Authenticated,
    Query(params): Query<AuthorArticleParams>,
) -> HttpResult<Json<PagedResult<ArticleDto>>> {
    let query = ListAuthorArticlesQuery {
        title: params.title,
        category_id: params.category_id,
        created_from: params.created_from,
        created_to: params.created_to,
        page_index: params.page_index,
        page_size: params.page_size,
    };

    state
        .services
        .article_queries
        .list_author_articles(&requester, query)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}/articles",
    params(("id" = i64, Path, description = "Category identifier"), PageParams),
    responses(
        (status = 200, description = "Published articles in the category, newest first. Private articles are listed for their author only.", body = PagedResult<ArticleDto>),
        (status = 400, description = "Invalid category id.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "X-User-Id header present but invalid or unknown.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn list_category_articles(
    Extension(state): Extension<HttpState>,
    MaybeAuthenticated(requester): MaybeAuthenticated,
    Path(category_id): Path<i64>,
    Query(params): Query<PageParams>,
) -> HttpResult<Json<PagedResult<ArticleDto>>> {
    let query = ListCategoryArticlesQuery {
        category_id,
        page_index: params.page_index,
        page_size: params.page_size,
    };

    state
        .services
        .article_queries
        .list_category_articles(requester.as_ref(), query)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/articles/search",
    params(ArticleSearchParams),
    responses(
        (status = 200, description = "Ranked search hits with highlights.", body = PagedResult<ArticleSearchHitDto>),
        (status = 400, description = "Invalid search parameters.", body = crate::presentation::http::error::ErrorResponse),
        (status = 502, description = "Search backend unavailable.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn search_articles(
    Extension(state): Extension<HttpState>,
    Query(params): Query<ArticleSearchParams>,
) -> HttpResult<Json<PagedResult<ArticleSearchHitDto>>> {
    let query = SearchArticlesQuery::try_from(params).into_http()?;

    state
        .services
        .article_queries
        .search_articles(query)
        .await
        .into_http()
        .map(Json)
}
