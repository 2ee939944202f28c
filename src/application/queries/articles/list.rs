use super::{ArticleQueryService, dates::parse_date_range};
use crate::{
    application::{
        dto::{ArticleDto, PagedResult, Requester},
        error::ApplicationResult,
    },
    domain::{
        article::{Article, AuthorArticleFilter},
        category::CategoryId,
        pagination::Page,
    },
};
use tracing::debug;

pub struct ListCategoryArticlesQuery {
    pub category_id: i64,
    pub page_index: i64,
    pub page_size: i64,
}

pub struct ListAuthorArticlesQuery {
    pub title: Option<String>,
    pub category_id: Option<i64>,
    /// `YYYY-MM-DD`, inclusive.
    pub created_from: Option<String>,
    /// `YYYY-MM-DD`, inclusive.
    pub created_to: Option<String>,
    pub page_index: i64,
    pub page_size: i64,
}

impl ArticleQueryService {
    /// Published articles in one category, newest first. Private articles
    /// are listed for their author only.
    pub async fn list_category_articles(
        &self,
        requester: Option<&Requester>,
        query: ListCategoryArticlesQuery,
    ) -> ApplicationResult<PagedResult<ArticleDto>> {
        let category_id = CategoryId::new(query.category_id)?;
        let page = Page::normalize(query.page_index, query.page_size);
        let viewer = requester.map(|r| &r.id);

        let total = self
            .articles
            .count_published_in_category(category_id, viewer)
            .await?;
        if total == 0 {
            debug!(category_id = %category_id, "no published articles in category");
            return Ok(PagedResult::empty(page));
        }

        let articles = self
            .articles
            .list_published_in_category(category_id, viewer, page)
            .await?;
        let items = self.assemble_all(articles).await?;
        Ok(PagedResult::new(items, total, page))
    }

    /// The requester's own non-deleted articles, newest first.
    pub async fn list_author_articles(
        &self,
        actor: &Requester,
        query: ListAuthorArticlesQuery,
    ) -> ApplicationResult<PagedResult<ArticleDto>> {
        let page = Page::normalize(query.page_index, query.page_size);
        let (created_from, created_before) =
            parse_date_range(query.created_from.as_deref(), query.created_to.as_deref())?;

        let filter = AuthorArticleFilter {
            author_id: actor.id.clone(),
            title: query
                .title
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            category_id: query.category_id.map(CategoryId::new).transpose()?,
            created_from,
            created_before,
        };

        let (articles, total) = self.articles.list_by_author(&filter, page).await?;
        let items = self.assemble_all(articles).await?;
        Ok(PagedResult::new(items, total, page))
    }

    async fn assemble_all(&self, articles: Vec<Article>) -> ApplicationResult<Vec<ArticleDto>> {
        let mut names = self.names.cached();
        let mut items = Vec::with_capacity(articles.len());
        for article in articles {
            let author = names.author_name(&article.author_id).await;
            let category = names.category_name(article.category_id).await;
            items.push(ArticleDto::assemble(article, author, category)?);
        }
        Ok(items)
    }
}
