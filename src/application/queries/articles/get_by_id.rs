use super::ArticleQueryService;
use crate::{
    application::{
        dto::{ArticleDto, Requester},
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::{
        ArticleId,
        specifications::{ArticleSpecification, CanReadArticleSpec},
    },
};

pub struct GetArticleQuery {
    pub id: i64,
}

impl ArticleQueryService {
    /// Detail view of one article.
    ///
    /// Only published and pending-review articles are served, to anyone
    /// including the author. Private articles are further limited to their
    /// author.
    pub async fn get_article(
        &self,
        requester: Option<&Requester>,
        query: GetArticleQuery,
    ) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::new(query.id)?;
        let article = self
            .articles
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        if !article.status.is_readable() {
            return Err(ApplicationError::invalid_state(format!(
                "article is {}",
                article.status
            )));
        }

        let requester_id = requester.map(|r| &r.id);
        if !CanReadArticleSpec::new(&article, requester_id).is_satisfied() {
            return Err(ApplicationError::forbidden("article is private"));
        }

        let author = self.names.author_name(&article.author_id).await;
        let category = self.names.category_name(article.category_id).await;
        Ok(ArticleDto::assemble(article, author, category)?)
    }
}
