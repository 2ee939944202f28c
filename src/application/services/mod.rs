// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::{articles::ArticleCommandService, teams::TeamCommandService},
        dto::Requester,
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
        queries::{
            articles::ArticleQueryService, categories::CategoryQueryService,
            lookup::DisplayNameResolver, teams::TeamQueryService,
        },
    },
    domain::{
        article::{ArticleRepository, ArticleSearchIndex},
        category::CategoryRepository,
        team::TeamRepository,
        user::{UserId, UserRepository},
    },
};

pub struct ApplicationServices {
    pub article_commands: Arc<ArticleCommandService>,
    pub article_queries: Arc<ArticleQueryService>,
    pub category_queries: Arc<CategoryQueryService>,
    pub team_commands: Arc<TeamCommandService>,
    pub team_queries: Arc<TeamQueryService>,
    user_repo: Arc<dyn UserRepository>,
}

impl ApplicationServices {
    pub fn new(
        article_repo: Arc<dyn ArticleRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        user_repo: Arc<dyn UserRepository>,
        team_repo: Arc<dyn TeamRepository>,
        search_index: Arc<dyn ArticleSearchIndex>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let names = DisplayNameResolver::new(Arc::clone(&user_repo), Arc::clone(&category_repo));

        let article_commands = Arc::new(ArticleCommandService::new(
            Arc::clone(&article_repo),
            Arc::clone(&search_index),
            names.clone(),
            Arc::clone(&clock),
        ));
        let article_queries = Arc::new(ArticleQueryService::new(
            Arc::clone(&article_repo),
            Arc::clone(&search_index),
            names,
        ));
        let category_queries = Arc::new(CategoryQueryService::new(Arc::clone(&category_repo)));
        let team_commands = Arc::new(TeamCommandService::new(
            Arc::clone(&team_repo),
            Arc::clone(&user_repo),
            Arc::clone(&clock),
        ));
        let team_queries = Arc::new(TeamQueryService::new(Arc::clone(&team_repo)));

        Self {
            article_commands,
            article_queries,
            category_queries,
            team_commands,
            team_queries,
            user_repo,
        }
    }

    /// Resolve the identity asserted by the gateway into a requester.
    /// Unknown or malformed ids are rejected as unauthenticated.
    pub async fn resolve_requester(&self, raw_user_id: &str) -> ApplicationResult<Requester> {
        let user_id = UserId::new(raw_user_id)
            .map_err(|_| ApplicationError::unauthorized("invalid user id"))?;
        let user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| ApplicationError::unauthorized("unknown user"))?;
        Ok(user.into())
    }
}
