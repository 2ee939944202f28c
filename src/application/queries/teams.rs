// src/application/queries/teams.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::{MemberDto, PagedResult, TeamDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        pagination::Page,
        team::{TeamFilter, TeamId, TeamRepository},
    },
};

pub struct ListTeamsQuery {
    pub name: Option<String>,
    pub created_by: Option<String>,
    pub page_index: i64,
    pub page_size: i64,
}

pub struct TeamQueryService {
    teams: Arc<dyn TeamRepository>,
}

impl TeamQueryService {
    pub fn new(teams: Arc<dyn TeamRepository>) -> Self {
        Self { teams }
    }

    pub async fn list_teams(&self, query: ListTeamsQuery) -> ApplicationResult<PagedResult<TeamDto>> {
        let page = Page::normalize(query.page_index, query.page_size);
        let filter = TeamFilter {
            name: query.name.filter(|v| !v.trim().is_empty()),
            created_by: query.created_by.filter(|v| !v.trim().is_empty()),
        };
        let (teams, total) = self.teams.list(&filter, page).await?;
        let items = teams.into_iter().map(TeamDto::from).collect();
        Ok(PagedResult::new(items, total, page))
    }

    pub async fn list_members(&self, team_id: i64) -> ApplicationResult<Vec<MemberDto>> {
        let team_id = TeamId::new(team_id)?;
        self.teams
            .find_by_id(team_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("team not found"))?;
        let members = self.teams.list_members(team_id).await?;
        Ok(members.into_iter().map(MemberDto::from).collect())
    }
}
