// src/application/commands/teams/service.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::Requester,
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        team::{Member, Team, TeamId, TeamRepository, specifications::CanManageTeamSpec},
        user::UserRepository,
    },
};

pub struct TeamCommandService {
    pub(super) teams: Arc<dyn TeamRepository>,
    pub(super) users: Arc<dyn UserRepository>,
    pub(super) clock: Arc<dyn Clock>,
}

impl TeamCommandService {
    pub fn new(
        teams: Arc<dyn TeamRepository>,
        users: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            teams,
            users,
            clock,
        }
    }

    pub(super) async fn load_team(&self, team_id: TeamId) -> ApplicationResult<Team> {
        self.teams
            .find_by_id(team_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("team not found"))
    }

    pub(super) async fn membership(
        &self,
        team_id: TeamId,
        actor: &Requester,
    ) -> ApplicationResult<Option<Member>> {
        Ok(self.teams.find_member(team_id, &actor.id).await?)
    }

    /// Loads the team and checks that `actor` leads or administers it.
    pub(super) async fn ensure_can_manage(
        &self,
        team_id: TeamId,
        actor: &Requester,
    ) -> ApplicationResult<Team> {
        let team = self.load_team(team_id).await?;
        let membership = self.membership(team_id, actor).await?;
        if !CanManageTeamSpec::new(membership.as_ref()).is_satisfied() {
            return Err(ApplicationError::forbidden(
                "team leader or admin role required",
            ));
        }
        Ok(team)
    }
}
