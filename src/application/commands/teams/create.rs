use super::TeamCommandService;
use crate::{
    application::{
        dto::{Requester, TeamDto},
        error::ApplicationResult,
    },
    domain::team::{NewTeam, TeamName},
};
use tracing::info;

pub struct CreateTeamCommand {
    pub name: String,
    pub description: String,
}

impl TeamCommandService {
    /// Creates a team led by `actor`.
    pub async fn create_team(
        &self,
        actor: &Requester,
        command: CreateTeamCommand,
    ) -> ApplicationResult<TeamDto> {
        let name = TeamName::new(command.name)?;
        let team = self
            .teams
            .insert_with_leader(NewTeam {
                name,
                description: command.description.trim().to_string(),
                created_by: actor.id.clone(),
                created_at: self.clock.now(),
            })
            .await?;
        info!(team_id = %team.id, leader = %actor.id, "team created");
        Ok(team.into())
    }
}
