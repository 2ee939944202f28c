use super::TeamCommandService;
use crate::{
    application::{
        dto::{Requester, TeamDto},
        error::ApplicationResult,
    },
    domain::team::{TeamId, TeamName},
};

pub struct UpdateTeamCommand {
    pub id: i64,
    pub name: String,
    pub description: String,
}

impl TeamCommandService {
    pub async fn update_team(
        &self,
        actor: &Requester,
        command: UpdateTeamCommand,
    ) -> ApplicationResult<TeamDto> {
        let team_id = TeamId::new(command.id)?;
        let name = TeamName::new(command.name)?;
        let mut team = self.ensure_can_manage(team_id, actor).await?;

        team.rename(name, command.description.trim().to_string(), self.clock.now());
        let updated = self.teams.update(&team).await?;
        Ok(updated.into())
    }
}
