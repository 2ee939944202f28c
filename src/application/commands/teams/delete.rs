use super::TeamCommandService;
use crate::{
    application::{dto::Requester, error::ApplicationResult},
    domain::team::TeamId,
};
use tracing::info;

pub struct DeleteTeamCommand {
    pub id: i64,
}

impl TeamCommandService {
    /// Soft-deletes the team and every membership in it.
    pub async fn delete_team(
        &self,
        actor: &Requester,
        command: DeleteTeamCommand,
    ) -> ApplicationResult<()> {
        let team_id = TeamId::new(command.id)?;
        self.ensure_can_manage(team_id, actor).await?;
        self.teams.soft_delete(team_id, self.clock.now()).await?;
        info!(team_id = %team_id, actor = %actor.id, "team deleted");
        Ok(())
    }
}
