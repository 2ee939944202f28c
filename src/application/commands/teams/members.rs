use super::TeamCommandService;
use crate::{
    application::{
        dto::{MemberDto, Requester},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        team::{MemberRole, NewMember, TeamId, specifications::CanAssignRolesSpec},
        user::UserId,
    },
};
use tracing::info;

pub struct AddMemberCommand {
    pub team_id: i64,
    pub user_id: String,
    pub role: MemberRole,
}

pub struct ChangeMemberRoleCommand {
    pub team_id: i64,
    pub user_id: String,
    pub role: MemberRole,
}

pub struct RemoveMemberCommand {
    pub team_id: i64,
    pub user_id: String,
}

fn ensure_assignable(role: MemberRole) -> ApplicationResult<()> {
    if role == MemberRole::Leader {
        return Err(ApplicationError::validation(
            "the leader role cannot be assigned",
        ));
    }
    Ok(())
}

impl TeamCommandService {
    pub async fn add_member(
        &self,
        actor: &Requester,
        command: AddMemberCommand,
    ) -> ApplicationResult<MemberDto> {
        let team_id = TeamId::new(command.team_id)?;
        let user_id = UserId::new(command.user_id)?;
        ensure_assignable(command.role)?;
        self.ensure_can_manage(team_id, actor).await?;

        if self.users.find_by_id(&user_id).await?.is_none() {
            return Err(ApplicationError::not_found("user not found"));
        }
        if self.teams.find_member(team_id, &user_id).await?.is_some() {
            return Err(ApplicationError::conflict("user is already a member"));
        }

        let member = self
            .teams
            .add_member(NewMember {
                team_id,
                user_id,
                role: command.role,
                joined_at: self.clock.now(),
            })
            .await?;
        info!(team_id = %team_id, user_id = %member.user_id, role = %member.role, "member added");
        Ok(member.into())
    }

    pub async fn change_member_role(
        &self,
        actor: &Requester,
        command: ChangeMemberRoleCommand,
    ) -> ApplicationResult<MemberDto> {
        let team_id = TeamId::new(command.team_id)?;
        let user_id = UserId::new(command.user_id)?;
        ensure_assignable(command.role)?;

        self.load_team(team_id).await?;
        let membership = self.membership(team_id, actor).await?;
        if !CanAssignRolesSpec::new(membership.as_ref()).is_satisfied() {
            return Err(ApplicationError::forbidden("team leader role required"));
        }

        let target = self
            .teams
            .find_member(team_id, &user_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("member not found"))?;
        if target.role == MemberRole::Leader {
            return Err(ApplicationError::validation(
                "the leader's role cannot be changed",
            ));
        }

        let member = self
            .teams
            .update_member_role(team_id, &user_id, command.role)
            .await?;
        Ok(member.into())
    }

    pub async fn remove_member(
        &self,
        actor: &Requester,
        command: RemoveMemberCommand,
    ) -> ApplicationResult<()> {
        let team_id = TeamId::new(command.team_id)?;
        let user_id = UserId::new(command.user_id)?;
        self.ensure_can_manage(team_id, actor).await?;

        let target = self
            .teams
            .find_member(team_id, &user_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("member not found"))?;
        if target.role == MemberRole::Leader {
            return Err(ApplicationError::validation("the leader cannot be removed"));
        }

        self.teams
            .remove_member(team_id, &user_id, self.clock.now())
            .await?;
        info!(team_id = %team_id, user_id = %user_id, "member removed");
        Ok(())
    }
}
