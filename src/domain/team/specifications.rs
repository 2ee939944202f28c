// src/domain/team/specifications.rs
use crate::domain::team::entity::Member;
use crate::domain::team::value_objects::MemberRole;

/// Leader or admin membership is required to edit a team or its roster.
pub struct CanManageTeamSpec<'a> {
    membership: Option<&'a Member>,
}

impl<'a> CanManageTeamSpec<'a> {
    pub fn new(membership: Option<&'a Member>) -> Self {
        Self { membership }
    }

    pub fn is_satisfied(&self) -> bool {
        self.membership
            .is_some_and(|member| member.role.can_manage_team())
    }
}

/// Only the leader may change member roles.
pub struct CanAssignRolesSpec<'a> {
    membership: Option<&'a Member>,
}

impl<'a> CanAssignRolesSpec<'a> {
    pub fn new(membership: Option<&'a Member>) -> Self {
        Self { membership }
    }

    pub fn is_satisfied(&self) -> bool {
        self.membership
            .is_some_and(|member| member.role == MemberRole::Leader)
    }
}
