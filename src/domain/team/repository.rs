// src/domain/team/repository.rs
use crate::domain::errors::DomainResult;
use crate::domain::pagination::Page;
use crate::domain::team::entity::{Member, NewMember, NewTeam, Team};
use crate::domain::team::value_objects::{MemberRole, TeamId};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Default)]
pub struct TeamFilter {
    /// Case-insensitive substring of the team name.
    pub name: Option<String>,
    /// Case-insensitive substring of the creator id.
    pub created_by: Option<String>,
}

#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Writes the team and its leader membership atomically.
    async fn insert_with_leader(&self, team: NewTeam) -> DomainResult<Team>;

    /// Soft-deleted teams are not returned.
    async fn find_by_id(&self, id: TeamId) -> DomainResult<Option<Team>>;

    async fn update(&self, team: &Team) -> DomainResult<Team>;

    /// Soft-deletes the team together with its memberships.
    async fn soft_delete(&self, id: TeamId, now: DateTime<Utc>) -> DomainResult<()>;

    async fn list(&self, filter: &TeamFilter, page: Page) -> DomainResult<(Vec<Team>, u64)>;

    async fn list_members(&self, id: TeamId) -> DomainResult<Vec<Member>>;

    async fn find_member(&self, id: TeamId, user_id: &UserId) -> DomainResult<Option<Member>>;

    async fn add_member(&self, member: NewMember) -> DomainResult<Member>;

    async fn update_member_role(
        &self,
        id: TeamId,
        user_id: &UserId,
        role: MemberRole,
    ) -> DomainResult<Member>;

    async fn remove_member(
        &self,
        id: TeamId,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<()>;
}
