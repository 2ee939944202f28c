// tests/support/mocks/teams.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shiori_core::domain::errors::{DomainError, DomainResult};
use shiori_core::domain::pagination::Page;
use shiori_core::domain::team::{
    Member, MemberRole, NewMember, NewTeam, Team, TeamFilter, TeamId, TeamRepository,
};
use shiori_core::domain::user::UserId;
use std::sync::Mutex;

#[derive(Default)]
struct State {
    teams: Vec<(Team, Option<DateTime<Utc>>)>,
    members: Vec<(Member, Option<DateTime<Utc>>)>,
    next_team_id: i64,
    next_member_id: i64,
}

/// チームと所属のインメモリ実装（論理削除を再現）
#[derive(Default)]
pub struct InMemoryTeamRepo {
    state: Mutex<State>,
}

impl InMemoryTeamRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// 論理削除済みも含めた所属数
    pub fn membership_rows(&self, id: i64) -> usize {
        self.state
            .lock()
            .unwrap()
            .members
            .iter()
            .filter(|(m, _)| i64::from(m.team_id) == id)
            .count()
    }

    pub fn live_members(&self, id: i64) -> usize {
        self.state
            .lock()
            .unwrap()
            .members
            .iter()
            .filter(|(m, deleted)| i64::from(m.team_id) == id && deleted.is_none())
            .count()
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.trim().to_lowercase())
}

impl State {
    fn live_member_mut(&mut self, id: TeamId, user_id: &UserId) -> Option<&mut Member> {
        self.members
            .iter_mut()
            .find(|(m, deleted)| deleted.is_none() && m.team_id == id && &m.user_id == user_id)
            .map(|(m, _)| m)
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepo {
    async fn insert_with_leader(&self, team: NewTeam) -> DomainResult<Team> {
        let mut state = self.state.lock().unwrap();
        state.next_team_id += 1;
        state.next_member_id += 1;
        let team_id = TeamId::new(state.next_team_id)?;

        let stored = Team {
            id: team_id,
            name: team.name,
            description: team.description,
            created_by: team.created_by.clone(),
            created_at: team.created_at,
            updated_at: team.created_at,
        };
        let leader = Member {
            id: state.next_member_id,
            team_id,
            user_id: team.created_by,
            role: MemberRole::Leader,
            joined_at: team.created_at,
        };
        state.teams.push((stored.clone(), None));
        state.members.push((leader, None));
        Ok(stored)
    }

    async fn find_by_id(&self, id: TeamId) -> DomainResult<Option<Team>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .teams
            .iter()
            .find(|(t, deleted)| t.id == id && deleted.is_none())
            .map(|(t, _)| t.clone()))
    }

    async fn update(&self, team: &Team) -> DomainResult<Team> {
        let mut state = self.state.lock().unwrap();
        let slot = state
            .teams
            .iter_mut()
            .find(|(t, deleted)| t.id == team.id && deleted.is_none())
            .ok_or_else(|| DomainError::NotFound("team not found".into()))?;
        slot.0 = team.clone();
        Ok(team.clone())
    }

    async fn soft_delete(&self, id: TeamId, now: DateTime<Utc>) -> DomainResult<()> {
        let mut state = self.state.lock().unwrap();
        let slot = state
            .teams
            .iter_mut()
            .find(|(t, deleted)| t.id == id && deleted.is_none())
            .ok_or_else(|| DomainError::NotFound("team not found".into()))?;
        slot.1 = Some(now);
        for (member, deleted) in &mut state.members {
            if member.team_id == id && deleted.is_none() {
                *deleted = Some(now);
            }
        }
        Ok(())
    }

    async fn list(&self, filter: &TeamFilter, page: Page) -> DomainResult<(Vec<Team>, u64)> {
        let state = self.state.lock().unwrap();
        let mut matching: Vec<Team> = state
            .teams
            .iter()
            .filter(|(_, deleted)| deleted.is_none())
            .map(|(t, _)| t)
            .filter(|t| filter.name.as_deref().is_none_or(|n| contains_ci(t.name.as_str(), n)))
            .filter(|t| {
                filter
                    .created_by
                    .as_deref()
                    .is_none_or(|c| contains_ci(t.created_by.as_str(), c))
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| i64::from(b.id).cmp(&i64::from(a.id)))
        });
        let total = matching.len() as u64;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let size = usize::try_from(page.size()).unwrap_or(0);
        Ok((matching.into_iter().skip(offset).take(size).collect(), total))
    }

    async fn list_members(&self, id: TeamId) -> DomainResult<Vec<Member>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .members
            .iter()
            .filter(|(m, deleted)| m.team_id == id && deleted.is_none())
            .map(|(m, _)| m.clone())
            .collect())
    }

    async fn find_member(&self, id: TeamId, user_id: &UserId) -> DomainResult<Option<Member>> {
        let mut state = self.state.lock().unwrap();
        Ok(state.live_member_mut(id, user_id).map(|m| m.clone()))
    }

    async fn add_member(&self, member: NewMember) -> DomainResult<Member> {
        let mut state = self.state.lock().unwrap();
        if state.live_member_mut(member.team_id, &member.user_id).is_some() {
            return Err(DomainError::Conflict("user is already a member".into()));
        }
        state.next_member_id += 1;
        let stored = Member {
            id: state.next_member_id,
            team_id: member.team_id,
            user_id: member.user_id,
            role: member.role,
            joined_at: member.joined_at,
        };
        state.members.push((stored.clone(), None));
        Ok(stored)
    }

    async fn update_member_role(
        &self,
        id: TeamId,
        user_id: &UserId,
        role: MemberRole,
    ) -> DomainResult<Member> {
        let mut state = self.state.lock().unwrap();
        let member = state
            .live_member_mut(id, user_id)
            .ok_or_else(|| DomainError::NotFound("member not found".into()))?;
        member.role = role;
        Ok(member.clone())
    }

    async fn remove_member(
        &self,
        id: TeamId,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        let mut state = self.state.lock().unwrap();
        let slot = state
            .members
            .iter_mut()
            .find(|(m, deleted)| deleted.is_none() && m.team_id == id && &m.user_id == user_id)
            .ok_or_else(|| DomainError::NotFound("member not found".into()))?;
        slot.1 = Some(now);
        Ok(())
    }
}
