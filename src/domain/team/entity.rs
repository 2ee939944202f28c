// src/domain/team/entity.rs
use crate::domain::team::value_objects::{MemberRole, TeamId, TeamName};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Team {
    pub id: TeamId,
    pub name: TeamName,
    pub description: String,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Team {
    pub fn rename(&mut self, name: TeamName, description: String, now: DateTime<Utc>) {
        self.name = name;
        self.description = description;
        self.updated_at = now;
    }
}

/// A team about to be created. `created_by` becomes its leader.
#[derive(Debug, Clone)]
pub struct NewTeam {
    pub name: TeamName,
    pub description: String,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Member {
    pub id: i64,
    pub team_id: TeamId,
    pub user_id: UserId,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewMember {
    pub team_id: TeamId,
    pub user_id: UserId,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}
