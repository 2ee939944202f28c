use crate::domain::team::{Member, Team};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamDto {
    pub team_id: i64,
    pub name: String,
    pub description: String,
    pub created_by: String,
    #[serde(with = "serde_time")]
    #[schema(value_type = String, example = "2024-01-01 00:00:00")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    #[schema(value_type = String, example = "2024-01-01 00:00:00")]
    pub updated_at: DateTime<Utc>,
}

impl From<Team> for TeamDto {
    fn from(team: Team) -> Self {
        Self {
            team_id: team.id.into(),
            name: team.name.into(),
            description: team.description,
            created_by: team.created_by.into(),
            created_at: team.created_at,
            updated_at: team.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MemberDto {
    pub team_id: i64,
    pub user_id: String,
    pub role: String,
    #[serde(with = "serde_time")]
    #[schema(value_type = String, example = "2024-01-01 00:00:00")]
    pub joined_at: DateTime<Utc>,
}

impl From<Member> for MemberDto {
    fn from(member: Member) -> Self {
        Self {
            team_id: member.team_id.into(),
            user_id: member.user_id.into(),
            role: member.role.as_str().to_string(),
            joined_at: member.joined_at,
        }
    }
}
