// src/infrastructure/repositories/postgres_team.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::pagination::Page;
use crate::domain::team::{
    Member, MemberRole, NewMember, NewTeam, Team, TeamFilter, TeamId, TeamName, TeamRepository,
};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const TEAM_COLUMNS: &str = "id, name, description, created_by, created_at, updated_at";
const MEMBER_COLUMNS: &str = "id, team_id, user_id, role, joined_at";

#[derive(Clone)]
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TeamRow {
    id: i64,
    name: String,
    description: String,
    created_by: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TeamRow> for Team {
    type Error = DomainError;

    fn try_from(row: TeamRow) -> Result<Self, Self::Error> {
        Ok(Team {
            id: TeamId::new(row.id)?,
            name: TeamName::new(row.name)?,
            description: row.description,
            created_by: UserId::new(row.created_by)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct MemberRow {
    id: i64,
    team_id: i64,
    user_id: String,
    role: String,
    joined_at: DateTime<Utc>,
}

impl TryFrom<MemberRow> for Member {
    type Error = DomainError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        Ok(Member {
            id: row.id,
            team_id: TeamId::new(row.team_id)?,
            user_id: UserId::new(row.user_id)?,
            role: row.role.parse::<MemberRole>()?,
            joined_at: row.joined_at,
        })
    }
}

fn push_team_filter<'a>(builder: &mut QueryBuilder<'a, Postgres>, filter: &'a TeamFilter) {
    builder.push(" WHERE deleted_at IS NULL");
    if let Some(name) = filter.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        builder.push(" AND name ILIKE ");
        builder.push_bind(format!("%{name}%"));
    }
    if let Some(created_by) = filter
        .created_by
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
    {
        builder.push(" AND created_by ILIKE ");
        builder.push_bind(format!("%{created_by}%"));
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn insert_with_leader(&self, team: NewTeam) -> DomainResult<Team> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let row = sqlx::query_as::<_, TeamRow>(&format!(
            "INSERT INTO teams (name, description, created_by, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $4)
             RETURNING {TEAM_COLUMNS}"
        ))
        .bind(team.name.as_str())
        .bind(&team.description)
        .bind(team.created_by.as_str())
        .bind(team.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        sqlx::query(
            "INSERT INTO team_members (team_id, user_id, role, joined_at)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(row.id)
        .bind(team.created_by.as_str())
        .bind(MemberRole::Leader.as_str())
        .bind(team.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;
        Team::try_from(row)
    }

    async fn find_by_id(&self, id: TeamId) -> DomainResult<Option<Team>> {
        let row = sqlx::query_as::<_, TeamRow>(&format!(
            "SELECT {TEAM_COLUMNS} FROM teams WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Team::try_from).transpose()
    }

    async fn update(&self, team: &Team) -> DomainResult<Team> {
        let row = sqlx::query_as::<_, TeamRow>(&format!(
            "UPDATE teams SET name = $2, description = $3, updated_at = $4
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {TEAM_COLUMNS}"
        ))
        .bind(i64::from(team.id))
        .bind(team.name.as_str())
        .bind(&team.description)
        .bind(team.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound("team not found".into()))?;

        Team::try_from(row)
    }

    async fn soft_delete(&self, id: TeamId, now: DateTime<Utc>) -> DomainResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let result = sqlx::query(
            "UPDATE teams SET deleted_at = $2, updated_at = $2
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(i64::from(id))
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("team not found".into()));
        }

        sqlx::query(
            "UPDATE team_members SET deleted_at = $2
             WHERE team_id = $1 AND deleted_at IS NULL",
        )
        .bind(i64::from(id))
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;
        Ok(())
    }

    async fn list(&self, filter: &TeamFilter, page: Page) -> DomainResult<(Vec<Team>, u64)> {
        let mut count_builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(1) FROM teams");
        push_team_filter(&mut count_builder, filter);
        let total = count_builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;
        let total = u64::try_from(total).unwrap_or_default();

        if total == 0 {
            return Ok((Vec::new(), 0));
        }

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {TEAM_COLUMNS} FROM teams"));
        push_team_filter(&mut builder, filter);
        builder.push(" ORDER BY created_at DESC, id DESC OFFSET ");
        builder.push_bind(page.offset());
        builder.push(" LIMIT ");
        builder.push_bind(page.size());

        let rows = builder
            .build_query_as::<TeamRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let teams = rows
            .into_iter()
            .map(Team::try_from)
            .collect::<DomainResult<Vec<_>>>()?;
        Ok((teams, total))
    }

    async fn list_members(&self, id: TeamId) -> DomainResult<Vec<Member>> {
        let rows = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM team_members
             WHERE team_id = $1 AND deleted_at IS NULL
             ORDER BY joined_at, id"
        ))
        .bind(i64::from(id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(Member::try_from).collect()
    }

    async fn find_member(&self, id: TeamId, user_id: &UserId) -> DomainResult<Option<Member>> {
        let row = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM team_members
             WHERE team_id = $1 AND user_id = $2 AND deleted_at IS NULL"
        ))
        .bind(i64::from(id))
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Member::try_from).transpose()
    }

    async fn add_member(&self, member: NewMember) -> DomainResult<Member> {
        let row = sqlx::query_as::<_, MemberRow>(&format!(
            "INSERT INTO team_members (team_id, user_id, role, joined_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {MEMBER_COLUMNS}"
        ))
        .bind(i64::from(member.team_id))
        .bind(member.user_id.as_str())
        .bind(member.role.as_str())
        .bind(member.joined_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Member::try_from(row)
    }

    async fn update_member_role(
        &self,
        id: TeamId,
        user_id: &UserId,
        role: MemberRole,
    ) -> DomainResult<Member> {
        let row = sqlx::query_as::<_, MemberRow>(&format!(
            "UPDATE team_members SET role = $3
             WHERE team_id = $1 AND user_id = $2 AND deleted_at IS NULL
             RETURNING {MEMBER_COLUMNS}"
        ))
        .bind(i64::from(id))
        .bind(user_id.as_str())
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound("member not found".into()))?;

        Member::try_from(row)
    }

    async fn remove_member(
        &self,
        id: TeamId,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        let result = sqlx::query(
            "UPDATE team_members SET deleted_at = $3
             WHERE team_id = $1 AND user_id = $2 AND deleted_at IS NULL",
        )
        .bind(i64::from(id))
        .bind(user_id.as_str())
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("member not found".into()));
        }
        Ok(())
    }
}
