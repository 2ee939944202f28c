// src/presentation/http/controllers/teams.rs
use crate::application::{
    commands::teams::{
        AddMemberCommand, ChangeMemberRoleCommand, CreateTeamCommand, DeleteTeamCommand,
        RemoveMemberCommand, UpdateTeamCommand,
    },
    dto::{MemberDto, PagedResult, TeamDto},
    error::ApplicationError,
    queries::teams::ListTeamsQuery,
};
use crate::domain::team::MemberRole;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::openapi::StatusResponse;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use super::{default_page_index, default_page_size};

#[derive(Debug, Deserialize, ToSchema)]
pub struct TeamRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddMemberRequest {
    pub user_id: String,
    /// `admin` or `member`.
    pub role: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangeRoleRequest {
    /// `admin` or `member`.
    pub role: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListTeamsParams {
    pub name: Option<String>,
    pub created_by: Option<String>,
    #[serde(default = "default_page_index")]
    pub page_index: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn parse_role(raw: &str) -> Result<MemberRole, ApplicationError> {
    raw.trim()
        .to_lowercase()
        .parse::<MemberRole>()
        .map_err(ApplicationError::from)
}

#[utoipa::path(
    get,
    path = "/api/v1/teams",
    params(ListTeamsParams),
    responses(
        (status = 200, description = "Teams, newest first.", body = PagedResult<TeamDto>),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("userId" = [])),
    tag = "Teams"
)]
pub async fn list_teams(
    Extension(state): Extension<HttpState>,
    Authenticated(_requester): Authenticated,
    Query(params): Query<ListTeamsParams>,
) -> HttpResult<Json<PagedResult<TeamDto>>> {
    let query = ListTeamsQuery {
        name: params.name,
        created_by: params.created_by,
        page_index: params.page_index,
        page_size: params.page_size,
    };

    state
        .services
        .team_queries
        .list_teams(query)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/teams",
    request_body = TeamRequest,
    responses(
        (status = 201, description = "Team created with the caller as leader.", body = TeamDto),
        (status = 400, description = "Invalid input.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("userId" = [])),
    tag = "Teams"
)]
pub async fn create_team(
    Extension(state): Extension<HttpState>,
    Authenticated(requester): Authenticated,
    Json(payload): Json<TeamRequest>,
) -> HttpResult<(StatusCode, Json<TeamDto>)> {
    let command = CreateTeamCommand {
        name: payload.name,
        description: payload.description,
    };

    let team = state
        .services
        .team_commands
        .create_team(&requester, command)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(team)))
}

#[utoipa::path(
    put,
    path = "/api/v1/teams/{id}",
    params(("id" = i64, Path, description = "Team identifier")),
    request_body = TeamRequest,
    responses(
        (status = 200, description = "Team updated.", body = TeamDto),
        (status = 403, description = "Leader or admin membership required.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Team not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("userId" = [])),
    tag = "Teams"
)]
pub async fn update_team(
    Extension(state): Extension<HttpState>,
    Authenticated(requester): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<TeamRequest>,
) -> HttpResult<Json<TeamDto>> {
    let command = UpdateTeamCommand {
        id,
        name: payload.name,
        description: payload.description,
    };

    state
        .services
        .team_commands
        .update_team(&requester, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/teams/{id}",
    params(("id" = i64, Path, description = "Team identifier")),
    responses(
        (status = 200, description = "Team deleted.", body = StatusResponse),
        (status = 403, description = "Leader or admin membership required.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Team not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("userId" = [])),
    tag = "Teams"
)]
pub async fn delete_team(
    Extension(state): Extension<HttpState>,
    Authenticated(requester): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<StatusResponse>> {
    state
        .services
        .team_commands
        .delete_team(&requester, DeleteTeamCommand { id })
        .await
        .into_http()?;

    Ok(Json(StatusResponse {
        status: "deleted".into(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/teams/{id}/members",
    params(("id" = i64, Path, description = "Team identifier")),
    responses(
        (status = 200, description = "Active members.", body = [MemberDto]),
        (status = 404, description = "Team not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("userId" = [])),
    tag = "Teams"
)]
pub async fn list_members(
    Extension(state): Extension<HttpState>,
    Authenticated(_requester): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<Vec<MemberDto>>> {
    state
        .services
        .team_queries
        .list_members(id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/teams/{id}/members",
    params(("id" = i64, Path, description = "Team identifier")),
    request_body = AddMemberRequest,
    responses(
        (status = 201, description = "Member added.", body = MemberDto),
        (status = 403, description = "Leader or admin membership required.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Team or user not found.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Already a member.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("userId" = [])),
    tag = "Teams"
)]
pub async fn add_member(
    Extension(state): Extension<HttpState>,
    Authenticated(requester): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<AddMemberRequest>,
) -> HttpResult<(StatusCode, Json<MemberDto>)> {
    let command = AddMemberCommand {
        team_id: id,
        user_id: payload.user_id,
        role: parse_role(&payload.role).into_http()?,
    };

    let member = state
        .services
        .team_commands
        .add_member(&requester, command)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(member)))
}

#[utoipa::path(
    put,
    path = "/api/v1/teams/{id}/members/{user_id}",
    params(
        ("id" = i64, Path, description = "Team identifier"),
        ("user_id" = String, Path, description = "Member user identifier")
    ),
    request_body = ChangeRoleRequest,
    responses(
        (status = 200, description = "Role changed.", body = MemberDto),
        (status = 403, description = "Team leader role required.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Team or member not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("userId" = [])),
    tag = "Teams"
)]
pub async fn change_member_role(
    Extension(state): Extension<HttpState>,
    Authenticated(requester): Authenticated,
    Path((id, user_id)): Path<(i64, String)>,
    Json(payload): Json<ChangeRoleRequest>,
) -> HttpResult<Json<MemberDto>> {
    let command = ChangeMemberRoleCommand {
        team_id: id,
        user_id,
        role: parse_role(&payload.role).into_http()?,
    };

    state
        .services
        .team_commands
        .change_member_role(&requester, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/teams/{id}/members/{user_id}",
    params(
        ("id" = i64, Path, description = "Team identifier"),
        ("user_id" = String, Path, description = "Member user identifier")
    ),
    responses(
        (status = 200, description = "Member removed.", body = StatusResponse),
        (status = 403, description = "Leader or admin membership required.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Team or member not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("userId" = [])),
    tag = "Teams"
)]
pub async fn remove_member(
    Extension(state): Extension<HttpState>,
    Authenticated(requester): Authenticated,
    Path((id, user_id)): Path<(i64, String)>,
) -> HttpResult<Json<StatusResponse>> {
    state
        .services
        .team_commands
        .remove_member(&requester, RemoveMemberCommand { team_id: id, user_id })
        .await
        .into_http()?;

    Ok(Json(StatusResponse {
        status: "removed".into(),
    }))
}
