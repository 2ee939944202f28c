// src/presentation/http/openapi.rs
use axum::{Router, response::Redirect, routing::get};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, env, fs::File, io::BufWriter, path::Path};
use utoipa::openapi::{
    Components,
    security::{ApiKey, ApiKeyValue, SecurityScheme},
    server::Server,
};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

const DEFAULT_SNAPSHOT_PATH: &str = "docs/openapi.json";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::articles::get_article,
        crate::presentation::http::controllers::articles::create_article,
        crate::presentation::http::controllers::articles::update_article,
        crate::presentation::http::controllers::articles::delete_article,
        crate::presentation::http::controllers::articles::batch_delete_articles,
        crate::presentation::http::controllers::articles::list_my_articles,
        crate::presentation::http::controllers::articles::list_category_articles,
        crate::presentation::http::controllers::articles::search_articles,
        crate::presentation::http::controllers::categories::category_tree,
        crate::presentation::http::controllers::teams::list_teams,
        crate::presentation::http::controllers::teams::create_team,
        crate::presentation::http::controllers::teams::update_team,
        crate::presentation::http::controllers::teams::delete_team,
        crate::presentation::http::controllers::teams::list_members,
        crate::presentation::http::controllers::teams::add_member,
        crate::presentation::http::controllers::teams::change_member_role,
        crate::presentation::http::controllers::teams::remove_member,
        super::routes::health
    ),
    components(
        schemas(
            StatusResponse,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::controllers::articles::CreateArticleRequest,
            crate::presentation::http::controllers::articles::UpdateArticleRequest,
            crate::presentation::http::controllers::articles::BatchDeleteRequest,
            crate::presentation::http::controllers::teams::TeamRequest,
            crate::presentation::http::controllers::teams::AddMemberRequest,
            crate::presentation::http::controllers::teams::ChangeRoleRequest,
            crate::application::dto::ArticleDto,
            crate::application::dto::ArticleSearchHitDto,
            crate::application::dto::AttachmentDto,
            crate::application::dto::CreatedArticleDto,
            crate::application::dto::DeletedCountDto,
            crate::application::dto::TeamDto,
            crate::application::dto::MemberDto,
            crate::domain::category::CategoryView
        )
    ),
    tags(
        (name = "Articles", description = "Article authoring, listing and search"),
        (name = "Categories", description = "Category hierarchy"),
        (name = "Teams", description = "Teams and their members"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    info(
        title = "Shiori API",
        description = "Multi-tenant knowledge base content service",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        components.add_security_scheme(
            "userId",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "X-User-Id",
                "Caller identity asserted by the gateway",
            ))),
        );

        let servers = openapi.servers.get_or_insert_with(Vec::new);
        servers.clear();

        let mut urls: Vec<String> = env::var("PUBLIC_API_URLS")
            .ok()
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|segment| !segment.is_empty())
                    .map(|segment| segment.trim_end_matches('/').to_string())
                    .collect()
            })
            .unwrap_or_default();

        if urls.is_empty() {
            urls.push("http://localhost:8080".to_string());
        }

        let mut seen = HashSet::new();
        for url in urls {
            if seen.insert(url.clone()) {
                servers.push(Server::new(url));
            }
        }
    }
}

/// Swagger UI serves the raw document at `/openapi.json`.
pub fn docs_router() -> Router {
    let openapi = ApiDoc::openapi();
    let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi.clone());
    let redoc = Redoc::with_url("/redoc", openapi);
    Router::new()
        .merge(swagger)
        .merge(redoc)
        .route("/", get(|| async { Redirect::permanent("/docs") }))
}

/// Path the snapshot binary writes to, overridable via `OPENAPI_SNAPSHOT_PATH`.
pub fn snapshot_path() -> String {
    env::var("OPENAPI_SNAPSHOT_PATH").unwrap_or_else(|_| DEFAULT_SNAPSHOT_PATH.to_string())
}

pub fn write_openapi_snapshot() -> std::io::Result<()> {
    let doc = ApiDoc::openapi();
    let output_path = snapshot_path();
    let path = Path::new(&output_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &doc)?;
    Ok(())
}
