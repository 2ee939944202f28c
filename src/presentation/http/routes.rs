// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{articles, categories, teams},
    middleware::rate_limit::rate_limit_layer,
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    http::{HeaderValue, Method},
    routing::{get, post, put},
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct RouterOptions {
    pub allowed_origins: Vec<String>,
    pub request_timeout: Duration,
    pub rate_limit: bool,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".into()],
            request_timeout: Duration::from_secs(30),
            rate_limit: true,
        }
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origin = if allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %o, "ignoring malformed CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600))
}

fn api_routes() -> Router {
    Router::new()
        .route("/api/v1/articles", post(articles::create_article))
        .route("/api/v1/articles/search", get(articles::search_articles))
        .route("/api/v1/articles/mine", get(articles::list_my_articles))
        .route(
            "/api/v1/articles/batch-delete",
            post(articles::batch_delete_articles),
        )
        .route(
            "/api/v1/articles/{id}",
            get(articles::get_article)
                .put(articles::update_article)
                .delete(articles::delete_article),
        )
        .route("/api/v1/categories/tree", get(categories::category_tree))
        .route(
            "/api/v1/categories/{id}/articles",
            get(articles::list_category_articles),
        )
        .route(
            "/api/v1/teams",
            get(teams::list_teams).post(teams::create_team),
        )
        .route(
            "/api/v1/teams/{id}",
            put(teams::update_team).delete(teams::delete_team),
        )
        .route(
            "/api/v1/teams/{id}/members",
            get(teams::list_members).post(teams::add_member),
        )
        .route(
            "/api/v1/teams/{id}/members/{user_id}",
            put(teams::change_member_role).delete(teams::remove_member),
        )
}

pub fn build_router(state: HttpState, options: &RouterOptions) -> Router {
    let mut router = Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .merge(api_routes());

    if options.rate_limit {
        match rate_limit_layer() {
            Some(limiter) => router = router.layer(limiter),
            None => warn!("rate limiter configuration rejected; continuing without it"),
        }
    }

    router
        .layer(TimeoutLayer::new(options.request_timeout))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&options.allowed_origins))
        .layer(Extension(state))
}

/// Router with default options; tests disable the limiter since requests
/// driven through `oneshot` carry no peer address.
pub fn build_router_with_rate_limiter(state: HttpState, rate_limit: bool) -> Router {
    build_router(
        state,
        &RouterOptions {
            rate_limit,
            ..RouterOptions::default()
        },
    )
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = crate::presentation::http::openapi::StatusResponse)
    ),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
