// src/presentation/http/controllers/categories.rs
use crate::domain::category::{CategoryView, ROOT_PARENT_ID};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Query};
use serde::Deserialize;
use utoipa::IntoParams;

fn default_parent_id() -> i64 {
    ROOT_PARENT_ID
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CategoryTreeParams {
    /// Anchor of the returned forest; `0` means the top level.
    #[serde(default = "default_parent_id")]
    pub parent_id: i64,
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/tree",
    params(CategoryTreeParams),
    responses(
        (status = 200, description = "Nested category forest.", body = [CategoryView]),
        (status = 500, description = "Unexpected server error.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Categories"
)]
pub async fn category_tree(
    Extension(state): Extension<HttpState>,
    Query(params): Query<CategoryTreeParams>,
) -> HttpResult<Json<Vec<CategoryView>>> {
    state
        .services
        .category_queries
        .category_tree(params.parent_id)
        .await
        .into_http()
        .map(Json)
}
