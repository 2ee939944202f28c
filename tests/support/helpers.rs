// tests/support/helpers.rs
use std::sync::Arc;

use axum::body::{self, Body};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use serde_json::Value;
use shiori_core::application::dto::Requester;
use shiori_core::application::ports::time::Clock;
use shiori_core::application::services::ApplicationServices;
use shiori_core::domain::article::{ArticleRepository, ArticleSearchIndex};
use shiori_core::domain::category::CategoryRepository;
use shiori_core::domain::team::TeamRepository;
use shiori_core::domain::user::{Role, UserRepository};
use shiori_core::presentation::http::routes::build_router_with_rate_limiter;
use shiori_core::presentation::http::state::HttpState;
use tower::util::ServiceExt as _;

use super::mocks::{
    FixedClock, InMemoryArticleRepo, InMemoryCategoryRepo, InMemorySearchIndex, InMemoryTeamRepo,
    InMemoryUserRepo,
};

/// インメモリ実装一式とサービス
pub struct TestApp {
    pub articles: Arc<InMemoryArticleRepo>,
    pub categories: Arc<InMemoryCategoryRepo>,
    pub users: Arc<InMemoryUserRepo>,
    pub teams: Arc<InMemoryTeamRepo>,
    pub index: Arc<InMemorySearchIndex>,
    pub clock: Arc<FixedClock>,
    pub services: Arc<ApplicationServices>,
}

impl TestApp {
    /// 既定のユーザー（alice, bob, admin）とカテゴリ（1: Guides, 2: News）を登録する
    pub fn new() -> Self {
        let articles = Arc::new(InMemoryArticleRepo::new());
        let categories = Arc::new(InMemoryCategoryRepo::new());
        let users = Arc::new(InMemoryUserRepo::new());
        let teams = Arc::new(InMemoryTeamRepo::new());
        let index = Arc::new(InMemorySearchIndex::new());
        let clock = Arc::new(FixedClock::new());

        users.add("alice", "Alice", Role::Author);
        users.add("bob", "Bob", Role::Author);
        users.add("admin", "Admin", Role::Admin);
        categories.add(1, "Guides", 0);
        categories.add(2, "News", 0);

        let services = Arc::new(ApplicationServices::new(
            Arc::clone(&articles) as Arc<dyn ArticleRepository>,
            Arc::clone(&categories) as Arc<dyn CategoryRepository>,
            Arc::clone(&users) as Arc<dyn UserRepository>,
            Arc::clone(&teams) as Arc<dyn TeamRepository>,
            Arc::clone(&index) as Arc<dyn ArticleSearchIndex>,
            Arc::clone(&clock) as Arc<dyn Clock>,
        ));

        Self {
            articles,
            categories,
            users,
            teams,
            index,
            clock,
            services,
        }
    }

    pub fn router(&self) -> axum::Router {
        build_router_with_rate_limiter(HttpState::new(Arc::clone(&self.services)), false)
    }

    pub async fn requester(&self, id: &str) -> Requester {
        self.services
            .resolve_requester(id)
            .await
            .expect("known test user")
    }

    /// ルーターに 1 リクエストを流す
    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        user: Option<&str>,
        body: Option<Value>,
    ) -> Response {
        send(self.router(), method, uri, user, body).await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

pub async fn make_test_router() -> axum::Router {
    TestApp::new().router()
}

pub async fn send(
    app: axum::Router,
    method: Method,
    uri: &str,
    user: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn read_json(resp: Response) -> Value {
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// ErrorResponse の JSON とステータスを検証する
pub async fn assert_error_response(
    resp: Response,
    expected_status: StatusCode,
    expected_error: &str,
) {
    assert_eq!(resp.status(), expected_status);
    let (parts, body_stream) = resp.into_parts();
    let body_bytes = body::to_bytes(body_stream, 1024 * 1024)
        .await
        .expect("read body");
    let ct = parts
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(ct.starts_with("application/json"), "unexpected content-type: {ct}");
    let json: Value = serde_json::from_slice(&body_bytes).expect("expected valid json body for error");
    let err_field = json.get("error").and_then(|v| v.as_str()).unwrap_or("");
    let msg_field = json.get("message").and_then(|v| v.as_str()).unwrap_or("");
    assert_eq!(err_field, expected_error, "unexpected error field: {err_field}");
    assert!(!msg_field.is_empty(), "expected non-empty message field in ErrorResponse");
}
