use axum::http::{Method, StatusCode};

mod support;

use support::TestApp;

fn ids(nodes: &serde_json::Value) -> Vec<i64> {
    nodes
        .as_array()
        .expect("array")
        .iter()
        .map(|n| n["id"].as_i64().unwrap())
        .collect()
}

/// 親子関係が入れ子で返り、兄弟の順序が保たれることを確認する
#[tokio::test]
async fn tree_nests_children_in_storage_order() {
    let app = TestApp::new();
    app.categories.add(10, "Rust", 1);
    app.categories.add(11, "Async", 10);
    app.categories.add(12, "Errors", 1);

    let resp = app
        .call(Method::GET, "/api/v1/categories/tree", None, None)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let tree = support::read_json(resp).await;

    assert_eq!(ids(&tree), vec![1, 2]);
    assert_eq!(ids(&tree[0]["children"]), vec![10, 12]);
    assert_eq!(ids(&tree[0]["children"][0]["children"]), vec![11]);
    assert_eq!(tree[0]["children"][0]["name"], "Rust");
    assert!(tree[1]["children"].as_array().unwrap().is_empty());
}

/// parent_id を指定すると部分木だけが返る
#[tokio::test]
async fn tree_can_be_anchored_below_the_root() {
    let app = TestApp::new();
    app.categories.add(10, "Rust", 1);
    app.categories.add(11, "Async", 10);

    let resp = app
        .call(Method::GET, "/api/v1/categories/tree?parent_id=10", None, None)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let tree = support::read_json(resp).await;
    assert_eq!(ids(&tree), vec![11]);
}

/// 循環や孤児が混ざっていても応答が返り、各ノードは一度だけ現れる
#[tokio::test]
async fn tree_survives_cycles_and_orphans() {
    let app = TestApp::new();
    app.categories.add(20, "Loop A", 21);
    app.categories.add(21, "Loop B", 20);
    app.categories.add(30, "Child", 1);
    app.categories.add(1, "Guides again", 30);
    app.categories.add(40, "Orphan", 999);

    let resp = app
        .call(Method::GET, "/api/v1/categories/tree", None, None)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let tree = support::read_json(resp).await;

    assert_eq!(ids(&tree), vec![1, 2]);
    assert_eq!(ids(&tree[0]["children"]), vec![30]);
    assert!(tree[0]["children"][0]["children"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn empty_store_gives_empty_tree() {
    let app = TestApp::new();
    let resp = app
        .call(Method::GET, "/api/v1/categories/tree?parent_id=77", None, None)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(support::read_json(resp).await, serde_json::json!([]));
}

/// ストア障害は 500 として返る
#[tokio::test]
async fn store_failure_is_a_server_error() {
    let app = TestApp::new();
    app.categories.fail_lookups(true);

    let resp = app
        .call(Method::GET, "/api/v1/categories/tree", None, None)
        .await;
    support::assert_error_response(resp, StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        .await;
}
