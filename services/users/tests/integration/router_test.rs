//! Router tests that never reach the database: extraction and validation
//! failures are answered before any repository call.

use axum::http::StatusCode;
use axum_test::TestServer;
use sea_orm::DatabaseConnection;
use serde_json::json;

use nomnom_testing::auth::MockAuth;
use nomnom_users::router::build_router;
use nomnom_users::state::AppState;

fn server() -> TestServer {
    let state = AppState {
        db: DatabaseConnection::Disconnected,
    };
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn should_answer_liveness_check() {
    let server = server();
    server.get("/healthz").await.assert_status_ok();
}

#[tokio::test]
async fn should_report_not_ready_without_database() {
    let server = server();
    server
        .get("/readyz")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_reject_me_without_identity_headers() {
    let server = server();
    server
        .get("/users/@me")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_empty_patch_with_missing_data() {
    let auth = MockAuth::customer();
    let server = server();
    let mut request = server.patch("/users/@me").json(&json!({}));
    for (name, value) in auth.headers().iter() {
        request = request.add_header(name.clone(), value.clone());
    }
    let response = request.await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "MISSING_DATA");
}

#[tokio::test]
async fn should_reject_non_uuid_profile_id() {
    let server = server();
    server
        .get("/users/665f1c2e9b1d")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
