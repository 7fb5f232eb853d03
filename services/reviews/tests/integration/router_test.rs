//! Router tests that never reach the database: extraction, role and
//! validation failures are answered before any repository call.

use axum::http::StatusCode;
use axum_test::TestServer;
use sea_orm::DatabaseConnection;
use serde_json::json;
use uuid::Uuid;

use nomnom_domain::user::UserType;
use nomnom_reviews::router::build_router;
use nomnom_reviews::state::AppState;
use nomnom_testing::auth::MockAuth;

fn server() -> TestServer {
    let state = AppState {
        db: DatabaseConnection::Disconnected,
    };
    TestServer::new(build_router(state)).unwrap()
}

fn review_body(rating: i16) -> serde_json::Value {
    json!({ "targetId": Uuid::new_v4(), "targetType": "RESTAURANT", "rating": rating })
}

async fn post_as(
    server: &TestServer,
    auth: &MockAuth,
    body: &serde_json::Value,
) -> axum_test::TestResponse {
    let mut request = server.post("/api/reviews").json(body);
    for (name, value) in auth.headers().iter() {
        request = request.add_header(name.clone(), value.clone());
    }
    request.await
}

#[tokio::test]
async fn should_answer_liveness_check() {
    server().get("/healthz").await.assert_status_ok();
}

#[tokio::test]
async fn should_reject_review_without_identity_headers() {
    server()
        .post("/api/reviews")
        .json(&review_body(5))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_only_let_customers_review() {
    let server = server();
    let restaurant = MockAuth::new(Uuid::new_v4(), UserType::Restaurant);
    post_as(&server, &restaurant, &review_body(5))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_reject_rating_outside_one_to_five() {
    let server = server();
    let response = post_as(&server, &MockAuth::customer(), &review_body(6)).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "INVALID_REQUEST");
}

#[tokio::test]
async fn should_reject_unknown_target_type() {
    let server = server();
    server
        .get(&format!("/api/reviews?targetId={}&targetType=CUSTOMER", Uuid::new_v4()))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
