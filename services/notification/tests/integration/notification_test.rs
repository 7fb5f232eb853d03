use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::{connect, eventually, test_server, test_state, ws_server};

#[tokio::test]
async fn should_push_to_connected_user() {
    let state = test_state();
    let mut rx = connect(&state, "cust-1");
    let server = test_server(state);

    let response = server
        .post("/notifications/push")
        .json(&json!({
            "userId": "cust-1",
            "event": "delivery.status",
            "payload": { "orderId": "o-9", "status": "ACCEPTED" }
        }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["delivered"], true);

    let frame: Value = serde_json::from_str(&rx.try_recv().unwrap()).unwrap();
    assert_eq!(frame["type"], "notification");
    assert_eq!(frame["event"], "delivery.status");
    assert_eq!(frame["payload"]["orderId"], "o-9");
}

#[tokio::test]
async fn should_report_undelivered_push_for_offline_user() {
    let server = test_server(test_state());
    let response = server
        .post("/notifications/push")
        .json(&json!({ "userId": "nobody", "event": "delivery.status" }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["delivered"], false);
}

#[tokio::test]
async fn should_reject_push_without_user_id() {
    let server = test_server(test_state());
    let response = server
        .post("/notifications/push")
        .json(&json!({ "userId": "  ", "event": "x" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "BAD_REQUEST");
}

#[tokio::test]
async fn should_report_connection_status() {
    let state = test_state();
    let _rx = connect(&state, "driver-7");
    let server = test_server(state);

    let online = server.get("/notifications/connections/driver-7").await;
    assert_eq!(online.json::<Value>()["connected"], true);

    let offline = server.get("/notifications/connections/driver-8").await;
    assert_eq!(offline.json::<Value>()["connected"], false);
}

#[tokio::test]
async fn should_accept_sms() {
    let server = test_server(test_state());
    server
        .post("/notifications/sms")
        .json(&json!({ "phoneNumber": "+15550100", "message": "Your order is on its way" }))
        .await
        .assert_status(StatusCode::ACCEPTED);
}

#[tokio::test]
async fn should_reject_sms_without_phone_number() {
    let server = test_server(test_state());
    server
        .post("/notifications/sms")
        .json(&json!({ "phoneNumber": "", "message": "hi" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_accept_email() {
    let server = test_server(test_state());
    server
        .post("/notifications/email")
        .json(&json!({ "email": "ada@example.com", "subject": "Reset", "text": "123456" }))
        .await
        .assert_status(StatusCode::ACCEPTED);
}

#[tokio::test]
async fn should_broadcast_and_report_failed_recipients() {
    let server = test_server(test_state());
    let response = server
        .post("/notifications/broadcast-emails")
        .json(&json!({
            "subject": "Hi {{name}}",
            "template": "{{name}}, 20% off today",
            "recipients": [
                { "email": "ada@example.com", "variables": { "name": "Ada" } },
                { "email": "bo@example.com", "variables": { "name": "Bo" } },
                { "email": " " }
            ]
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["sent"], 2);
    assert_eq!(body["failed"], json!([" "]));
}

#[tokio::test]
async fn should_reject_broadcast_without_recipients() {
    let server = test_server(test_state());
    server
        .post("/notifications/broadcast-emails")
        .json(&json!({ "subject": "s", "template": "t", "recipients": [] }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

// ── WebSocket ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_answer_register_and_ping_frames() {
    let state = test_state();
    let server = ws_server(state.clone());
    let mut socket = server.get_websocket("/ws").await.into_websocket().await;

    socket
        .send_json(&json!({ "type": "register", "userId": "cust-1" }))
        .await;
    let registered: Value = socket.receive_json().await;
    assert_eq!(registered, json!({ "type": "registered", "userId": "cust-1" }));
    assert!(state.connections.is_connected("cust-1"));

    socket.send_json(&json!({ "type": "ping" })).await;
    let pong: Value = socket.receive_json().await;
    assert_eq!(pong, json!({ "type": "pong" }));
}

#[tokio::test]
async fn should_reply_error_to_malformed_frame_and_stay_open() {
    let server = ws_server(test_state());
    let mut socket = server.get_websocket("/ws").await.into_websocket().await;

    socket.send_text("not json").await;
    let error: Value = socket.receive_json().await;
    assert_eq!(error["type"], "error");
    assert!(error["message"].as_str().unwrap().contains("malformed"));

    socket
        .send_json(&json!({ "type": "register", "userId": "  " }))
        .await;
    let error: Value = socket.receive_json().await;
    assert_eq!(error["type"], "error");

    socket.send_json(&json!({ "type": "ping" })).await;
    let pong: Value = socket.receive_json().await;
    assert_eq!(pong["type"], "pong");
}

#[tokio::test]
async fn should_deliver_push_to_open_socket() {
    let state = test_state();
    let server = ws_server(state.clone());
    let mut socket = server.get_websocket("/ws").await.into_websocket().await;
    socket
        .send_json(&json!({ "type": "register", "userId": "cust-1" }))
        .await;
    let _registered: Value = socket.receive_json().await;

    let response = server
        .post("/notifications/push")
        .json(&json!({
            "userId": "cust-1",
            "event": "delivery.status",
            "payload": { "orderId": "o-9", "status": "DELIVERED" }
        }))
        .await;
    assert_eq!(response.json::<Value>()["delivered"], true);

    let frame: Value = socket.receive_json().await;
    assert_eq!(frame["type"], "notification");
    assert_eq!(frame["event"], "delivery.status");
    assert_eq!(frame["payload"]["status"], "DELIVERED");
}

#[tokio::test]
async fn should_only_deregister_the_closing_connection() {
    let state = test_state();
    let server = ws_server(state.clone());

    let mut phone = server.get_websocket("/ws").await.into_websocket().await;
    phone
        .send_json(&json!({ "type": "register", "userId": "cust-1" }))
        .await;
    let _: Value = phone.receive_json().await;

    let mut laptop = server.get_websocket("/ws").await.into_websocket().await;
    laptop
        .send_json(&json!({ "type": "register", "userId": "cust-1" }))
        .await;
    let _: Value = laptop.receive_json().await;

    // The replaced socket closing must not unbind the newer one.
    phone.close().await;
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    assert!(state.connections.is_connected("cust-1"));

    let response = server
        .post("/notifications/push")
        .json(&json!({ "userId": "cust-1", "event": "ping.test" }))
        .await;
    assert_eq!(response.json::<Value>()["delivered"], true);
    let frame: Value = laptop.receive_json().await;
    assert_eq!(frame["event"], "ping.test");

    laptop.close().await;
    let connections = state.connections.clone();
    assert!(eventually(|| !connections.is_connected("cust-1")).await);
}
