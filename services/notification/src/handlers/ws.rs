use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures::{SinkExt as _, StreamExt as _};
use tokio::sync::mpsc;

use crate::domain::connection::{Connection, ConnectionManager};
use crate::domain::frame::{ClientFrame, ServerFrame};
use crate::state::AppState;

// ── GET /ws ──────────────────────────────────────────────────────────────────

pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| serve_socket(socket, state.connections))
}

async fn serve_socket(socket: WebSocket, connections: Arc<dyn ConnectionManager>) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let conn = Connection::new(tx);
    let conn_id = conn.id;

    // Single writer: replies and pushes share the channel so frames never interleave.
    let writer = tokio::spawn(async move {
        while let Some(text) = rx.recv().await {
            if sink.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    let mut registered: Option<String> = None;
    while let Some(Ok(message)) = stream.next().await {
        let text = match message {
            Message::Text(text) => text,
            Message::Close(_) => break,
            _ => continue,
        };
        let reply = match serde_json::from_str::<ClientFrame>(text.as_str()) {
            Ok(ClientFrame::Register { user_id }) if !user_id.trim().is_empty() => {
                if let Some(previous) = registered.take() {
                    connections.deregister(&previous, conn_id);
                }
                let replaced = connections.register(&user_id, conn.clone());
                tracing::info!(user_id = %user_id, replaced, "websocket registered");
                registered = Some(user_id.clone());
                ServerFrame::Registered { user_id }
            }
            Ok(ClientFrame::Register { .. }) => ServerFrame::Error {
                message: "userId is required".to_owned(),
            },
            Ok(ClientFrame::Ping) => ServerFrame::Pong,
            Err(e) => ServerFrame::Error {
                message: format!("malformed frame: {e}"),
            },
        };
        if conn.sender.send(reply.to_text()).is_err() {
            break;
        }
    }

    if let Some(user_id) = registered {
        if connections.deregister(&user_id, conn_id) {
            tracing::info!(user_id = %user_id, "websocket closed");
        }
    }
    writer.abort();
}
