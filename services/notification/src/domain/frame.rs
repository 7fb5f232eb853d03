//! JSON frames exchanged over `/ws`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientFrame {
    Register {
        #[serde(rename = "userId")]
        user_id: String,
    },
    Ping,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerFrame {
    Registered {
        #[serde(rename = "userId")]
        user_id: String,
    },
    Pong,
    Error {
        message: String,
    },
    Notification {
        event: String,
        payload: serde_json::Value,
    },
}

impl ServerFrame {
    pub fn to_text(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"type":"error","message":"unencodable frame"}"#.to_owned())
    }
}
