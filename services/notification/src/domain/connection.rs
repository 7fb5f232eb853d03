use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

/// One live WebSocket. Text pushed into `sender` is written to the socket.
#[derive(Debug, Clone)]
pub struct Connection {
    pub id: Uuid,
    pub sender: UnboundedSender<String>,
}

impl Connection {
    pub fn new(sender: UnboundedSender<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
        }
    }
}

/// Registry of live connections keyed by user id. At most one connection per user.
pub trait ConnectionManager: Send + Sync {
    /// Bind `conn` to `user_id`. Returns `true` when an older connection was replaced.
    fn register(&self, user_id: &str, conn: Connection) -> bool;

    /// Unbind `user_id` only if it is still held by connection `conn_id`.
    fn deregister(&self, user_id: &str, conn_id: Uuid) -> bool;

    /// Queue `text` for the user's connection. `false` if none is live.
    fn send(&self, user_id: &str, text: String) -> bool;

    fn is_connected(&self, user_id: &str) -> bool;
}
