use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use crate::domain::connection::{Connection, ConnectionManager};

/// Process-local connection registry.
#[derive(Debug, Default)]
pub struct InMemoryConnectionManager {
    connections: RwLock<HashMap<String, Connection>>,
}

impl InMemoryConnectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock leaves the map itself consistent.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Connection>> {
        self.connections
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Connection>> {
        self.connections
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ConnectionManager for InMemoryConnectionManager {
    fn register(&self, user_id: &str, conn: Connection) -> bool {
        self.write().insert(user_id.to_owned(), conn).is_some()
    }

    fn deregister(&self, user_id: &str, conn_id: Uuid) -> bool {
        let mut connections = self.write();
        match connections.get(user_id) {
            Some(current) if current.id == conn_id => {
                connections.remove(user_id);
                true
            }
            _ => false,
        }
    }

    fn send(&self, user_id: &str, text: String) -> bool {
        match self.read().get(user_id) {
            Some(conn) => conn.sender.send(text).is_ok(),
            None => false,
        }
    }

    fn is_connected(&self, user_id: &str) -> bool {
        self.read()
            .get(user_id)
            .is_some_and(|conn| !conn.sender.is_closed())
    }
}
