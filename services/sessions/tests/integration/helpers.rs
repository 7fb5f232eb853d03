use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use nomnom_domain::user::UserType;
use nomnom_sessions::domain::repository::SessionRepository;
use nomnom_sessions::domain::types::Session;
use nomnom_sessions::error::SessionServiceError;

// ── MockSessionRepo ──────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockSessionRepo {
    pub sessions: Arc<Mutex<Vec<Session>>>,
}

impl MockSessionRepo {
    pub fn new(sessions: Vec<Session>) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(sessions)),
        }
    }

    /// Shared handle to the stored sessions for post-execution inspection.
    pub fn sessions_handle(&self) -> Arc<Mutex<Vec<Session>>> {
        Arc::clone(&self.sessions)
    }
}

impl SessionRepository for MockSessionRepo {
    async fn create(&self, session: &Session) -> Result<(), SessionServiceError> {
        self.sessions.lock().unwrap().push(session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Session>, SessionServiceError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn revoke(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, SessionServiceError> {
        let mut sessions = self.sessions.lock().unwrap();
        match sessions.iter_mut().find(|s| s.id == id) {
            Some(s) => {
                s.revoked_at.get_or_insert(at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn revoke_all_for_user(
        &self,
        user_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<u64, SessionServiceError> {
        let mut revoked = 0;
        for s in self.sessions.lock().unwrap().iter_mut() {
            if s.user_id == user_id && s.is_active_at(at) {
                s.revoked_at = Some(at);
                revoked += 1;
            }
        }
        Ok(revoked)
    }

    async fn list_active_by_user(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<Session>, SessionServiceError> {
        let mut active: Vec<Session> = self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.user_id == user_id && s.is_active_at(now))
            .cloned()
            .collect();
        active.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(active)
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub const TEST_JWT_SECRET: &str = "test-session-secret-for-tests-only";

pub fn test_user_id() -> Uuid {
    Uuid::parse_str("00000000-0000-0000-0000-000000000001").unwrap()
}

pub fn stored_session(user_id: Uuid, created_ago_mins: i64) -> Session {
    let created_at = Utc::now() - Duration::minutes(created_ago_mins);
    Session {
        id: Uuid::now_v7(),
        user_id,
        user_type: UserType::Customer,
        ip_address: "203.0.113.7".to_owned(),
        device: "Mozilla/5.0".to_owned(),
        created_at,
        expires_at: created_at + Duration::days(7),
        revoked_at: None,
    }
}
