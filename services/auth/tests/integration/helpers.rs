use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use nomnom_auth::domain::repository::{
    NotificationPort, ProfilePort, ResetCodeRepository, SessionPort, TokenVerifier,
    UserRepository,
};
use nomnom_auth::domain::types::{
    AuthUser, ClientMeta, GoogleIdentity, IssuedSession, ProfileSnapshot, ResetCode, SessionInfo,
};
use nomnom_auth::error::AuthServiceError;
use nomnom_domain::profile::ProfileFields;
use nomnom_domain::user::{AuthProvider, UserType};

// ── MockUserRepo ─────────────────────────────────────────────────────────────

/// In-memory identity store with the same uniqueness rules as the `users` table.
#[derive(Clone, Default)]
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<AuthUser>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<AuthUser>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn all(&self) -> Vec<AuthUser> {
        self.users.lock().unwrap().clone()
    }

    pub fn stored(&self, id: Uuid) -> AuthUser {
        self.all().into_iter().find(|u| u.id == id).unwrap()
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthServiceError> {
        Ok(self.all().into_iter().find(|u| u.id == id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthServiceError> {
        Ok(self.all().into_iter().find(|u| u.email == email))
    }

    async fn find_by_google_id(
        &self,
        google_id: &str,
    ) -> Result<Option<AuthUser>, AuthServiceError> {
        Ok(self
            .all()
            .into_iter()
            .find(|u| u.google_id.as_deref() == Some(google_id)))
    }

    async fn create(&self, user: &AuthUser) -> Result<(), AuthServiceError> {
        let mut users = self.users.lock().unwrap();
        let clash = users.iter().any(|u| {
            u.email == user.email || (u.google_id.is_some() && u.google_id == user.google_id)
        });
        if clash {
            return Err(AuthServiceError::UserAlreadyExists);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn link_google(
        &self,
        id: Uuid,
        google_id: &str,
        at: DateTime<Utc>,
    ) -> Result<(), AuthServiceError> {
        let mut users = self.users.lock().unwrap();
        if let Some(u) = users
            .iter_mut()
            .find(|u| u.id == id && u.google_id.is_none())
        {
            u.google_id = Some(google_id.to_owned());
            u.is_google_user = true;
            u.auth_provider = AuthProvider::Google;
            u.updated_at = at;
        }
        Ok(())
    }

    async fn complete_profile(
        &self,
        id: Uuid,
        user_type: UserType,
        at: DateTime<Utc>,
    ) -> Result<(), AuthServiceError> {
        let mut users = self.users.lock().unwrap();
        if let Some(u) = users.iter_mut().find(|u| u.id == id) {
            u.user_type = user_type;
            u.profile_completed = true;
            u.updated_at = at;
        }
        Ok(())
    }

    async fn set_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
        at: DateTime<Utc>,
    ) -> Result<(), AuthServiceError> {
        let mut users = self.users.lock().unwrap();
        if let Some(u) = users.iter_mut().find(|u| u.id == id) {
            u.password_hash = Some(password_hash.to_owned());
            u.updated_at = at;
        }
        Ok(())
    }
}

// ── RacingUserRepo ───────────────────────────────────────────────────────────

/// Lookups miss until the first insert, which loses to `winner` committed by a
/// concurrent request.
#[derive(Clone)]
pub struct RacingUserRepo {
    pub inner: MockUserRepo,
    pub winner: AuthUser,
    raced: Arc<AtomicBool>,
}

impl RacingUserRepo {
    pub fn new(winner: AuthUser) -> Self {
        Self {
            inner: MockUserRepo::default(),
            winner,
            raced: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl UserRepository for RacingUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthServiceError> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthServiceError> {
        self.inner.find_by_email(email).await
    }

    async fn find_by_google_id(
        &self,
        google_id: &str,
    ) -> Result<Option<AuthUser>, AuthServiceError> {
        self.inner.find_by_google_id(google_id).await
    }

    async fn create(&self, user: &AuthUser) -> Result<(), AuthServiceError> {
        if !self.raced.swap(true, Ordering::SeqCst) {
            self.inner.create(&self.winner).await?;
        }
        self.inner.create(user).await
    }

    async fn link_google(
        &self,
        id: Uuid,
        google_id: &str,
        at: DateTime<Utc>,
    ) -> Result<(), AuthServiceError> {
        self.inner.link_google(id, google_id, at).await
    }

    async fn complete_profile(
        &self,
        id: Uuid,
        user_type: UserType,
        at: DateTime<Utc>,
    ) -> Result<(), AuthServiceError> {
        self.inner.complete_profile(id, user_type, at).await
    }

    async fn set_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
        at: DateTime<Utc>,
    ) -> Result<(), AuthServiceError> {
        self.inner.set_password_hash(id, password_hash, at).await
    }
}

// ── MockResetCodeRepo ────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockResetCodeRepo {
    pub codes: Arc<Mutex<Vec<ResetCode>>>,
}

impl MockResetCodeRepo {
    pub fn new(codes: Vec<ResetCode>) -> Self {
        Self {
            codes: Arc::new(Mutex::new(codes)),
        }
    }

    pub fn all(&self) -> Vec<ResetCode> {
        self.codes.lock().unwrap().clone()
    }
}

impl ResetCodeRepository for MockResetCodeRepo {
    async fn count_active(&self, user_id: Uuid) -> Result<u64, AuthServiceError> {
        Ok(self
            .all()
            .iter()
            .filter(|c| c.user_id == user_id && is_live(c))
            .count() as u64)
    }

    async fn create(&self, code: &ResetCode) -> Result<(), AuthServiceError> {
        self.codes.lock().unwrap().push(code.clone());
        Ok(())
    }

    async fn find_valid(
        &self,
        user_id: Uuid,
        code: &str,
    ) -> Result<Option<ResetCode>, AuthServiceError> {
        Ok(self
            .all()
            .into_iter()
            .find(|c| c.user_id == user_id && c.code == code && c.is_valid()))
    }

    async fn mark_used(&self, id: Uuid) -> Result<bool, AuthServiceError> {
        let mut codes = self.codes.lock().unwrap();
        match codes.iter_mut().find(|c| c.id == id && c.used_at.is_none()) {
            Some(c) => {
                c.used_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn record_miss(&self, user_id: Uuid) -> Result<(), AuthServiceError> {
        let mut codes = self.codes.lock().unwrap();
        for code in codes.iter_mut().filter(|c| c.user_id == user_id && is_live(c)) {
            code.attempts += 1;
        }
        Ok(())
    }
}

/// Unused and unexpired, whatever the attempt count.
fn is_live(code: &ResetCode) -> bool {
    code.used_at.is_none() && code.expires_at > Utc::now()
}

// ── MockVerifier ─────────────────────────────────────────────────────────────

/// Accepts exactly one token and returns a fixed identity for it.
#[derive(Clone)]
pub struct MockVerifier {
    pub token: String,
    pub identity: GoogleIdentity,
}

impl TokenVerifier for MockVerifier {
    async fn verify(&self, token: &str) -> Result<GoogleIdentity, AuthServiceError> {
        if token == self.token {
            Ok(self.identity.clone())
        } else {
            Err(AuthServiceError::InvalidGoogleToken)
        }
    }
}

// ── MockSessions ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct StoredSession {
    pub info: SessionInfo,
    pub token: String,
    pub meta: ClientMeta,
    pub revoked: bool,
}

#[derive(Clone, Default)]
pub struct MockSessions {
    pub sessions: Arc<Mutex<Vec<StoredSession>>>,
}

impl MockSessions {
    pub fn all(&self) -> Vec<StoredSession> {
        self.sessions.lock().unwrap().clone()
    }
}

impl SessionPort for MockSessions {
    async fn create(
        &self,
        user_id: Uuid,
        user_type: UserType,
        meta: &ClientMeta,
    ) -> Result<IssuedSession, AuthServiceError> {
        let session_id = Uuid::new_v4();
        let token = format!("token-{session_id}");
        self.sessions.lock().unwrap().push(StoredSession {
            info: SessionInfo {
                session_id,
                user_id,
                user_type,
                expires_at: (Utc::now() + Duration::days(7)).to_rfc3339(),
            },
            token: token.clone(),
            meta: meta.clone(),
            revoked: false,
        });
        Ok(IssuedSession {
            session_id,
            token,
            user_type,
        })
    }

    async fn validate(&self, token: &str) -> Result<Option<SessionInfo>, AuthServiceError> {
        Ok(self
            .all()
            .into_iter()
            .find(|s| s.token == token && !s.revoked)
            .map(|s| s.info))
    }

    async fn revoke(&self, session_id: Uuid) -> Result<(), AuthServiceError> {
        let mut sessions = self.sessions.lock().unwrap();
        if let Some(s) = sessions.iter_mut().find(|s| s.info.session_id == session_id) {
            s.revoked = true;
        }
        Ok(())
    }

    async fn revoke_user_sessions(&self, user_id: Uuid) -> Result<u64, AuthServiceError> {
        let mut sessions = self.sessions.lock().unwrap();
        let mut revoked = 0;
        for s in sessions
            .iter_mut()
            .filter(|s| s.info.user_id == user_id && !s.revoked)
        {
            s.revoked = true;
            revoked += 1;
        }
        Ok(revoked)
    }
}

// ── MockProfiles ─────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockProfiles {
    pub profiles: Arc<Mutex<HashMap<Uuid, ProfileSnapshot>>>,
    pub unavailable: bool,
}

impl MockProfiles {
    pub fn with(user_id: Uuid, user_type: UserType, fields: ProfileFields) -> Self {
        let profiles = Self::default();
        profiles
            .profiles
            .lock()
            .unwrap()
            .insert(user_id, ProfileSnapshot { user_type, fields });
        profiles
    }

    /// Every call fails, as if the users service were down.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Default::default()
        }
    }

    pub fn get(&self, user_id: Uuid) -> Option<ProfileSnapshot> {
        self.profiles.lock().unwrap().get(&user_id).cloned()
    }
}

impl ProfilePort for MockProfiles {
    async fn find(&self, user_id: Uuid) -> Result<Option<ProfileSnapshot>, AuthServiceError> {
        if self.unavailable {
            return Err(anyhow::anyhow!("users service unavailable").into());
        }
        Ok(self.get(user_id))
    }

    async fn upsert(
        &self,
        user_id: Uuid,
        _email: &str,
        user_type: UserType,
        fields: &ProfileFields,
    ) -> Result<(), AuthServiceError> {
        if self.unavailable {
            return Err(anyhow::anyhow!("users service unavailable").into());
        }
        self.profiles.lock().unwrap().insert(
            user_id,
            ProfileSnapshot {
                user_type,
                fields: fields.clone(),
            },
        );
        Ok(())
    }
}

// ── MockNotifier ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
}

#[derive(Clone, Default)]
pub struct MockNotifier {
    pub sent: Arc<Mutex<Vec<SentEmail>>>,
    pub failing: bool,
}

impl MockNotifier {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

impl NotificationPort for MockNotifier {
    async fn email(&self, to: &str, subject: &str, text: &str) -> Result<(), AuthServiceError> {
        if self.failing {
            return Err(anyhow::anyhow!("smtp down").into());
        }
        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_owned(),
            subject: subject.to_owned(),
            text: text.to_owned(),
        });
        Ok(())
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub const GOOGLE_TOKEN: &str = "eyJhbGciOi.eyJzdWIiOi.c2ln";
pub const GOOGLE_SUB: &str = "109876543210";

pub fn google_identity(email: &str) -> GoogleIdentity {
    GoogleIdentity {
        subject: GOOGLE_SUB.to_owned(),
        email: Some(email.to_owned()),
        name: Some("Ada Lovelace".to_owned()),
        ..Default::default()
    }
}

pub fn verifier(email: &str) -> MockVerifier {
    MockVerifier {
        token: GOOGLE_TOKEN.to_owned(),
        identity: google_identity(email),
    }
}

pub fn meta() -> ClientMeta {
    ClientMeta {
        ip_address: "203.0.113.9".to_owned(),
        device: "test-agent".to_owned(),
    }
}

/// Local account with a real argon2 hash of `password`.
pub fn local_user(email: &str, password: &str, user_type: UserType) -> AuthUser {
    let hash = nomnom_auth::domain::password::hash_password(password).unwrap();
    AuthUser::local(email.to_owned(), hash, user_type, Utc::now())
}

pub fn complete_customer() -> ProfileFields {
    ProfileFields {
        first_name: Some("Ada".into()),
        last_name: Some("Lovelace".into()),
        contact_number: Some("+94771234567".into()),
        ..Default::default()
    }
}

pub fn reset_code(user_id: Uuid, code: &str) -> ResetCode {
    let now = Utc::now();
    ResetCode {
        id: Uuid::new_v4(),
        user_id,
        code: code.to_owned(),
        expires_at: now + Duration::minutes(10),
        used_at: None,
        attempts: 0,
        created_at: now,
    }
}
