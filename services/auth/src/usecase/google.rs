use chrono::Utc;

use nomnom_domain::user::{AuthProvider, normalize_email};

use crate::domain::repository::{ProfilePort, SessionPort, TokenVerifier, UserRepository};
use crate::domain::types::{AuthUser, ClientMeta, GoogleIdentity, SignedIn};
use crate::error::AuthServiceError;
use crate::usecase::profile::profile_status;

pub struct GoogleSignInInput {
    pub token: String,
    pub meta: ClientMeta,
}

/// Verifies a Google token, maps it onto exactly one local account and opens a session.
pub struct GoogleSignInUseCase<V, U, S, P>
where
    V: TokenVerifier,
    U: UserRepository,
    S: SessionPort,
    P: ProfilePort,
{
    pub verifier: V,
    pub users: U,
    pub sessions: S,
    pub profiles: P,
}

impl<V, U, S, P> GoogleSignInUseCase<V, U, S, P>
where
    V: TokenVerifier,
    U: UserRepository,
    S: SessionPort,
    P: ProfilePort,
{
    pub async fn execute(&self, input: GoogleSignInInput) -> Result<SignedIn, AuthServiceError> {
        let token = input.token.trim();
        if token.is_empty() {
            return Err(AuthServiceError::MissingToken);
        }

        let identity = self.verifier.verify(token).await?;
        let email = identity
            .email
            .as_deref()
            .map(normalize_email)
            .filter(|e| !e.is_empty())
            .ok_or(AuthServiceError::GoogleEmailMissing)?;

        let (user, is_new_user) = self.reconcile(&identity, email).await?;

        let (google_first, google_last) = identity.names();
        let (profile_incomplete, first_name, last_name) = if is_new_user {
            (true, google_first, google_last)
        } else {
            let status = profile_status(&self.profiles, &user).await;
            (
                !user.user_type.is_assigned() || !status.is_complete(),
                status.first_name.or(google_first),
                status.last_name.or(google_last),
            )
        };

        let session = self
            .sessions
            .create(user.id, user.user_type, &input.meta)
            .await?;

        tracing::info!(
            user_id = %user.id,
            is_new_user,
            profile_incomplete,
            "google sign-in"
        );
        Ok(SignedIn {
            user,
            session,
            is_new_user,
            profile_incomplete,
            first_name,
            last_name,
        })
    }

    /// Google id first, then email. Returns the account and whether it was just created.
    async fn reconcile(
        &self,
        identity: &GoogleIdentity,
        email: String,
    ) -> Result<(AuthUser, bool), AuthServiceError> {
        if let Some(user) = self.users.find_by_google_id(&identity.subject).await? {
            return Ok((user, false));
        }

        if let Some(mut user) = self.users.find_by_email(&email).await? {
            if user.google_id.is_none() {
                let now = Utc::now();
                self.users
                    .link_google(user.id, &identity.subject, now)
                    .await?;
                user.google_id = Some(identity.subject.clone());
                user.is_google_user = true;
                user.auth_provider = AuthProvider::Google;
                user.updated_at = now;
                tracing::info!(user_id = %user.id, "linked google account to existing user");
            }
            return Ok((user, false));
        }

        let user = AuthUser::from_google(email, identity.subject.clone(), Utc::now());
        match self.users.create(&user).await {
            Ok(()) => Ok((user, true)),
            // A concurrent sign-in for the same identity won the insert.
            Err(AuthServiceError::UserAlreadyExists) => {
                let winner = match self.users.find_by_google_id(&identity.subject).await? {
                    Some(found) => Some(found),
                    None => self.users.find_by_email(&user.email).await?,
                };
                winner.map(|found| (found, false)).ok_or_else(|| {
                    anyhow::anyhow!("user vanished after unique violation").into()
                })
            }
            Err(e) => Err(e),
        }
    }
}
