use anyhow::Context as _;
use serde::Deserialize;
use url::Url;

use crate::domain::repository::TokenVerifier;
use crate::domain::types::{GoogleIdentity, GoogleTokenKind};
use crate::error::AuthServiceError;

const ACCESS_TOKEN_INFO_URL: &str = "https://www.googleapis.com/oauth2/v3/tokeninfo";
const ID_TOKEN_INFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";
const GOOGLE_ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];

/// Body of either tokeninfo endpoint. Access-token responses carry no `iss` and
/// older ones name the subject `user_id`.
#[derive(Debug, Default, Deserialize)]
struct TokenInfo {
    sub: Option<String>,
    user_id: Option<String>,
    email: Option<String>,
    aud: Option<String>,
    iss: Option<String>,
    name: Option<String>,
    given_name: Option<String>,
    family_name: Option<String>,
    picture: Option<String>,
}

/// Verifies tokens against Google's tokeninfo endpoints.
#[derive(Clone)]
pub struct GoogleTokenVerifier {
    client: reqwest::Client,
    client_id: String,
}

impl GoogleTokenVerifier {
    pub fn new(client: reqwest::Client, client_id: String) -> Self {
        Self { client, client_id }
    }
}

impl TokenVerifier for GoogleTokenVerifier {
    async fn verify(&self, token: &str) -> Result<GoogleIdentity, AuthServiceError> {
        let kind = GoogleTokenKind::classify(token);
        let (endpoint, param) = match kind {
            GoogleTokenKind::Access => (ACCESS_TOKEN_INFO_URL, "access_token"),
            GoogleTokenKind::Id => (ID_TOKEN_INFO_URL, "id_token"),
        };
        let url = Url::parse_with_params(endpoint, &[(param, token)])
            .context("build tokeninfo url")?;

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .context("call google tokeninfo")?;
        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(status = %status, kind = ?kind, "google rejected token");
            return Err(AuthServiceError::InvalidGoogleToken);
        }
        let info: TokenInfo = resp
            .json()
            .await
            .map_err(|_| AuthServiceError::InvalidGoogleToken)?;
        identity_from_info(info, kind, &self.client_id)
    }
}

fn identity_from_info(
    info: TokenInfo,
    kind: GoogleTokenKind,
    client_id: &str,
) -> Result<GoogleIdentity, AuthServiceError> {
    if kind == GoogleTokenKind::Id {
        if info.aud.as_deref() != Some(client_id) {
            return Err(AuthServiceError::InvalidGoogleToken);
        }
        if !info.iss.as_deref().is_some_and(|iss| GOOGLE_ISSUERS.contains(&iss)) {
            return Err(AuthServiceError::InvalidGoogleToken);
        }
    }
    let subject = info
        .sub
        .or(info.user_id)
        .ok_or(AuthServiceError::InvalidGoogleToken)?;
    Ok(GoogleIdentity {
        subject,
        email: info.email,
        name: info.name,
        given_name: info.given_name,
        family_name: info.family_name,
        picture: info.picture,
    })
}
