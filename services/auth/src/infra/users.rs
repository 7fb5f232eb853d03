use anyhow::Context as _;
use reqwest::StatusCode;
use uuid::Uuid;

use nomnom_domain::profile::ProfileFields;
use nomnom_domain::user::UserType;

use crate::domain::repository::ProfilePort;
use crate::domain::types::ProfileSnapshot;
use crate::error::AuthServiceError;

/// REST client for the users service.
#[derive(Clone)]
pub struct HttpProfileClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpProfileClient {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }
}

impl ProfilePort for HttpProfileClient {
    async fn find(&self, user_id: Uuid) -> Result<Option<ProfileSnapshot>, AuthServiceError> {
        let resp = self
            .client
            .get(format!("{}/users/{user_id}", self.base_url))
            .send()
            .await
            .context("GET /users/{id}")?;
        match resp.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let profile = resp.json().await.context("decode profile")?;
                Ok(Some(profile))
            }
            status => Err(anyhow::anyhow!("GET /users/{{id}} returned {status}").into()),
        }
    }

    async fn upsert(
        &self,
        user_id: Uuid,
        email: &str,
        user_type: UserType,
        fields: &ProfileFields,
    ) -> Result<(), AuthServiceError> {
        let mut body = serde_json::to_value(fields).context("encode profile fields")?;
        body["email"] = serde_json::json!(email);
        body["userType"] = serde_json::json!(user_type);

        let resp = self
            .client
            .put(format!("{}/users/{user_id}", self.base_url))
            .json(&body)
            .send()
            .await
            .context("PUT /users/{id}")?;
        let status = resp.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!("PUT /users/{{id}} returned {status}").into());
        }
        Ok(())
    }
}
