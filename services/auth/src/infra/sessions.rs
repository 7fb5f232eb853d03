use tonic::Code;
use tonic::transport::Channel;
use uuid::Uuid;

use nomnom_domain::user::UserType;
use nomnom_proto::session::{
    CreateSessionRequest, RevokeSessionRequest, RevokeUserSessionsRequest,
    ValidateSessionRequest, session_service_client::SessionServiceClient,
};

use crate::domain::repository::SessionPort;
use crate::domain::types::{ClientMeta, IssuedSession, SessionInfo};
use crate::error::AuthServiceError;

/// gRPC client for the sessions service.
#[derive(Clone)]
pub struct GrpcSessionPort {
    client: SessionServiceClient<Channel>,
}

impl GrpcSessionPort {
    pub fn new(channel: Channel) -> Self {
        Self {
            client: SessionServiceClient::new(channel),
        }
    }
}

impl SessionPort for GrpcSessionPort {
    async fn create(
        &self,
        user_id: Uuid,
        user_type: UserType,
        meta: &ClientMeta,
    ) -> Result<IssuedSession, AuthServiceError> {
        let session = self
            .client
            .clone()
            .create_session(CreateSessionRequest {
                user_id: user_id.to_string(),
                user_type: user_type.as_str().to_owned(),
                ip_address: meta.ip_address.clone(),
                device: meta.device.clone(),
            })
            .await
            .map_err(|e| anyhow::anyhow!("gRPC create_session failed: {e}"))?
            .into_inner();
        Ok(IssuedSession {
            session_id: parse_uuid(&session.session_id)?,
            token: session.token,
            user_type: parse_user_type(&session.user_type)?,
        })
    }

    async fn validate(&self, token: &str) -> Result<Option<SessionInfo>, AuthServiceError> {
        let response = self
            .client
            .clone()
            .validate_session(ValidateSessionRequest {
                token: token.to_owned(),
            })
            .await;
        match response {
            Ok(resp) => {
                let session = resp.into_inner();
                Ok(Some(SessionInfo {
                    session_id: parse_uuid(&session.session_id)?,
                    user_id: parse_uuid(&session.user_id)?,
                    user_type: parse_user_type(&session.user_type)?,
                    expires_at: session.expires_at,
                }))
            }
            Err(status)
                if matches!(
                    status.code(),
                    Code::Unauthenticated | Code::NotFound | Code::InvalidArgument
                ) =>
            {
                Ok(None)
            }
            Err(e) => Err(anyhow::anyhow!("gRPC validate_session failed: {e}").into()),
        }
    }

    async fn revoke(&self, session_id: Uuid) -> Result<(), AuthServiceError> {
        let response = self
            .client
            .clone()
            .revoke_session(RevokeSessionRequest {
                session_id: session_id.to_string(),
            })
            .await;
        match response {
            Ok(_) => Ok(()),
            Err(status) if status.code() == Code::NotFound => Ok(()),
            Err(e) => Err(anyhow::anyhow!("gRPC revoke_session failed: {e}").into()),
        }
    }

    async fn revoke_user_sessions(&self, user_id: Uuid) -> Result<u64, AuthServiceError> {
        let response = self
            .client
            .clone()
            .revoke_user_sessions(RevokeUserSessionsRequest {
                user_id: user_id.to_string(),
            })
            .await
            .map_err(|e| anyhow::anyhow!("gRPC revoke_user_sessions failed: {e}"))?;
        Ok(response.into_inner().revoked)
    }
}

fn parse_uuid(value: &str) -> Result<Uuid, AuthServiceError> {
    Ok(value
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid UUID from sessions service: {value}"))?)
}

fn parse_user_type(value: &str) -> Result<UserType, AuthServiceError> {
    Ok(value
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid user type from sessions service: {e}"))?)
}
