use tonic::{Request, Response, Status};

use nomnom_proto::session::{
    CreateSessionRequest, Empty, ListUserSessionsRequest, RevokeSessionRequest,
    RevokeUserSessionsRequest, RevokeUserSessionsResponse, Session as ProtoSession, SessionList,
    ValidateSessionRequest, session_service_server::SessionService,
};

use crate::domain::types::Session;
use crate::state::AppState;
use crate::usecase::session::{
    CreateSessionInput, CreateSessionUseCase, ListUserSessionsUseCase, RevokeSessionUseCase,
    RevokeUserSessionsUseCase, ValidateSessionUseCase, format_timestamp,
};

#[derive(Clone)]
pub struct SessionsGrpcServer {
    pub state: AppState,
}

fn to_proto(session: Session, token: String) -> ProtoSession {
    ProtoSession {
        session_id: session.id.to_string(),
        user_id: session.user_id.to_string(),
        user_type: session.user_type.as_str().to_owned(),
        token,
        ip_address: session.ip_address,
        device: session.device,
        created_at: format_timestamp(session.created_at),
        expires_at: format_timestamp(session.expires_at),
    }
}

#[tonic::async_trait]
impl SessionService for SessionsGrpcServer {
    async fn create_session(
        &self,
        request: Request<CreateSessionRequest>,
    ) -> Result<Response<ProtoSession>, Status> {
        let req = request.into_inner();
        let uc = CreateSessionUseCase {
            repo: self.state.session_repo(),
            jwt_secret: self.state.jwt_secret.clone(),
        };
        let issued = uc
            .execute(CreateSessionInput {
                user_id: req.user_id,
                user_type: req.user_type,
                ip_address: req.ip_address,
                device: req.device,
            })
            .await?;
        Ok(Response::new(to_proto(issued.session, issued.token)))
    }

    async fn validate_session(
        &self,
        request: Request<ValidateSessionRequest>,
    ) -> Result<Response<ProtoSession>, Status> {
        let uc = ValidateSessionUseCase {
            repo: self.state.session_repo(),
            jwt_secret: self.state.jwt_secret.clone(),
        };
        let session = uc.execute(&request.into_inner().token).await?;
        Ok(Response::new(to_proto(session, String::new())))
    }

    async fn revoke_session(
        &self,
        request: Request<RevokeSessionRequest>,
    ) -> Result<Response<Empty>, Status> {
        let uc = RevokeSessionUseCase {
            repo: self.state.session_repo(),
        };
        uc.execute(&request.into_inner().session_id).await?;
        Ok(Response::new(Empty {}))
    }

    async fn revoke_user_sessions(
        &self,
        request: Request<RevokeUserSessionsRequest>,
    ) -> Result<Response<RevokeUserSessionsResponse>, Status> {
        let uc = RevokeUserSessionsUseCase {
            repo: self.state.session_repo(),
        };
        let revoked = uc.execute(&request.into_inner().user_id).await?;
        Ok(Response::new(RevokeUserSessionsResponse { revoked }))
    }

    async fn list_user_sessions(
        &self,
        request: Request<ListUserSessionsRequest>,
    ) -> Result<Response<SessionList>, Status> {
        let uc = ListUserSessionsUseCase {
            repo: self.state.session_repo(),
        };
        let sessions = uc
            .execute(&request.into_inner().user_id)
            .await?
            .into_iter()
            .map(|s| to_proto(s, String::new()))
            .collect();
        Ok(Response::new(SessionList { sessions }))
    }
}
