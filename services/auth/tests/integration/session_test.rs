use uuid::Uuid;

use nomnom_auth::domain::repository::SessionPort;
use nomnom_auth::error::AuthServiceError;
use nomnom_auth::usecase::session::{CurrentSessionUseCase, LogoutUseCase};
use nomnom_domain::user::UserType;

use crate::helpers::*;

#[tokio::test]
async fn should_describe_current_session() {
    let sessions = MockSessions::default();
    let user_id = Uuid::new_v4();
    let issued = sessions
        .create(user_id, UserType::Driver, &meta())
        .await
        .unwrap();
    let uc = CurrentSessionUseCase {
        sessions: sessions.clone(),
    };

    let info = uc.execute(&issued.token).await.unwrap();

    assert_eq!(info.user_id, user_id);
    assert_eq!(info.session_id, issued.session_id);
    assert_eq!(info.user_type, UserType::Driver);
}

#[tokio::test]
async fn should_revoke_session_on_logout() {
    let sessions = MockSessions::default();
    let issued = sessions
        .create(Uuid::new_v4(), UserType::Customer, &meta())
        .await
        .unwrap();
    let logout = LogoutUseCase {
        sessions: sessions.clone(),
    };

    logout.execute(&issued.token).await.unwrap();

    let current = CurrentSessionUseCase {
        sessions: sessions.clone(),
    };
    let result = current.execute(&issued.token).await;
    assert!(
        matches!(result, Err(AuthServiceError::InvalidSession)),
        "expected InvalidSession, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_logout_with_unknown_token() {
    let logout = LogoutUseCase {
        sessions: MockSessions::default(),
    };
    let result = logout.execute("token-unknown").await;
    assert!(
        matches!(result, Err(AuthServiceError::InvalidSession)),
        "expected InvalidSession, got {result:?}"
    );
}

#[tokio::test]
async fn should_only_revoke_the_presented_session() {
    let sessions = MockSessions::default();
    let user_id = Uuid::new_v4();
    let phone = sessions
        .create(user_id, UserType::Customer, &meta())
        .await
        .unwrap();
    let laptop = sessions
        .create(user_id, UserType::Customer, &meta())
        .await
        .unwrap();
    let logout = LogoutUseCase {
        sessions: sessions.clone(),
    };

    logout.execute(&phone.token).await.unwrap();

    let current = CurrentSessionUseCase {
        sessions: sessions.clone(),
    };
    assert!(current.execute(&laptop.token).await.is_ok());
}
