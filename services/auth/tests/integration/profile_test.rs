use chrono::Utc;
use uuid::Uuid;

use nomnom_auth::domain::repository::SessionPort;
use nomnom_auth::domain::types::AuthUser;
use nomnom_auth::error::AuthServiceError;
use nomnom_auth::usecase::profile::{
    CompleteProfileInput, CompleteProfileUseCase, ProfileCompletionUseCase,
};
use nomnom_domain::profile::{
    MISSING_BASIC_INFO, MISSING_PROFILE_DATA, MISSING_USER_TYPE, MISSING_VEHICLE_INFO,
    ProfileFields,
};
use nomnom_domain::user::UserType;

use crate::helpers::*;

fn pending_google_user() -> AuthUser {
    AuthUser::from_google(
        "ada@example.com".to_owned(),
        GOOGLE_SUB.to_owned(),
        Utc::now(),
    )
}

fn complete_input(
    session_token: &str,
    user_id: Uuid,
    user_type: UserType,
    fields: ProfileFields,
) -> CompleteProfileInput {
    CompleteProfileInput {
        session_token: session_token.to_owned(),
        user_id,
        user_type,
        fields,
        meta: meta(),
    }
}

/// Session as issued by the Google sign-in that preceded profile completion.
async fn signed_in(sessions: &MockSessions, user_id: Uuid) -> String {
    sessions
        .create(user_id, UserType::Pending, &meta())
        .await
        .unwrap()
        .token
}

// ── CompleteProfile ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_complete_profile_and_issue_session_with_new_type() {
    let user = pending_google_user();
    let user_id = user.id;
    let users = MockUserRepo::new(vec![user]);
    let profiles = MockProfiles::default();
    let sessions = MockSessions::default();
    let token = signed_in(&sessions, user_id).await;
    let uc = CompleteProfileUseCase {
        users: users.clone(),
        profiles: profiles.clone(),
        sessions: sessions.clone(),
    };

    let out = uc
        .execute(complete_input(&token, user_id, UserType::Customer, complete_customer()))
        .await
        .unwrap();

    assert_eq!(out.user_id, user_id);
    assert_eq!(out.session.user_type, UserType::Customer);

    let stored = users.stored(user_id);
    assert_eq!(stored.user_type, UserType::Customer);
    assert!(stored.profile_completed);

    let profile = profiles.get(user_id).unwrap();
    assert_eq!(profile.user_type, UserType::Customer);
    assert_eq!(profile.fields, complete_customer());

    let issued = sessions.all();
    assert_eq!(issued.len(), 2);
    assert!(issued[0].revoked, "pre-profile session should be revoked");
    assert_eq!(issued[1].info.user_type, UserType::Customer);
    assert!(!issued[1].revoked);
}

#[tokio::test]
async fn should_count_previously_saved_fields() {
    let user = pending_google_user();
    let user_id = user.id;
    let saved = ProfileFields {
        vehicle_number: Some("CAB-1234".into()),
        ..Default::default()
    };
    let profiles = MockProfiles::with(user_id, UserType::Pending, saved);
    let sessions = MockSessions::default();
    let token = signed_in(&sessions, user_id).await;
    let uc = CompleteProfileUseCase {
        users: MockUserRepo::new(vec![user]),
        profiles: profiles.clone(),
        sessions,
    };

    let fields = ProfileFields {
        vehicle_type_id: Some(2),
        ..Default::default()
    };
    uc.execute(complete_input(&token, user_id, UserType::Driver, fields))
        .await
        .unwrap();

    let profile = profiles.get(user_id).unwrap();
    assert_eq!(profile.fields.vehicle_number.as_deref(), Some("CAB-1234"));
    assert_eq!(profile.fields.vehicle_type_id, Some(2));
}

#[tokio::test]
async fn should_reject_pending_user_type() {
    let user = pending_google_user();
    let user_id = user.id;
    let sessions = MockSessions::default();
    let token = signed_in(&sessions, user_id).await;
    let uc = CompleteProfileUseCase {
        users: MockUserRepo::new(vec![user]),
        profiles: MockProfiles::default(),
        sessions,
    };
    let result = uc
        .execute(complete_input(&token, user_id, UserType::Pending, complete_customer()))
        .await;
    assert!(
        matches!(result, Err(AuthServiceError::InvalidRequest(_))),
        "expected InvalidRequest, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_missing_role_fields() {
    let user = pending_google_user();
    let user_id = user.id;
    let users = MockUserRepo::new(vec![user]);
    let sessions = MockSessions::default();
    let token = signed_in(&sessions, user_id).await;
    let uc = CompleteProfileUseCase {
        users: users.clone(),
        profiles: MockProfiles::default(),
        sessions: sessions.clone(),
    };
    let result = uc
        .execute(complete_input(&token, user_id, UserType::Driver, complete_customer()))
        .await;
    match result {
        Err(AuthServiceError::IncompleteProfile(missing)) => {
            assert_eq!(missing, vec![MISSING_VEHICLE_INFO]);
        }
        other => panic!("expected IncompleteProfile, got {other:?}"),
    }
    assert_eq!(users.stored(user_id).user_type, UserType::Pending);
    assert_eq!(sessions.all().len(), 1);
}

#[tokio::test]
async fn should_return_not_found_for_unknown_user() {
    let sessions = MockSessions::default();
    let user_id = Uuid::new_v4();
    let token = signed_in(&sessions, user_id).await;
    let uc = CompleteProfileUseCase {
        users: MockUserRepo::default(),
        profiles: MockProfiles::default(),
        sessions,
    };
    let result = uc
        .execute(complete_input(&token, user_id, UserType::Customer, complete_customer()))
        .await;
    assert!(
        matches!(result, Err(AuthServiceError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_completion_without_valid_session() {
    let user = pending_google_user();
    let user_id = user.id;
    let users = MockUserRepo::new(vec![user]);
    let sessions = MockSessions::default();
    let uc = CompleteProfileUseCase {
        users: users.clone(),
        profiles: MockProfiles::default(),
        sessions: sessions.clone(),
    };

    let result = uc
        .execute(complete_input("token-forged", user_id, UserType::Driver, complete_customer()))
        .await;

    assert!(
        matches!(result, Err(AuthServiceError::InvalidSession)),
        "expected InvalidSession, got {result:?}"
    );
    assert_eq!(users.stored(user_id).user_type, UserType::Pending);
    assert!(sessions.all().is_empty());
}

#[tokio::test]
async fn should_reject_completion_for_another_users_account() {
    let victim = local_user("ada@example.com", "password123", UserType::Pending);
    let victim_id = victim.id;
    let users = MockUserRepo::new(vec![victim]);
    let sessions = MockSessions::default();
    let attacker_token = signed_in(&sessions, Uuid::new_v4()).await;
    let uc = CompleteProfileUseCase {
        users: users.clone(),
        profiles: MockProfiles::default(),
        sessions: sessions.clone(),
    };

    let result = uc
        .execute(complete_input(
            &attacker_token,
            victim_id,
            UserType::Customer,
            complete_customer(),
        ))
        .await;

    assert!(
        matches!(result, Err(AuthServiceError::SessionMismatch)),
        "expected SessionMismatch, got {result:?}"
    );
    assert_eq!(users.stored(victim_id).user_type, UserType::Pending);
    assert_eq!(sessions.all().len(), 1);
}

#[tokio::test]
async fn should_not_change_role_of_completed_profile() {
    let mut user = local_user("ada@example.com", "password123", UserType::Customer);
    user.profile_completed = true;
    let user_id = user.id;
    let users = MockUserRepo::new(vec![user]);
    let sessions = MockSessions::default();
    let token = sessions
        .create(user_id, UserType::Customer, &meta())
        .await
        .unwrap()
        .token;
    let uc = CompleteProfileUseCase {
        users: users.clone(),
        profiles: MockProfiles::default(),
        sessions: sessions.clone(),
    };

    let fields = ProfileFields {
        vehicle_number: Some("CAB-1234".into()),
        vehicle_type_id: Some(2),
        ..complete_customer()
    };
    let result = uc
        .execute(complete_input(&token, user_id, UserType::Driver, fields))
        .await;

    assert!(
        matches!(result, Err(AuthServiceError::ProfileAlreadyCompleted)),
        "expected ProfileAlreadyCompleted, got {result:?}"
    );
    assert_eq!(users.stored(user_id).user_type, UserType::Customer);
    assert_eq!(sessions.all().len(), 1);
}

// ── ProfileCompletion ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_report_complete_profile() {
    let user = local_user("ada@example.com", "password123", UserType::Customer);
    let user_id = user.id;
    let uc = ProfileCompletionUseCase {
        users: MockUserRepo::new(vec![user]),
        profiles: MockProfiles::with(user_id, UserType::Customer, complete_customer()),
    };

    let completion = uc.execute(user_id).await.unwrap();

    assert!(completion.is_complete);
    assert_eq!(completion.user_type, UserType::Customer);
    assert_eq!(completion.email, "ada@example.com");
    assert!(completion.missing_fields.is_empty());
}

#[tokio::test]
async fn should_report_missing_user_type_for_pending() {
    let user = pending_google_user();
    let user_id = user.id;
    let uc = ProfileCompletionUseCase {
        users: MockUserRepo::new(vec![user]),
        profiles: MockProfiles::default(),
    };

    let completion = uc.execute(user_id).await.unwrap();

    assert!(!completion.is_complete);
    assert_eq!(completion.missing_fields, vec![MISSING_USER_TYPE]);
}

#[tokio::test]
async fn should_report_basic_info_when_profile_absent() {
    let user = local_user("ada@example.com", "password123", UserType::Customer);
    let user_id = user.id;
    let uc = ProfileCompletionUseCase {
        users: MockUserRepo::new(vec![user]),
        profiles: MockProfiles::default(),
    };

    let completion = uc.execute(user_id).await.unwrap();

    assert_eq!(completion.missing_fields, vec![MISSING_BASIC_INFO]);
}

#[tokio::test]
async fn should_report_profile_data_when_lookup_fails() {
    let user = local_user("ada@example.com", "password123", UserType::Customer);
    let user_id = user.id;
    let uc = ProfileCompletionUseCase {
        users: MockUserRepo::new(vec![user]),
        profiles: MockProfiles::unavailable(),
    };

    let completion = uc.execute(user_id).await.unwrap();

    assert!(!completion.is_complete);
    assert_eq!(completion.missing_fields, vec![MISSING_PROFILE_DATA]);
}

#[tokio::test]
async fn should_return_not_found_for_unknown_completion_user() {
    let uc = ProfileCompletionUseCase {
        users: MockUserRepo::default(),
        profiles: MockProfiles::default(),
    };
    let result = uc.execute(Uuid::new_v4()).await;
    assert!(
        matches!(result, Err(AuthServiceError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}
