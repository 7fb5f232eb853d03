use chrono::Utc;

use nomnom_auth::domain::password::verify_password;
use nomnom_auth::domain::types::AuthUser;
use nomnom_auth::error::AuthServiceError;
use nomnom_auth::usecase::local::{SignInInput, SignInUseCase, SignUpInput, SignUpUseCase};
use nomnom_domain::user::{AuthProvider, UserType};

use crate::helpers::*;

fn sign_up_input(email: &str, password: &str) -> SignUpInput {
    SignUpInput {
        email: email.to_owned(),
        password: password.to_owned(),
        user_type: None,
        meta: meta(),
    }
}

fn sign_in_input(email: &str, password: &str) -> SignInInput {
    SignInInput {
        email: email.to_owned(),
        password: password.to_owned(),
        meta: meta(),
    }
}

// ── SignUp ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_sign_up_with_hashed_password() {
    let users = MockUserRepo::default();
    let sessions = MockSessions::default();
    let uc = SignUpUseCase {
        users: users.clone(),
        sessions: sessions.clone(),
    };

    let out = uc
        .execute(SignUpInput {
            user_type: Some(UserType::Restaurant),
            ..sign_up_input("Chef@Example.com", "s3cret-pass")
        })
        .await
        .unwrap();

    assert!(out.is_new_user);
    assert!(out.profile_incomplete);
    assert_eq!(out.session.user_type, UserType::Restaurant);

    let stored = users.stored(out.user.id);
    assert_eq!(stored.email, "chef@example.com");
    assert_eq!(stored.auth_provider, AuthProvider::Local);
    assert!(!stored.is_google_user);
    let hash = stored.password_hash.unwrap();
    assert_ne!(hash, "s3cret-pass");
    assert!(verify_password("s3cret-pass", &hash));
    assert_eq!(sessions.all().len(), 1);
}

#[tokio::test]
async fn should_default_sign_up_to_pending() {
    let uc = SignUpUseCase {
        users: MockUserRepo::default(),
        sessions: MockSessions::default(),
    };
    let out = uc
        .execute(sign_up_input("ada@example.com", "password123"))
        .await
        .unwrap();
    assert_eq!(out.user.user_type, UserType::Pending);
}

#[tokio::test]
async fn should_reject_duplicate_email() {
    let existing = local_user("ada@example.com", "password123", UserType::Customer);
    let users = MockUserRepo::new(vec![existing]);
    let uc = SignUpUseCase {
        users: users.clone(),
        sessions: MockSessions::default(),
    };
    let result = uc
        .execute(sign_up_input("ADA@example.com", "password456"))
        .await;
    assert!(
        matches!(result, Err(AuthServiceError::UserAlreadyExists)),
        "expected UserAlreadyExists, got {result:?}"
    );
    assert_eq!(users.all().len(), 1);
}

#[tokio::test]
async fn should_reject_short_password() {
    let users = MockUserRepo::default();
    let uc = SignUpUseCase {
        users: users.clone(),
        sessions: MockSessions::default(),
    };
    let result = uc.execute(sign_up_input("ada@example.com", "short")).await;
    assert!(
        matches!(result, Err(AuthServiceError::InvalidRequest(_))),
        "expected InvalidRequest, got {result:?}"
    );
    assert!(users.all().is_empty());
}

// ── SignIn ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_sign_in_with_correct_password() {
    let user = local_user("ada@example.com", "password123", UserType::Customer);
    let user_id = user.id;
    let sessions = MockSessions::default();
    let uc = SignInUseCase {
        users: MockUserRepo::new(vec![user]),
        sessions: sessions.clone(),
        profiles: MockProfiles::with(user_id, UserType::Customer, complete_customer()),
    };

    let out = uc
        .execute(sign_in_input(" Ada@Example.com", "password123"))
        .await
        .unwrap();

    assert_eq!(out.user.id, user_id);
    assert!(!out.is_new_user);
    assert!(!out.profile_incomplete);
    assert_eq!(out.first_name.as_deref(), Some("Ada"));
    let issued = sessions.all();
    assert_eq!(issued.len(), 1);
    assert_eq!(issued[0].info.user_id, user_id);
}

#[tokio::test]
async fn should_reject_wrong_password() {
    let user = local_user("ada@example.com", "password123", UserType::Customer);
    let sessions = MockSessions::default();
    let uc = SignInUseCase {
        users: MockUserRepo::new(vec![user]),
        sessions: sessions.clone(),
        profiles: MockProfiles::default(),
    };
    let result = uc.execute(sign_in_input("ada@example.com", "password124")).await;
    assert!(
        matches!(result, Err(AuthServiceError::InvalidCredentials)),
        "expected InvalidCredentials, got {result:?}"
    );
    assert!(sessions.all().is_empty());
}

#[tokio::test]
async fn should_reject_unknown_email_like_wrong_password() {
    let uc = SignInUseCase {
        users: MockUserRepo::default(),
        sessions: MockSessions::default(),
        profiles: MockProfiles::default(),
    };
    let result = uc.execute(sign_in_input("nobody@example.com", "password123")).await;
    assert!(
        matches!(result, Err(AuthServiceError::InvalidCredentials)),
        "expected InvalidCredentials, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_password_sign_in_for_google_only_account() {
    let user = AuthUser::from_google(
        "ada@example.com".to_owned(),
        GOOGLE_SUB.to_owned(),
        Utc::now(),
    );
    let uc = SignInUseCase {
        users: MockUserRepo::new(vec![user]),
        sessions: MockSessions::default(),
        profiles: MockProfiles::default(),
    };
    let result = uc.execute(sign_in_input("ada@example.com", "password123")).await;
    assert!(
        matches!(result, Err(AuthServiceError::InvalidCredentials)),
        "expected InvalidCredentials, got {result:?}"
    );
}
