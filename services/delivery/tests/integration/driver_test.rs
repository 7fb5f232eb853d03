use uuid::Uuid;

use nomnom_delivery::error::DeliveryServiceError;
use nomnom_delivery::usecase::driver::{
    ApplyDriverInput, ApplyDriverUseCase, DecideDriverApplicationUseCase,
    GetDriverApplicationUseCase,
};
use nomnom_domain::delivery::DriverApplicationStatus;

use crate::helpers::{MockApplicationRepo, MockNotifier, Sent, application};

fn apply_input(user_id: Uuid) -> ApplyDriverInput {
    ApplyDriverInput {
        user_id,
        vehicle_number: " KA-01-1234 ".to_owned(),
        vehicle_type_id: 2,
        license_number: "DL-998877".to_owned(),
        phone: Some(String::new()),
        email: Some("dan@example.com".to_owned()),
    }
}

#[tokio::test]
async fn should_file_pending_application() {
    let applications = MockApplicationRepo::default();
    let uc = ApplyDriverUseCase {
        applications: applications.clone(),
    };
    let user_id = Uuid::new_v4();

    let app = uc.execute(apply_input(user_id)).await.unwrap();

    assert_eq!(app.status, DriverApplicationStatus::Pending);
    assert_eq!(app.vehicle_number, "KA-01-1234");
    assert_eq!(app.phone, None);
    let stored = GetDriverApplicationUseCase { applications }
        .execute(user_id)
        .await
        .unwrap();
    assert_eq!(stored, app);
}

#[tokio::test]
async fn should_reject_second_application_while_first_is_open() {
    let user_id = Uuid::new_v4();
    for status in [DriverApplicationStatus::Pending, DriverApplicationStatus::Approved] {
        let uc = ApplyDriverUseCase {
            applications: MockApplicationRepo::new(vec![application(user_id, status)]),
        };
        let result = uc.execute(apply_input(user_id)).await;
        assert!(
            matches!(result, Err(DeliveryServiceError::ApplicationAlreadyExists)),
            "expected ApplicationAlreadyExists for {status:?}, got {result:?}"
        );
    }
}

#[tokio::test]
async fn should_let_rejected_applicant_reapply() {
    let user_id = Uuid::new_v4();
    let uc = ApplyDriverUseCase {
        applications: MockApplicationRepo::new(vec![application(
            user_id,
            DriverApplicationStatus::Rejected,
        )]),
    };
    let app = uc.execute(apply_input(user_id)).await.unwrap();
    assert_eq!(app.status, DriverApplicationStatus::Pending);
    assert_eq!(app.decided_at, None);
}

#[tokio::test]
async fn should_require_vehicle_and_license() {
    let uc = ApplyDriverUseCase {
        applications: MockApplicationRepo::default(),
    };
    let result = uc
        .execute(ApplyDriverInput {
            license_number: "  ".to_owned(),
            ..apply_input(Uuid::new_v4())
        })
        .await;
    assert!(matches!(result, Err(DeliveryServiceError::InvalidRequest(_))));
}

#[tokio::test]
async fn should_approve_and_notify_applicant() {
    let user_id = Uuid::new_v4();
    let notifier = MockNotifier::default();
    let uc = DecideDriverApplicationUseCase {
        applications: MockApplicationRepo::new(vec![application(
            user_id,
            DriverApplicationStatus::Pending,
        )]),
        notifier: notifier.clone(),
    };

    let app = uc
        .execute(user_id, DriverApplicationStatus::Approved)
        .await
        .unwrap();

    assert_eq!(app.status, DriverApplicationStatus::Approved);
    assert!(app.decided_at.is_some());
    assert_eq!(
        notifier.sent(),
        vec![
            Sent::Push {
                user_id,
                event: "driver.application".into()
            },
            Sent::Email {
                to: "driver@example.com".into()
            },
        ]
    );
}

#[tokio::test]
async fn should_refuse_to_decide_twice() {
    let user_id = Uuid::new_v4();
    let uc = DecideDriverApplicationUseCase {
        applications: MockApplicationRepo::new(vec![application(
            user_id,
            DriverApplicationStatus::Pending,
        )]),
        notifier: MockNotifier::default(),
    };
    uc.execute(user_id, DriverApplicationStatus::Rejected)
        .await
        .unwrap();
    let result = uc.execute(user_id, DriverApplicationStatus::Approved).await;
    assert!(
        matches!(result, Err(DeliveryServiceError::ApplicationAlreadyDecided)),
        "expected ApplicationAlreadyDecided, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_pending_as_decision() {
    let user_id = Uuid::new_v4();
    let uc = DecideDriverApplicationUseCase {
        applications: MockApplicationRepo::new(vec![application(
            user_id,
            DriverApplicationStatus::Pending,
        )]),
        notifier: MockNotifier::default(),
    };
    let result = uc.execute(user_id, DriverApplicationStatus::Pending).await;
    assert!(matches!(result, Err(DeliveryServiceError::InvalidRequest(_))));
}

#[tokio::test]
async fn should_return_not_found_for_unknown_applicant() {
    let uc = DecideDriverApplicationUseCase {
        applications: MockApplicationRepo::default(),
        notifier: MockNotifier::default(),
    };
    let result = uc
        .execute(Uuid::new_v4(), DriverApplicationStatus::Approved)
        .await;
    assert!(
        matches!(result, Err(DeliveryServiceError::ApplicationNotFound)),
        "expected ApplicationNotFound, got {result:?}"
    );
}
