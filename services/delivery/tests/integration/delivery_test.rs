use uuid::Uuid;

use nomnom_delivery::domain::types::{DeliveryFilter, DeliveryRef};
use nomnom_delivery::error::DeliveryServiceError;
use nomnom_delivery::usecase::delivery::{
    CreateDeliveryInput, CreateDeliveryUseCase, GetDeliveryUseCase, ListDeliveriesUseCase,
    UpdateDeliveryStatusUseCase,
};
use nomnom_domain::delivery::{DeliveryStatus, DriverApplicationStatus};
use nomnom_domain::pagination::PageRequest;

use crate::helpers::{
    MockApplicationRepo, MockDeliveryRepo, MockNotifier, Sent, StaleDeliveryRepo, application,
    approved_driver, pending_delivery,
};

fn status_usecase(
    deliveries: &MockDeliveryRepo,
    applications: &MockApplicationRepo,
    notifier: &MockNotifier,
) -> UpdateDeliveryStatusUseCase<MockDeliveryRepo, MockApplicationRepo, MockNotifier> {
    UpdateDeliveryStatusUseCase {
        deliveries: deliveries.clone(),
        applications: applications.clone(),
        notifier: notifier.clone(),
    }
}

fn create_input(order_id: &str) -> CreateDeliveryInput {
    CreateDeliveryInput {
        order_id: order_id.to_owned(),
        customer_id: Uuid::new_v4(),
        restaurant_id: None,
        customer_phone: Some(" ".to_owned()),
        customer_email: None,
        pickup_address: Some("1 Curry Lane".to_owned()),
        dropoff_address: Some("9 Home St".to_owned()),
    }
}

// ── Create ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_pending_delivery_and_notify_customer() {
    let repo = MockDeliveryRepo::default();
    let notifier = MockNotifier::default();
    let uc = CreateDeliveryUseCase {
        repo: repo.clone(),
        notifier: notifier.clone(),
    };

    let delivery = uc.execute(create_input(" ord-1 ")).await.unwrap();

    assert_eq!(delivery.order_id, "ord-1");
    assert_eq!(delivery.status, DeliveryStatus::Pending);
    assert_eq!(delivery.customer_phone, None);
    assert_eq!(repo.stored(delivery.id).order_id, "ord-1");
    assert_eq!(
        notifier.sent(),
        vec![Sent::Push {
            user_id: delivery.customer_id,
            event: "delivery.created".into()
        }]
    );
}

#[tokio::test]
async fn should_reject_second_delivery_for_same_order() {
    let uc = CreateDeliveryUseCase {
        repo: MockDeliveryRepo::default(),
        notifier: MockNotifier::default(),
    };
    uc.execute(create_input("ord-1")).await.unwrap();
    let result = uc.execute(create_input("ord-1")).await;
    assert!(
        matches!(result, Err(DeliveryServiceError::DeliveryAlreadyExists)),
        "expected DeliveryAlreadyExists, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_blank_order_id() {
    let uc = CreateDeliveryUseCase {
        repo: MockDeliveryRepo::default(),
        notifier: MockNotifier::default(),
    };
    let result = uc.execute(create_input("  ")).await;
    assert!(matches!(result, Err(DeliveryServiceError::InvalidRequest(_))));
}

// ── Status transitions ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_walk_happy_path_and_stamp_each_step() {
    let delivery = pending_delivery("ord-1");
    let id = delivery.id;
    let deliveries = MockDeliveryRepo::new(vec![delivery]);
    let applications = MockApplicationRepo::default();
    let driver = approved_driver(&applications);
    let uc = status_usecase(&deliveries, &applications, &MockNotifier::default());

    let accepted = uc
        .execute(DeliveryRef::Order("ord-1".into()), DeliveryStatus::Accepted, Some(driver))
        .await
        .unwrap();
    assert_eq!(accepted.driver_id, Some(driver));
    assert!(accepted.accepted_at.is_some());

    let picked_up = uc
        .execute(DeliveryRef::Id(id), DeliveryStatus::InProgress, None)
        .await
        .unwrap();
    assert!(picked_up.picked_up_at.is_some());

    let delivered = uc
        .execute(DeliveryRef::Id(id), DeliveryStatus::Delivered, None)
        .await
        .unwrap();
    assert!(delivered.delivered_at.is_some());
    assert_eq!(delivered.driver_id, Some(driver));
    assert_eq!(deliveries.stored(id).status, DeliveryStatus::Delivered);
}

#[tokio::test]
async fn should_reject_moving_delivered_back_to_pending() {
    let mut delivery = pending_delivery("ord-1");
    delivery.status = DeliveryStatus::Delivered;
    let id = delivery.id;
    let deliveries = MockDeliveryRepo::new(vec![delivery]);
    let uc = status_usecase(
        &deliveries,
        &MockApplicationRepo::default(),
        &MockNotifier::default(),
    );

    let result = uc
        .execute(DeliveryRef::Id(id), DeliveryStatus::Pending, None)
        .await;
    assert!(
        matches!(
            result,
            Err(DeliveryServiceError::InvalidStatusTransition(ref e))
                if e.from == DeliveryStatus::Delivered && e.to == DeliveryStatus::Pending
        ),
        "expected InvalidStatusTransition, got {result:?}"
    );
    assert_eq!(deliveries.stored(id).status, DeliveryStatus::Delivered);
}

#[tokio::test]
async fn should_reject_skipping_pickup() {
    let delivery = pending_delivery("ord-1");
    let id = delivery.id;
    let uc = status_usecase(
        &MockDeliveryRepo::new(vec![delivery]),
        &MockApplicationRepo::default(),
        &MockNotifier::default(),
    );
    let result = uc
        .execute(DeliveryRef::Id(id), DeliveryStatus::Delivered, None)
        .await;
    assert!(
        matches!(result, Err(DeliveryServiceError::InvalidStatusTransition(_))),
        "expected InvalidStatusTransition, got {result:?}"
    );
}

#[tokio::test]
async fn should_require_driver_to_accept() {
    let delivery = pending_delivery("ord-1");
    let id = delivery.id;
    let uc = status_usecase(
        &MockDeliveryRepo::new(vec![delivery]),
        &MockApplicationRepo::default(),
        &MockNotifier::default(),
    );
    let result = uc
        .execute(DeliveryRef::Id(id), DeliveryStatus::Accepted, None)
        .await;
    assert!(
        matches!(result, Err(DeliveryServiceError::DriverRequired)),
        "expected DriverRequired, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_driver_without_approved_application() {
    let delivery = pending_delivery("ord-1");
    let id = delivery.id;
    let pending_driver = Uuid::new_v4();
    let applications =
        MockApplicationRepo::new(vec![application(pending_driver, DriverApplicationStatus::Pending)]);
    let uc = status_usecase(
        &MockDeliveryRepo::new(vec![delivery]),
        &applications,
        &MockNotifier::default(),
    );

    for driver in [pending_driver, Uuid::new_v4()] {
        let result = uc
            .execute(DeliveryRef::Id(id), DeliveryStatus::Accepted, Some(driver))
            .await;
        assert!(
            matches!(result, Err(DeliveryServiceError::DriverNotApproved)),
            "expected DriverNotApproved, got {result:?}"
        );
    }
}

#[tokio::test]
async fn should_treat_repeated_accept_by_same_driver_as_noop() {
    let delivery = pending_delivery("ord-1");
    let id = delivery.id;
    let deliveries = MockDeliveryRepo::new(vec![delivery]);
    let applications = MockApplicationRepo::default();
    let driver = approved_driver(&applications);
    let notifier = MockNotifier::default();
    let uc = status_usecase(&deliveries, &applications, &notifier);

    let first = uc
        .execute(DeliveryRef::Id(id), DeliveryStatus::Accepted, Some(driver))
        .await
        .unwrap();
    let sent_after_first = notifier.sent().len();
    let second = uc
        .execute(DeliveryRef::Id(id), DeliveryStatus::Accepted, Some(driver))
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(notifier.sent().len(), sent_after_first);
}

#[tokio::test]
async fn should_reject_accept_by_second_driver() {
    let delivery = pending_delivery("ord-1");
    let id = delivery.id;
    let deliveries = MockDeliveryRepo::new(vec![delivery]);
    let applications = MockApplicationRepo::default();
    let first_driver = approved_driver(&applications);
    let second_driver = approved_driver(&applications);
    let uc = status_usecase(&deliveries, &applications, &MockNotifier::default());

    uc.execute(DeliveryRef::Id(id), DeliveryStatus::Accepted, Some(first_driver))
        .await
        .unwrap();
    let result = uc
        .execute(DeliveryRef::Id(id), DeliveryStatus::Accepted, Some(second_driver))
        .await;

    assert!(
        matches!(result, Err(DeliveryServiceError::DeliveryAlreadyAssigned)),
        "expected DeliveryAlreadyAssigned, got {result:?}"
    );
    assert_eq!(deliveries.stored(id).driver_id, Some(first_driver));
}

#[tokio::test]
async fn should_let_exactly_one_of_two_concurrent_accepts_win() {
    let delivery = pending_delivery("ord-1");
    let id = delivery.id;
    let deliveries = MockDeliveryRepo::new(vec![delivery]);
    let applications = MockApplicationRepo::default();
    let driver_a = approved_driver(&applications);
    let driver_b = approved_driver(&applications);
    let notifier = MockNotifier::default();
    let uc_a = status_usecase(&deliveries, &applications, &notifier);
    let uc_b = status_usecase(&deliveries, &applications, &notifier);

    let (a, b) = tokio::join!(
        uc_a.execute(DeliveryRef::Id(id), DeliveryStatus::Accepted, Some(driver_a)),
        uc_b.execute(DeliveryRef::Id(id), DeliveryStatus::Accepted, Some(driver_b)),
    );

    let winner = match (&a, &b) {
        (Ok(d), Err(_)) | (Err(_), Ok(d)) => d.driver_id,
        _ => panic!("expected exactly one winner, got {a:?} and {b:?}"),
    };
    let loser = if a.is_ok() { b } else { a };
    assert!(
        matches!(
            loser,
            Err(DeliveryServiceError::DeliveryAlreadyAssigned | DeliveryServiceError::StatusConflict)
        ),
        "expected a conflict for the loser, got {loser:?}"
    );
    assert_eq!(deliveries.stored(id).driver_id, winner);
}

#[tokio::test]
async fn should_return_status_conflict_when_row_changed_after_read() {
    // Another request cancelled the delivery after this one loaded it as PENDING.
    let snapshot = pending_delivery("ord-1");
    let id = snapshot.id;
    let mut current = snapshot.clone();
    current.status = DeliveryStatus::Cancelled;
    let shared = MockDeliveryRepo::new(vec![current]);

    let applications = MockApplicationRepo::default();
    let driver = approved_driver(&applications);
    let uc = UpdateDeliveryStatusUseCase {
        deliveries: StaleDeliveryRepo {
            inner: shared.clone(),
            snapshot,
        },
        applications,
        notifier: MockNotifier::default(),
    };

    let result = uc
        .execute(DeliveryRef::Id(id), DeliveryStatus::Accepted, Some(driver))
        .await;
    assert!(
        matches!(result, Err(DeliveryServiceError::StatusConflict)),
        "expected StatusConflict, got {result:?}"
    );
    let stored = shared.stored(id);
    assert_eq!(stored.status, DeliveryStatus::Cancelled);
    assert_eq!(stored.driver_id, None);
}

#[tokio::test]
async fn should_notify_customer_driver_and_sms_on_accept() {
    let delivery = pending_delivery("ord-1");
    let id = delivery.id;
    let customer = delivery.customer_id;
    let deliveries = MockDeliveryRepo::new(vec![delivery]);
    let applications = MockApplicationRepo::default();
    let driver = approved_driver(&applications);
    let notifier = MockNotifier::default();
    let uc = status_usecase(&deliveries, &applications, &notifier);

    uc.execute(DeliveryRef::Id(id), DeliveryStatus::Accepted, Some(driver))
        .await
        .unwrap();

    assert_eq!(
        notifier.sent(),
        vec![
            Sent::Push {
                user_id: customer,
                event: "delivery.status".into()
            },
            Sent::Push {
                user_id: driver,
                event: "delivery.assigned".into()
            },
            Sent::Sms {
                to: "+15550100".into()
            },
        ]
    );
}

#[tokio::test]
async fn should_commit_status_even_when_notifications_fail() {
    let delivery = pending_delivery("ord-1");
    let id = delivery.id;
    let deliveries = MockDeliveryRepo::new(vec![delivery]);
    let uc = status_usecase(
        &deliveries,
        &MockApplicationRepo::default(),
        &MockNotifier::failing(),
    );

    let cancelled = uc
        .execute(DeliveryRef::Id(id), DeliveryStatus::Cancelled, None)
        .await
        .unwrap();
    assert!(cancelled.cancelled_at.is_some());
    assert_eq!(deliveries.stored(id).status, DeliveryStatus::Cancelled);
}

#[tokio::test]
async fn should_return_not_found_for_unknown_order() {
    let uc = status_usecase(
        &MockDeliveryRepo::default(),
        &MockApplicationRepo::default(),
        &MockNotifier::default(),
    );
    let result = uc
        .execute(DeliveryRef::Order("missing".into()), DeliveryStatus::Cancelled, None)
        .await;
    assert!(
        matches!(result, Err(DeliveryServiceError::DeliveryNotFound)),
        "expected DeliveryNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_report_missing_delivery_before_driver_approval() {
    let uc = status_usecase(
        &MockDeliveryRepo::default(),
        &MockApplicationRepo::default(),
        &MockNotifier::default(),
    );
    let result = uc
        .execute(
            DeliveryRef::Id(Uuid::new_v4()),
            DeliveryStatus::Accepted,
            Some(Uuid::new_v4()),
        )
        .await;
    assert!(
        matches!(result, Err(DeliveryServiceError::DeliveryNotFound)),
        "expected DeliveryNotFound, got {result:?}"
    );
}

// ── Queries ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_get_delivery_by_order_id() {
    let delivery = pending_delivery("ord-7");
    let id = delivery.id;
    let uc = GetDeliveryUseCase {
        repo: MockDeliveryRepo::new(vec![delivery]),
    };
    let found = uc.execute(DeliveryRef::Order("ord-7".into())).await.unwrap();
    assert_eq!(found.id, id);
}

#[tokio::test]
async fn should_list_only_pending_deliveries() {
    let open = pending_delivery("ord-1");
    let mut done = pending_delivery("ord-2");
    done.status = DeliveryStatus::Delivered;
    let uc = ListDeliveriesUseCase {
        repo: MockDeliveryRepo::new(vec![open.clone(), done]),
    };

    let listed = uc
        .execute(
            DeliveryFilter {
                driver_id: None,
                status: Some(DeliveryStatus::Pending),
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, open.id);
}
