//! Unit tests for the registration coordinator, covering the
//! redeem-then-write sequence and its compensating rollback.

use std::sync::Arc;

use cr_shared::types::pagination::Pagination;

use crate::domain::entities::user::{User, UserType};
use crate::errors::{DomainError, TokenError};
use crate::repositories::computer::MockComputerRepository;
use crate::repositories::token::{MockTokenRepository, TokenRepository};
use crate::repositories::user::{MockUserRepository, UserRepository};
use crate::services::registration::{NewRegistration, OwnerRef, RegistrationService};
use crate::services::token::TokenService;

struct Fixture {
    tokens: Arc<MockTokenRepository>,
    service: RegistrationService<MockTokenRepository, MockComputerRepository, MockUserRepository>,
    token_service: Arc<TokenService<MockTokenRepository>>,
}

async fn fixture() -> Fixture {
    let tokens = Arc::new(MockTokenRepository::new());
    let computers = Arc::new(MockComputerRepository::new());
    let users = Arc::new(MockUserRepository::new());

    let student = User::new(Some(12345), None, "Test Student", None, UserType::Student);
    users.insert(&student).await.unwrap();
    let guest = User::new(None, Some(98765432), "Test Guest", None, UserType::Guest);
    users.insert(&guest).await.unwrap();

    let token_service = Arc::new(TokenService::new(tokens.clone()));
    let service = RegistrationService::new(token_service.clone(), computers, users);

    Fixture {
        tokens,
        service,
        token_service,
    }
}

fn student_registration(serial_no: &str) -> NewRegistration {
    NewRegistration {
        owner: OwnerRef {
            reg_no: Some(12345),
            national_id: None,
        },
        serial_no: serial_no.to_string(),
        brand: "Dell".to_string(),
    }
}

async fn issue_code(fixture: &Fixture) -> String {
    fixture.token_service.issue(1).await.unwrap()[0].code.clone()
}

async fn assert_token_used(fixture: &Fixture, code: &str, used: bool) {
    let token = fixture.tokens.find_by_code(code).await.unwrap().unwrap();
    assert_eq!(token.is_used, used);
}

#[tokio::test]
async fn register_burns_the_token_and_links_it() {
    let fixture = fixture().await;
    let code = issue_code(&fixture).await;

    let computer = fixture
        .service
        .register(&code, student_registration("SN123456"))
        .await
        .unwrap();

    assert_eq!(computer.token_code, code);
    assert_eq!(computer.serial_no, "SN123456");
    assert_token_used(&fixture, &code, true).await;
}

#[tokio::test]
async fn register_for_guest_resolves_by_national_id() {
    let fixture = fixture().await;
    let code = issue_code(&fixture).await;

    let registration = NewRegistration {
        owner: OwnerRef {
            reg_no: None,
            national_id: Some(98765432),
        },
        serial_no: "SN789012".to_string(),
        brand: "HP".to_string(),
    };
    fixture.service.register(&code, registration).await.unwrap();
    assert_token_used(&fixture, &code, true).await;
}

#[tokio::test]
async fn register_with_used_token_fails_without_side_effects() {
    let fixture = fixture().await;
    let code = issue_code(&fixture).await;

    fixture
        .service
        .register(&code, student_registration("SN123456"))
        .await
        .unwrap();

    let err = fixture
        .service
        .register(&code, student_registration("SN999999"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::AlreadyUsed)));
    // The original registration and its token linkage are untouched
    assert_token_used(&fixture, &code, true).await;
}

#[tokio::test]
async fn duplicate_serial_rolls_the_token_back() {
    let fixture = fixture().await;
    let first = issue_code(&fixture).await;
    let second = issue_code(&fixture).await;

    fixture
        .service
        .register(&first, student_registration("SN123456"))
        .await
        .unwrap();

    let err = fixture
        .service
        .register(&second, student_registration("SN123456"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict { .. }));

    // The losing token was compensated back to unused
    assert_token_used(&fixture, &second, false).await;
    assert_token_used(&fixture, &first, true).await;
}

#[tokio::test]
async fn unknown_owner_rolls_the_token_back() {
    let fixture = fixture().await;
    let code = issue_code(&fixture).await;

    let registration = NewRegistration {
        owner: OwnerRef {
            reg_no: Some(99999),
            national_id: None,
        },
        serial_no: "SN123456".to_string(),
        brand: "Dell".to_string(),
    };
    let err = fixture.service.register(&code, registration).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
    assert_token_used(&fixture, &code, false).await;
}

#[tokio::test]
async fn shape_validation_happens_before_redemption() {
    let fixture = fixture().await;
    let code = issue_code(&fixture).await;

    let registration = NewRegistration {
        owner: OwnerRef::default(),
        serial_no: "SN123456".to_string(),
        brand: "Dell".to_string(),
    };
    let err = fixture.service.register(&code, registration).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
    // Token was never claimed, not claimed-and-released
    assert_token_used(&fixture, &code, false).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_registrations_on_one_token_succeed_exactly_once() {
    let fixture = fixture().await;
    let code = issue_code(&fixture).await;
    let service = Arc::new(fixture.service);

    let mut handles = Vec::new();
    for i in 0..3 {
        let service = service.clone();
        let code = code.clone();
        handles.push(tokio::spawn(async move {
            service
                .register(&code, student_registration(&format!("SN-{i}")))
                .await
        }));
    }

    let mut ok = 0;
    let mut already_used = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => ok += 1,
            Err(DomainError::Token(TokenError::AlreadyUsed)) => already_used += 1,
            Err(other) => panic!("unexpected registration error: {other}"),
        }
    }

    assert_eq!(ok, 1);
    assert_eq!(already_used, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_registrations_on_one_serial_succeed_exactly_once() {
    let fixture = fixture().await;
    let first = issue_code(&fixture).await;
    let second = issue_code(&fixture).await;
    let tokens = fixture.tokens.clone();
    let service = Arc::new(fixture.service);

    let a = {
        let service = service.clone();
        let code = first.clone();
        tokio::spawn(async move { service.register(&code, student_registration("SN123456")).await })
    };
    let b = {
        let service = service.clone();
        let code = second.clone();
        tokio::spawn(async move { service.register(&code, student_registration("SN123456")).await })
    };

    let results = [a.await.unwrap(), b.await.unwrap()];
    let ok = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(DomainError::Conflict { .. })))
        .count();
    assert_eq!(ok, 1);
    assert_eq!(conflicts, 1);

    // Exactly one token stays burned; the loser was rolled back
    let mut used = 0;
    for code in [&first, &second] {
        if tokens.find_by_code(code).await.unwrap().unwrap().is_used {
            used += 1;
        }
    }
    assert_eq!(used, 1);
}

#[tokio::test]
async fn update_relinks_an_existing_registration() {
    let fixture = fixture().await;
    let first = issue_code(&fixture).await;
    let second = issue_code(&fixture).await;

    fixture
        .service
        .register(&first, student_registration("SN123456"))
        .await
        .unwrap();

    let mut updated = student_registration("SN123456");
    updated.brand = "HP".to_string();
    let computer = fixture.service.update(&second, updated).await.unwrap();

    assert_eq!(computer.token_code, second);
    assert_eq!(computer.brand, "HP");
    assert_eq!(computer.serial_no, "SN123456");
    assert_token_used(&fixture, &second, true).await;
}

#[tokio::test]
async fn update_without_prior_registration_rolls_the_token_back() {
    let fixture = fixture().await;
    let code = issue_code(&fixture).await;

    let err = fixture
        .service
        .update(&code, student_registration("NONEXISTENT"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
    assert_token_used(&fixture, &code, false).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_updates_of_one_computer_succeed_exactly_once_per_token() {
    // Two updates with two fresh tokens targeting the same record: both
    // tokens are independently claimable, so both updates go through
    // sequentially-consistent relinks; the record ends linked to exactly one
    // of the two codes.
    let fixture = fixture().await;
    let first = issue_code(&fixture).await;
    let second = issue_code(&fixture).await;
    let third = issue_code(&fixture).await;

    fixture
        .service
        .register(&first, student_registration("SN123456"))
        .await
        .unwrap();

    let service = Arc::new(fixture.service);
    let a = {
        let service = service.clone();
        let code = second.clone();
        tokio::spawn(async move { service.update(&code, student_registration("SN123456")).await })
    };
    let b = {
        let service = service.clone();
        let code = third.clone();
        tokio::spawn(async move { service.update(&code, student_registration("SN123456")).await })
    };

    let results = [a.await.unwrap(), b.await.unwrap()];
    assert!(results.iter().all(|r| r.is_ok()));

    // The record ends up linked to exactly one of the two new codes
    let mut linked = 0;
    for code in [&second, &third] {
        if service.verify(code).await.is_ok() {
            linked += 1;
        }
    }
    assert_eq!(linked, 1);
}

#[tokio::test]
async fn verify_returns_owner_details() {
    let fixture = fixture().await;
    let code = issue_code(&fixture).await;

    fixture
        .service
        .register(&code, student_registration("SN123456"))
        .await
        .unwrap();

    let details = fixture.service.verify(&code).await.unwrap();
    assert_eq!(details.computer.serial_no, "SN123456");
    assert_eq!(details.owner.reg_no, Some(12345));
    assert_eq!(details.owner.name, "Test Student");
}

#[tokio::test]
async fn verify_unknown_code_is_not_found() {
    let fixture = fixture().await;
    let err = fixture.service.verify(&"a".repeat(64)).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn search_pages_through_owned_registrations() {
    let fixture = fixture().await;
    for i in 0..3 {
        let code = issue_code(&fixture).await;
        fixture
            .service
            .register(&code, student_registration(&format!("SN-{i}")))
            .await
            .unwrap();
    }

    let owner = OwnerRef {
        reg_no: Some(12345),
        national_id: None,
    };
    let (computers, total) = fixture
        .service
        .search(&owner, &Pagination::new(1, 2))
        .await
        .unwrap();
    assert_eq!(computers.len(), 2);
    assert_eq!(total, 3);

    let (rest, _) = fixture
        .service
        .search(&owner, &Pagination::new(2, 2))
        .await
        .unwrap();
    assert_eq!(rest.len(), 1);
}

#[tokio::test]
async fn search_for_unknown_owner_is_not_found() {
    let fixture = fixture().await;
    let owner = OwnerRef {
        reg_no: Some(424242),
        national_id: None,
    };
    let err = fixture
        .service
        .search(&owner, &Pagination::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}
