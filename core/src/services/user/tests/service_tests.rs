//! Unit tests for user management.

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::user::{Photo, UserType};
use crate::errors::DomainError;
use crate::repositories::user::MockUserRepository;
use crate::services::user::{NewUser, UserService};

fn service() -> UserService<MockUserRepository> {
    UserService::new(Arc::new(MockUserRepository::new()))
}

fn student(reg_no: i64) -> NewUser {
    NewUser {
        reg_no: Some(reg_no),
        national_id: None,
        name: "Test Student".to_string(),
        photo: None,
        user_type: UserType::Student,
    }
}

fn guest(national_id: i64) -> NewUser {
    NewUser {
        reg_no: None,
        national_id: Some(national_id),
        name: "Test Guest".to_string(),
        photo: None,
        user_type: UserType::Guest,
    }
}

fn png_photo() -> Photo {
    Photo {
        data: vec![0x89, 0x50, 0x4e, 0x47],
        content_type: "image/png".to_string(),
    }
}

#[tokio::test]
async fn create_student_and_fetch_back() {
    let service = service();
    let created = service.create(student(12345)).await.unwrap();

    let fetched = service.get(created.id).await.unwrap();
    assert_eq!(fetched.reg_no, Some(12345));
    assert_eq!(fetched.user_type, UserType::Student);
}

#[tokio::test]
async fn create_rejects_student_without_reg_no() {
    let service = service();
    let mut data = student(12345);
    data.reg_no = None;

    let err = service.create(data).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[tokio::test]
async fn create_rejects_guest_without_national_id() {
    let service = service();
    let mut data = guest(98765432);
    data.national_id = None;

    let err = service.create(data).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[tokio::test]
async fn create_rejects_both_identifiers() {
    let service = service();
    let mut data = student(12345);
    data.national_id = Some(98765432);

    let err = service.create(data).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[tokio::test]
async fn create_rejects_empty_name() {
    let service = service();
    let mut data = student(12345);
    data.name = "  ".to_string();

    let err = service.create(data).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[tokio::test]
async fn create_rejects_duplicate_reg_no() {
    let service = service();
    service.create(student(12345)).await.unwrap();

    let err = service.create(student(12345)).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict { .. }));
}

#[tokio::test]
async fn create_rejects_duplicate_national_id() {
    let service = service();
    service.create(guest(98765432)).await.unwrap();

    let err = service.create(guest(98765432)).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict { .. }));
}

#[tokio::test]
async fn update_applies_new_details() {
    let service = service();
    let created = service.create(student(12345)).await.unwrap();

    let mut data = student(12345);
    data.name = "Renamed Student".to_string();
    let updated = service.update(created.id, data).await.unwrap();

    assert_eq!(updated.name, "Renamed Student");
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn update_unknown_user_is_not_found() {
    let service = service();
    let err = service
        .update(Uuid::new_v4(), student(12345))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn delete_removes_the_user() {
    let service = service();
    let created = service.create(student(12345)).await.unwrap();

    service.delete(created.id).await.unwrap();
    let err = service.get(created.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));

    let err = service.delete(created.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn photo_is_served_for_either_identifier() {
    let service = service();
    let mut with_photo = student(12345);
    with_photo.photo = Some(png_photo());
    service.create(with_photo).await.unwrap();

    let mut guest_with_photo = guest(98765432);
    guest_with_photo.photo = Some(png_photo());
    service.create(guest_with_photo).await.unwrap();

    let photo = service.photo(12345).await.unwrap();
    assert_eq!(photo.content_type, "image/png");
    let photo = service.photo(98765432).await.unwrap();
    assert_eq!(photo.content_type, "image/png");
}

#[tokio::test]
async fn photo_is_not_found_without_an_upload() {
    let service = service();
    service.create(student(12345)).await.unwrap();

    let err = service.photo(12345).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));

    let err = service.photo(424242).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn update_keeps_photo_when_not_resupplied() {
    let service = service();
    let mut data = student(12345);
    data.photo = Some(png_photo());
    let created = service.create(data).await.unwrap();

    service.update(created.id, student(12345)).await.unwrap();
    let photo = service.photo(12345).await.unwrap();
    assert_eq!(photo.content_type, "image/png");
}
