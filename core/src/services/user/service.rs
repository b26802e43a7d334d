//! User service implementation: CRUD for students and guests.

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::user::{Photo, User, UserType};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::user::UserRepository;

/// Input for creating or updating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub reg_no: Option<i64>,
    pub national_id: Option<i64>,
    pub name: String,
    pub photo: Option<Photo>,
    pub user_type: UserType,
}

/// Service for managing the people computers are registered against.
pub struct UserService<U: UserRepository> {
    repository: Arc<U>,
}

impl<U: UserRepository> UserService<U> {
    /// Create a new user service
    pub fn new(repository: Arc<U>) -> Self {
        Self { repository }
    }

    /// Create a user.
    ///
    /// Enforces the identifier invariants (students carry a regNo, guests a
    /// nationalId, never both) and identifier uniqueness. The pre-check
    /// gives a friendly message; the unique keys in the store settle races.
    pub async fn create(&self, data: NewUser) -> DomainResult<User> {
        validate_identifiers(&data)?;

        match data.user_type {
            UserType::Student => {
                if let Some(reg_no) = data.reg_no {
                    if self.repository.find_by_reg_no(reg_no).await?.is_some() {
                        return Err(DomainError::conflict(
                            "User with the same regNo already exists",
                        ));
                    }
                }
            }
            UserType::Guest => {
                if let Some(national_id) = data.national_id {
                    if self
                        .repository
                        .find_by_national_id(national_id)
                        .await?
                        .is_some()
                    {
                        return Err(DomainError::conflict(
                            "User with the same nationalId already exists",
                        ));
                    }
                }
            }
        }

        let user = User::new(
            data.reg_no,
            data.national_id,
            data.name,
            data.photo,
            data.user_type,
        );
        self.repository.insert(&user).await?;

        tracing::info!(user_id = %user.id, user_type = user.user_type.as_str(), "user created");
        Ok(user)
    }

    /// Fetch a user by id.
    pub async fn get(&self, id: Uuid) -> DomainResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))
    }

    /// Update a user's details. A missing photo in the input keeps the
    /// stored one.
    pub async fn update(&self, id: Uuid, data: NewUser) -> DomainResult<User> {
        validate_identifiers(&data)?;

        let mut user = self.get(id).await?;
        user.apply_update(
            data.reg_no,
            data.national_id,
            data.name,
            data.photo,
            data.user_type,
        );

        if !self.repository.update(&user).await? {
            return Err(DomainError::not_found("User"));
        }
        Ok(user)
    }

    /// Delete a user by id.
    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        if !self.repository.delete(id).await? {
            return Err(DomainError::not_found("User"));
        }
        tracing::info!(user_id = %id, "user deleted");
        Ok(())
    }

    /// Fetch the stored photo for a regNo or nationalId.
    pub async fn photo(&self, identifier: i64) -> DomainResult<Photo> {
        let user = self
            .repository
            .find_by_identifier(identifier)
            .await?
            .ok_or_else(|| DomainError::not_found("Photo"))?;

        user.photo.ok_or_else(|| DomainError::not_found("Photo"))
    }
}

fn validate_identifiers(data: &NewUser) -> DomainResult<()> {
    if data.name.trim().is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    if data.reg_no.is_some() && data.national_id.is_some() {
        return Err(DomainError::validation(
            "User cannot have both regNo and nationalId",
        ));
    }
    match data.user_type {
        UserType::Student if data.reg_no.is_none() => {
            Err(DomainError::validation("Student must have regNo"))
        }
        UserType::Guest if data.national_id.is_none() => {
            Err(DomainError::validation("Guest must have nationalId"))
        }
        _ => Ok(()),
    }
}
