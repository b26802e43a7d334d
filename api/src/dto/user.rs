use base64::Engine;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use cr_core::domain::entities::user::{Photo, User, UserType};
use cr_core::errors::{DomainError, DomainResult};
use cr_core::services::user::NewUser;
use cr_shared::utils::validation::is_supported_photo_content_type;

/// Photo payload: base64-encoded bytes plus their content type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoUpload {
    pub data: String,
    pub content_type: String,
}

impl PhotoUpload {
    /// Decode into a stored [`Photo`], rejecting unsupported content types
    /// and malformed base64.
    pub fn decode(&self) -> DomainResult<Photo> {
        if !is_supported_photo_content_type(&self.content_type) {
            return Err(DomainError::validation("Invalid photo format"));
        }
        let data = base64::engine::general_purpose::STANDARD
            .decode(&self.data)
            .map_err(|_| DomainError::validation("photo data is not valid base64"))?;
        Ok(Photo {
            data,
            content_type: self.content_type.clone(),
        })
    }
}

/// Body of POST /api/users and PUT /api/users/{id}
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    pub reg_no: Option<i64>,
    pub national_id: Option<i64>,

    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: String,

    pub photo: Option<PhotoUpload>,

    #[serde(rename = "type")]
    pub user_type: UserType,
}

impl UserRequest {
    /// Convert to the service input, decoding the photo if one was sent
    pub fn into_new_user(self) -> DomainResult<NewUser> {
        let photo = match &self.photo {
            Some(upload) => Some(upload.decode()?),
            None => None,
        };
        Ok(NewUser {
            reg_no: self.reg_no,
            national_id: self.national_id,
            name: self.name,
            photo,
            user_type: self.user_type,
        })
    }
}

/// Public representation of a user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reg_no: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub national_id: Option<i64>,

    pub name: String,

    #[serde(rename = "type")]
    pub user_type: UserType,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            reg_no: user.reg_no,
            national_id: user.national_id,
            name: user.name,
            user_type: user.user_type,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
