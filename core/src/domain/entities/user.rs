//! User entity: a person (student or guest) that computers are registered
//! against.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the type of person in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// A student identified by a registration number
    Student,
    /// A visitor identified by a national id
    Guest,
}

impl UserType {
    /// Database/wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Student => "student",
            UserType::Guest => "guest",
        }
    }

    /// Parse the database/wire representation
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "student" => Some(UserType::Student),
            "guest" => Some(UserType::Guest),
            _ => None,
        }
    }
}

/// Stored photo bytes together with their content type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    /// Raw image bytes
    pub data: Vec<u8>,
    /// MIME type, e.g. `image/png`
    pub content_type: String,
}

/// A registered person.
///
/// Students carry a `reg_no`, guests a `national_id`; a user never carries
/// both. Each identifier is unique across all users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Student registration number
    pub reg_no: Option<i64>,

    /// Guest national id
    pub national_id: Option<i64>,

    /// Display name
    pub name: String,

    /// Optional identification photo
    pub photo: Option<Photo>,

    /// Whether this is a student or a guest
    pub user_type: UserType,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user
    pub fn new(
        reg_no: Option<i64>,
        national_id: Option<i64>,
        name: impl Into<String>,
        photo: Option<Photo>,
        user_type: UserType,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            reg_no,
            national_id,
            name: name.into(),
            photo,
            user_type,
            created_at: now,
            updated_at: now,
        }
    }

    /// The identifier this user is known by externally
    pub fn identifier(&self) -> Option<i64> {
        self.reg_no.or(self.national_id)
    }

    /// Checks the student/guest identifier invariant
    pub fn has_required_identifier(&self) -> bool {
        match self.user_type {
            UserType::Student => self.reg_no.is_some(),
            UserType::Guest => self.national_id.is_some(),
        }
    }

    /// Applies updated details, refreshing `updated_at`
    pub fn apply_update(
        &mut self,
        reg_no: Option<i64>,
        national_id: Option<i64>,
        name: impl Into<String>,
        photo: Option<Photo>,
        user_type: UserType,
    ) {
        self.reg_no = reg_no;
        self.national_id = national_id;
        self.name = name.into();
        if let Some(photo) = photo {
            self.photo = Some(photo);
        }
        self.user_type = user_type;
        self.updated_at = Utc::now();
    }
}
