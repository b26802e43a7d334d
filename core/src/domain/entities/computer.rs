//! Computer entity: a registered machine bound to its owner through the
//! token that authorized the registration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered computer.
///
/// `token_code` is the code of the token consumed when the record was
/// created (or last relinked) and doubles as the public registration id on
/// the wire. `serial_no` is unique across all registrations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Computer {
    /// Unique identifier for the record
    pub id: Uuid,

    /// Code of the token that authorized this registration
    pub token_code: String,

    /// Externally supplied serial number, unique across registrations
    pub serial_no: String,

    /// Manufacturer brand
    pub brand: String,

    /// Owning user
    pub owner_id: Uuid,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the record was last updated
    pub updated_at: DateTime<Utc>,
}

impl Computer {
    /// Creates a new registration record
    pub fn new(
        token_code: impl Into<String>,
        serial_no: impl Into<String>,
        brand: impl Into<String>,
        owner_id: Uuid,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            token_code: token_code.into(),
            serial_no: serial_no.into(),
            brand: brand.into(),
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Binds the record to a freshly redeemed token and applies new details
    pub fn relink(&mut self, token_code: impl Into<String>, brand: impl Into<String>) {
        self.token_code = token_code.into();
        self.brand = brand.into();
        self.updated_at = Utc::now();
    }
}
