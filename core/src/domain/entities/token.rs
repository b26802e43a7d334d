//! Registration token entity: a single-use credential that authorizes one
//! computer registration.

use chrono::{DateTime, Utc};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of a token code in hex characters
pub const CODE_LENGTH: usize = 64;

/// Bytes of entropy behind each token code
pub const CODE_ENTROPY_BYTES: usize = 32;

/// Largest number of tokens a single issuance request may create
pub const MAX_BATCH_SIZE: u32 = 1000;

/// A single-use registration token.
///
/// Tokens are issued in batches, handed out as QR codes, and consumed by
/// exactly one successful registration. `is_used` is monotonic: once a token
/// is claimed it never becomes unused again, except through the coordinator's
/// compensating release after a failed registration write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationToken {
    /// Unique identifier for the token
    pub id: Uuid,

    /// The 64-hex-character code printed into the QR image
    pub code: String,

    /// Whether the token has been consumed by a registration
    pub is_used: bool,

    /// Timestamp when the token was issued
    pub created_at: DateTime<Utc>,

    /// Timestamp when the token was consumed, if it has been
    pub used_at: Option<DateTime<Utc>>,
}

impl RegistrationToken {
    /// Creates a fresh unused token with a cryptographically random code
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            code: Self::generate_code(),
            is_used: false,
            created_at: Utc::now(),
            used_at: None,
        }
    }

    /// Generates a random 64-hex-character code from the OS CSPRNG
    fn generate_code() -> String {
        let mut bytes = [0u8; CODE_ENTROPY_BYTES];
        OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// Marks the token as consumed
    pub fn mark_used(&mut self) {
        self.is_used = true;
        self.used_at = Some(Utc::now());
    }

    /// Reverts a consumed token back to unused
    ///
    /// Only the registration coordinator calls this, as the compensating
    /// action after a failed registration write.
    pub fn mark_unused(&mut self) {
        self.is_used = false;
        self.used_at = None;
    }
}

impl Default for RegistrationToken {
    fn default() -> Self {
        Self::new()
    }
}
