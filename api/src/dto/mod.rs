//! Request and response DTOs.
//!
//! Field names on the wire are camelCase, matching the public API contract
//! (`registrationId`, `serialNo`, `regNo`, ...).

pub mod computer;
pub mod token;
pub mod user;
