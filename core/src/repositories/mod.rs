//! Repository traits (ports) between the domain and the persistence layer.
//!
//! Concrete MySQL implementations live in the infrastructure crate; each
//! module here also ships an in-memory mock used by unit and API tests.

pub mod computer;
pub mod token;
pub mod user;

pub use computer::ComputerRepository;
pub use token::{ClaimOutcome, TokenRepository};
pub use user::UserRepository;
