//! Domain entities.

pub mod computer;
pub mod token;
pub mod user;

pub use computer::Computer;
pub use token::RegistrationToken;
pub use user::{Photo, User, UserType};
