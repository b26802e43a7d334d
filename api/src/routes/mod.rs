//! Route handlers.

pub mod computers;
pub mod tokens;
pub mod users;
