pub mod mock;
mod repository;

pub use mock::MockTokenRepository;
pub use repository::{ClaimOutcome, TokenRepository};

#[cfg(test)]
mod tests;
