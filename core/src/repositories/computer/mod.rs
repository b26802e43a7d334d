pub mod mock;
mod repository;

pub use mock::MockComputerRepository;
pub use repository::ComputerRepository;
