//! Configuration modules for the CampusReg backend.

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;
