//! # CampusReg Core
//!
//! Domain layer for the CampusReg backend: entities, the error taxonomy,
//! repository traits, and the services that implement computer registration
//! gated by single-use QR-code tokens.
//!
//! The crate is free of I/O. Persistence is reached exclusively through the
//! repository traits in [`repositories`]; the MySQL implementations live in
//! the infrastructure crate.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;
