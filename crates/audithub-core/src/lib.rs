//! # audithub-core
//!
//! Core crate for AuditHub. Contains configuration schemas, typed
//! identifiers, domain events, the review policy value type, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other AuditHub crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod review;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
pub use review::{ReviewPolicy, SettingsProvider};
