//! # audithub-entity
//!
//! Domain entity models for AuditHub. Every struct in this crate
//! represents part of the shared audit document or a domain value object.
//! All entities derive `Debug`, `Clone`, `Serialize`, and `Deserialize`.

pub mod audit;
pub mod comment;
pub mod custom_field;
pub mod finding;
pub mod section;
pub mod user;
