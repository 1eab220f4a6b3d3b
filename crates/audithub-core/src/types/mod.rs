//! Core type definitions used across the AuditHub workspace.

pub mod id;

pub use id::*;
