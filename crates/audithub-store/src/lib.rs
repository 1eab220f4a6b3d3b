//! # audithub-store
//!
//! The [`AuditStore`] trait is the contract with the external document
//! database: find, create, atomic update, and delete over whole audit
//! documents keyed by identity. The bundled [`MemoryAuditStore`] is the
//! single-node / test backend.

pub mod filter;
pub mod memory;
pub mod store;

pub use filter::AuditFilter;
pub use memory::MemoryAuditStore;
pub use store::AuditStore;
