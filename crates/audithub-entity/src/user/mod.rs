//! User role and identity snapshot types.

pub mod identity;
pub mod role;

pub use identity::UserIdentity;
pub use role::UserRole;
