//! The audit document and its owned value types.

pub mod approval;
pub mod model;
pub mod sort;
pub mod state;

pub use approval::Approval;
pub use model::{Audit, AuditKind, CompanyRef, ScopeItem};
pub use sort::{FindingSorting, OrderingMode, SortDirection, SortRule};
pub use state::AuditState;
