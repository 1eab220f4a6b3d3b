//! Finding entity.

pub mod model;

pub use model::{Finding, FindingStatus, RetestStatus};
