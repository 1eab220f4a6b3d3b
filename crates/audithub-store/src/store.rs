//! Audit store trait.

use async_trait::async_trait;

use audithub_core::result::AppResult;
use audithub_core::types::AuditId;
use audithub_entity::audit::Audit;

use crate::filter::AuditFilter;

/// A mutation applied to an audit document under the store's atomicity
/// guarantee. Returning an error aborts the update without any partial
/// write (validate-then-write, never write-then-validate).
pub type AuditMutation = Box<dyn FnOnce(&mut Audit) -> AppResult<()> + Send>;

/// Contract with the audit document database.
///
/// `atomic_update` applies a read-validate-mutate cycle as a single
/// atomic operation against the authoritative copy, so concurrent
/// operations never interleave partial writes on one document. No
/// transaction spans multiple audits.
#[async_trait]
pub trait AuditStore: Send + Sync + 'static {
    /// Find an audit by its identity.
    async fn find(&self, id: AuditId) -> AppResult<Option<Audit>>;

    /// List audits matching a filter.
    async fn find_all(&self, filter: &AuditFilter) -> AppResult<Vec<Audit>>;

    /// Insert a new audit and return it.
    async fn insert(&self, audit: Audit) -> AppResult<Audit>;

    /// Atomically mutate an audit and return the updated document.
    ///
    /// Fails with `NotFound` when the audit does not exist; when the
    /// mutation returns an error the document is left untouched and the
    /// error is propagated.
    async fn atomic_update(&self, id: AuditId, mutation: AuditMutation) -> AppResult<Audit>;

    /// Delete an audit. Returns `true` if it existed.
    async fn delete(&self, id: AuditId) -> AppResult<bool>;
}
