//! Report generator collaborator trait.

use async_trait::async_trait;

use audithub_core::result::AppResult;
use audithub_entity::audit::Audit;

/// A rendered report document ready to send to the caller.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    /// Suggested file name (audit name sanitized for filesystems).
    pub filename: String,
    /// The rendered document bytes.
    pub content: Vec<u8>,
}

/// Collaborator trait for the external report rendering service.
///
/// Invoked only after the export gate has passed. Implementations signal
/// a missing template with the `Template` error kind and rendering
/// failures with `Render`.
#[async_trait]
pub trait ReportGenerator: Send + Sync + 'static {
    /// Render the audit into a report document.
    async fn generate_doc(&self, audit: &Audit) -> AppResult<Vec<u8>>;
}
