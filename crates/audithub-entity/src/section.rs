//! Report section entity.

use serde::{Deserialize, Serialize};

use audithub_core::types::SectionId;

use crate::custom_field::CustomField;

/// A report section of an audit.
///
/// Sections are instantiated from the audit type definition when the
/// audit is created; only their content is mutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Unique identifier within the audit.
    pub id: SectionId,
    /// Stable machine identifier of the section (from the audit type).
    pub field: String,
    /// Display name.
    pub name: String,
    /// Custom field values holding the section content.
    #[serde(default)]
    pub custom_fields: Vec<CustomField>,
    /// Legacy free-text content, kept for older templates.
    pub text: Option<String>,
}

impl Section {
    /// Create an empty section.
    pub fn new(field: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: SectionId::new(),
            field: field.into(),
            name: name.into(),
            custom_fields: Vec::new(),
            text: None,
        }
    }
}
