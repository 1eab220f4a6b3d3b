//! Custom field values attached to audits, findings, and sections.
//!
//! Field sets are defined per audit type or finding category outside this
//! core; documents store the resolved values. The value is a tagged union
//! per field type so validation stays static while the field set itself
//! remains extensible.

use serde::{Deserialize, Serialize};

use audithub_core::types::FieldId;

/// A single custom field value on a document entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomField {
    /// Stable identity of the field definition.
    pub field_id: FieldId,
    /// Display label of the field at the time the value was written.
    pub label: String,
    /// The typed value.
    pub value: CustomFieldValue,
}

/// Typed custom field values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CustomFieldValue {
    /// Free text (plain or rich text, opaque to the core).
    Text(String),
    /// A checkbox.
    Checkbox(bool),
    /// A single selection out of the field definition's options.
    Select(String),
    /// Multiple selections out of the field definition's options.
    MultiSelect(Vec<String>),
}
