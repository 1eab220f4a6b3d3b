//! Finding entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use audithub_core::types::FindingId;

use crate::custom_field::CustomField;

/// Whether a finding is part of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FindingStatus {
    /// The finding is included in the report.
    #[default]
    Active,
    /// The finding is kept in the document but excluded from the report.
    Redacted,
}

/// Outcome of re-testing a previously reported finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetestStatus {
    /// The finding was fixed.
    Ok,
    /// The finding is still exploitable.
    Ko,
    /// The finding was only partially fixed.
    Partial,
    /// The retest was inconclusive.
    Unknown,
}

/// A vulnerability finding within an audit.
///
/// Findings are owned by their audit (array membership, no foreign key)
/// and do not outlive it. The rich text fields hold HTML produced by the
/// editor; the core treats them as opaque strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Unique identifier within the audit.
    pub id: FindingId,
    /// Finding title.
    pub title: String,
    /// Vulnerability type name.
    pub vuln_type: Option<String>,
    /// Rich text description.
    pub description: Option<String>,
    /// Rich text observation.
    pub observation: Option<String>,
    /// Rich text remediation advice.
    pub remediation: Option<String>,
    /// Rich text proof of concept.
    pub poc: Option<String>,
    /// Report inclusion status.
    #[serde(default)]
    pub status: FindingStatus,
    /// Finding category (decides the applicable custom field set).
    pub category: Option<String>,
    /// Custom field values.
    #[serde(default)]
    pub custom_fields: Vec<CustomField>,
    /// External references.
    #[serde(default)]
    pub references: Vec<String>,
    /// Affected scope, free text.
    pub scope: Option<String>,
    /// CVSS v3.1 vector string.
    pub cvssv3: Option<String>,
    /// CVSS v4.0 vector string.
    pub cvssv4: Option<String>,
    /// Remediation complexity, 1 (easy) to 3 (complex).
    pub remediation_complexity: Option<u8>,
    /// Remediation priority, 1 (low) to 4 (urgent).
    pub priority: Option<u8>,
    /// Retest outcome, set on retest audits.
    pub retest_status: Option<RetestStatus>,
    /// Rich text retest notes.
    pub retest_description: Option<String>,
    /// When the finding was created.
    pub created_at: DateTime<Utc>,
}

impl Finding {
    /// Create a finding with only a title; all content fields empty.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            id: FindingId::new(),
            title: title.into(),
            vuln_type: None,
            description: None,
            observation: None,
            remediation: None,
            poc: None,
            status: FindingStatus::default(),
            category: None,
            custom_fields: Vec::new(),
            references: Vec::new(),
            scope: None,
            cvssv3: None,
            cvssv4: None,
            remediation_complexity: None,
            priority: None,
            retest_status: None,
            retest_description: None,
            created_at: Utc::now(),
        }
    }
}
