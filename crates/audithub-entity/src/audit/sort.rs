//! Finding sort strategy.
//!
//! Findings keep a manually arranged order in the document; a sort
//! strategy can additionally be configured per category. The ordering
//! mode flag records which authority currently owns the display order so
//! the two never fight over it: a manual position move switches the mode
//! to `Manual`.

use serde::{Deserialize, Serialize};

/// Which authority currently decides the finding order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderingMode {
    /// The stored array order is authoritative.
    #[default]
    Manual,
    /// The configured sort rules are applied on read.
    Auto,
}

/// Sort direction for a single rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

/// One sort rule, scoped to a finding category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortRule {
    /// The finding category this rule applies to, or `None` for all.
    pub category: Option<String>,
    /// The finding field to sort by (e.g. `"cvss"`, `"title"`, `"priority"`).
    pub field: String,
    /// Sort direction.
    #[serde(default)]
    pub direction: SortDirection,
}

/// The audit's complete sort strategy descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FindingSorting {
    /// Which ordering authority is active.
    #[serde(default)]
    pub mode: OrderingMode,
    /// Configured rules, used while mode is `Auto`.
    #[serde(default)]
    pub rules: Vec<SortRule>,
}
