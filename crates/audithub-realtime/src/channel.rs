//! Channel name definitions and parsing.

use serde::{Deserialize, Serialize};

use audithub_core::types::{AuditId, UserId};

/// Typed channel identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id")]
pub enum ChannelName {
    /// Per-audit channel — every mutation of the audit is announced here.
    Audit(AuditId),
    /// Personal user channel.
    User(UserId),
}

impl ChannelName {
    /// Parses a channel string into a typed channel.
    pub fn parse(channel: &str) -> Option<Self> {
        let parts: Vec<&str> = channel.splitn(2, ':').collect();
        match parts.as_slice() {
            ["audit", id] => id.parse().ok().map(ChannelName::Audit),
            ["user", id] => id.parse().ok().map(ChannelName::User),
            _ => None,
        }
    }

    /// Converts back to a channel string.
    pub fn to_channel_string(&self) -> String {
        match self {
            ChannelName::Audit(id) => format!("audit:{id}"),
            ChannelName::User(id) => format!("user:{id}"),
        }
    }
}
