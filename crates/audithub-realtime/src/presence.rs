//! Presence tracking — which users are connected to which audit.

use std::collections::HashMap;

use dashmap::DashMap;

use audithub_core::types::{AuditId, UserId};

/// Tracks which users currently hold a live subscription to each audit.
///
/// The transport layer calls `join` / `leave` as connections subscribe and
/// disconnect; the audit list decorates each audit with the connected
/// usernames for callers holding the users-connected capability.
#[derive(Debug, Default)]
pub struct PresenceTracker {
    /// Audit → (user → username) of connected users.
    connected: DashMap<AuditId, HashMap<UserId, String>>,
}

impl PresenceTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self {
            connected: DashMap::new(),
        }
    }

    /// Record a user joining an audit's channel.
    pub fn join(&self, audit_id: AuditId, user_id: UserId, username: impl Into<String>) {
        self.connected
            .entry(audit_id)
            .or_default()
            .insert(user_id, username.into());
    }

    /// Record a user leaving an audit's channel.
    pub fn leave(&self, audit_id: AuditId, user_id: UserId) {
        if let Some(mut users) = self.connected.get_mut(&audit_id) {
            users.remove(&user_id);
            if users.is_empty() {
                drop(users);
                self.connected.remove(&audit_id);
            }
        }
    }

    /// Remove a user from every audit (connection dropped).
    pub fn leave_all(&self, user_id: UserId) {
        self.connected.retain(|_, users| {
            users.remove(&user_id);
            !users.is_empty()
        });
    }

    /// Usernames currently connected to an audit.
    pub fn connected_usernames(&self, audit_id: AuditId) -> Vec<String> {
        let mut names: Vec<String> = self
            .connected
            .get(&audit_id)
            .map(|users| users.values().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }
}
