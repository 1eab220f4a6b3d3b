//! Post-commit change broadcasting over per-audit channels.

use dashmap::DashMap;
use tokio::sync::broadcast;
use tracing::debug;

use audithub_core::events::{AuditEvent, DomainEvent};
use audithub_core::types::{AuditId, UserId};

use crate::channel::ChannelName;

/// Publishes "this audit changed" events to per-audit channels.
///
/// Publishing is fire-and-forget: it never blocks the triggering
/// mutation's completion and never fails it. A channel with no live
/// subscribers drops the event.
#[derive(Debug)]
pub struct ChangeBroadcaster {
    /// Channel name → broadcast sender.
    channels: DashMap<String, broadcast::Sender<DomainEvent>>,
    /// Buffer size for new channels.
    buffer_size: usize,
}

impl ChangeBroadcaster {
    /// Create a new broadcaster.
    pub fn new(buffer_size: usize) -> Self {
        Self {
            channels: DashMap::new(),
            buffer_size,
        }
    }

    /// Publish a change event on the audit's channel.
    pub fn notify(&self, audit_id: AuditId, actor_id: Option<UserId>, event: AuditEvent) {
        let channel = ChannelName::Audit(audit_id).to_channel_string();
        if let Some(tx) = self.channels.get(&channel) {
            let delivered = tx
                .send(DomainEvent::new(actor_id, audit_id, event))
                .unwrap_or(0);
            debug!(%audit_id, ?event, delivered, "audit change broadcast");
        }
    }

    /// Subscribe to an audit's channel.
    pub fn subscribe(&self, audit_id: AuditId) -> broadcast::Receiver<DomainEvent> {
        let channel = ChannelName::Audit(audit_id).to_channel_string();
        self.channels
            .entry(channel)
            .or_insert_with(|| broadcast::channel(self.buffer_size).0)
            .subscribe()
    }

    /// Number of live subscribers on an audit's channel.
    pub fn subscriber_count(&self, audit_id: AuditId) -> usize {
        let channel = ChannelName::Audit(audit_id).to_channel_string();
        self.channels
            .get(&channel)
            .map(|tx| tx.receiver_count())
            .unwrap_or(0)
    }

    /// Drop channels whose subscribers have all disconnected.
    pub fn prune(&self) {
        self.channels.retain(|_, tx| tx.receiver_count() > 0);
    }
}
