//! Domain events emitted by AuditHub operations.
//!
//! Events are published on per-audit channels by the change broadcaster
//! after a mutation has been committed. They carry no document payload:
//! subscribers re-fetch the authoritative state.

pub mod audit;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{AuditId, UserId};

pub use audit::AuditEvent;

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The user who caused the event (if applicable).
    pub actor_id: Option<UserId>,
    /// The audit the event concerns.
    pub audit_id: AuditId,
    /// The event kind.
    pub event: AuditEvent,
}

impl DomainEvent {
    /// Create a new domain event.
    pub fn new(actor_id: Option<UserId>, audit_id: AuditId, event: AuditEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            actor_id,
            audit_id,
            event,
        }
    }
}
