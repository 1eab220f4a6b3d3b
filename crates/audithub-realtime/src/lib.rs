//! # audithub-realtime
//!
//! Real-time fan-out for AuditHub. Provides:
//!
//! - One logical pub/sub channel per audit identity
//! - Fire-and-forget post-commit change broadcasting
//! - Presence tracking (which users are connected to which audit)
//!
//! Delivery is at-most-once best-effort to currently connected
//! subscribers; events carry no document payload, so subscribers re-fetch
//! the authoritative state after each notification.

pub mod broadcaster;
pub mod channel;
pub mod presence;

pub use broadcaster::ChangeBroadcaster;
pub use channel::ChannelName;
pub use presence::PresenceTracker;
