//! Ports for the Subscription Registry subsystem.

pub mod inbound;
pub mod outbound;
