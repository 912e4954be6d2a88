//! Domain layer for the Subscription Registry subsystem.

pub mod phase;
