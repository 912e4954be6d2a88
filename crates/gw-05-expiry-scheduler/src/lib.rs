//! # Expiry Scheduler Subsystem
//!
//! **Subsystem ID:** gw-05
//!
//! ## Purpose
//!
//! The enforcement arm of the engine. On a fixed period it sweeps the
//! active subscription population twice: once to warn users whose expiry
//! falls inside the warning window, once to evict and deactivate users
//! whose expiry has passed. All writes go through the registry; all
//! messages and membership actions go through the dispatcher.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Cooldown stamp is written only after a warning is delivered | `sweep.rs` - `touch_notified` gated on `Delivered` |
//! | INVARIANT-2 | Deactivation happens even when notice or eviction fails | `sweep.rs` - expiry branch ends in an unconditional `deactivate` |
//! | INVARIANT-3 | One user's fault never stops the sweep | `sweep.rs` - per-user faults logged and counted |
//! | INVARIANT-4 | Sweeps never overlap | `scheduler.rs` - sweep awaited inline on the interval tick |

pub mod ports;
pub mod scheduler;
pub mod sweep;

#[cfg(test)]
mod testutil;

pub use ports::outbound::ChannelDirectory;
pub use scheduler::{ExpiryScheduler, SchedulerHandle};
pub use sweep::{expiry_text, warning_text, SweepConfig, SweepReport, Sweeper};
