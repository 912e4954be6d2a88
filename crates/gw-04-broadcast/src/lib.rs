//! # Broadcast Subsystem
//!
//! **Subsystem ID:** gw-04
//!
//! ## Purpose
//!
//! Fans one payload out to a targeted audience, one recipient at a time,
//! with a fixed pacing delay between sends. The recipient set is resolved
//! exactly once, before the first send, so users who change state mid-run
//! are neither added nor dropped. Per-recipient delivery failures are
//! counted and logged, never propagated.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Recipients resolved once per run, before any send | `engine.rs` - `resolve()` called a single time |
//! | INVARIANT-2 | `sent + failed == total` on normal completion | `engine.rs` - every recipient increments one counter |
//! | INVARIANT-3 | Sends are strictly sequential, never concurrent | `engine.rs` - one awaited send per loop iteration |
//! | INVARIANT-4 | One recipient's failure never aborts the run | `engine.rs` - failures counted, loop continues |

pub mod domain;
pub mod engine;
pub mod ports;

pub use domain::target::{BroadcastReport, BroadcastTarget};
pub use engine::{BroadcastEngine, BroadcastPacing};
pub use ports::outbound::{BroadcastStore, NullProgress, ProgressSink, UserDirectory};
