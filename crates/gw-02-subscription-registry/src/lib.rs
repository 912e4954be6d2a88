//! # Subscription Registry Subsystem
//!
//! **Subsystem ID:** gw-02
//!
//! ## Purpose
//!
//! Owns the per-user subscription state machine and the derived
//! access-control decision. The registry is the sole writer of subscription
//! rows: `active`, `expires_at`, `channel_joined`, and `last_notified`
//! change only through this subsystem (or through the payment ledger's
//! atomic approval commit, which writes the row the registry's own
//! constructor builds).
//!
//! ## State Machine (per user)
//!
//! ```text
//! NoSubscription ──grant──→ Active ──deactivate──→ Inactive
//!        ↑                    │ ↑                     │
//!        └──── (never) ───────┘ └───────grant─────────┘
//! ```
//!
//! Renewal is a `grant` on an Active user: the expiry is overwritten, not
//! stacked. Unused paid days are deliberately discarded.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | `active` implies expiry was in the future when set | `Subscription::granted()` callers pass `now + duration` |
//! | INVARIANT-2 | `active` alone decides access, not the wall clock | `domain/phase.rs` - `classify()` returns Inactive first |
//! | INVARIANT-3 | `expiry == now` classifies as Expired, not ExpiringSoon | `domain/phase.rs` - `classify()` tie-break |

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::phase::{classify, days_left, should_notify, SubscriptionPhase};
pub use ports::inbound::SubscriptionRegistryApi;
pub use ports::outbound::SubscriptionStore;
pub use service::RegistryService;
