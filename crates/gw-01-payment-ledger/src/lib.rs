//! # Payment Ledger Subsystem
//!
//! **Subsystem ID:** gw-01
//!
//! ## Purpose
//!
//! Owns the payment-request state machine: users submit manually reviewed
//! receipts, administrators approve or reject them, and an approval grants
//! (or renews) the owning user's subscription.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Status moves exactly once out of Pending | `domain/lifecycle.rs` - `ensure_pending()` |
//! | INVARIANT-2 | Amount and duration immutable after creation | `domain/lifecycle.rs` - decisions clone, never rewrite |
//! | INVARIANT-3 | Approval and grant are one atomic write | `ports/outbound.rs` - `PaymentStore::commit_decision()` contract |
//! | INVARIANT-4 | Admin capability checked before any mutation | `service.rs` - `AdminGuard::authorize()` at entry |
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ports/inbound.rs   - PaymentLedgerApi trait (driving)
//! ports/outbound.rs  - PaymentStore trait (driven)
//! domain/            - pure decision rules, no I/O
//! service.rs         - PaymentLedgerService wiring domain to ports
//! ```

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::lifecycle;
pub use ports::inbound::PaymentLedgerApi;
pub use ports::outbound::{NewPayment, PaymentStore};
pub use service::PaymentLedgerService;
