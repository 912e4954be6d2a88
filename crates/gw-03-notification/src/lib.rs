//! # Notification Subsystem
//!
//! **Subsystem ID:** gw-03
//!
//! ## Purpose
//!
//! The single choke point between the engine and whatever messaging
//! transport carries its traffic. Every user-facing message - expiry
//! warnings, expiry notices, broadcast payloads - and every membership
//! action (revoke / restore) leaves the process through the
//! [`MessageTransport`] port. Callers never see raw transport faults;
//! the dispatcher maps them into the typed failures of `shared-types`.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | One delivery attempt per dispatch call, no internal retry | `dispatcher.rs` - every method is a single transport call |
//! | INVARIANT-2 | Transport faults never escape untyped | `dispatcher.rs` - `TransportError` -> `DeliveryError` mapping |
//! | INVARIANT-3 | A failed delivery to one user cannot fail another | callers iterate per-user; dispatcher holds no shared delivery state |

pub mod dispatcher;
pub mod ports;

pub use dispatcher::{Delivered, NotificationDispatcher};
pub use ports::outbound::{MessageTransport, RecordingTransport, SentMessage, TransportError};
