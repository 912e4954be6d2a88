//! Domain layer for the Payment Ledger subsystem.
//!
//! Pure decision rules over [`shared_types::Payment`]; no I/O.

pub mod lifecycle;
