//! Ports for the Payment Ledger subsystem.

pub mod inbound;
pub mod outbound;
