//! # Gate-Warden Test Suite
//!
//! Unified test crate for scenarios that span multiple subsystems.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Cross-subsystem scenarios
//!     ├── lifecycle.rs  # submit -> approve -> warn sweep -> expiry sweep
//!     └── broadcast.rs  # broadcast runs over the wired container
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p gw-tests
//!
//! # By scenario
//! cargo test -p gw-tests integration::lifecycle
//! cargo test -p gw-tests integration::broadcast
//! ```
//!
//! Subsystem-local unit tests live in their own crates; only flows that
//! need the full wiring belong here.

pub mod integration;
