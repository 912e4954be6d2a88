//! # Shared Types Crate
//!
//! This crate contains the domain entities, time abstraction, error taxonomy,
//! and administrator authorization guard shared across Gate-Warden subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Injected Time**: No subsystem reads the wall clock directly; everything
//!   goes through the [`TimeSource`] port so tests control the clock.
//! - **Centralized Authorization**: Administrator checks live in one place
//!   ([`security::AdminGuard`]) instead of inline predicates at every entry
//!   point.

pub mod entities;
pub mod errors;
pub mod security;
pub mod time;

pub use entities::*;
pub use errors::*;
pub use security::AdminGuard;
pub use time::{MockTimeSource, SystemTimeSource, TimeSource, Timestamp};
