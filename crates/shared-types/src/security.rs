//! # Centralized Authorization Module
//!
//! This module provides the **single, authoritative implementation** of the
//! administrator capability check.
//!
//! ## Design Rationale
//!
//! The administrator allow-list used to be consulted through inline
//! predicates repeated at every entry point, which made it easy to forget a
//! check on a new admin operation. This module centralizes the policy so
//! that:
//!
//! 1. Every admin-facing operation calls the SAME guard
//! 2. Policy changes (e.g. role tiers) propagate everywhere automatically
//! 3. The test suite only needs to cover ONE implementation
//!
//! The guard is a pure capability check against the id set supplied in
//! configuration. There is no session state and no escalation path.

use std::collections::HashSet;

use crate::entities::UserId;
use crate::errors::AccessError;

/// Administrator allow-list capability check.
///
/// Constructed once from configuration and shared by every subsystem that
/// exposes administrator operations.
#[derive(Debug, Clone, Default)]
pub struct AdminGuard {
    admins: HashSet<UserId>,
}

impl AdminGuard {
    /// Builds a guard from the configured administrator ids.
    pub fn new<I: IntoIterator<Item = UserId>>(ids: I) -> Self {
        Self {
            admins: ids.into_iter().collect(),
        }
    }

    /// Whether `user` is on the allow-list.
    pub fn is_admin(&self, user: UserId) -> bool {
        self.admins.contains(&user)
    }

    /// Authorizes `actor` for an administrator operation.
    ///
    /// Called at the boundary of every admin-facing core operation before
    /// any state is touched.
    pub fn authorize(&self, actor: UserId) -> Result<(), AccessError> {
        if self.is_admin(actor) {
            Ok(())
        } else {
            Err(AccessError::Unauthorized { actor })
        }
    }

    /// Number of configured administrators.
    pub fn len(&self) -> usize {
        self.admins.len()
    }

    /// True when no administrator is configured.
    pub fn is_empty(&self) -> bool {
        self.admins.is_empty()
    }
}
