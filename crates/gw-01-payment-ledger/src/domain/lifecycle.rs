//! Payment lifecycle rules.
//!
//! The single-decision guard lives here: a payment transitions exactly once
//! from `Pending` to a terminal state, and a second decision fails with
//! `InvalidTransition` without mutating anything. Decisions are pure
//! functions from (payment, clock) to a new payment value; persistence is
//! the service's problem.

use shared_types::time::days;
use shared_types::{LedgerError, Payment, PaymentStatus, Subscription, Timestamp};

/// Fails with `InvalidTransition` unless the payment is still pending.
pub fn ensure_pending(payment: &Payment) -> Result<(), LedgerError> {
    if payment.status.is_terminal() {
        return Err(LedgerError::InvalidTransition {
            payment: payment.id,
            status: payment.status,
        });
    }
    Ok(())
}

/// Computes the subscription expiry an approval at `now` produces.
pub fn expiry_for(payment: &Payment, now: Timestamp) -> Timestamp {
    now + days(payment.duration_days)
}

/// Applies an approval decision, producing the updated payment.
///
/// Sets status, decision timestamp, computed expiry, and the optional
/// administrator note. Amount and duration are untouched.
pub fn approve(
    payment: &Payment,
    now: Timestamp,
    note: Option<String>,
) -> Result<Payment, LedgerError> {
    ensure_pending(payment)?;

    let mut decided = payment.clone();
    decided.status = PaymentStatus::Approved;
    decided.decided_at = Some(now);
    decided.expires_at = Some(expiry_for(payment, now));
    decided.admin_note = note;
    Ok(decided)
}

/// Applies a rejection decision, producing the updated payment.
///
/// No subscription side effect. Both terminal states record a decision
/// time.
pub fn reject(
    payment: &Payment,
    now: Timestamp,
    reason: Option<String>,
) -> Result<Payment, LedgerError> {
    ensure_pending(payment)?;

    let mut decided = payment.clone();
    decided.status = PaymentStatus::Rejected;
    decided.decided_at = Some(now);
    decided.admin_note = reason;
    Ok(decided)
}

/// Builds the subscription grant an approved payment carries into the
/// store's atomic commit.
pub fn grant_for(approved: &Payment, now: Timestamp) -> Subscription {
    // expires_at is always set by approve(); fall back defensively anyway.
    let expires_at = approved.expires_at.unwrap_or_else(|| expiry_for(approved, now));
    Subscription::granted(approved.user_id, now, expires_at)
}
