//! Typed state machines for the two multi-step conversations.
//!
//! Each workflow is a tagged enum whose transition methods consume the
//! current state and return the next one, so an illegal step is a typed
//! error instead of a silently accepted message.

use shared_types::{MessagePayload, ReceiptRef};
use thiserror::Error;

use gw_04_broadcast::BroadcastTarget;

/// A transition attempted from a state that does not allow it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot {action} while in state {state}")]
pub struct WorkflowError {
    pub state: &'static str,
    pub action: &'static str,
}

fn illegal(state: &'static str, action: &'static str) -> WorkflowError {
    WorkflowError { state, action }
}

// ===== PAYMENT CAPTURE =====

/// A user's progress through receipt submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentCapture {
    /// Nothing in flight.
    Idle,
    /// Plan menu shown, waiting for a pick.
    ChoosingPlan,
    /// Plan fixed, waiting for the receipt attachment.
    AwaitingReceipt { duration_days: u32, amount: u64 },
    /// Receipt captured; submission to the ledger is due.
    ReadyToSubmit {
        duration_days: u32,
        amount: u64,
        receipt: ReceiptRef,
    },
}

impl PaymentCapture {
    fn state(&self) -> &'static str {
        match self {
            PaymentCapture::Idle => "Idle",
            PaymentCapture::ChoosingPlan => "ChoosingPlan",
            PaymentCapture::AwaitingReceipt { .. } => "AwaitingReceipt",
            PaymentCapture::ReadyToSubmit { .. } => "ReadyToSubmit",
        }
    }

    /// Opens the plan menu. Restarting an in-flight capture is allowed
    /// and discards the previous progress.
    pub fn start(self) -> PaymentCapture {
        PaymentCapture::ChoosingPlan
    }

    /// Fixes the plan and starts waiting for the receipt.
    pub fn choose_plan(self, duration_days: u32, amount: u64) -> Result<PaymentCapture, WorkflowError> {
        match self {
            PaymentCapture::ChoosingPlan => Ok(PaymentCapture::AwaitingReceipt {
                duration_days,
                amount,
            }),
            other => Err(illegal(other.state(), "choose a plan")),
        }
    }

    /// Attaches the receipt proof.
    pub fn attach_receipt(self, receipt: ReceiptRef) -> Result<PaymentCapture, WorkflowError> {
        match self {
            PaymentCapture::AwaitingReceipt {
                duration_days,
                amount,
            } => Ok(PaymentCapture::ReadyToSubmit {
                duration_days,
                amount,
                receipt,
            }),
            other => Err(illegal(other.state(), "attach a receipt")),
        }
    }

    /// Hands the captured fields to the caller, consuming the workflow.
    pub fn take_submission(self) -> Result<(u32, u64, ReceiptRef), WorkflowError> {
        match self {
            PaymentCapture::ReadyToSubmit {
                duration_days,
                amount,
                receipt,
            } => Ok((duration_days, amount, receipt)),
            other => Err(illegal(other.state(), "submit")),
        }
    }
}

// ===== BROADCAST COMPOSITION =====

/// An administrator's progress through composing a broadcast.
#[derive(Debug, Clone, PartialEq)]
pub enum BroadcastCompose {
    Idle,
    /// Audience menu shown.
    ChoosingTarget,
    /// Audience fixed, waiting for the message.
    Drafting { target: BroadcastTarget },
    /// Message captured, waiting for the final confirmation.
    Confirming {
        target: BroadcastTarget,
        payload: MessagePayload,
    },
}

impl BroadcastCompose {
    fn state(&self) -> &'static str {
        match self {
            BroadcastCompose::Idle => "Idle",
            BroadcastCompose::ChoosingTarget => "ChoosingTarget",
            BroadcastCompose::Drafting { .. } => "Drafting",
            BroadcastCompose::Confirming { .. } => "Confirming",
        }
    }

    pub fn begin(self) -> BroadcastCompose {
        BroadcastCompose::ChoosingTarget
    }

    pub fn pick_target(self, target: BroadcastTarget) -> Result<BroadcastCompose, WorkflowError> {
        match self {
            BroadcastCompose::ChoosingTarget => Ok(BroadcastCompose::Drafting { target }),
            other => Err(illegal(other.state(), "pick a target")),
        }
    }

    pub fn draft(self, payload: MessagePayload) -> Result<BroadcastCompose, WorkflowError> {
        match self {
            BroadcastCompose::Drafting { target } => {
                Ok(BroadcastCompose::Confirming { target, payload })
            }
            other => Err(illegal(other.state(), "draft a message")),
        }
    }

    /// Confirms the run, yielding its parameters and consuming the state.
    pub fn confirm(self) -> Result<(BroadcastTarget, MessagePayload), WorkflowError> {
        match self {
            BroadcastCompose::Confirming { target, payload } => Ok((target, payload)),
            other => Err(illegal(other.state(), "confirm")),
        }
    }

    /// Abandons the composition at any point.
    pub fn cancel(self) -> BroadcastCompose {
        BroadcastCompose::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_capture_happy_path() {
        let flow = PaymentCapture::Idle.start();
        let flow = flow.choose_plan(30, 500).unwrap();
        let flow = flow.attach_receipt(ReceiptRef("file-9".into())).unwrap();
        let (days, amount, receipt) = flow.take_submission().unwrap();
        assert_eq!((days, amount), (30, 500));
        assert_eq!(receipt, ReceiptRef("file-9".into()));
    }

    #[test]
    fn test_receipt_before_plan_is_illegal() {
        let err = PaymentCapture::Idle
            .start()
            .attach_receipt(ReceiptRef("file-9".into()))
            .unwrap_err();
        assert_eq!(err.state, "ChoosingPlan");
        assert_eq!(err.action, "attach a receipt");
    }

    #[test]
    fn test_restart_discards_progress() {
        let flow = PaymentCapture::Idle.start().choose_plan(30, 500).unwrap();
        let flow = flow.start();
        assert_eq!(flow, PaymentCapture::ChoosingPlan);
    }

    #[test]
    fn test_broadcast_compose_happy_path() {
        let flow = BroadcastCompose::Idle.begin();
        let flow = flow.pick_target(BroadcastTarget::ActiveSubscribers).unwrap();
        let flow = flow.draft(MessagePayload::Text("news".into())).unwrap();
        let (target, payload) = flow.confirm().unwrap();
        assert_eq!(target, BroadcastTarget::ActiveSubscribers);
        assert_eq!(payload, MessagePayload::Text("news".into()));
    }

    #[test]
    fn test_confirm_without_draft_is_illegal() {
        let err = BroadcastCompose::Idle
            .begin()
            .pick_target(BroadcastTarget::All)
            .unwrap()
            .confirm()
            .unwrap_err();
        assert_eq!(err.state, "Drafting");
    }

    #[test]
    fn test_cancel_from_any_state() {
        let flow = BroadcastCompose::Idle
            .begin()
            .pick_target(BroadcastTarget::All)
            .unwrap();
        assert_eq!(flow.cancel(), BroadcastCompose::Idle);
    }
}
