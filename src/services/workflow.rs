//! Order status workflow
//!
//! Applies status change requests to an order: unknown and illegal targets are
//! rejected without touching the order, and cancelling requires a reason
//! collected through a [`CommentPrompt`]. Status changes go through
//! [`Order::set_status`], so every attached logger sees them.

use crate::error::{OrderError, OrderResult};
use crate::models::{FieldEditability, Order, OrderStatus};

/// Source of the cancellation reason
pub trait CommentPrompt {
    /// Ask for a comment. `None` means the user declined.
    fn prompt_for_comment(&mut self) -> Option<String>;
}

/// Prompt that answers with a fixed reason (or declines when empty)
#[derive(Debug, Clone, Default)]
pub struct FixedComment(Option<String>);

impl FixedComment {
    pub fn new(reason: Option<String>) -> Self {
        Self(reason)
    }

    pub fn declined() -> Self {
        Self(None)
    }
}

impl CommentPrompt for FixedComment {
    fn prompt_for_comment(&mut self) -> Option<String> {
        self.0.clone()
    }
}

/// What to do with the comment on a non-cancel transition
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CommentEdit {
    /// Leave the comment as it is
    #[default]
    Keep,
    /// Overwrite the comment
    Replace(String),
}

/// Result of an accepted status request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionOutcome {
    pub from: OrderStatus,
    pub to: OrderStatus,
    /// False when the order was already in the requested status
    pub changed: bool,
    pub editability: FieldEditability,
}

/// Applies status change requests to orders
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderStatusWorkflow;

impl OrderStatusWorkflow {
    pub fn new() -> Self {
        Self
    }

    /// Request a change to the status named by `target_label`
    ///
    /// On error the order is left exactly as it was. An unrecognised label is
    /// reported as `UnknownStatus`, a disallowed move as `InvalidTransition`.
    pub fn request_transition(
        &self,
        order: &mut Order,
        target_label: &str,
        comment_edit: CommentEdit,
        prompt: &mut dyn CommentPrompt,
    ) -> OrderResult<TransitionOutcome> {
        let target: OrderStatus = target_label.parse()?;
        let from = order.status();

        if target == from {
            tracing::debug!(order_id = %order.id, status = %from, "Status unchanged");
            return Ok(TransitionOutcome {
                from,
                to: target,
                changed: false,
                editability: order.editability(),
            });
        }

        if !from.can_transition_to(target) {
            tracing::info!(order_id = %order.id, %from, to = %target, "Rejected status change");
            return Err(OrderError::InvalidTransition { from, to: target });
        }

        if target == OrderStatus::Cancelled {
            let reason = prompt
                .prompt_for_comment()
                .map(|text| text.trim().to_string())
                .filter(|text| !text.is_empty())
                .ok_or(OrderError::CommentRequired)?;

            order.set_comment(reason);
            order.set_status(OrderStatus::Cancelled);
        } else {
            order.set_status(target);
            if let CommentEdit::Replace(text) = comment_edit {
                order.set_comment(text);
            }
        }

        tracing::info!(order_id = %order.id, %from, to = %target, "Order status changed");

        Ok(TransitionOutcome {
            from,
            to: target,
            changed: true,
            editability: order.editability(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{StatusChangeLogger, StatusLogger};
    use crate::models::{OrderDetails, OrderId};
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingLogger {
        messages: Mutex<Vec<String>>,
    }

    impl StatusLogger for RecordingLogger {
        fn log(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    /// Prompt that counts how often it was asked
    struct CountingPrompt {
        answer: Option<String>,
        calls: usize,
    }

    impl CommentPrompt for CountingPrompt {
        fn prompt_for_comment(&mut self) -> Option<String> {
            self.calls += 1;
            self.answer.clone()
        }
    }

    fn order_in(status: OrderStatus) -> Order {
        let mut order = Order::new(OrderDetails {
            description: "Boxes".into(),
            pickup_address: "A".into(),
            delivery_address: "B".into(),
            comment: "fragile".into(),
            executor: Some("Ivan".into()),
            width: 1.0,
            height: 1.0,
            depth: 1.0,
            weight: 1.0,
        });
        order.id = OrderId::new(42);
        order.set_status(status);
        order
    }

    fn request(order: &mut Order, target: &str) -> OrderResult<TransitionOutcome> {
        OrderStatusWorkflow::new().request_transition(
            order,
            target,
            CommentEdit::Keep,
            &mut FixedComment::declined(),
        )
    }

    #[test]
    fn test_nothing_returns_to_new() {
        for status in [
            OrderStatus::Dispatched,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            let mut order = order_in(status);
            let err = request(&mut order, "New").unwrap_err();
            assert!(matches!(
                err,
                OrderError::InvalidTransition {
                    to: OrderStatus::New,
                    ..
                }
            ));
            assert_eq!(order.status(), status);
        }
    }

    #[test]
    fn test_forward_progression() {
        let mut order = order_in(OrderStatus::New);

        let outcome = request(&mut order, "Dispatched").unwrap();
        assert!(outcome.changed);
        assert_eq!(outcome.from, OrderStatus::New);
        assert_eq!(outcome.to, OrderStatus::Dispatched);

        request(&mut order, "completed").unwrap();
        assert_eq!(order.status(), OrderStatus::Completed);
    }

    #[test]
    fn test_forward_skip_is_allowed() {
        let mut order = order_in(OrderStatus::New);
        request(&mut order, "Completed").unwrap();
        assert_eq!(order.status(), OrderStatus::Completed);
    }

    #[test]
    fn test_backward_move_rejected() {
        let mut order = order_in(OrderStatus::Completed);
        assert!(request(&mut order, "Dispatched").is_err());
        assert_eq!(order.status(), OrderStatus::Completed);
    }

    #[test]
    fn test_terminal_states_stay_put() {
        let mut order = order_in(OrderStatus::Completed);
        let mut prompt = FixedComment::new(Some("too late".into()));
        let err = OrderStatusWorkflow::new()
            .request_transition(&mut order, "Cancelled", CommentEdit::Keep, &mut prompt)
            .unwrap_err();

        assert!(matches!(err, OrderError::InvalidTransition { .. }));
        assert_eq!(order.comment, "fragile");
    }

    #[test]
    fn test_same_status_is_a_no_op() {
        let recorder = Arc::new(RecordingLogger::default());
        let mut order = order_in(OrderStatus::Dispatched);
        order.attach_logger(recorder.clone());
        let updated = order.updated_at();

        let outcome = OrderStatusWorkflow::new()
            .request_transition(
                &mut order,
                " dispatched ",
                CommentEdit::Replace("ignored".into()),
                &mut FixedComment::declined(),
            )
            .unwrap();

        assert!(!outcome.changed);
        assert_eq!(order.comment, "fragile");
        assert_eq!(order.updated_at(), updated);
        assert!(recorder.messages.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_label() {
        let mut order = order_in(OrderStatus::New);
        let err = request(&mut order, "Shipped").unwrap_err();

        assert!(matches!(err, OrderError::UnknownStatus(ref label) if label == "Shipped"));
        assert!(err.is_transition_rejected());
        assert_eq!(order.status(), OrderStatus::New);
    }

    #[test]
    fn test_cancel_requires_comment() {
        for answer in [None, Some(String::new()), Some("   ".to_string())] {
            let recorder = Arc::new(RecordingLogger::default());
            let mut order = order_in(OrderStatus::Dispatched);
            order.attach_logger(recorder.clone());
            let mut prompt = CountingPrompt { answer, calls: 0 };

            let err = OrderStatusWorkflow::new()
                .request_transition(&mut order, "Cancelled", CommentEdit::Keep, &mut prompt)
                .unwrap_err();

            assert!(matches!(err, OrderError::CommentRequired));
            assert_eq!(prompt.calls, 1);
            assert_eq!(order.status(), OrderStatus::Dispatched);
            assert_eq!(order.comment, "fragile");
            assert!(recorder.messages.lock().unwrap().is_empty());
        }
    }

    #[test]
    fn test_cancel_stores_reason() {
        let mut order = order_in(OrderStatus::New);
        let mut prompt = FixedComment::new(Some("  Customer called  ".into()));

        let outcome = OrderStatusWorkflow::new()
            .request_transition(
                &mut order,
                "Cancelled",
                CommentEdit::Replace("overwritten?".into()),
                &mut prompt,
            )
            .unwrap();

        assert!(outcome.changed);
        assert_eq!(order.status(), OrderStatus::Cancelled);
        assert_eq!(order.comment, "Customer called");
    }

    #[test]
    fn test_prompt_only_asked_for_cancel() {
        let mut order = order_in(OrderStatus::New);
        let mut prompt = CountingPrompt {
            answer: Some("unused".into()),
            calls: 0,
        };

        OrderStatusWorkflow::new()
            .request_transition(&mut order, "Dispatched", CommentEdit::Keep, &mut prompt)
            .unwrap();

        assert_eq!(prompt.calls, 0);
    }

    #[test]
    fn test_dispatch_locks_details() {
        let mut order = order_in(OrderStatus::New);
        assert!(order.editability().details_editable());

        let outcome = request(&mut order, "Dispatched").unwrap();
        let flags = outcome.editability;

        assert!(!flags.is_description_editable);
        assert!(!flags.is_pickup_address_editable);
        assert!(!flags.is_delivery_address_editable);
        assert!(!flags.is_executor_editable);
        assert!(!flags.is_width_editable);
        assert!(!flags.is_height_editable);
        assert!(!flags.is_depth_editable);
        assert!(!flags.is_weight_editable);
        assert!(flags.is_comment_editable);
    }

    #[test]
    fn test_comment_edit_on_regular_transition() {
        let mut order = order_in(OrderStatus::New);
        OrderStatusWorkflow::new()
            .request_transition(
                &mut order,
                "Dispatched",
                CommentEdit::Keep,
                &mut FixedComment::declined(),
            )
            .unwrap();
        assert_eq!(order.comment, "fragile");

        OrderStatusWorkflow::new()
            .request_transition(
                &mut order,
                "Completed",
                CommentEdit::Replace("Delivered to reception".into()),
                &mut FixedComment::declined(),
            )
            .unwrap();
        assert_eq!(order.comment, "Delivered to reception");
    }

    #[test]
    fn test_dispatch_writes_audit_line() {
        let temp_dir = TempDir::new().unwrap();
        let logger = Arc::new(StatusChangeLogger::new(temp_dir.path().to_path_buf()));
        let mut order = order_in(OrderStatus::New);
        order.attach_logger(logger.clone());

        request(&mut order, "Dispatched").unwrap();

        let today = chrono::Local::now().date_naive();
        let mut entries = logger.read_day(today).unwrap();
        // The hour may roll over between the write and the read
        if entries.is_empty() {
            entries = logger
                .read_day(today.pred_opt().unwrap_or(today))
                .unwrap_or_default();
        }
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "Order 42 status changed to Dispatched");
    }

    #[test]
    fn test_declined_cancel_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let logger = Arc::new(StatusChangeLogger::new(temp_dir.path().to_path_buf()));
        let mut order = order_in(OrderStatus::Dispatched);
        order.attach_logger(logger.clone());

        let err = request(&mut order, "Cancelled").unwrap_err();

        assert!(matches!(err, OrderError::CommentRequired));
        assert_eq!(order.status(), OrderStatus::Dispatched);
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_completed_to_new_scenario() {
        let mut order = order_in(OrderStatus::Completed);
        let err = request(&mut order, "New").unwrap_err();

        assert_eq!(err.to_string(), "Invalid status transition: Completed -> New");
        assert_eq!(order.status(), OrderStatus::Completed);
    }
}
