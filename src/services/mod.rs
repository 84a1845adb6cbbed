//! Service layer for order-desk
//!
//! The service layer provides business logic on top of the order store,
//! handling validation, status transitions, and filtering.

pub mod order;
pub mod workflow;

pub use order::{OrderEdit, OrderFilter, OrderService};
pub use workflow::{
    CommentEdit, CommentPrompt, FixedComment, OrderStatusWorkflow, TransitionOutcome,
};
