//! Order status model
//!
//! Statuses form a fixed progression `New -> Dispatched -> Completed`, with
//! `Cancelled` reachable from any non-terminal status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::OrderError;

/// Status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Freshly created, all fields editable
    #[default]
    New,
    /// Handed over to an executor
    Dispatched,
    /// Delivered
    Completed,
    /// Cancelled with an operator-supplied reason
    Cancelled,
}

impl OrderStatus {
    /// All statuses in progression order
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::New,
        OrderStatus::Dispatched,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    /// Display label, also used on the wire
    pub fn label(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Dispatched => "Dispatched",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Position in the forward progression. Cancelled sits outside it.
    fn rank(&self) -> Option<u8> {
        match self {
            Self::New => Some(0),
            Self::Dispatched => Some(1),
            Self::Completed => Some(2),
            Self::Cancelled => None,
        }
    }

    /// No transition may leave a terminal status
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Check whether moving from `self` to `target` is a legal status change
    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        if *self == target || target == Self::New || self.is_terminal() {
            return false;
        }

        match (self.rank(), target.rank()) {
            (_, None) => true,
            (Some(from), Some(to)) => to > from,
            (None, Some(_)) => false,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OrderStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| OrderError::UnknownStatus(s.to_string()))
    }
}

/// Which order fields an editing surface may change
///
/// Everything except the comment is locked once an order leaves `New`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldEditability {
    pub is_description_editable: bool,
    pub is_pickup_address_editable: bool,
    pub is_delivery_address_editable: bool,
    pub is_executor_editable: bool,
    pub is_width_editable: bool,
    pub is_height_editable: bool,
    pub is_depth_editable: bool,
    pub is_weight_editable: bool,
    pub is_comment_editable: bool,
}

impl FieldEditability {
    /// Compute the flags for an order in the given status
    pub fn for_status(status: OrderStatus) -> Self {
        let editable = status == OrderStatus::New;
        Self {
            is_description_editable: editable,
            is_pickup_address_editable: editable,
            is_delivery_address_editable: editable,
            is_executor_editable: editable,
            is_width_editable: editable,
            is_height_editable: editable,
            is_depth_editable: editable,
            is_weight_editable: editable,
            is_comment_editable: true,
        }
    }

    /// True when every field besides the comment is editable
    pub fn details_editable(&self) -> bool {
        self.is_description_editable
            && self.is_pickup_address_editable
            && self.is_delivery_address_editable
            && self.is_executor_editable
            && self.is_width_editable
            && self.is_height_editable
            && self.is_depth_editable
            && self.is_weight_editable
    }

    /// True when no field besides the comment is editable
    pub fn details_locked(&self) -> bool {
        !(self.is_description_editable
            || self.is_pickup_address_editable
            || self.is_delivery_address_editable
            || self.is_executor_editable
            || self.is_width_editable
            || self.is_height_editable
            || self.is_depth_editable
            || self.is_weight_editable)
    }
}
