use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Lifecycle of an order. The only legal path is `New -> Preparing -> Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    New,
    Preparing,
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusError {
    #[error("cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("unknown order status '{0}'")]
    Unknown(String),
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [OrderStatus::New, OrderStatus::Preparing, OrderStatus::Ready];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::New => "New",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready",
        }
    }

    /// The single status reachable from `self`, if any.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::New => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => None,
        }
    }

    /// Label of the one admin action offered for this status.
    pub fn next_action(&self) -> Option<&'static str> {
        match self {
            OrderStatus::New => Some("start preparing"),
            OrderStatus::Preparing => Some("mark ready"),
            OrderStatus::Ready => None,
        }
    }

    /// Validates a requested move. Backward, skipping and no-op moves are rejected.
    pub fn transition(self, to: OrderStatus) -> Result<OrderStatus, StatusError> {
        match self.next() {
            Some(next) if next == to => Ok(to),
            _ => Err(StatusError::InvalidTransition { from: self, to }),
        }
    }

    /// Whether `self` is at or beyond `step` on the progress line.
    pub fn has_reached(&self, step: OrderStatus) -> bool {
        self.rank() >= step.rank()
    }

    fn rank(&self) -> u8 {
        match self {
            OrderStatus::New => 0,
            OrderStatus::Preparing => 1,
            OrderStatus::Ready => 2,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(OrderStatus::New),
            "preparing" => Ok(OrderStatus::Preparing),
            "ready" => Ok(OrderStatus::Ready),
            other => Err(StatusError::Unknown(other.to_string())),
        }
    }
}

/// One step of the three-step progress indicator shared by every order screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProgressStep {
    pub status: OrderStatus,
    pub label: String,
    pub active: bool,
}

pub fn progress_steps(current: OrderStatus) -> Vec<ProgressStep> {
    OrderStatus::ALL
        .iter()
        .map(|step| ProgressStep {
            status: *step,
            label: step.label().to_string(),
            active: current.has_reached(*step),
        })
        .collect()
}
