use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    domain::status::OrderStatus,
    models::{Order, order_number},
};

/// Emitted once when an order crosses into `Ready` between two snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct OrderReady {
    pub order_id: Uuid,
    pub number: String,
    pub message: String,
}

impl OrderReady {
    fn for_order(id: Uuid) -> Self {
        let number = order_number(id);
        Self {
            order_id: id,
            message: format!("Order #{number} is ready for pickup!"),
            number,
        }
    }
}

/// Remembers the statuses of the previous board snapshot.
#[derive(Debug, Default)]
pub struct BoardWatcher {
    previous: Option<HashMap<Uuid, OrderStatus>>,
}

impl BoardWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compares `snapshot` with the last one seen and returns one event per
    /// order that was known before, was not ready, and is ready now.
    /// The first snapshot only primes the watcher.
    pub fn observe(&mut self, snapshot: &[Order]) -> Vec<OrderReady> {
        let current: HashMap<Uuid, OrderStatus> =
            snapshot.iter().map(|o| (o.id, o.status)).collect();

        let events = match &self.previous {
            None => Vec::new(),
            Some(previous) => snapshot
                .iter()
                .filter(|order| order.status == OrderStatus::Ready)
                .filter(|order| {
                    previous
                        .get(&order.id)
                        .is_some_and(|before| *before != OrderStatus::Ready)
                })
                .map(|order| OrderReady::for_order(order.id))
                .collect(),
        };

        self.previous = Some(current);
        events
    }
}

/// Relative age label refreshed by the board ticker.
pub fn elapsed_label(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - created_at).num_minutes();
    if minutes < 1 {
        "just now".to_string()
    } else if minutes == 1 {
        "1 minute ago".to_string()
    } else if minutes < 60 {
        format!("{minutes} minutes ago")
    } else {
        format!("{}h ago", minutes / 60)
    }
}
