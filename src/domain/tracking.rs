use uuid::Uuid;

use crate::{
    domain::{
        board::OrderReady,
        status::{OrderStatus, ProgressStep, progress_steps},
    },
    models::Order,
};

/// What a customer's tracking screen should show after one document snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackingUpdate {
    Progress {
        status: OrderStatus,
        steps: Vec<ProgressStep>,
        ready: Option<OrderReady>,
    },
    Removed,
}

/// Follows a single order for the lifetime of one subscription.
/// The ready notification is not persisted anywhere; a new tracker starts fresh.
#[derive(Debug)]
pub struct OrderTracker {
    order_id: Uuid,
    notified: bool,
}

impl OrderTracker {
    pub fn new(order_id: Uuid) -> Self {
        Self {
            order_id,
            notified: false,
        }
    }

    pub fn order_id(&self) -> Uuid {
        self.order_id
    }

    pub fn observe(&mut self, snapshot: Option<&Order>) -> TrackingUpdate {
        let Some(order) = snapshot else {
            return TrackingUpdate::Removed;
        };

        let ready = if order.status == OrderStatus::Ready && !self.notified {
            self.notified = true;
            Some(ready_event(order))
        } else {
            None
        };

        TrackingUpdate::Progress {
            status: order.status,
            steps: progress_steps(order.status),
            ready,
        }
    }
}

fn ready_event(order: &Order) -> OrderReady {
    let number = order.number();
    OrderReady {
        order_id: order.id,
        message: format!("Your order #{number} is ready!"),
        number,
    }
}
