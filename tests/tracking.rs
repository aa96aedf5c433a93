mod common;

use restaurant_ordering_api::{
    domain::{
        status::OrderStatus,
        tracking::{OrderTracker, TrackingUpdate},
    },
    views::tracking_view,
};

use common::{line, order};

#[test]
fn tracker_notifies_ready_exactly_once() {
    let mut current = order(OrderStatus::New, 0, vec![line("Burger", 2000, 1)]);
    let mut tracker = OrderTracker::new(current.id);

    let view = tracking_view(current.id, tracker.observe(Some(&current))).unwrap();
    assert_eq!(view.status, OrderStatus::New);
    assert!(view.ready.is_none());

    current.status = OrderStatus::Preparing;
    let view = tracking_view(current.id, tracker.observe(Some(&current))).unwrap();
    assert_eq!(view.status, OrderStatus::Preparing);
    assert_eq!(view.steps.iter().filter(|s| s.active).count(), 2);

    current.status = OrderStatus::Ready;
    let view = tracking_view(current.id, tracker.observe(Some(&current))).unwrap();
    let ready = view.ready.expect("ready notification");
    assert_eq!(ready.message, format!("Your order #{} is ready!", current.number()));

    let again = tracking_view(current.id, tracker.observe(Some(&current))).unwrap();
    assert!(again.ready.is_none());
}

#[test]
fn a_fresh_tracker_notifies_again() {
    let done = order(OrderStatus::Ready, 0, vec![line("Cola", 550, 1)]);
    for _ in 0..2 {
        let mut tracker = OrderTracker::new(done.id);
        match tracker.observe(Some(&done)) {
            TrackingUpdate::Progress { ready, .. } => assert!(ready.is_some()),
            TrackingUpdate::Removed => panic!("order is still there"),
        }
    }
}

#[test]
fn deleted_orders_end_tracking() {
    let gone = order(OrderStatus::Preparing, 0, vec![line("Fries", 1200, 1)]);
    let mut tracker = OrderTracker::new(gone.id);
    assert_eq!(tracker.order_id(), gone.id);
    assert_eq!(tracker.observe(None), TrackingUpdate::Removed);
    assert!(tracking_view(gone.id, TrackingUpdate::Removed).is_none());
}
