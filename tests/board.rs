mod common;

use chrono::Duration;
use restaurant_ordering_api::{
    domain::{
        board::{BoardWatcher, elapsed_label},
        status::OrderStatus,
    },
    models::order_number,
    views::board_view,
};

use common::{at, line, order};

#[test]
fn ready_fires_once_when_an_order_becomes_ready() {
    let mut cooking = order(OrderStatus::Preparing, 0, vec![line("Burger", 2000, 1)]);
    let mut watcher = BoardWatcher::new();

    assert!(watcher.observe(std::slice::from_ref(&cooking)).is_empty());

    cooking.status = OrderStatus::Ready;
    let events = watcher.observe(std::slice::from_ref(&cooking));
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].order_id, cooking.id);
    assert_eq!(events[0].number, order_number(cooking.id));
    assert_eq!(
        events[0].message,
        format!("Order #{} is ready for pickup!", cooking.number())
    );

    // Same snapshot again: nothing new
    assert!(watcher.observe(std::slice::from_ref(&cooking)).is_empty());
}

#[test]
fn orders_already_ready_on_first_load_stay_quiet() {
    let done = order(OrderStatus::Ready, 0, vec![line("Fries", 1200, 1)]);
    let mut watcher = BoardWatcher::new();
    assert!(watcher.observe(std::slice::from_ref(&done)).is_empty());
    assert!(watcher.observe(std::slice::from_ref(&done)).is_empty());
}

#[test]
fn orders_that_first_appear_ready_stay_quiet() {
    let mut watcher = BoardWatcher::new();
    watcher.observe(&[]);

    let fresh = order(OrderStatus::Ready, 0, vec![line("Cola", 550, 1)]);
    assert!(watcher.observe(&[fresh]).is_empty());
}

#[test]
fn elapsed_labels() {
    let created = at(0);
    assert_eq!(elapsed_label(created, created + Duration::seconds(30)), "just now");
    assert_eq!(elapsed_label(created, created + Duration::minutes(1)), "1 minute ago");
    assert_eq!(elapsed_label(created, created + Duration::minutes(12)), "12 minutes ago");
    assert_eq!(elapsed_label(created, created + Duration::minutes(135)), "2h ago");
}

#[test]
fn board_cards_show_number_items_and_age() {
    let orders = vec![
        order(OrderStatus::New, 0, vec![line("Burger", 2000, 2)]),
        order(OrderStatus::Ready, 3, vec![line("Cola", 550, 1)]),
    ];
    let board = board_view(&orders, at(5));

    assert!(!board.is_empty());
    assert_eq!(board.orders.len(), 2);
    let first = &board.orders[0];
    assert_eq!(first.number.len(), 8);
    assert_eq!(first.number, first.number.to_uppercase());
    assert_eq!(first.items[0].quantity, 2);
    assert_eq!(first.total, 4000);
    assert_eq!(first.elapsed, "5 minutes ago");
    assert_eq!(board.orders[1].status_label, "Ready");
}

#[test]
fn every_status_stays_on_the_board_in_snapshot_order() {
    let orders: Vec<_> = OrderStatus::ALL
        .iter()
        .enumerate()
        .map(|(minute, status)| order(*status, minute as i64, vec![line("Fries", 1200, 1)]))
        .collect();
    let board = board_view(&orders, at(10));

    let shown: Vec<_> = board.orders.iter().map(|card| card.status).collect();
    assert_eq!(shown, OrderStatus::ALL.to_vec());
    assert!(board.orders.iter().zip(&orders).all(|(card, order)| card.id == order.id));
}
