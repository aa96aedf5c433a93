mod common;

use restaurant_ordering_api::domain::{
    dashboard::{UNCATEGORIZED, compute, rank_items},
    status::OrderStatus,
};

use common::{line, order, product};

#[test]
fn counts_products_and_orders() {
    let products = vec![
        product("Burger", 2000, "Burgers", true),
        product("Cola", 550, "Drinks", true),
        product("Lemonade", 700, "Drinks", false),
        product("Mystery", 100, "", true),
    ];
    let orders = vec![
        order(OrderStatus::New, 0, vec![line("Burger", 2000, 1)]),
        order(OrderStatus::Preparing, 1, vec![line("Cola", 550, 2)]),
        order(OrderStatus::Ready, 2, vec![line("Cola", 550, 1)]),
        order(OrderStatus::Ready, 3, vec![line("Burger", 2000, 1)]),
    ];

    let stats = compute(&products, &orders);
    assert_eq!(stats.products_total, 4);
    assert_eq!(stats.products_active, 3);
    assert_eq!(stats.products_inactive, 1);
    assert_eq!(stats.orders_total, 4);
    assert_eq!(stats.orders_new, 1);
    assert_eq!(stats.orders_preparing, 1);
    assert_eq!(stats.orders_ready, 2);
    assert_eq!(stats.products_per_category.get("Drinks"), Some(&2));
    assert_eq!(stats.products_per_category.get(UNCATEGORIZED), Some(&1));
}

#[test]
fn ranking_sums_quantities_by_line_name() {
    let products = vec![product("Cola", 550, "Drinks", true)];
    let orders = vec![
        order(
            OrderStatus::New,
            0,
            vec![line("Cola", 550, 2), line("Discontinued Wrap", 900, 3)],
        ),
        order(OrderStatus::Ready, 1, vec![line("Cola", 550, 2)]),
    ];

    let ranking = rank_items(&products, &orders);
    assert_eq!(ranking.len(), 2);
    assert_eq!(ranking[0].name, "Cola");
    assert_eq!(ranking[0].quantity, 4);
    assert_eq!(ranking[0].category, "Drinks");
    assert_eq!(ranking[1].name, "Discontinued Wrap");
    assert_eq!(ranking[1].category, UNCATEGORIZED);
}

#[test]
fn ranking_keeps_the_top_ten() {
    let lines = (0..15)
        .map(|i| line(&format!("Item {i:02}"), 100, i + 1))
        .collect();
    let orders = vec![order(OrderStatus::New, 0, lines)];

    let ranking = rank_items(&[], &orders);
    assert_eq!(ranking.len(), 10);
    assert_eq!(ranking[0].name, "Item 14");
    assert_eq!(ranking[9].name, "Item 05");
}
