mod common;

use restaurant_ordering_api::{
    domain::{
        projection::{
            CategoryFilter, Projection, StatusFilter, admin_products, menu_products,
            sort_newest_first,
        },
        status::OrderStatus,
    },
    models::{Category, SiteConfig},
    views::{admin_orders_view, menu_view},
};
use uuid::Uuid;

use common::{at, line, order, product};

#[test]
fn menu_hides_inactive_products_admin_does_not() {
    let products = vec![
        product("Lemonade", 700, "Drinks", false),
        product("Cola", 550, "Drinks", true),
        product("Burger", 2000, "Burgers", true),
    ];

    let menu: Vec<String> = menu_products(&products, &CategoryFilter::All)
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(menu, vec!["Burger", "Cola"]);

    let admin: Vec<String> = admin_products(&products, &CategoryFilter::All)
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(admin, vec!["Burger", "Cola", "Lemonade"]);
}

#[test]
fn category_filter_narrows_both_screens() {
    let products = vec![
        product("Cola", 550, "Drinks", true),
        product("Iced Tea", 650, "Drinks", false),
        product("Burger", 2000, "Burgers", true),
    ];
    let drinks = CategoryFilter::parse(Some("Drinks"));

    assert_eq!(menu_products(&products, &drinks).len(), 1);
    assert_eq!(admin_products(&products, &drinks).len(), 2);
    assert_eq!(CategoryFilter::parse(Some("all")), CategoryFilter::All);
    assert_eq!(CategoryFilter::parse(None), CategoryFilter::All);
}

#[test]
fn status_filter_parses_known_values_only() {
    assert_eq!(StatusFilter::parse(None), Ok(StatusFilter::All));
    assert_eq!(
        StatusFilter::parse(Some("ready")),
        Ok(StatusFilter::Only(OrderStatus::Ready))
    );
    assert!(StatusFilter::parse(Some("delivered")).is_err());
}

#[test]
fn snapshots_replace_the_whole_list() {
    let mut projection = Projection::new();
    assert!(!projection.is_loaded());

    projection.replace(vec![1, 2, 3]);
    let revision = projection.replace(vec![4]);

    assert_eq!(projection.items(), &[4]);
    assert_eq!(revision, 2);
    assert_eq!(projection.revision(), 2);
    assert!(projection.is_loaded());
}

#[test]
fn admin_orders_are_filtered_on_every_render() {
    let mut orders = vec![
        order(OrderStatus::New, 0, vec![line("Cola", 550, 1)]),
        order(OrderStatus::Preparing, 5, vec![line("Fries", 1200, 1)]),
        order(OrderStatus::New, 10, vec![line("Burger", 2000, 2)]),
    ];
    sort_newest_first(&mut orders);
    assert_eq!(orders[0].created_at, at(10));

    let only_new = admin_orders_view(&orders, StatusFilter::Only(OrderStatus::New));
    assert_eq!(only_new.items.len(), 2);
    assert_eq!(only_new.items[0].next_action.as_deref(), Some("start preparing"));

    let all = admin_orders_view(&orders, StatusFilter::All);
    assert_eq!(all.items.len(), 3);
    assert_eq!(all.items[1].next_status, Some(OrderStatus::Ready));
}

#[test]
fn menu_view_sorts_categories_and_carries_config() {
    let categories = vec![
        Category {
            id: Uuid::new_v4(),
            name: "drinks".into(),
            created_at: at(0),
        },
        Category {
            id: Uuid::new_v4(),
            name: "Burgers".into(),
            created_at: at(1),
        },
    ];
    let view = menu_view(SiteConfig::default(), &categories, &[], &CategoryFilter::All);

    assert_eq!(view.categories[0].name, "Burgers");
    assert_eq!(view.config.menu_name, "Xfood");
    assert!(view.products.is_empty());
}
