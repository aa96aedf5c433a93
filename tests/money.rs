mod common;

use restaurant_ordering_api::{
    dto::products::ProductPayload,
    error::AppError,
    models::OrderLine,
    services::{order_service, product_service::{self, MAX_PRICE}},
};

use common::{line, offline_state};

fn payload(price: i64) -> ProductPayload {
    ProductPayload {
        name: "Burger".into(),
        price,
        category: "Burgers".into(),
        description: String::new(),
        active: true,
    }
}

#[test]
fn prices_are_bounded() {
    assert!(product_service::validate_payload(&payload(0)).is_ok());
    assert!(product_service::validate_payload(&payload(MAX_PRICE)).is_ok());
    assert!(matches!(
        product_service::validate_payload(&payload(MAX_PRICE + 1)),
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        product_service::validate_payload(&payload(-1)),
        Err(AppError::BadRequest(_))
    ));
}

#[test]
fn order_totals_are_checked() {
    assert_eq!(
        OrderLine::total_of(&[line("Burger", 1000, 2), line("Cola", 550, 1)]),
        Some(2550)
    );
    assert_eq!(OrderLine::total_of(&[]), Some(0));
    assert_eq!(line("Gold", i64::MAX / 2 + 1, 2).subtotal(), None);
    assert_eq!(
        OrderLine::total_of(&[line("Gold", i64::MAX / 2 + 1, 1), line("Gold", i64::MAX / 2 + 1, 1)]),
        None
    );
}

#[tokio::test]
async fn oversized_orders_are_rejected_before_any_write() {
    let state = offline_state();
    let lines = vec![line("Gold", i64::MAX / 2 + 1, 1), line("Gold", i64::MAX / 2 + 1, 1)];
    assert!(matches!(
        order_service::place_order(&state, lines).await,
        Err(AppError::BadRequest(_))
    ));
}
