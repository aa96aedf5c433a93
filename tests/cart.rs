mod common;

use restaurant_ordering_api::{
    domain::cart::{Cart, CartError, MAX_QUANTITY, ProductSnapshot},
    dto::cart::CartView,
};
use uuid::Uuid;

use common::product;

#[test]
fn removing_a_line_drops_its_whole_quantity() {
    let a = product("Burger", 1000, "Burgers", true);
    let b = product("Cola", 550, "Drinks", true);

    let mut cart = Cart::new();
    assert_eq!(cart.add(ProductSnapshot::from(&a)), Ok(1));
    assert_eq!(cart.add(ProductSnapshot::from(&a)), Ok(2));
    assert_eq!(cart.add(ProductSnapshot::from(&b)), Ok(1));
    assert_eq!(cart.total(), Ok(2550));
    assert_eq!(cart.item_count(), 3);

    cart.remove(a.id).unwrap();
    assert_eq!(cart.total(), Ok(550));
    assert_eq!(cart.quantity_of(a.id), None);
    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.lines()[0].product.id, b.id);
}

#[test]
fn decreasing_the_last_unit_removes_the_line() {
    let burger = product("Burger", 2000, "Burgers", true);
    let cola = product("Cola", 550, "Drinks", true);

    let mut cart = Cart::new();
    cart.add(ProductSnapshot::from(&burger)).unwrap();
    cart.add(ProductSnapshot::from(&cola)).unwrap();
    assert_eq!(cart.total(), Ok(2550));

    assert_eq!(cart.decrease(burger.id), Ok(0));
    assert_eq!(cart.total(), Ok(550));
    assert_eq!(cart.quantity_of(burger.id), None);
}

#[test]
fn adding_twice_bumps_quantity_on_one_line() {
    let fries = product("Fries", 1200, "Sides", true);
    let mut cart = Cart::new();
    cart.add(ProductSnapshot::from(&fries)).unwrap();
    cart.add(ProductSnapshot::from(&fries)).unwrap();
    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.quantity_of(fries.id), Some(2));

    assert_eq!(cart.increase(fries.id), Ok(3));
    assert_eq!(cart.decrease(fries.id), Ok(2));
    assert_eq!(cart.total(), Ok(2400));
}

#[test]
fn unknown_lines_are_reported() {
    let mut cart = Cart::new();
    let missing = Uuid::new_v4();
    assert_eq!(cart.increase(missing), Err(CartError::NotInCart(missing)));
    assert_eq!(cart.remove(missing), Err(CartError::NotInCart(missing)));
}

#[test]
fn totals_that_do_not_fit_are_refused_without_panicking() {
    let gold = product("Gold Burger", i64::MAX / 2 + 1, "Burgers", true);
    let mut cart = Cart::new();

    assert_eq!(cart.add(ProductSnapshot::from(&gold)), Ok(1));
    assert_eq!(cart.add(ProductSnapshot::from(&gold)), Err(CartError::TotalOverflow));
    assert_eq!(cart.quantity_of(gold.id), Some(1));
    assert_eq!(cart.total(), Ok(i64::MAX / 2 + 1));

    assert_eq!(cart.increase(gold.id), Err(CartError::TotalOverflow));
    assert_eq!(cart.quantity_of(gold.id), Some(1));

    let other = product("Other", i64::MAX / 2 + 1, "Burgers", true);
    assert_eq!(cart.add(ProductSnapshot::from(&other)), Err(CartError::TotalOverflow));
    assert_eq!(cart.lines().len(), 1);
}

#[test]
fn line_quantity_is_capped() {
    let water = product("Water", 100, "Drinks", true);
    let mut cart = Cart::new();
    cart.add(ProductSnapshot::from(&water)).unwrap();
    for _ in 1..MAX_QUANTITY {
        cart.increase(water.id).unwrap();
    }
    assert_eq!(cart.quantity_of(water.id), Some(MAX_QUANTITY));
    assert_eq!(cart.increase(water.id), Err(CartError::QuantityLimit));
    assert_eq!(cart.add(ProductSnapshot::from(&water)), Err(CartError::QuantityLimit));
}

#[test]
fn frozen_lines_do_not_follow_later_edits() {
    let mut cola = product("Cola", 550, "Drinks", true);
    let mut cart = Cart::new();
    cart.add(ProductSnapshot::from(&cola)).unwrap();
    cart.add(ProductSnapshot::from(&cola)).unwrap();

    let frozen = cart.freeze().unwrap();

    cola.name = "Cola Zero".into();
    cola.price = 600;
    cart.remove(cola.id).unwrap();

    assert_eq!(frozen.len(), 1);
    assert_eq!(frozen[0].name, "Cola");
    assert_eq!(frozen[0].unit_price, 550);
    assert_eq!(frozen[0].quantity, 2);
    assert_eq!(frozen[0].product_id, Some(cola.id));
    assert_eq!(frozen[0].subtotal(), Some(1100));
}

#[test]
fn empty_cart_cannot_be_frozen() {
    let mut cart = Cart::new();
    assert!(cart.is_empty());
    assert_eq!(cart.freeze(), Err(CartError::Empty));
    assert_eq!(cart.begin_checkout(), Err(CartError::Empty));
    assert!(!cart.is_checkout_pending());
}

#[test]
fn pending_checkout_locks_the_cart() {
    let burger = product("Burger", 1000, "Burgers", true);
    let cola = product("Cola", 550, "Drinks", true);
    let mut cart = Cart::new();
    cart.add(ProductSnapshot::from(&burger)).unwrap();

    let lines = cart.begin_checkout().unwrap();
    assert_eq!(lines.len(), 1);
    assert!(cart.is_checkout_pending());

    assert_eq!(cart.begin_checkout(), Err(CartError::CheckoutPending));
    assert_eq!(cart.add(ProductSnapshot::from(&cola)), Err(CartError::CheckoutPending));
    assert_eq!(cart.increase(burger.id), Err(CartError::CheckoutPending));
    assert_eq!(cart.decrease(burger.id), Err(CartError::CheckoutPending));
    assert_eq!(cart.remove(burger.id), Err(CartError::CheckoutPending));
    assert_eq!(cart.lines().len(), 1);
}

#[test]
fn failed_checkout_keeps_lines_and_allows_retry() {
    let burger = product("Burger", 1000, "Burgers", true);
    let mut cart = Cart::new();
    cart.add(ProductSnapshot::from(&burger)).unwrap();
    cart.add(ProductSnapshot::from(&burger)).unwrap();

    cart.begin_checkout().unwrap();
    cart.finish_checkout(false);
    assert!(!cart.is_checkout_pending());
    assert_eq!(cart.quantity_of(burger.id), Some(2));

    let retry = cart.begin_checkout().unwrap();
    assert_eq!(retry[0].quantity, 2);
    cart.finish_checkout(true);
    assert!(cart.is_empty());
    assert!(!cart.is_checkout_pending());
}

#[test]
fn cart_view_reports_lines_and_totals() {
    let burger = product("Burger", 2000, "Burgers", true);
    let mut cart = Cart::new();
    cart.add(ProductSnapshot::from(&burger)).unwrap();
    cart.add(ProductSnapshot::from(&burger)).unwrap();

    let id = Uuid::new_v4();
    let view = CartView::from_cart(id, &cart).unwrap();
    assert_eq!(view.id, id);
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.item_count, 2);
    assert_eq!(view.total, 4000);
}
