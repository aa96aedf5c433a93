mod common;

use std::time::Duration;

use restaurant_ordering_api::{
    domain::cart::{Cart, CartError, ProductSnapshot},
    state::CartStore,
};
use tokio::time::Instant;

use common::product;

const IDLE: Duration = Duration::from_secs(30 * 60);

#[tokio::test]
async fn idle_carts_are_evicted() {
    let store = CartStore::new(IDLE, 10_000);
    for _ in 0..1000 {
        store.create().await.expect("room for a cart");
    }
    assert_eq!(store.len().await, 1000);

    assert_eq!(store.evict_idle(Instant::now()).await, 0);
    assert_eq!(store.evict_idle(Instant::now() + IDLE + Duration::from_secs(1)).await, 1000);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn touching_a_cart_keeps_it_alive() {
    let store = CartStore::new(Duration::from_millis(50), 10);
    let stale = store.create().await.unwrap();
    let fresh = store.create().await.unwrap();

    tokio::time::sleep(Duration::from_millis(80)).await;
    assert!(store.get(fresh).await.is_some());

    assert_eq!(store.evict_idle(Instant::now()).await, 1);
    assert!(store.get(stale).await.is_none());
    assert!(store.get(fresh).await.is_some());
}

#[tokio::test]
async fn full_store_refuses_new_carts() {
    let store = CartStore::new(IDLE, 2);
    store.create().await.unwrap();
    store.create().await.unwrap();
    assert!(store.create().await.is_none());
    assert_eq!(store.len().await, 2);
}

#[tokio::test]
async fn full_store_makes_room_by_evicting_idle_carts() {
    let store = CartStore::new(Duration::from_millis(20), 2);
    store.create().await.unwrap();
    store.create().await.unwrap();

    tokio::time::sleep(Duration::from_millis(40)).await;
    assert!(store.create().await.is_some());
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn carts_with_a_pending_checkout_are_never_evicted() {
    let store = CartStore::new(Duration::from_millis(10), 10);
    let id = store.create().await.unwrap();
    let burger = product("Burger", 1000, "Burgers", true);
    store
        .update(id, |cart| cart.add(ProductSnapshot::from(&burger)))
        .await
        .unwrap()
        .unwrap();
    store.update(id, Cart::begin_checkout).await.unwrap().unwrap();

    tokio::time::sleep(Duration::from_millis(30)).await;
    assert_eq!(store.evict_idle(Instant::now()).await, 0);
    assert!(store.get(id).await.is_some());
}

#[tokio::test]
async fn a_line_added_during_checkout_is_refused_not_lost() {
    let store = CartStore::default();
    let id = store.create().await.unwrap();
    let a = product("Burger", 1000, "Burgers", true);
    let b = product("Cola", 550, "Drinks", true);
    store
        .update(id, |cart| cart.add(ProductSnapshot::from(&a)))
        .await
        .unwrap()
        .unwrap();

    let frozen = store.update(id, Cart::begin_checkout).await.unwrap().unwrap();
    assert_eq!(frozen.len(), 1);

    // A concurrent edit and a second checkout both bounce off the lock.
    let added = store.update(id, |cart| cart.add(ProductSnapshot::from(&b))).await.unwrap();
    assert_eq!(added, Err(CartError::CheckoutPending));
    let second = store.update(id, Cart::begin_checkout).await.unwrap();
    assert_eq!(second, Err(CartError::CheckoutPending));

    store.update(id, |cart| cart.finish_checkout(true)).await.unwrap();
    let cart = store.get(id).await.unwrap();
    assert!(cart.is_empty());
    assert!(!cart.is_checkout_pending());

    // The cart is open again for the next order.
    assert_eq!(store.update(id, |cart| cart.add(ProductSnapshot::from(&b))).await, Some(Ok(1)));
}
