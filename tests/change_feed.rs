use restaurant_ordering_api::realtime::{ChangeFeed, Collection};
use uuid::Uuid;

#[tokio::test]
async fn subscribers_only_see_their_collections() {
    let feed = ChangeFeed::new();
    let mut orders = feed.subscribe("orders", &[Collection::Orders]);

    let id = Uuid::new_v4();
    feed.publish(Collection::Products, None);
    feed.publish(Collection::Orders, Some(id));

    let change = orders.changed().await.expect("change");
    assert_eq!(change.collection, Collection::Orders);
    assert!(change.touches(id));
    assert!(!change.touches(Uuid::new_v4()));
    assert!(!change.resync);
}

#[tokio::test]
async fn bulk_changes_touch_every_document() {
    let feed = ChangeFeed::new();
    let mut orders = feed.subscribe("orders", &[Collection::Orders]);
    feed.publish(Collection::Orders, None);
    let change = orders.changed().await.expect("change");
    assert!(change.touches(Uuid::new_v4()));
}

#[tokio::test]
async fn dropping_a_subscription_releases_it() {
    let feed = ChangeFeed::new();
    let first = feed.subscribe("menu", &[Collection::Products, Collection::Config]);
    let second = feed.subscribe("board", &[Collection::Orders]);
    assert_eq!(feed.subscriber_count(), 2);

    drop(first);
    assert_eq!(feed.subscriber_count(), 1);
    drop(second);
    assert_eq!(feed.subscriber_count(), 0);
}

#[tokio::test]
async fn lagging_subscribers_are_told_to_resync() {
    let feed = ChangeFeed::new();
    let mut menu = feed.subscribe("menu", &[Collection::Products, Collection::Config]);
    for _ in 0..300 {
        feed.publish(Collection::Products, Some(Uuid::new_v4()));
    }

    let change = menu.changed().await.expect("change");
    assert!(change.resync);
    assert_eq!(change.id, None);
}
