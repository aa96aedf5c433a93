//! Change feed standing in for the document store's push notifications.
//!
//! Writers announce which collection changed after their write commits.
//! Readers hold a [`Subscription`] and reload the full snapshot on every
//! announcement, so a dropped or coalesced notification only costs one reload.

use serde::Serialize;
use tokio::sync::broadcast::{self, error::RecvError};
use utoipa::ToSchema;
use uuid::Uuid;

const FEED_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Products,
    Categories,
    Orders,
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change {
    pub collection: Collection,
    /// Document touched by the write; `None` for bulk writes or after a lag.
    pub id: Option<Uuid>,
    /// Set when notifications were lost; every followed collection must reload.
    pub resync: bool,
}

impl Change {
    /// Whether a subscriber following document `id` must reload.
    pub fn touches(&self, id: Uuid) -> bool {
        self.id.is_none_or(|changed| changed == id)
    }
}

#[derive(Debug, Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<Change>,
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeFeed {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(FEED_CAPACITY);
        Self { tx }
    }

    pub fn publish(&self, collection: Collection, id: Option<Uuid>) {
        // No receivers is the normal idle state.
        let change = Change {
            collection,
            id,
            resync: false,
        };
        let receivers = self.tx.send(change).unwrap_or(0);
        tracing::debug!(?collection, ?id, receivers, "change published");
    }

    pub fn subscribe(&self, name: &'static str, collections: &[Collection]) -> Subscription {
        let subscription = Subscription {
            name,
            rx: self.tx.subscribe(),
            collections: collections.to_vec(),
        };
        tracing::info!(
            subscription = name,
            live = self.subscriber_count(),
            "subscription opened"
        );
        subscription
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// A live interest in one or more collections. Dropping it releases the
/// underlying receiver immediately.
#[derive(Debug)]
pub struct Subscription {
    name: &'static str,
    rx: broadcast::Receiver<Change>,
    collections: Vec<Collection>,
}

impl Subscription {
    /// Waits for the next change to a followed collection. Returns `None` once
    /// the feed is gone.
    pub async fn changed(&mut self) -> Option<Change> {
        loop {
            match self.rx.recv().await {
                Ok(change) if self.collections.contains(&change.collection) => {
                    return Some(change);
                }
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(subscription = self.name, skipped, "subscription lagged, forcing reload");
                    let collection = *self.collections.first()?;
                    return Some(Change {
                        collection,
                        id: None,
                        resync: true,
                    });
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        tracing::info!(subscription = self.name, "subscription released");
    }
}
