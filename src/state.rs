use std::{collections::HashMap, sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use tokio::{sync::RwLock, task::JoinHandle, time::Instant};
use uuid::Uuid;

use crate::{
    db::{DbPool, OrmConn},
    domain::cart::Cart,
    realtime::ChangeFeed,
    storage::BlobStore,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub feed: ChangeFeed,
    pub carts: CartStore,
    pub blobs: BlobStore,
    pub sessions: SessionRegistry,
}

impl AppState {
    pub fn new(
        pool: DbPool,
        orm: OrmConn,
        carts: CartStore,
        blobs: BlobStore,
        jwt_secret: impl Into<String>,
    ) -> Self {
        Self {
            pool,
            orm,
            feed: ChangeFeed::new(),
            carts,
            blobs,
            sessions: SessionRegistry::new(jwt_secret),
        }
    }
}

pub const DEFAULT_CART_IDLE: Duration = Duration::from_secs(2 * 60 * 60);
pub const DEFAULT_MAX_CARTS: usize = 10_000;

struct CartEntry {
    cart: Cart,
    touched: Instant,
}

/// Carts live only in process memory and are lost on restart.
///
/// A cart untouched for longer than the idle limit is evicted, and at most
/// `capacity` carts are held at once.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<RwLock<HashMap<Uuid, CartEntry>>>,
    idle: Duration,
    capacity: usize,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new(DEFAULT_CART_IDLE, DEFAULT_MAX_CARTS)
    }
}

impl CartStore {
    pub fn new(idle: Duration, capacity: usize) -> Self {
        Self {
            inner: Arc::default(),
            idle,
            capacity,
        }
    }

    /// `None` when the store is full even after evicting idle carts.
    pub async fn create(&self) -> Option<Uuid> {
        let mut carts = self.inner.write().await;
        if carts.len() >= self.capacity {
            let evicted = evict(&mut carts, Instant::now(), self.idle);
            tracing::debug!(evicted, "cart store full, idle carts evicted");
            if carts.len() >= self.capacity {
                return None;
            }
        }
        let id = Uuid::new_v4();
        carts.insert(
            id,
            CartEntry {
                cart: Cart::new(),
                touched: Instant::now(),
            },
        );
        Some(id)
    }

    pub async fn get(&self, id: Uuid) -> Option<Cart> {
        let mut carts = self.inner.write().await;
        carts.get_mut(&id).map(|entry| {
            entry.touched = Instant::now();
            entry.cart.clone()
        })
    }

    /// Runs `f` against the cart under the write lock.
    pub async fn update<T>(&self, id: Uuid, f: impl FnOnce(&mut Cart) -> T) -> Option<T> {
        let mut carts = self.inner.write().await;
        carts.get_mut(&id).map(|entry| {
            entry.touched = Instant::now();
            f(&mut entry.cart)
        })
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drops every cart idle for longer than the limit as of `now`.
    /// Carts with a pending checkout are kept.
    pub async fn evict_idle(&self, now: Instant) -> usize {
        evict(&mut *self.inner.write().await, now, self.idle)
    }

    /// Background task running [`CartStore::evict_idle`] every `every`.
    pub fn spawn_sweeper(&self, every: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let evicted = store.evict_idle(Instant::now()).await;
                if evicted > 0 {
                    tracing::info!(evicted, "idle carts evicted");
                }
            }
        })
    }
}

fn evict(carts: &mut HashMap<Uuid, CartEntry>, now: Instant, idle: Duration) -> usize {
    let before = carts.len();
    carts.retain(|_, entry| {
        entry.cart.is_checkout_pending() || now.saturating_duration_since(entry.touched) <= idle
    });
    before - carts.len()
}

/// Signing key plus the list of tokens signed out before expiry.
#[derive(Clone)]
pub struct SessionRegistry {
    secret: Arc<str>,
    revoked: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
}

impl SessionRegistry {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Arc::from(secret.into()),
            revoked: Arc::default(),
        }
    }

    pub fn secret(&self) -> &[u8] {
        self.secret.as_bytes()
    }

    pub async fn revoke(&self, jti: String, expires_at: DateTime<Utc>) {
        let mut revoked = self.revoked.write().await;
        let now = Utc::now();
        revoked.retain(|_, exp| *exp > now);
        revoked.insert(jti, expires_at);
    }

    pub async fn is_revoked(&self, jti: &str) -> bool {
        self.revoked.read().await.contains_key(jti)
    }
}
