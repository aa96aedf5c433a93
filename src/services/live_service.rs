//! Realtime screens served as Server-Sent-Event streams.
//!
//! Each stream owns its projections and its [`Subscription`]; when the client
//! goes away the stream is dropped and both are released with it.

use std::{future::Future, pin::Pin, time::Duration};

use async_stream::stream;
use axum::response::sse::Event;
use chrono::Utc;
use futures::Stream;
use serde::Serialize;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use uuid::Uuid;

use crate::{
    domain::{
        board::BoardWatcher,
        projection::{CategoryFilter, Projection, StatusFilter},
        status::OrderStatus,
        tracking::OrderTracker,
    },
    dto::categories::CategoryWithCount,
    error::{AppError, AppResult},
    models::{Category, Order, Product, SiteConfig},
    realtime::{Change, Collection},
    services::{category_service, snapshots},
    state::AppState,
    views::{self, AdminOrdersView, AdminProductsView, MenuView},
};

const BOARD_TICK: Duration = Duration::from_secs(1);

/// One named server-sent event with its JSON payload.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveEvent {
    pub name: &'static str,
    pub data: serde_json::Value,
}

impl LiveEvent {
    fn encode<T: Serialize>(name: &'static str, data: &T) -> Option<Self> {
        match serde_json::to_value(data) {
            Ok(data) => Some(Self { name, data }),
            Err(err) => {
                tracing::warn!(event = name, error = %err, "failed to encode event");
                None
            }
        }
    }

    pub fn into_sse(self) -> Event {
        Event::default().event(self.name).data(self.data.to_string())
    }
}

pub type LiveStream = Pin<Box<dyn Stream<Item = LiveEvent> + Send>>;

/// A screen that re-renders from full snapshots of the collections it follows.
pub trait Screen: Send + 'static {
    type View: Serialize + Send;

    const NAME: &'static str;
    const COLLECTIONS: &'static [Collection];

    /// Reloads the projections affected by `change` (all of them when `None`).
    fn refresh(
        &mut self,
        state: &AppState,
        change: Option<Change>,
    ) -> impl Future<Output = AppResult<()>> + Send;

    fn render(&self) -> Self::View;
}

fn affects(change: Option<Change>, collection: Collection) -> bool {
    change.is_none_or(|c| c.collection == collection)
}

pub struct MenuScreen {
    filter: CategoryFilter,
    config: SiteConfig,
    categories: Projection<Category>,
    products: Projection<Product>,
}

impl MenuScreen {
    pub fn new(filter: CategoryFilter) -> Self {
        Self {
            filter,
            config: SiteConfig::default(),
            categories: Projection::new(),
            products: Projection::new(),
        }
    }
}

impl Screen for MenuScreen {
    type View = MenuView;

    const NAME: &'static str = "menu";
    const COLLECTIONS: &'static [Collection] =
        &[Collection::Products, Collection::Categories, Collection::Config];

    async fn refresh(&mut self, state: &AppState, change: Option<Change>) -> AppResult<()> {
        if affects(change, Collection::Config) {
            self.config = snapshots::load_config(&state.orm).await?;
        }
        if affects(change, Collection::Categories) {
            self.categories.replace(snapshots::load_categories(&state.orm).await?);
        }
        if affects(change, Collection::Products) {
            self.products.replace(snapshots::load_products(&state.orm).await?);
        }
        Ok(())
    }

    fn render(&self) -> MenuView {
        views::menu_view(
            self.config.clone(),
            self.categories.items(),
            self.products.items(),
            &self.filter,
        )
    }
}

pub struct AdminOrdersScreen {
    filter: StatusFilter,
    orders: Projection<Order>,
}

impl AdminOrdersScreen {
    pub fn new(filter: StatusFilter) -> Self {
        Self {
            filter,
            orders: Projection::new(),
        }
    }
}

impl Screen for AdminOrdersScreen {
    type View = AdminOrdersView;

    const NAME: &'static str = "admin_orders";
    const COLLECTIONS: &'static [Collection] = &[Collection::Orders];

    async fn refresh(&mut self, state: &AppState, _change: Option<Change>) -> AppResult<()> {
        self.orders.replace(snapshots::load_orders(&state.orm, None).await?);
        Ok(())
    }

    fn render(&self) -> AdminOrdersView {
        views::admin_orders_view(self.orders.items(), self.filter)
    }
}

pub struct AdminProductsScreen {
    filter: CategoryFilter,
    products: Projection<Product>,
}

impl AdminProductsScreen {
    pub fn new(filter: CategoryFilter) -> Self {
        Self {
            filter,
            products: Projection::new(),
        }
    }
}

impl Screen for AdminProductsScreen {
    type View = AdminProductsView;

    const NAME: &'static str = "admin_products";
    const COLLECTIONS: &'static [Collection] = &[Collection::Products];

    async fn refresh(&mut self, state: &AppState, _change: Option<Change>) -> AppResult<()> {
        self.products.replace(snapshots::load_products(&state.orm).await?);
        Ok(())
    }

    fn render(&self) -> AdminProductsView {
        views::admin_products_view(self.products.items(), &self.filter)
    }
}

#[derive(Default)]
pub struct AdminCategoriesScreen {
    categories: Projection<Category>,
    products: Projection<Product>,
}

impl Screen for AdminCategoriesScreen {
    type View = Vec<CategoryWithCount>;

    const NAME: &'static str = "admin_categories";
    const COLLECTIONS: &'static [Collection] = &[Collection::Categories, Collection::Products];

    async fn refresh(&mut self, state: &AppState, change: Option<Change>) -> AppResult<()> {
        if affects(change, Collection::Categories) {
            self.categories.replace(snapshots::load_categories(&state.orm).await?);
        }
        if affects(change, Collection::Products) {
            self.products.replace(snapshots::load_products(&state.orm).await?);
        }
        Ok(())
    }

    fn render(&self) -> Vec<CategoryWithCount> {
        category_service::with_counts(self.categories.items(), self.products.items())
    }
}

/// Emits the screen's view once, then again after every relevant change.
/// A failed reload keeps the last good view on screen.
pub fn screen_stream<S: Screen>(state: AppState, mut screen: S) -> LiveStream {
    let mut subscription = state.feed.subscribe(S::NAME, S::COLLECTIONS);
    Box::pin(stream! {
        let mut change = None;
        loop {
            let stale = match screen.refresh(&state, change).await {
                Ok(()) => {
                    if let Some(event) = LiveEvent::encode(S::NAME, &screen.render()) {
                        yield event;
                    }
                    false
                }
                Err(err) => {
                    tracing::warn!(screen = S::NAME, error = %err, "snapshot reload failed, view is stale");
                    true
                }
            };
            match subscription.changed().await {
                // After a failed reload or a lag every projection is refreshed.
                Some(next) => change = if stale || next.resync { None } else { Some(next) },
                None => break,
            }
        }
    })
}

enum BoardStep {
    Reload,
    Tick,
    Stop,
}

/// Public board: full board on every change, one `order_ready` event per
/// order that became ready since the previous snapshot, and a re-render
/// every second so elapsed labels stay fresh.
pub fn board_stream(state: AppState) -> LiveStream {
    let mut subscription = state.feed.subscribe("board", &[Collection::Orders]);
    Box::pin(stream! {
        let mut orders: Projection<Order> = Projection::new();
        let mut watcher = BoardWatcher::new();
        let mut ticker = interval_at(Instant::now() + BOARD_TICK, BOARD_TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut step = BoardStep::Reload;

        loop {
            match step {
                BoardStep::Reload => {
                    match snapshots::load_orders(&state.orm, Some(OrderStatus::ALL.as_slice())).await {
                        Ok(snapshot) => {
                            orders.replace(snapshot);
                            for ready in watcher.observe(orders.items()) {
                                tracing::info!(order_id = %ready.order_id, "order ready");
                                if let Some(event) = LiveEvent::encode("order_ready", &ready) {
                                    yield event;
                                }
                            }
                            if let Some(event) = LiveEvent::encode("board", &views::board_view(orders.items(), Utc::now())) {
                                yield event;
                            }
                        }
                        Err(err) => {
                            tracing::warn!(screen = "board", error = %err, "snapshot reload failed, view is stale");
                        }
                    }
                }
                BoardStep::Tick => {
                    let board = views::board_view(orders.items(), Utc::now());
                    if !board.is_empty() {
                        if let Some(event) = LiveEvent::encode("board", &board) {
                            yield event;
                        }
                    }
                }
                BoardStep::Stop => break,
            }

            step = tokio::select! {
                change = subscription.changed() => match change {
                    Some(_) => BoardStep::Reload,
                    None => BoardStep::Stop,
                },
                _ = ticker.tick() => BoardStep::Tick,
            };
        }
    })
}

/// Customer tracking of one order. Fails with `NotFound` when the order does
/// not exist at subscription time; ends with a `removed` event if it is deleted.
pub async fn tracking_stream(state: AppState, id: Uuid) -> AppResult<LiveStream> {
    // Subscribe before the first read so no change between the two is missed.
    let mut subscription = state.feed.subscribe("tracking", &[Collection::Orders]);
    let initial = snapshots::load_order(&state.orm, id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Box::pin(stream! {
        let mut tracker = OrderTracker::new(id);
        let mut snapshot = Some(initial);

        'follow: loop {
            match views::tracking_view(tracker.order_id(), tracker.observe(snapshot.as_ref())) {
                Some(view) => {
                    if let Some(ready) = &view.ready {
                        if let Some(event) = LiveEvent::encode("ready", ready) {
                            yield event;
                        }
                    }
                    if let Some(event) = LiveEvent::encode("status", &view) {
                        yield event;
                    }
                }
                None => {
                    if let Some(event) = LiveEvent::encode("removed", &serde_json::json!({ "order_id": id })) {
                        yield event;
                    }
                    break 'follow;
                }
            }

            loop {
                match subscription.changed().await {
                    Some(change) if change.touches(id) => break,
                    Some(_) => continue,
                    None => break 'follow,
                }
            }

            match snapshots::load_order(&state.orm, id).await {
                Ok(next) => snapshot = next,
                Err(err) => {
                    tracing::warn!(screen = "tracking", order_id = %id, error = %err, "snapshot reload failed, view is stale");
                }
            }
        }
    }))
}
