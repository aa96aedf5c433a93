//! Server-Sent-Event endpoints. Each connection owns one subscription to the
//! change feed and releases it when the client disconnects.

use std::{convert::Infallible, pin::Pin, time::Duration};

use axum::{
    Router,
    extract::{Path, Query, State},
    response::sse::{Event, KeepAlive, KeepAliveStream, Sse},
    routing::get,
};
use futures::{Stream, StreamExt};
use uuid::Uuid;

use crate::{
    error::AppResult,
    middleware::auth::{AuthUser, ensure_admin},
    routes::params::{CategoryQuery, StatusQuery},
    services::live_service::{
        self, AdminCategoriesScreen, AdminOrdersScreen, AdminProductsScreen, LiveStream,
        MenuScreen,
    },
    state::AppState,
};

const KEEP_ALIVE: Duration = Duration::from_secs(15);

pub type EventStream = Pin<Box<dyn Stream<Item = Result<Event, Infallible>> + Send>>;

pub type LiveResponse = Sse<KeepAliveStream<EventStream>>;

fn sse(stream: LiveStream) -> LiveResponse {
    let events: EventStream = Box::pin(stream.map(|event| Ok::<_, Infallible>(event.into_sse())));
    Sse::new(events).keep_alive(KeepAlive::new().interval(KEEP_ALIVE))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/menu", get(live_menu))
        .route("/board", get(live_board))
        .route("/orders/{id}", get(live_order))
}

pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(live_admin_orders))
        .route("/products", get(live_admin_products))
        .route("/categories", get(live_admin_categories))
}

#[utoipa::path(
    get,
    path = "/api/live/menu",
    params(CategoryQuery),
    responses(
        (status = 200, description = "Stream of `menu` events")
    ),
    tag = "Live"
)]
pub async fn live_menu(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
) -> LiveResponse {
    sse(live_service::screen_stream(state, MenuScreen::new(query.filter())))
}

#[utoipa::path(
    get,
    path = "/api/live/board",
    responses(
        (status = 200, description = "Stream of `board` and `order_ready` events")
    ),
    tag = "Live"
)]
pub async fn live_board(State(state): State<AppState>) -> LiveResponse {
    sse(live_service::board_stream(state))
}

#[utoipa::path(
    get,
    path = "/api/live/orders/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Stream of `status`, `ready` and `removed` events"),
        (status = 404, description = "Not Found")
    ),
    tag = "Live"
)]
pub async fn live_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<LiveResponse> {
    let stream = live_service::tracking_stream(state, id).await?;
    Ok(sse(stream))
}

#[utoipa::path(
    get,
    path = "/api/admin/live/orders",
    params(StatusQuery),
    responses(
        (status = 200, description = "Stream of `admin_orders` events"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Live"
)]
pub async fn live_admin_orders(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<StatusQuery>,
) -> AppResult<LiveResponse> {
    ensure_admin(&user)?;
    let screen = AdminOrdersScreen::new(query.filter()?);
    Ok(sse(live_service::screen_stream(state, screen)))
}

#[utoipa::path(
    get,
    path = "/api/admin/live/products",
    params(CategoryQuery),
    responses(
        (status = 200, description = "Stream of `admin_products` events"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Live"
)]
pub async fn live_admin_products(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<CategoryQuery>,
) -> AppResult<LiveResponse> {
    ensure_admin(&user)?;
    let screen = AdminProductsScreen::new(query.filter());
    Ok(sse(live_service::screen_stream(state, screen)))
}

#[utoipa::path(
    get,
    path = "/api/admin/live/categories",
    responses(
        (status = 200, description = "Stream of `admin_categories` events"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Live"
)]
pub async fn live_admin_categories(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<LiveResponse> {
    ensure_admin(&user)?;
    let screen = AdminCategoriesScreen::default();
    Ok(sse(live_service::screen_stream(state, screen)))
}
