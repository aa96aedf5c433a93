use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod carts;
pub mod categories;
pub mod doc;
pub mod health;
pub mod live;
pub mod menu;
pub mod orders;
pub mod params;
pub mod products;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .merge(menu::router())
        .merge(orders::router())
        .nest("/auth", auth::router())
        .nest("/carts", carts::router())
        .nest("/admin", admin::router())
}

/// Long-lived event streams, kept apart so they stay out of the request concurrency limit.
pub fn create_live_router() -> Router<AppState> {
    Router::new()
        .nest("/live", live::router())
        .nest("/admin/live", live::admin_router())
}
