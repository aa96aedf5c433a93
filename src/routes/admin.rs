use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch, post, put},
};
use uuid::Uuid;

use crate::{
    domain::dashboard::DashboardStats,
    dto::orders::{ClearedOrders, UpdateOrderStatusRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::SiteConfig,
    response::ApiResponse,
    routes::{
        categories,
        params::{ConfirmQuery, StatusQuery},
        products,
    },
    services::{admin_service, config_service},
    state::AppState,
    views::{AdminOrderView, AdminOrdersView},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/orders", get(list_all_orders).delete(clear_orders))
        .route("/orders/{id}", get(get_order_admin).delete(delete_order))
        .route("/orders/{id}/status", patch(update_order_status))
        .route("/config", put(replace_config))
        .route("/config/reset", post(reset_config))
        .nest("/products", products::router())
        .nest("/categories", categories::router())
}

#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    responses(
        (status = 200, description = "Counts, products per category and best sellers", body = ApiResponse<DashboardStats>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<DashboardStats>>> {
    let resp = admin_service::get_dashboard(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders",
    params(StatusQuery),
    responses(
        (status = 200, description = "Get all orders (admin only)", body = ApiResponse<AdminOrdersView>),
        (status = 400, description = "Unknown status filter"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_all_orders(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<ApiResponse<AdminOrdersView>>> {
    let resp = admin_service::list_all_orders(&state, &user, query.filter()?).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order detail", body = ApiResponse<AdminOrderView>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_order_admin(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<AdminOrderView>>> {
    let resp = admin_service::get_order_admin(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/orders/{id}/status",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Status advanced one step", body = ApiResponse<AdminOrderView>),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Transition not allowed")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<ApiResponse<AdminOrderView>>> {
    let resp = admin_service::update_order_status(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/orders/{id}",
    params(("id" = Uuid, Path, description = "Order ID"), ConfirmQuery),
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "Confirmation missing"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Query(confirm): Query<ConfirmQuery>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = admin_service::delete_order(&state, &user, id, confirm).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/orders",
    params(ConfirmQuery),
    responses(
        (status = 200, description = "Every order deleted", body = ApiResponse<ClearedOrders>),
        (status = 400, description = "Both confirmations are required")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn clear_orders(
    State(state): State<AppState>,
    user: AuthUser,
    Query(confirm): Query<ConfirmQuery>,
) -> AppResult<Json<ApiResponse<ClearedOrders>>> {
    let resp = admin_service::clear_orders(&state, &user, confirm).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/config",
    request_body = SiteConfig,
    responses(
        (status = 200, description = "Configuration saved", body = ApiResponse<SiteConfig>),
        (status = 400, description = "Invalid configuration")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn replace_config(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<SiteConfig>,
) -> AppResult<Json<ApiResponse<SiteConfig>>> {
    let resp = config_service::replace_config(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/config/reset",
    params(ConfirmQuery),
    responses(
        (status = 200, description = "Defaults restored", body = ApiResponse<SiteConfig>),
        (status = 400, description = "Confirmation missing")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn reset_config(
    State(state): State<AppState>,
    user: AuthUser,
    Query(confirm): Query<ConfirmQuery>,
) -> AppResult<Json<ApiResponse<SiteConfig>>> {
    let resp = config_service::reset_config(&state, &user, confirm).await?;
    Ok(Json(resp))
}
