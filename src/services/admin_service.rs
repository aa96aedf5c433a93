use chrono::Utc;
use sea_orm::sea_query::LockType;
use sea_orm::{ActiveModelTrait, EntityTrait, QuerySelect, Set, TransactionTrait};
use uuid::Uuid;

use crate::{
    audit,
    domain::{
        dashboard::{self, DashboardStats},
        projection::StatusFilter,
        status::OrderStatus,
    },
    dto::orders::{ClearedOrders, UpdateOrderStatusRequest},
    entity::orders::{ActiveModel as OrderActive, Entity as Orders},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    realtime::Collection,
    response::{ApiResponse, Meta},
    routes::params::ConfirmQuery,
    services::snapshots,
    state::AppState,
    views::{self, AdminOrderView, AdminOrdersView},
};

pub async fn list_all_orders(
    state: &AppState,
    user: &AuthUser,
    filter: StatusFilter,
) -> AppResult<ApiResponse<AdminOrdersView>> {
    ensure_admin(user)?;
    let orders = snapshots::load_orders(&state.orm, None).await?;
    let view = views::admin_orders_view(&orders, filter);
    let total = view.items.len();
    Ok(ApiResponse::success("Orders", view, Some(Meta::list(total))))
}

pub async fn get_order_admin(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<AdminOrderView>> {
    ensure_admin(user)?;
    let order = snapshots::load_order(&state.orm, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success(
        "Order found",
        AdminOrderView::from(order),
        Some(Meta::empty()),
    ))
}

/// Moves an order exactly one step forward and stamps `updated_at`.
pub async fn update_order_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<AdminOrderView>> {
    ensure_admin(user)?;

    let txn = state.orm.begin().await?;
    let existing = Orders::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    let current: OrderStatus = existing.status.parse()?;
    let next = current.transition(payload.status)?;

    let mut active: OrderActive = existing.into();
    active.status = Set(next.as_str().to_string());
    active.updated_at = Set(Some(Utc::now().into()));
    active.update(&txn).await?;

    let order = snapshots::load_order(&txn, id)
        .await?
        .ok_or(AppError::NotFound)?;
    txn.commit().await?;

    tracing::info!(order_id = %id, from = %current, to = %next, "order status changed");
    state.feed.publish(Collection::Orders, Some(id));
    audit::record(
        &state.pool,
        Some(user.user_id),
        "order_status_update",
        "orders",
        serde_json::json!({ "order_id": id, "from": current.as_str(), "to": next.as_str() }),
    )
    .await;

    Ok(ApiResponse::success(
        "Order updated",
        AdminOrderView::from(order),
        Some(Meta::empty()),
    ))
}

pub async fn delete_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    confirm: ConfirmQuery,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    confirm.require_once()?;

    let result = Orders::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    state.feed.publish(Collection::Orders, Some(id));
    audit::record(
        &state.pool,
        Some(user.user_id),
        "order_delete",
        "orders",
        serde_json::json!({ "order_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Hard-deletes every order. Needs both confirmations.
pub async fn clear_orders(
    state: &AppState,
    user: &AuthUser,
    confirm: ConfirmQuery,
) -> AppResult<ApiResponse<ClearedOrders>> {
    ensure_admin(user)?;
    confirm.require_twice()?;

    let deleted = Orders::delete_many().exec(&state.orm).await?.rows_affected;

    tracing::warn!(deleted, "all orders cleared");
    state.feed.publish(Collection::Orders, None);
    audit::record(
        &state.pool,
        Some(user.user_id),
        "orders_clear",
        "orders",
        serde_json::json!({ "deleted": deleted }),
    )
    .await;

    Ok(ApiResponse::success(
        "Orders cleared",
        ClearedOrders { deleted },
        Some(Meta::empty()),
    ))
}

pub async fn get_dashboard(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<DashboardStats>> {
    ensure_admin(user)?;
    let products = snapshots::load_products(&state.orm).await?;
    let orders = snapshots::load_orders(&state.orm, None).await?;
    Ok(ApiResponse::success(
        "Dashboard",
        dashboard::compute(&products, &orders),
        Some(Meta::empty()),
    ))
}
