use chrono::Utc;
use sea_orm::{ActiveModelTrait, Set, TransactionTrait};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    domain::{status::OrderStatus, tracking::OrderTracker},
    entity::{
        order_items::ActiveModel as OrderItemActive,
        orders::ActiveModel as OrderActive,
    },
    error::{AppError, AppResult},
    models::{Order, OrderLine},
    realtime::Collection,
    response::{ApiResponse, Meta},
    services::snapshots,
    state::AppState,
    views::{self, BoardView, TrackingView},
};

/// Writes a new order with status `new` and its frozen lines in one transaction.
pub async fn place_order(state: &AppState, lines: Vec<OrderLine>) -> AppResult<Order> {
    if lines.is_empty() {
        return Err(AppError::BadRequest("Order has no items".into()));
    }
    if lines.iter().any(|line| line.quantity <= 0) {
        return Err(AppError::BadRequest("Order has invalid quantity".into()));
    }
    let total = OrderLine::total_of(&lines)
        .ok_or_else(|| AppError::BadRequest("Order total is too large".into()))?;

    let txn = state.orm.begin().await?;

    let order_id = Uuid::new_v4();
    OrderActive {
        id: Set(order_id),
        total: Set(total),
        status: Set(OrderStatus::New.as_str().to_string()),
        created_at: NotSet,
        updated_at: Set(None),
    }
    .insert(&txn)
    .await?;

    for (position, line) in lines.iter().enumerate() {
        OrderItemActive {
            id: Set(Uuid::new_v4()),
            order_id: Set(order_id),
            position: Set(position as i32),
            product_id: Set(line.product_id),
            name: Set(line.name.clone()),
            unit_price: Set(line.unit_price),
            quantity: Set(line.quantity),
        }
        .insert(&txn)
        .await?;
    }

    let order = snapshots::load_order(&txn, order_id)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("order {order_id} vanished after insert")))?;

    txn.commit().await?;

    tracing::info!(order_id = %order.id, total = order.total, lines = order.items.len(), "order placed");
    state.feed.publish(Collection::Orders, Some(order.id));

    Ok(order)
}

/// One-shot read of the customer tracking view.
pub async fn get_tracking(state: &AppState, id: Uuid) -> AppResult<ApiResponse<TrackingView>> {
    let order = snapshots::load_order(&state.orm, id).await?;
    let mut tracker = OrderTracker::new(id);
    let view = views::tracking_view(id, tracker.observe(order.as_ref())).ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Order", view, Some(Meta::empty())))
}

pub async fn board_snapshot(state: &AppState) -> AppResult<BoardView> {
    let orders = snapshots::load_orders(&state.orm, Some(OrderStatus::ALL.as_slice())).await?;
    Ok(views::board_view(&orders, Utc::now()))
}

pub async fn get_board(state: &AppState) -> AppResult<ApiResponse<BoardView>> {
    let board = board_snapshot(state).await?;
    let total = board.orders.len();
    Ok(ApiResponse::success(
        "Board",
        board,
        Some(Meta::list(total)),
    ))
}
