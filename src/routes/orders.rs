use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    response::ApiResponse,
    services::order_service,
    state::AppState,
    views::{BoardView, TrackingView},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/board", get(get_board))
        .route("/orders/{id}", get(get_order))
}

#[utoipa::path(
    get,
    path = "/api/board",
    responses(
        (status = 200, description = "Public order board", body = ApiResponse<BoardView>)
    ),
    tag = "Orders"
)]
pub async fn get_board(State(state): State<AppState>) -> AppResult<Json<ApiResponse<BoardView>>> {
    let resp = order_service::get_board(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order progress", body = ApiResponse<TrackingView>),
        (status = 404, description = "Not Found")
    ),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<TrackingView>>> {
    let resp = order_service::get_tracking(&state, id).await?;
    Ok(Json(resp))
}
