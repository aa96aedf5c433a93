use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};
use uuid::Uuid;

use crate::{
    dto::cart::{AddToCartRequest, CartView},
    error::AppResult,
    response::ApiResponse,
    services::cart_service::{self, CheckoutReceipt},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_cart))
        .route("/{id}", get(get_cart))
        .route("/{id}/items", post(add_to_cart))
        .route("/{id}/items/{product_id}", delete(remove_item))
        .route("/{id}/items/{product_id}/increase", post(increase_item))
        .route("/{id}/items/{product_id}/decrease", post(decrease_item))
        .route("/{id}/checkout", post(checkout))
}

#[utoipa::path(
    post,
    path = "/api/carts",
    responses(
        (status = 200, description = "New empty cart", body = ApiResponse<CartView>),
        (status = 503, description = "Too many open carts")
    ),
    tag = "Cart"
)]
pub async fn create_cart(State(state): State<AppState>) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::create_cart(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/carts/{id}",
    params(("id" = Uuid, Path, description = "Cart ID")),
    responses(
        (status = 200, description = "Cart lines and total", body = ApiResponse<CartView>),
        (status = 404, description = "Not Found")
    ),
    tag = "Cart"
)]
pub async fn get_cart(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::get_cart(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/carts/{id}/items",
    params(("id" = Uuid, Path, description = "Cart ID")),
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Adds one unit of the product", body = ApiResponse<CartView>),
        (status = 400, description = "Unknown or inactive product, or cart disabled"),
        (status = 404, description = "Not Found")
    ),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddToCartRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::add_to_cart(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/carts/{id}/items/{product_id}/increase",
    params(
        ("id" = Uuid, Path, description = "Cart ID"),
        ("product_id" = Uuid, Path, description = "Product ID")
    ),
    responses((status = 200, description = "Quantity increased", body = ApiResponse<CartView>)),
    tag = "Cart"
)]
pub async fn increase_item(
    State(state): State<AppState>,
    Path((id, product_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::increase_item(&state, id, product_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/carts/{id}/items/{product_id}/decrease",
    params(
        ("id" = Uuid, Path, description = "Cart ID"),
        ("product_id" = Uuid, Path, description = "Product ID")
    ),
    responses((status = 200, description = "Quantity decreased; the line is removed below 1", body = ApiResponse<CartView>)),
    tag = "Cart"
)]
pub async fn decrease_item(
    State(state): State<AppState>,
    Path((id, product_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::decrease_item(&state, id, product_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/carts/{id}/items/{product_id}",
    params(
        ("id" = Uuid, Path, description = "Cart ID"),
        ("product_id" = Uuid, Path, description = "Product ID")
    ),
    responses((status = 200, description = "Line removed", body = ApiResponse<CartView>)),
    tag = "Cart"
)]
pub async fn remove_item(
    State(state): State<AppState>,
    Path((id, product_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::remove_item(&state, id, product_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/carts/{id}/checkout",
    params(("id" = Uuid, Path, description = "Cart ID")),
    responses(
        (status = 200, description = "Order placed, cart cleared", body = ApiResponse<CheckoutReceipt>),
        (status = 400, description = "Cart is empty"),
        (status = 409, description = "Checkout of this cart already in progress"),
        (status = 503, description = "Order not stored; cart kept for retry")
    ),
    tag = "Cart"
)]
pub async fn checkout(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CheckoutReceipt>>> {
    let resp = cart_service::checkout(&state, id).await?;
    Ok(Json(resp))
}
