use sea_orm::EntityTrait;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    domain::cart::{Cart, ProductSnapshot},
    dto::cart::{AddToCartRequest, CartView},
    entity::products::Entity as Products,
    error::{AppError, AppResult},
    models::Order,
    response::{ApiResponse, Meta},
    services::{order_service, snapshots},
    state::AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutReceipt {
    pub order: Order,
    pub number: String,
    pub tracking_url: String,
}

pub async fn create_cart(state: &AppState) -> AppResult<ApiResponse<CartView>> {
    let id = state.carts.create().await.ok_or_else(|| {
        AppError::Unavailable("Too many open carts, please try again later.".into())
    })?;
    tracing::debug!(cart_id = %id, "cart created");
    Ok(ApiResponse::success(
        "Cart created",
        CartView::from_cart(id, &Cart::new())?,
        Some(Meta::empty()),
    ))
}

pub async fn get_cart(state: &AppState, id: Uuid) -> AppResult<ApiResponse<CartView>> {
    let cart = state.carts.get(id).await.ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success(
        "Cart",
        CartView::from_cart(id, &cart)?,
        Some(Meta::empty()),
    ))
}

pub async fn add_to_cart(
    state: &AppState,
    id: Uuid,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartView>> {
    let config = snapshots::load_config(&state.orm).await?;
    if !config.cart_enabled {
        return Err(AppError::BadRequest("Cart is disabled".into()));
    }

    let product = Products::find_by_id(payload.product_id)
        .one(&state.orm)
        .await?
        .map(snapshots::product_from_entity)
        .filter(|p| p.active)
        .ok_or_else(|| AppError::BadRequest("product not found".into()))?;

    let snapshot = ProductSnapshot::from(&product);
    let view = state
        .carts
        .update(id, |cart| {
            cart.add(snapshot)
                .and_then(|_| CartView::from_cart(id, cart))
        })
        .await
        .ok_or(AppError::NotFound)??;

    Ok(ApiResponse::success("Added to cart", view, Some(Meta::empty())))
}

pub async fn increase_item(
    state: &AppState,
    id: Uuid,
    product_id: Uuid,
) -> AppResult<ApiResponse<CartView>> {
    let view = state
        .carts
        .update(id, |cart| {
            cart.increase(product_id)
                .and_then(|_| CartView::from_cart(id, cart))
        })
        .await
        .ok_or(AppError::NotFound)??;
    Ok(ApiResponse::success("OK", view, Some(Meta::empty())))
}

pub async fn decrease_item(
    state: &AppState,
    id: Uuid,
    product_id: Uuid,
) -> AppResult<ApiResponse<CartView>> {
    let view = state
        .carts
        .update(id, |cart| {
            cart.decrease(product_id)
                .and_then(|_| CartView::from_cart(id, cart))
        })
        .await
        .ok_or(AppError::NotFound)??;
    Ok(ApiResponse::success("OK", view, Some(Meta::empty())))
}

pub async fn remove_item(
    state: &AppState,
    id: Uuid,
    product_id: Uuid,
) -> AppResult<ApiResponse<CartView>> {
    let view = state
        .carts
        .update(id, |cart| {
            cart.remove(product_id)
                .and_then(|_| CartView::from_cart(id, cart))
        })
        .await
        .ok_or(AppError::NotFound)??;
    Ok(ApiResponse::success("Removed from cart", view, Some(Meta::empty())))
}

/// The lines are frozen under the cart lock, so edits and a second checkout
/// are refused (409) until this one settles. Success clears exactly the
/// frozen lines; any failure unlocks the cart with its lines intact.
pub async fn checkout(state: &AppState, id: Uuid) -> AppResult<ApiResponse<CheckoutReceipt>> {
    let lines = state
        .carts
        .update(id, Cart::begin_checkout)
        .await
        .ok_or(AppError::NotFound)??;

    // Detached so a dropped request cannot leave the cart locked.
    let task_state = state.clone();
    let placed = tokio::spawn(async move {
        let placed = order_service::place_order(&task_state, lines).await;
        task_state
            .carts
            .update(id, |cart| cart.finish_checkout(placed.is_ok()))
            .await;
        placed
    })
    .await
    .map_err(|err| AppError::Internal(err.into()))?;

    let order = match placed {
        Ok(order) => order,
        Err(err @ AppError::BadRequest(_)) => return Err(err),
        Err(err) => {
            tracing::warn!(cart_id = %id, error = %err, "checkout failed, cart kept");
            return Err(AppError::Unavailable(
                "Order could not be submitted. Your cart was kept, please try again.".into(),
            ));
        }
    };

    let number = order.number();
    let tracking_url = format!("/api/live/orders/{}", order.id);
    Ok(ApiResponse::success(
        "Order placed",
        CheckoutReceipt {
            order,
            number,
            tracking_url,
        },
        Some(Meta::empty()),
    ))
}
