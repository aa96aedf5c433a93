use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::cart::{Cart, CartError, CartLine};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub product_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartView {
    pub id: Uuid,
    pub items: Vec<CartLine>,
    pub item_count: i64,
    pub total: i64,
}

impl CartView {
    pub fn from_cart(id: Uuid, cart: &Cart) -> Result<Self, CartError> {
        Ok(Self {
            id,
            items: cart.lines().to_vec(),
            item_count: cart.item_count(),
            total: cart.total()?,
        })
    }
}
