use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::status::OrderStatus;

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClearedOrders {
    pub deleted: u64,
}
