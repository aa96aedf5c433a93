//! Per-screen view models. Each screen derives its own view from the same
//! projected lists; nothing here touches the database.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    domain::{
        board::{OrderReady, elapsed_label},
        projection::{self, CategoryFilter, StatusFilter},
        status::{OrderStatus, ProgressStep, progress_steps},
        tracking::TrackingUpdate,
    },
    models::{Category, Order, Product, SiteConfig},
};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MenuView {
    pub config: SiteConfig,
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
}

pub fn menu_view(
    config: SiteConfig,
    categories: &[Category],
    products: &[Product],
    filter: &CategoryFilter,
) -> MenuView {
    MenuView {
        config,
        categories: projection::sorted_categories(categories),
        products: projection::menu_products(products, filter),
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BoardItem {
    pub name: String,
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BoardCard {
    pub id: Uuid,
    pub number: String,
    pub status: OrderStatus,
    pub status_label: String,
    pub steps: Vec<ProgressStep>,
    pub items: Vec<BoardItem>,
    pub total: i64,
    pub created_at: DateTime<Utc>,
    pub elapsed: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BoardView {
    pub orders: Vec<BoardCard>,
    pub generated_at: DateTime<Utc>,
}

impl BoardView {
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

/// Every order is on the board: new, preparing and ready are all live statuses.
pub fn board_view(orders: &[Order], now: DateTime<Utc>) -> BoardView {
    let orders = orders
        .iter()
        .map(|order| BoardCard {
            id: order.id,
            number: order.number(),
            status: order.status,
            status_label: order.status.label().to_string(),
            steps: progress_steps(order.status),
            items: order
                .items
                .iter()
                .map(|line| BoardItem {
                    name: line.name.clone(),
                    quantity: line.quantity,
                })
                .collect(),
            total: order.total,
            created_at: order.created_at,
            elapsed: elapsed_label(order.created_at, now),
        })
        .collect();

    BoardView {
        orders,
        generated_at: now,
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TrackingView {
    pub order_id: Uuid,
    pub number: String,
    pub status: OrderStatus,
    pub steps: Vec<ProgressStep>,
    pub ready: Option<OrderReady>,
}

/// `None` when the tracked order no longer exists.
pub fn tracking_view(order_id: Uuid, update: TrackingUpdate) -> Option<TrackingView> {
    match update {
        TrackingUpdate::Progress {
            status,
            steps,
            ready,
        } => Some(TrackingView {
            order_id,
            number: crate::models::order_number(order_id),
            status,
            steps,
            ready,
        }),
        TrackingUpdate::Removed => None,
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminOrderView {
    pub order: Order,
    pub number: String,
    pub steps: Vec<ProgressStep>,
    pub next_status: Option<OrderStatus>,
    pub next_action: Option<String>,
}

impl From<Order> for AdminOrderView {
    fn from(order: Order) -> Self {
        Self {
            number: order.number(),
            steps: progress_steps(order.status),
            next_status: order.status.next(),
            next_action: order.status.next_action().map(str::to_string),
            order,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminOrdersView {
    pub items: Vec<AdminOrderView>,
}

pub fn admin_orders_view(orders: &[Order], filter: StatusFilter) -> AdminOrdersView {
    AdminOrdersView {
        items: projection::admin_orders(orders, filter)
            .into_iter()
            .map(AdminOrderView::from)
            .collect(),
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminProductsView {
    pub items: Vec<Product>,
}

pub fn admin_products_view(products: &[Product], filter: &CategoryFilter) -> AdminProductsView {
    AdminProductsView {
        items: projection::admin_products(products, filter),
    }
}
