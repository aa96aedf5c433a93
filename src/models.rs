use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::status::OrderStatus;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Prices are integer minor units (cents).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub category: String,
    pub image_url: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A line frozen at checkout. Later product edits never reach it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderLine {
    pub product_id: Option<Uuid>,
    pub name: String,
    pub unit_price: i64,
    pub quantity: i32,
}

impl OrderLine {
    /// `None` when the amount does not fit in an `i64`.
    pub fn subtotal(&self) -> Option<i64> {
        self.unit_price.checked_mul(i64::from(self.quantity))
    }

    pub fn total_of(lines: &[OrderLine]) -> Option<i64> {
        lines
            .iter()
            .try_fold(0i64, |sum, line| sum.checked_add(line.subtotal()?))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub items: Vec<OrderLine>,
    pub total: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Short customer-facing number: first 8 characters of the id, upper-cased.
    pub fn number(&self) -> String {
        order_number(self.id)
    }
}

pub fn order_number(id: Uuid) -> String {
    id.simple().to_string()[..8].to_uppercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StoreStatus {
    Open,
    Closed,
}

impl StoreStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreStatus::Open => "open",
            StoreStatus::Closed => "closed",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "closed" => StoreStatus::Closed,
            _ => StoreStatus::Open,
        }
    }
}

/// Singleton branding and behaviour settings. Last write wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SiteConfig {
    pub menu_name: String,
    pub logo_url: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub font: String,
    pub welcome_title: String,
    pub address: String,
    pub whatsapp: String,
    pub store_status: StoreStatus,
    pub dine_in: bool,
    pub pickup: bool,
    pub delivery: bool,
    pub cart_enabled: bool,
    pub pix_key: String,
    pub pix_qr_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            menu_name: "Xfood".into(),
            logo_url: "img/logo.jpg".into(),
            primary_color: "#3b82f6".into(),
            secondary_color: "#64748b".into(),
            font: "DM Sans".into(),
            welcome_title: "Welcome".into(),
            address: String::new(),
            whatsapp: String::new(),
            store_status: StoreStatus::Open,
            dine_in: true,
            pickup: true,
            delivery: true,
            cart_enabled: true,
            pix_key: String::new(),
            pix_qr_url: String::new(),
        }
    }
}
