use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    domain::status::OrderStatus,
    models::{Order, Product},
};

pub const UNCATEGORIZED: &str = "Uncategorized";
const RANKING_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DashboardStats {
    pub products_total: usize,
    pub products_active: usize,
    pub products_inactive: usize,
    pub orders_total: usize,
    pub orders_new: usize,
    pub orders_preparing: usize,
    pub orders_ready: usize,
    pub products_per_category: BTreeMap<String, usize>,
    pub ranking: Vec<RankedItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RankedItem {
    pub name: String,
    pub quantity: i64,
    pub category: String,
}

pub fn compute(products: &[Product], orders: &[Order]) -> DashboardStats {
    let products_active = products.iter().filter(|p| p.active).count();
    let count_status =
        |status: OrderStatus| orders.iter().filter(|o| o.status == status).count();

    let mut products_per_category = BTreeMap::new();
    for product in products {
        *products_per_category
            .entry(category_or_default(&product.category))
            .or_insert(0) += 1;
    }

    DashboardStats {
        products_total: products.len(),
        products_active,
        products_inactive: products.len() - products_active,
        orders_total: orders.len(),
        orders_new: count_status(OrderStatus::New),
        orders_preparing: count_status(OrderStatus::Preparing),
        orders_ready: count_status(OrderStatus::Ready),
        products_per_category,
        ranking: rank_items(products, orders),
    }
}

/// Top items by quantity ordered, keyed by the frozen line name. The category
/// comes from whichever current product still carries that name.
pub fn rank_items(products: &[Product], orders: &[Order]) -> Vec<RankedItem> {
    let mut totals: HashMap<&str, i64> = HashMap::new();
    for line in orders.iter().flat_map(|o| o.items.iter()) {
        *totals.entry(line.name.as_str()).or_insert(0) += i64::from(line.quantity);
    }

    let mut ranking: Vec<RankedItem> = totals
        .into_iter()
        .map(|(name, quantity)| RankedItem {
            name: name.to_string(),
            quantity,
            category: products
                .iter()
                .find(|p| p.name == name)
                .map(|p| category_or_default(&p.category))
                .unwrap_or_else(|| UNCATEGORIZED.to_string()),
        })
        .collect();

    ranking.sort_by(|a, b| b.quantity.cmp(&a.quantity).then_with(|| a.name.cmp(&b.name)));
    ranking.truncate(RANKING_SIZE);
    ranking
}

fn category_or_default(category: &str) -> String {
    if category.trim().is_empty() {
        UNCATEGORIZED.to_string()
    } else {
        category.to_string()
    }
}
