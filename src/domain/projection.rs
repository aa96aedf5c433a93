//! In-memory projections of a collection.
//!
//! A projection never patches itself: every notification hands it a full
//! snapshot which replaces the previous list wholesale. Filters run
//! downstream on every render and are never cached.

use std::cmp::Ordering;

use crate::{
    domain::status::OrderStatus,
    models::{Category, Order, Product},
};

#[derive(Debug, Clone)]
pub struct Projection<T> {
    items: Vec<T>,
    revision: u64,
}

impl<T> Default for Projection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            revision: 0,
        }
    }
}

impl<T> Projection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards the current list and installs `snapshot`. Returns the new revision.
    pub fn replace(&mut self, snapshot: Vec<T>) -> u64 {
        self.items = snapshot;
        self.revision += 1;
        self.revision
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of snapshots applied so far; 0 means nothing has been loaded yet.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_loaded(&self) -> bool {
        self.revision > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// `None`, empty and `"all"` all mean no filter.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") | Some("all") => CategoryFilter::All,
            Some(name) => CategoryFilter::Named(name.to_string()),
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => product.category == *name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    pub fn parse(raw: Option<&str>) -> Result<Self, crate::domain::status::StatusError> {
        match raw.map(str::trim) {
            None | Some("") | Some("all") => Ok(StatusFilter::All),
            Some(value) => Ok(StatusFilter::Only(value.parse()?)),
        }
    }

    pub fn matches(&self, order: &Order) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => order.status == *status,
        }
    }
}

/// Customer menu: active products only, optionally narrowed to one category.
pub fn menu_products(products: &[Product], filter: &CategoryFilter) -> Vec<Product> {
    let mut visible: Vec<Product> = products
        .iter()
        .filter(|p| p.active && filter.matches(p))
        .cloned()
        .collect();
    visible.sort_by(by_name);
    visible
}

/// Admin catalogue: every product regardless of `active`.
pub fn admin_products(products: &[Product], filter: &CategoryFilter) -> Vec<Product> {
    let mut visible: Vec<Product> = products.iter().filter(|p| filter.matches(p)).cloned().collect();
    visible.sort_by(by_name);
    visible
}

pub fn admin_orders(orders: &[Order], filter: StatusFilter) -> Vec<Order> {
    orders.iter().filter(|o| filter.matches(o)).cloned().collect()
}

pub fn sorted_categories(categories: &[Category]) -> Vec<Category> {
    let mut sorted = categories.to_vec();
    sorted.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    sorted
}

/// Newest first, the order every order projection is kept in.
pub fn sort_newest_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

fn by_name(a: &Product, b: &Product) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}
