#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use restaurant_ordering_api::{
    domain::status::OrderStatus,
    models::{Order, OrderLine, Product},
    state::{AppState, CartStore},
    storage::BlobStore,
};
use sea_orm::DatabaseConnection;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

pub fn at(minute: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap() + Duration::minutes(minute)
}

pub fn product(name: &str, price: i64, category: &str, active: bool) -> Product {
    Product {
        id: Uuid::new_v4(),
        name: name.into(),
        description: String::new(),
        price,
        category: category.into(),
        image_url: None,
        active,
        created_at: at(0),
    }
}

pub fn line(name: &str, unit_price: i64, quantity: i32) -> OrderLine {
    OrderLine {
        product_id: None,
        name: name.into(),
        unit_price,
        quantity,
    }
}

pub fn order(status: OrderStatus, minute: i64, items: Vec<OrderLine>) -> Order {
    let total = OrderLine::total_of(&items).expect("order total");
    Order {
        id: Uuid::new_v4(),
        items,
        total,
        status,
        created_at: at(minute),
        updated_at: None,
    }
}

/// State whose pools never connect. Good for code paths that do not reach the database.
pub fn offline_state() -> AppState {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://offline@localhost/offline")
        .expect("lazy pool");
    AppState::new(
        pool,
        DatabaseConnection::default(),
        CartStore::default(),
        BlobStore::new(std::env::temp_dir(), "/uploads"),
        "test-secret",
    )
}
