pub mod admin_service;
pub mod auth_service;
pub mod cart_service;
pub mod category_service;
pub mod config_service;
pub mod live_service;
pub mod order_service;
pub mod product_service;
pub mod snapshots;
