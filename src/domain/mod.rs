//! Backend-independent order lifecycle and list-projection logic.

pub mod board;
pub mod cart;
pub mod dashboard;
pub mod projection;
pub mod status;
pub mod tracking;
