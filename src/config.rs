use std::{env, time::Duration};

use crate::state::{DEFAULT_CART_IDLE, DEFAULT_MAX_CARTS};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub upload_dir: String,
    pub public_upload_base: String,
    pub cart_idle: Duration,
    pub max_carts: usize,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET is not set"))?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let upload_dir = env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string());
        let public_upload_base =
            env::var("PUBLIC_UPLOAD_BASE").unwrap_or_else(|_| "/uploads".to_string());
        let cart_idle = env::var("CART_IDLE_MINUTES")
            .ok()
            .and_then(|m| m.parse::<u64>().ok())
            .map(|m| Duration::from_secs(m * 60))
            .unwrap_or(DEFAULT_CART_IDLE);
        let max_carts = env::var("MAX_CARTS")
            .ok()
            .and_then(|n| n.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_CARTS);
        Ok(Self {
            port,
            database_url,
            host,
            jwt_secret,
            upload_dir,
            public_upload_base,
            cart_idle,
            max_carts,
        })
    }
}
