use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{EntityTrait, Set};

use crate::{
    audit,
    entity::site_config::{ActiveModel, Column, Entity as SiteConfigs},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::SiteConfig,
    realtime::Collection,
    response::{ApiResponse, Meta},
    routes::params::ConfirmQuery,
    services::snapshots::{self, CONFIG_ROW_ID},
    state::AppState,
};

pub async fn get_config(state: &AppState) -> AppResult<ApiResponse<SiteConfig>> {
    let config = snapshots::load_config(&state.orm).await?;
    Ok(ApiResponse::success("Configuration", config, Some(Meta::empty())))
}

/// Replaces the whole document. Concurrent writers: last write wins.
pub async fn replace_config(
    state: &AppState,
    user: &AuthUser,
    config: SiteConfig,
) -> AppResult<ApiResponse<SiteConfig>> {
    ensure_admin(user)?;
    validate(&config)?;
    write_config(state, &config).await?;

    state.feed.publish(Collection::Config, None);
    audit::record(
        &state.pool,
        Some(user.user_id),
        "config_update",
        "site_config",
        serde_json::json!({ "menu_name": config.menu_name, "store_status": config.store_status }),
    )
    .await;

    Ok(ApiResponse::success(
        "Configuration saved",
        config,
        Some(Meta::empty()),
    ))
}

pub async fn reset_config(
    state: &AppState,
    user: &AuthUser,
    confirm: ConfirmQuery,
) -> AppResult<ApiResponse<SiteConfig>> {
    ensure_admin(user)?;
    confirm.require_once()?;
    let config = SiteConfig::default();
    write_config(state, &config).await?;

    state.feed.publish(Collection::Config, None);
    audit::record(
        &state.pool,
        Some(user.user_id),
        "config_reset",
        "site_config",
        serde_json::json!({}),
    )
    .await;

    Ok(ApiResponse::success(
        "Configuration restored to defaults",
        config,
        Some(Meta::empty()),
    ))
}

async fn write_config(state: &AppState, config: &SiteConfig) -> AppResult<()> {
    let row = ActiveModel {
        id: Set(CONFIG_ROW_ID),
        menu_name: Set(config.menu_name.clone()),
        logo_url: Set(config.logo_url.clone()),
        primary_color: Set(config.primary_color.clone()),
        secondary_color: Set(config.secondary_color.clone()),
        font: Set(config.font.clone()),
        welcome_title: Set(config.welcome_title.clone()),
        address: Set(config.address.clone()),
        whatsapp: Set(config.whatsapp.clone()),
        store_status: Set(config.store_status.as_str().to_string()),
        dine_in: Set(config.dine_in),
        pickup: Set(config.pickup),
        delivery: Set(config.delivery),
        cart_enabled: Set(config.cart_enabled),
        pix_key: Set(config.pix_key.clone()),
        pix_qr_url: Set(config.pix_qr_url.clone()),
        updated_at: Set(Utc::now().into()),
    };

    SiteConfigs::insert(row)
        .on_conflict(
            OnConflict::column(Column::Id)
                .update_columns([
                    Column::MenuName,
                    Column::LogoUrl,
                    Column::PrimaryColor,
                    Column::SecondaryColor,
                    Column::Font,
                    Column::WelcomeTitle,
                    Column::Address,
                    Column::Whatsapp,
                    Column::StoreStatus,
                    Column::DineIn,
                    Column::Pickup,
                    Column::Delivery,
                    Column::CartEnabled,
                    Column::PixKey,
                    Column::PixQrUrl,
                    Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec(&state.orm)
        .await?;
    Ok(())
}

fn validate(config: &SiteConfig) -> AppResult<()> {
    if config.menu_name.trim().is_empty() {
        return Err(AppError::BadRequest("menu_name must not be empty".into()));
    }
    for (field, color) in [
        ("primary_color", &config.primary_color),
        ("secondary_color", &config.secondary_color),
    ] {
        if !is_hex_color(color) {
            return Err(AppError::BadRequest(format!(
                "{field} must be a #rrggbb colour"
            )));
        }
    }
    if !config.whatsapp.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::BadRequest("whatsapp must contain digits only".into()));
    }
    Ok(())
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}
