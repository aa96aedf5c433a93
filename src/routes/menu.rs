use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    error::AppResult,
    models::SiteConfig,
    response::ApiResponse,
    routes::params::CategoryQuery,
    services::{config_service, product_service},
    state::AppState,
    views::MenuView,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/config", get(get_config))
        .route("/menu", get(get_menu))
}

#[utoipa::path(
    get,
    path = "/api/config",
    responses(
        (status = 200, description = "Site configuration (defaults when never saved)", body = ApiResponse<SiteConfig>)
    ),
    tag = "Menu"
)]
pub async fn get_config(State(state): State<AppState>) -> AppResult<Json<ApiResponse<SiteConfig>>> {
    let resp = config_service::get_config(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/menu",
    params(CategoryQuery),
    responses(
        (status = 200, description = "Customer menu: active products only", body = ApiResponse<MenuView>)
    ),
    tag = "Menu"
)]
pub async fn get_menu(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
) -> AppResult<Json<ApiResponse<MenuView>>> {
    let resp = product_service::get_menu(&state, &query.filter()).await?;
    Ok(Json(resp))
}
