use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use uuid::Uuid;

use crate::{
    audit,
    domain::projection::CategoryFilter,
    dto::products::{ImageUpload, ProductPayload, SetActiveRequest},
    entity::products::{ActiveModel, Entity as Products},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Product,
    realtime::Collection,
    response::{ApiResponse, Meta},
    routes::params::ConfirmQuery,
    services::snapshots,
    state::AppState,
    views::{self, AdminProductsView, MenuView},
};

pub async fn get_menu(
    state: &AppState,
    filter: &CategoryFilter,
) -> AppResult<ApiResponse<MenuView>> {
    let config = snapshots::load_config(&state.orm).await?;
    let categories = snapshots::load_categories(&state.orm).await?;
    let products = snapshots::load_products(&state.orm).await?;

    let view = views::menu_view(config, &categories, &products, filter);
    let total = view.products.len();
    Ok(ApiResponse::success("Menu", view, Some(Meta::list(total))))
}

pub async fn list_products_admin(
    state: &AppState,
    user: &AuthUser,
    filter: &CategoryFilter,
) -> AppResult<ApiResponse<AdminProductsView>> {
    ensure_admin(user)?;
    let products = snapshots::load_products(&state.orm).await?;
    let view = views::admin_products_view(&products, filter);
    let total = view.items.len();
    Ok(ApiResponse::success("Products", view, Some(Meta::list(total))))
}

pub async fn get_product(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    let product = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(snapshots::product_from_entity)
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Product", product, None))
}

/// Creates (`id == None`) or updates a product. A failed image upload is
/// logged and the product is saved without an image.
pub async fn save_product(
    state: &AppState,
    user: &AuthUser,
    id: Option<Uuid>,
    payload: ProductPayload,
    image: Option<ImageUpload>,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    validate_payload(&payload)?;

    let existing = match id {
        Some(id) => Some(
            Products::find_by_id(id)
                .one(&state.orm)
                .await?
                .ok_or(AppError::NotFound)?,
        ),
        None => None,
    };

    let mut image_degraded = false;
    let image_url = match image {
        Some(upload) => match state.blobs.upload(&upload.file_name, &upload.bytes).await {
            Ok(url) => Some(url),
            Err(err) => {
                tracing::warn!(error = %err, file = %upload.file_name, "image upload failed, saving without image");
                image_degraded = true;
                None
            }
        },
        None => existing.as_ref().and_then(|p| p.image_url.clone()),
    };

    let ProductPayload {
        name,
        price,
        category,
        description,
        active,
    } = payload;

    let (product, action) = match existing {
        Some(model) => {
            let mut active_model: ActiveModel = model.into();
            active_model.name = Set(name.trim().to_string());
            active_model.price = Set(price);
            active_model.category = Set(category.trim().to_string());
            active_model.description = Set(description.trim().to_string());
            active_model.active = Set(active);
            active_model.image_url = Set(image_url);
            (active_model.update(&state.orm).await?, "product_update")
        }
        None => {
            let model = ActiveModel {
                id: Set(Uuid::new_v4()),
                name: Set(name.trim().to_string()),
                description: Set(description.trim().to_string()),
                price: Set(price),
                category: Set(category.trim().to_string()),
                image_url: Set(image_url),
                active: Set(active),
                created_at: NotSet,
            };
            (model.insert(&state.orm).await?, "product_create")
        }
    };

    state.feed.publish(Collection::Products, Some(product.id));
    audit::record(
        &state.pool,
        Some(user.user_id),
        action,
        "products",
        serde_json::json!({ "product_id": product.id, "image_degraded": image_degraded }),
    )
    .await;

    let message = match (action, image_degraded) {
        (_, true) => "Product saved without image",
        ("product_create", false) => "Product created",
        _ => "Product updated",
    };
    Ok(ApiResponse::success(
        message,
        snapshots::product_from_entity(product),
        Some(Meta::empty()),
    ))
}

pub async fn set_active(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: SetActiveRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    let existing = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active_model: ActiveModel = existing.into();
    active_model.active = Set(payload.active);
    let product = active_model.update(&state.orm).await?;

    state.feed.publish(Collection::Products, Some(product.id));
    audit::record(
        &state.pool,
        Some(user.user_id),
        "product_toggle_active",
        "products",
        serde_json::json!({ "product_id": product.id, "active": product.active }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        snapshots::product_from_entity(product),
        Some(Meta::empty()),
    ))
}

/// Stored orders keep their own copy of the product, so nothing else changes.
pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    confirm: ConfirmQuery,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    confirm.require_once()?;

    let result = Products::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    state.feed.publish(Collection::Products, Some(id));
    audit::record(
        &state.pool,
        Some(user.user_id),
        "product_delete",
        "products",
        serde_json::json!({ "product_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Highest accepted price in cents (1,000,000.00).
pub const MAX_PRICE: i64 = 100_000_000;

pub fn validate_payload(payload: &ProductPayload) -> AppResult<()> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }
    if payload.price < 0 {
        return Err(AppError::BadRequest("price must not be negative".into()));
    }
    if payload.price > MAX_PRICE {
        return Err(AppError::BadRequest(format!(
            "price must not exceed {MAX_PRICE} cents"
        )));
    }
    Ok(())
}
