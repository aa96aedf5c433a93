use std::collections::HashMap;

use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait};
use uuid::Uuid;

use crate::{
    audit,
    domain::projection::sorted_categories,
    dto::categories::{CategoryList, CategoryRequest, CategoryWithCount},
    entity::{
        categories::{ActiveModel, Column as CategoryCol, Entity as Categories},
        products::{Column as ProdCol, Entity as Products},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Category, Product},
    realtime::Collection,
    response::{ApiResponse, Meta},
    routes::params::ConfirmQuery,
    services::snapshots,
    state::AppState,
};

/// Categories with the number of products currently referencing each name.
pub fn with_counts(categories: &[Category], products: &[Product]) -> Vec<CategoryWithCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for product in products {
        *counts.entry(product.category.as_str()).or_insert(0) += 1;
    }
    sorted_categories(categories)
        .into_iter()
        .map(|c| CategoryWithCount {
            product_count: counts.get(c.name.as_str()).copied().unwrap_or(0),
            id: c.id,
            name: c.name,
        })
        .collect()
}

pub async fn list_categories(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<CategoryList>> {
    ensure_admin(user)?;
    let categories = snapshots::load_categories(&state.orm).await?;
    let products = snapshots::load_products(&state.orm).await?;
    let items = with_counts(&categories, &products);
    let total = items.len();
    Ok(ApiResponse::success(
        "Categories",
        CategoryList { items },
        Some(Meta::list(total)),
    ))
}

pub async fn create_category(
    state: &AppState,
    user: &AuthUser,
    payload: CategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    ensure_admin(user)?;
    let name = normalize_name(&payload.name)?;
    ensure_name_free(state, &name, None).await?;

    let category = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    state.feed.publish(Collection::Categories, Some(category.id));
    audit::record(
        &state.pool,
        Some(user.user_id),
        "category_create",
        "categories",
        serde_json::json!({ "category_id": category.id, "name": category.name }),
    )
    .await;

    Ok(ApiResponse::success(
        "Category created",
        snapshots::category_from_entity(category),
        Some(Meta::empty()),
    ))
}

/// Renames a category and, in the same transaction, every product that
/// referenced the old name.
pub async fn rename_category(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: CategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    ensure_admin(user)?;
    let name = normalize_name(&payload.name)?;
    ensure_name_free(state, &name, Some(id)).await?;

    let txn = state.orm.begin().await?;
    let existing = Categories::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;
    let old_name = existing.name.clone();

    let mut active: ActiveModel = existing.into();
    active.name = Set(name.clone());
    let category = active.update(&txn).await?;

    let moved = Products::update_many()
        .col_expr(ProdCol::Category, Expr::value(name.clone()))
        .filter(ProdCol::Category.eq(old_name.as_str()))
        .exec(&txn)
        .await?
        .rows_affected;

    txn.commit().await?;

    state.feed.publish(Collection::Categories, Some(category.id));
    if moved > 0 {
        state.feed.publish(Collection::Products, None);
    }
    audit::record(
        &state.pool,
        Some(user.user_id),
        "category_rename",
        "categories",
        serde_json::json!({ "category_id": category.id, "from": old_name, "to": name, "products": moved }),
    )
    .await;

    Ok(ApiResponse::success(
        "Category updated",
        snapshots::category_from_entity(category),
        Some(Meta::empty()),
    ))
}

/// Products keep their category string; they are orphaned, not deleted.
pub async fn delete_category(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    confirm: ConfirmQuery,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    confirm.require_once()?;

    let result = Categories::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    state.feed.publish(Collection::Categories, Some(id));
    audit::record(
        &state.pool,
        Some(user.user_id),
        "category_delete",
        "categories",
        serde_json::json!({ "category_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

fn normalize_name(raw: &str) -> AppResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }
    Ok(name.to_string())
}

async fn ensure_name_free(state: &AppState, name: &str, except: Option<Uuid>) -> AppResult<()> {
    let clash = Categories::find()
        .filter(CategoryCol::Name.eq(name))
        .one(&state.orm)
        .await?;
    match clash {
        Some(other) if Some(other.id) != except => Err(AppError::Conflict(format!(
            "category '{name}' already exists"
        ))),
        _ => Ok(()),
    }
}
