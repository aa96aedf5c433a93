//! Full-collection reads. Every projection is rebuilt from one of these.

use chrono::Utc;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    domain::{projection::sort_newest_first, status::OrderStatus},
    entity::{
        categories::{Entity as Categories, Model as CategoryModel},
        order_items::{Entity as OrderItems, Model as OrderItemModel},
        orders::{Column as OrderCol, Entity as Orders, Model as OrderModel},
        products::{Entity as Products, Model as ProductModel},
        site_config::{Entity as SiteConfigs, Model as SiteConfigModel},
    },
    error::{AppError, AppResult},
    models::{Category, Order, OrderLine, Product, SiteConfig, StoreStatus},
};

pub const CONFIG_ROW_ID: i16 = 1;

pub async fn load_products<C: ConnectionTrait>(conn: &C) -> AppResult<Vec<Product>> {
    Ok(Products::find()
        .all(conn)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect())
}

pub async fn load_categories<C: ConnectionTrait>(conn: &C) -> AppResult<Vec<Category>> {
    Ok(Categories::find()
        .all(conn)
        .await?
        .into_iter()
        .map(category_from_entity)
        .collect())
}

/// Orders newest first, optionally restricted to a set of statuses.
pub async fn load_orders<C: ConnectionTrait>(
    conn: &C,
    statuses: Option<&[OrderStatus]>,
) -> AppResult<Vec<Order>> {
    let mut finder = Orders::find();
    if let Some(statuses) = statuses {
        finder = finder.filter(OrderCol::Status.is_in(statuses.iter().map(|s| s.as_str())));
    }

    let rows = finder
        .order_by_desc(OrderCol::CreatedAt)
        .find_with_related(OrderItems)
        .all(conn)
        .await?;

    let mut orders = rows
        .into_iter()
        .map(|(order, items)| order_from_entity(order, items))
        .collect::<AppResult<Vec<_>>>()?;
    sort_newest_first(&mut orders);
    Ok(orders)
}

pub async fn load_order<C: ConnectionTrait>(conn: &C, id: Uuid) -> AppResult<Option<Order>> {
    let Some(order) = Orders::find_by_id(id).one(conn).await? else {
        return Ok(None);
    };
    let items = OrderItems::find()
        .filter(crate::entity::order_items::Column::OrderId.eq(id))
        .all(conn)
        .await?;
    order_from_entity(order, items).map(Some)
}

/// The stored configuration, or the built-in defaults when none was saved yet.
pub async fn load_config<C: ConnectionTrait>(conn: &C) -> AppResult<SiteConfig> {
    Ok(SiteConfigs::find_by_id(CONFIG_ROW_ID)
        .one(conn)
        .await?
        .map(config_from_entity)
        .unwrap_or_default())
}

pub fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        name: model.name,
        description: model.description,
        price: model.price,
        category: model.category,
        image_url: model.image_url,
        active: model.active,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

pub fn category_from_entity(model: CategoryModel) -> Category {
    Category {
        id: model.id,
        name: model.name,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

pub fn order_from_entity(model: OrderModel, mut items: Vec<OrderItemModel>) -> AppResult<Order> {
    let status: OrderStatus = model.status.parse().map_err(|err| {
        AppError::Internal(anyhow::anyhow!("order {} has {}", model.id, err))
    })?;
    items.sort_by_key(|item| item.position);

    Ok(Order {
        id: model.id,
        items: items
            .into_iter()
            .map(|item| OrderLine {
                product_id: item.product_id,
                name: item.name,
                unit_price: item.unit_price,
                quantity: item.quantity,
            })
            .collect(),
        total: model.total,
        status,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.map(|dt| dt.with_timezone(&Utc)),
    })
}

pub fn config_from_entity(model: SiteConfigModel) -> SiteConfig {
    SiteConfig {
        menu_name: model.menu_name,
        logo_url: model.logo_url,
        primary_color: model.primary_color,
        secondary_color: model.secondary_color,
        font: model.font,
        welcome_title: model.welcome_title,
        address: model.address,
        whatsapp: model.whatsapp,
        store_status: StoreStatus::parse(&model.store_status),
        dine_in: model.dine_in,
        pickup: model.pickup,
        delivery: model.delivery,
        cart_enabled: model.cart_enabled,
        pix_key: model.pix_key,
        pix_qr_url: model.pix_qr_url,
    }
}
