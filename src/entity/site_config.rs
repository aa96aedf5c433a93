use sea_orm::entity::prelude::*;

/// Single row table; `id` is always 1.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "site_config")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i16,
    pub menu_name: String,
    pub logo_url: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub font: String,
    pub welcome_title: String,
    pub address: String,
    pub whatsapp: String,
    pub store_status: String,
    pub dine_in: bool,
    pub pickup: bool,
    pub delivery: bool,
    pub cart_enabled: bool,
    pub pix_key: String,
    pub pix_qr_url: String,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
