pub mod audit_logs;
pub mod categories;
pub mod order_items;
pub mod orders;
pub mod products;
pub mod site_config;
pub mod users;

pub use audit_logs::Entity as AuditLogs;
pub use categories::Entity as Categories;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use products::Entity as Products;
pub use site_config::Entity as SiteConfigs;
pub use users::Entity as Users;
