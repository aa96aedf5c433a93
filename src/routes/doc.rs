use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    domain::{
        board::OrderReady,
        cart::{CartLine, ProductSnapshot},
        dashboard::{DashboardStats, RankedItem},
        status::{OrderStatus, ProgressStep},
    },
    dto::{
        auth::{LoginRequest, LoginResponse, SessionInfo},
        cart::{AddToCartRequest, CartView},
        categories::{CategoryList, CategoryRequest, CategoryWithCount},
        orders::{ClearedOrders, UpdateOrderStatusRequest},
        products::{ProductForm, ProductPayload, SetActiveRequest},
    },
    models::{Category, Order, OrderLine, Product, SiteConfig, StoreStatus, User},
    response::{ApiResponse, Meta},
    routes::{admin, auth, carts, categories, health, live, menu, orders, params, products},
    services::cart_service::CheckoutReceipt,
    views::{
        AdminOrderView, AdminOrdersView, AdminProductsView, BoardCard, BoardItem, BoardView,
        MenuView, TrackingView,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::logout,
        auth::session,
        menu::get_config,
        menu::get_menu,
        orders::get_board,
        orders::get_order,
        carts::create_cart,
        carts::get_cart,
        carts::add_to_cart,
        carts::increase_item,
        carts::decrease_item,
        carts::remove_item,
        carts::checkout,
        live::live_menu,
        live::live_board,
        live::live_order,
        live::live_admin_orders,
        live::live_admin_products,
        live::live_admin_categories,
        admin::get_dashboard,
        admin::list_all_orders,
        admin::get_order_admin,
        admin::update_order_status,
        admin::delete_order,
        admin::clear_orders,
        admin::replace_config,
        admin::reset_config,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::set_active,
        products::delete_product,
        categories::list_categories,
        categories::create_category,
        categories::rename_category,
        categories::delete_category
    ),
    components(
        schemas(
            User,
            Product,
            Category,
            Order,
            OrderLine,
            OrderStatus,
            ProgressStep,
            OrderReady,
            SiteConfig,
            StoreStatus,
            ProductSnapshot,
            CartLine,
            CartView,
            AddToCartRequest,
            CheckoutReceipt,
            LoginRequest,
            LoginResponse,
            SessionInfo,
            CategoryRequest,
            CategoryWithCount,
            CategoryList,
            ProductPayload,
            ProductForm,
            SetActiveRequest,
            UpdateOrderStatusRequest,
            ClearedOrders,
            DashboardStats,
            RankedItem,
            MenuView,
            BoardItem,
            BoardCard,
            BoardView,
            TrackingView,
            AdminOrderView,
            AdminOrdersView,
            AdminProductsView,
            params::ConfirmQuery,
            params::CategoryQuery,
            params::StatusQuery,
            Meta,
            ApiResponse<Product>,
            ApiResponse<MenuView>,
            ApiResponse<BoardView>,
            ApiResponse<CartView>,
            ApiResponse<AdminOrdersView>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Menu", description = "Public menu and site configuration"),
        (name = "Cart", description = "Cart and checkout endpoints"),
        (name = "Orders", description = "Order board and tracking"),
        (name = "Live", description = "Server-Sent-Event streams"),
        (name = "Admin", description = "Admin endpoints"),
        (name = "Auth", description = "Authentication endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
