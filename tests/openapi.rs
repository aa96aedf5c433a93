use restaurant_ordering_api::routes::doc::ApiDoc;
use utoipa::OpenApi;

fn document() -> serde_json::Value {
    serde_json::to_value(ApiDoc::openapi()).expect("openapi json")
}

#[test]
fn product_uploads_are_documented_as_multipart() {
    let doc = document();
    assert!(doc["components"]["schemas"]["ProductForm"].is_object());

    let create = &doc["paths"]["/api/admin/products"]["post"]["requestBody"]["content"];
    assert!(create["multipart/form-data"].is_object(), "post body: {create}");
    let update = &doc["paths"]["/api/admin/products/{id}"]["put"]["requestBody"]["content"];
    assert!(update["multipart/form-data"].is_object(), "put body: {update}");
}

#[test]
fn live_streams_are_listed() {
    let doc = document();
    for path in [
        "/api/live/menu",
        "/api/live/board",
        "/api/live/orders/{id}",
        "/api/admin/live/orders",
        "/api/admin/live/products",
        "/api/admin/live/categories",
    ] {
        assert!(doc["paths"][path]["get"].is_object(), "missing {path}");
    }
}
