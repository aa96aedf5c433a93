use serde::Deserialize;
use utoipa::ToSchema;

/// JSON part of the multipart product form.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProductPayload {
    pub name: String,
    pub price: i64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Multipart body documented for the API reference.
#[derive(Debug, ToSchema)]
pub struct ProductForm {
    #[schema(value_type = ProductPayload)]
    pub payload: String,
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<Vec<u8>>,
}

#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetActiveRequest {
    pub active: bool,
}
