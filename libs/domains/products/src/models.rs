use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A stored product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store-assigned identifier
    pub id: i32,
    /// Unique external token
    pub product_token: String,
    pub name: String,
    pub price: f64,
    pub stock: i32,
}

/// Body of `POST /products`
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateProduct {
    #[validate(length(min = 1, message = "productToken must not be empty"))]
    #[schema(example = "tok-abc123")]
    pub product_token: String,

    #[validate(length(min = 1, message = "name must not be empty"))]
    #[schema(example = "Desk lamp")]
    pub name: String,

    #[validate(range(min = 0.0, message = "price must not be negative"))]
    #[schema(example = 19.99)]
    pub price: f64,

    #[validate(range(min = 0, message = "stock must not be negative"))]
    #[schema(example = 10)]
    pub stock: i32,
}

/// Body of `PATCH /products/{id}`; only stock can change
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateProduct {
    #[validate(range(min = 0, message = "stock must not be negative"))]
    #[schema(example = 5)]
    pub stock: i32,
}
