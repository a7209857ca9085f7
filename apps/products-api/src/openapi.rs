use utoipa::OpenApi;

/// Combined OpenAPI document served by the API explorer
#[derive(OpenApi)]
#[openapi(
    info(
        title = "API Explorer",
        description = "Explore ecommerce API",
        version = "1.0"
    ),
    nest(
        (path = "/products", api = domain_products::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_product_routes() {
        let doc = ApiDoc::openapi();

        assert_eq!(doc.info.title, "API Explorer");
        assert!(doc.paths.paths.contains_key("/products"));
        assert!(doc.paths.paths.contains_key("/products/{id}"));
    }
}
