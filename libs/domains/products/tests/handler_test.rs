//! Handler tests for the Products domain
//!
//! Exercise the HTTP contract (status codes, bodies, leniency rules) against
//! the in-memory repository, so no database is needed.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    Router::new().nest(
        "/products",
        handlers::router(ProductService::new(InMemoryProductRepository::new())),
    )
}

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn new_product(token: &str) -> Value {
    json!({"productToken": token, "name": "Desk lamp", "price": 19.5, "stock": 4})
}

async fn create(app: &Router, token: &str) -> Product {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/products", new_product(token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_returns_201_with_echoed_fields() {
    let app = app();
    let product = create(&app, "p-1").await;

    assert_eq!(product.id, 1);
    assert_eq!(product.product_token, "p-1");
    assert_eq!(product.name, "Desk lamp");
    assert_eq!(product.price, 19.5);
    assert_eq!(product.stock, 4);
}

#[tokio::test]
async fn test_create_duplicate_token_returns_400() {
    let app = app();
    create(&app, "dup").await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/products", new_product("dup")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "DUPLICATE_KEY");
    assert_eq!(body["message"], "Product token already exists");

    // store unchanged
    let response = app.oneshot(empty_request("GET", "/products")).await.unwrap();
    let products: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(products.len(), 1);
}

#[tokio::test]
async fn test_create_rejects_bad_bodies() {
    let app = app();

    let cases = [
        json!({"productToken": "a", "name": "n", "price": 1.0, "stock": 1, "extra": true}),
        json!({"productToken": "a", "name": "n", "price": "free", "stock": 1}),
        json!({"productToken": "a", "name": "n", "price": 1.0, "stock": 1.5}),
        json!({"productToken": "a", "name": "n", "price": 1.0}),
        json!({"productToken": "", "name": "n", "price": 1.0, "stock": 1}),
        json!({"productToken": "a", "name": "n", "price": -1.0, "stock": 1}),
        json!({"productToken": "a", "name": "n", "price": 1.0, "stock": -1}),
    ];

    for case in cases {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/products", case.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", case);
    }
}

#[tokio::test]
async fn test_list_paginates_25_products() {
    let app = app();
    for i in 0..25 {
        create(&app, &format!("p-{}", i)).await;
    }

    let page_len = |uri: &'static str| {
        let app = app.clone();
        async move {
            let response = app.oneshot(empty_request("GET", uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let products: Vec<Product> = json_body(response.into_body()).await;
            products.len()
        }
    };

    assert_eq!(page_len("/products?page=1&limit=10").await, 10);
    assert_eq!(page_len("/products?page=3&limit=10").await, 5);
    assert_eq!(page_len("/products?page=4&limit=10").await, 0);
    assert_eq!(page_len("/products?limit=25").await, 25);
    assert_eq!(page_len("/products?page=99999999999999999999999").await, 0);
}

#[tokio::test]
async fn test_list_falls_back_to_defaults_on_bad_query() {
    let app = app();
    for i in 0..12 {
        create(&app, &format!("p-{}", i)).await;
    }

    for uri in [
        "/products",
        "/products?page=abc&limit=xyz",
        "/products?page=0&limit=-3",
        "/products?page=1.5",
    ] {
        let response = app.clone().oneshot(empty_request("GET", uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "uri: {}", uri);

        let products: Vec<Product> = json_body(response.into_body()).await;
        let ids: Vec<i32> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>(), "uri: {}", uri);
    }
}

#[tokio::test]
async fn test_get_returns_product_or_null() {
    let app = app();
    let created = create(&app, "p-get").await;

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/products/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let found: Product = json_body(response.into_body()).await;
    assert_eq!(found, created);

    let response = app.oneshot(empty_request("GET", "/products/999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert!(body.is_null());
}

#[tokio::test]
async fn test_non_integer_id_returns_400() {
    let app = app();

    for (method, body) in [("GET", None), ("DELETE", None), ("PATCH", Some(json!({"stock": 1})))] {
        let request = match body {
            Some(b) => json_request(method, "/products/abc", b),
            None => empty_request(method, "/products/abc"),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "method: {}", method);

        let body: Value = json_body(response.into_body()).await;
        assert_eq!(body["error"], "INVALID_ID");
    }
}

#[tokio::test]
async fn test_patch_updates_stock_only() {
    let app = app();
    let created = create(&app, "p-patch").await;
    let uri = format!("/products/{}", created.id);

    let response = app
        .clone()
        .oneshot(json_request("PATCH", &uri, json!({"stock": 0})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());

    let response = app.clone().oneshot(empty_request("GET", &uri)).await.unwrap();
    let updated: Product = json_body(response.into_body()).await;
    assert_eq!(updated.stock, 0);
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.price, created.price);
    assert_eq!(updated.product_token, created.product_token);
}

#[tokio::test]
async fn test_patch_rejects_bad_bodies() {
    let app = app();
    let created = create(&app, "p-patch-bad").await;
    let uri = format!("/products/{}", created.id);

    for case in [
        json!({"stock": 1, "name": "renamed"}),
        json!({"stock": -1}),
        json!({"stock": 2.5}),
        json!({}),
    ] {
        let response = app
            .clone()
            .oneshot(json_request("PATCH", &uri, case.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", case);
    }
}

#[tokio::test]
async fn test_empty_body_returns_400() {
    let app = app();
    let created = create(&app, "p-empty").await;

    for (method, uri) in [("POST", "/products".to_string()), ("PATCH", format!("/products/{}", created.id))] {
        let response = app.clone().oneshot(empty_request(method, &uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "method: {}", method);
    }
}

#[tokio::test]
async fn test_patch_missing_returns_404() {
    let response = app()
        .oneshot(json_request("PATCH", "/products/42", json!({"stock": 3})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Product not found");
}

#[tokio::test]
async fn test_delete_then_get_returns_null() {
    let app = app();
    let created = create(&app, "p-del").await;
    let uri = format!("/products/{}", created.id);

    let response = app.clone().oneshot(empty_request("DELETE", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.clone().oneshot(empty_request("GET", &uri)).await.unwrap();
    let body: Value = json_body(response.into_body()).await;
    assert!(body.is_null());

    let response = app.oneshot(empty_request("DELETE", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
