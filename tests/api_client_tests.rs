//! # API Client Tests
//!
//! Runs the HTTP client against a local axum server standing in for the
//! upstream catalog API.

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;

use catalog_bot::api_client::{CatalogSource, HttpCatalogClient};
use catalog_bot::catalog_errors::CatalogError;
use catalog_bot::catalog_model::ResourceKind;

const PRODUCTS_JSON: &str = r#"[
    {"id": 1, "name": "Pastillas de freno", "category": "Frenos", "brand": "Brembo",
     "price": 45990, "stock": 12, "seller": "Carfix",
     "images": [{"imageData": "data:image/png;base64,aGVsbG8="}]},
    {"id": 2, "name": "Filtro de aire", "category": "Filtros", "brand": "Mann",
     "price": "9990.50", "stock": 0, "seller": "Repuestos Sur",
     "images": [{"imageData": "data:image/png;base64,!!broken!!"}]},
    {"id": 3, "name": "Ampolleta H4", "category": "Luces", "brand": "Philips",
     "price": 3500, "stock": 40, "seller": "Carfix", "images": []}
]"#;

const CATEGORIES_JSON: &str = r#"[
    {"id": 1, "name": "Frenos", "is_active": 1},
    {"id": 2, "name": "Filtros"},
    {"id": 3, "name": "Luces", "is_active": false}
]"#;

async fn spawn_upstream(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn catalog_client() -> HttpCatalogClient {
    let app = Router::new()
        .route("/products", get(|| async { PRODUCTS_JSON }))
        .route("/categories", get(|| async { CATEGORIES_JSON }));
    let addr = spawn_upstream(app).await;
    HttpCatalogClient::new(
        format!("http://{addr}/products"),
        format!("http://{addr}/categories"),
    )
    .unwrap()
}

#[tokio::test]
async fn test_fetch_products_decodes_images_per_product() {
    let client = catalog_client().await;

    let products = client.fetch_products().await.unwrap();

    assert_eq!(products.len(), 3);
    assert_eq!(products[0].image_bytes.as_deref(), Some(&b"hello"[..]));
    // A broken payload only costs that product its image
    assert_eq!(products[1].id, 2);
    assert!(products[1].image_bytes.is_none());
    assert_eq!(products[1].price.to_string(), "9990.50");
    assert!(products[2].image_bytes.is_none());
}

#[tokio::test]
async fn test_fetch_categories() {
    let client = catalog_client().await;

    let categories = client.fetch_categories().await.unwrap();

    let flags: Vec<(i64, bool)> = categories.iter().map(|c| (c.id, c.is_active)).collect();
    assert_eq!(flags, vec![(1, true), (2, true), (3, false)]);
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let app = Router::new().route(
        "/products",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let addr = spawn_upstream(app).await;
    let client = HttpCatalogClient::new(
        format!("http://{addr}/products"),
        format!("http://{addr}/categories"),
    )
    .unwrap();

    let products = client.fetch_products().await;
    assert!(matches!(
        products,
        Err(CatalogError::Status {
            kind: ResourceKind::Products,
            status,
        }) if status == StatusCode::INTERNAL_SERVER_ERROR
    ));

    // Unrouted path answers 404
    let categories = client.fetch_categories().await;
    assert!(matches!(
        categories,
        Err(CatalogError::Status {
            kind: ResourceKind::Categories,
            status,
        }) if status == StatusCode::NOT_FOUND
    ));
}

#[tokio::test]
async fn test_invalid_json_is_a_decode_error() {
    let app = Router::new().route("/categories", get(|| async { r#"{"not": "a list"}"# }));
    let addr = spawn_upstream(app).await;
    let client = HttpCatalogClient::new(
        format!("http://{addr}/products"),
        format!("http://{addr}/categories"),
    )
    .unwrap();

    let result = client.fetch_categories().await;
    assert!(matches!(
        result,
        Err(CatalogError::Decode {
            kind: ResourceKind::Categories,
            ..
        })
    ));
}

#[tokio::test]
async fn test_unreachable_upstream_is_a_transport_error() {
    // Bind and drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpCatalogClient::new(
        format!("http://{addr}/products"),
        format!("http://{addr}/categories"),
    )
    .unwrap();

    assert!(matches!(
        client.fetch_products().await,
        Err(CatalogError::Http { .. })
    ));
}
