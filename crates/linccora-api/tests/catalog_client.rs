use std::sync::{Arc, Mutex};

use axum::{extract::RawQuery, http::StatusCode, routing::get, Json, Router};
use linccora_api::{ApiError, CatalogClient, RawPrice, SearchParams};
use serde_json::{json, Value};

fn catalog() -> Value {
    json!([
        {
            "brand": "Aarong",
            "product_name": "Jamdani Saree",
            "product_url": "https://shop.example.com/p/1",
            "category": "Saree",
            "price": "Tk. 12,500"
        },
        {
            "brand": "Yellow",
            "product_name": "Linen Panjabi",
            "product_url": "https://shop.example.com/p/2",
            "category": "Panjabi",
            "price": 3200
        }
    ])
}

/// Bind a throwaway backend on an ephemeral port and return its base URL
async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Backend that records the raw query string of every request
async fn recording_backend() -> (String, Arc<Mutex<Vec<Option<String>>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = seen.clone();

    let router = Router::new().route(
        "/search",
        get(move |RawQuery(query): RawQuery| {
            let log = log.clone();
            async move {
                log.lock().unwrap().push(query);
                Json(catalog())
            }
        }),
    );

    (spawn_backend(router).await, seen)
}

#[tokio::test]
async fn test_fetch_all_sends_no_parameters() {
    let (base_url, seen) = recording_backend().await;
    let client = CatalogClient::new(base_url).unwrap();

    let products = client.fetch_all().await;

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].brand(), Some("Aarong"));
    assert!(matches!(products[1].price, Some(RawPrice::Number(_))));
    assert_eq!(seen.lock().unwrap().as_slice(), &[None]);
}

#[tokio::test]
async fn test_search_omits_empty_parameters() {
    let (base_url, seen) = recording_backend().await;
    let client = CatalogClient::new(base_url).unwrap();

    let params = SearchParams {
        q: Some("silk saree".into()),
        brand: Some("Aarong".into()),
        category: Some(String::new()),
        min_price: Some("1000".into()),
        max_price: None,
    };
    let products = client.try_search(&params).await.unwrap();
    assert_eq!(products.len(), 2);

    let seen = seen.lock().unwrap();
    let query = seen[0].clone().unwrap();
    assert_eq!(query, "q=silk+saree&brand=Aarong&min_price=1000");
    assert!(!query.contains("category"));
    assert!(!query.contains("max_price"));
}

#[tokio::test]
async fn test_server_error_is_reported_then_swallowed() {
    let router = Router::new().route(
        "/search",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "sheet failed to load") }),
    );
    let client = CatalogClient::new(spawn_backend(router).await).unwrap();

    match client.try_search(&SearchParams::query("saree")).await {
        Err(ApiError::Status { status, body }) => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "sheet failed to load");
        }
        other => panic!("expected status error, got {:?}", other),
    }

    // Same failure through the lenient path is just "no products"
    assert!(client.search(&SearchParams::query("saree")).await.is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_a_parse_error() {
    let router = Router::new().route("/search", get(|| async { "<html>oops</html>" }));
    let client = CatalogClient::new(spawn_backend(router).await).unwrap();

    assert!(matches!(
        client.try_fetch_all().await,
        Err(ApiError::ParseError(_))
    ));
    assert!(client.fetch_all().await.is_empty());
}

#[tokio::test]
async fn test_closed_port_yields_empty_catalog() {
    // Grab a free port, then close it so nothing is listening
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = CatalogClient::new(format!("http://{}", addr)).unwrap();
    assert!(client.fetch_all().await.is_empty());
}
