//! Integration tests for `CatalogClient` against a local `wiremock` server.

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shopfeed_core::Store;
use shopfeed_shopify::{CatalogClient, ShopifyError};

const PRODUCTS_PATH: &str = "/admin/api/2025-10/products.json";

fn test_client() -> CatalogClient {
    CatalogClient::new(5, "shopfeed-test/0.1", 0, 0).expect("failed to build test CatalogClient")
}

fn product_json(id: i64, variant_ids: &[i64]) -> serde_json::Value {
    let variants: Vec<_> = variant_ids
        .iter()
        .map(|vid| {
            json!({
                "id": vid,
                "price": "10.00",
                "sku": format!("SKU-{vid}"),
                "inventory_quantity": 3,
                "inventory_policy": "deny",
                "option1": "Default Title"
            })
        })
        .collect();
    json!({
        "id": id,
        "title": format!("Product {id}"),
        "handle": format!("product-{id}"),
        "options": [{ "name": "Title", "position": 1 }],
        "variants": variants
    })
}

fn store_for(server: &MockServer) -> Store {
    Store {
        name: "FR".to_owned(),
        shop_domain: server.uri(),
        access_token: "shpat_test".to_owned(),
        language: "fr".to_owned(),
        currency: "EUR".to_owned(),
    }
}

#[tokio::test]
async fn fetch_store_catalog_sends_token_and_active_filter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(header("X-Shopify-Access-Token", "shpat_test"))
        .and(query_param("limit", "250"))
        .and(query_param("status", "active"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "products": [product_json(1, &[11, 12])] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let products = test_client()
        .fetch_store_catalog(&store_for(&server), 0)
        .await
        .expect("catalog fetch should succeed");

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].variants.len(), 2);
    assert_eq!(products[0].variants[1].sku.as_deref(), Some("SKU-12"));
}

#[tokio::test]
async fn fetch_all_products_returns_empty_vec_for_empty_listing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "products": [] })))
        .mount(&server)
        .await;

    let products = test_client()
        .fetch_all_products(&server.uri(), "tok", 250, 0)
        .await
        .unwrap();
    assert!(products.is_empty());
}

#[tokio::test]
async fn fetch_all_products_follows_next_cursor() {
    let server = MockServer::start().await;
    let next_link = format!(
        "<{}{PRODUCTS_PATH}?limit=250&page_info=cursor2>; rel=\"next\"",
        server.uri()
    );

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(query_param_is_missing("page_info"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "products": [product_json(1, &[11])] }))
                .insert_header("Link", next_link.as_str()),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(query_param("page_info", "cursor2"))
        .and(query_param_is_missing("status"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "products": [product_json(2, &[21])] })),
        )
        .mount(&server)
        .await;

    let products = test_client()
        .fetch_all_products(&server.uri(), "tok", 250, 0)
        .await
        .unwrap();

    let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
    assert_eq!(ids, [1, 2]);
}

#[tokio::test]
async fn fetch_all_products_skips_malformed_products() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [
                { "title": "No Id", "handle": "no-id" },
                product_json(6, &[61])
            ]
        })))
        .mount(&server)
        .await;

    let products = test_client()
        .fetch_all_products(&server.uri(), "tok", 250, 0)
        .await
        .unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, 6);
}

#[tokio::test]
async fn fetch_all_products_propagates_unauthorized_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = test_client()
        .fetch_all_products(&server.uri(), "bad", 250, 0)
        .await
        .unwrap_err();
    assert!(
        matches!(err, ShopifyError::UnexpectedStatus { status: 401, .. }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn fetch_all_products_propagates_rate_limit_with_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client()
        .fetch_all_products(&server.uri(), "tok", 250, 0)
        .await
        .unwrap_err();
    match err {
        ShopifyError::RateLimited {
            retry_after_secs, ..
        } => assert_eq!(retry_after_secs, 30),
        other => panic!("expected RateLimited, got: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_all_products_propagates_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = test_client()
        .fetch_all_products(&server.uri(), "tok", 250, 0)
        .await
        .unwrap_err();
    assert!(matches!(err, ShopifyError::NotFound { .. }), "got: {err:?}");
}

#[tokio::test]
async fn second_page_failure_discards_first_page() {
    let server = MockServer::start().await;
    let next_link = format!(
        "<{}{PRODUCTS_PATH}?limit=250&page_info=broken>; rel=\"next\"",
        server.uri()
    );

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(query_param_is_missing("page_info"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "products": [product_json(1, &[11])] }))
                .insert_header("Link", next_link.as_str()),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(query_param("page_info", "broken"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = test_client()
        .fetch_all_products(&server.uri(), "tok", 250, 0)
        .await
        .unwrap_err();
    assert!(
        matches!(err, ShopifyError::UnexpectedStatus { status: 503, .. }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn malformed_body_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = test_client()
        .fetch_all_products(&server.uri(), "tok", 250, 0)
        .await
        .unwrap_err();
    assert!(matches!(err, ShopifyError::Deserialize { .. }), "got: {err:?}");
}

#[tokio::test]
async fn retries_rate_limit_when_configured() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "products": [product_json(42, &[1])] })),
        )
        .mount(&server)
        .await;

    let client = CatalogClient::new(5, "shopfeed-test/0.1", 1, 0).unwrap();
    let products = client
        .fetch_all_products(&server.uri(), "tok", 250, 0)
        .await
        .unwrap();
    assert_eq!(products[0].id, 42);
}
