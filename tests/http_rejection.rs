use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::Query,
    routing::{get, post},
};
use axum_test::TestServer;
use seo_guard::prelude::*;
use serde_json::{Map, Value, json};

async fn list_products(
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, AppError> {
    let shop = validate_shop_param(params.get("shop").map(String::as_str))?;

    let paging: Map<String, Value> = params
        .iter()
        .filter(|(key, _)| matches!(key.as_str(), "page" | "limit"))
        .map(|(key, value)| (key.clone(), Value::String(value.clone())))
        .collect();
    let paging = validate_pagination(&Value::Object(paging))?;

    Ok(Json(json!({
        "shop": shop.as_str(),
        "page": paging.page,
        "limit": paging.limit,
    })))
}

async fn update_product_seo(Json(body): Json<Value>) -> Result<Json<ProductSeoUpdate>, AppError> {
    Ok(Json(ProductSeoUpdate::safe_parse(&body)?))
}

fn server() -> TestServer {
    let app = Router::new()
        .route("/api/products", get(list_products))
        .route("/api/products/seo", post(update_product_seo));

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_valid_query_is_normalized() {
    let response = server()
        .get("/api/products")
        .add_query_param("shop", "my-store.myshopify.com")
        .add_query_param("page", "3")
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["shop"], "my-store.myshopify.com");
    assert_eq!(json["page"], 3);
    assert_eq!(json["limit"], 20);
}

#[tokio::test]
async fn test_missing_shop_is_bad_request() {
    let response = server().get("/api/products").await;

    response.assert_status_bad_request();

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(json["error"]["message"], "Shop parameter is required");
}

#[tokio::test]
async fn test_invalid_shop_reuses_message() {
    let response = server()
        .get("/api/products")
        .add_query_param("shop", "evil.example.com")
        .await;

    response.assert_status_bad_request();

    let json = response.json::<Value>();
    assert_eq!(
        json["error"]["message"],
        "Invalid shop parameter: Invalid Shopify domain format"
    );
}

#[tokio::test]
async fn test_pagination_issue_carries_path() {
    let response = server()
        .get("/api/products")
        .add_query_param("shop", "my-store.myshopify.com")
        .add_query_param("limit", "500")
        .await;

    response.assert_status_bad_request();

    let json = response.json::<Value>();
    let issues = json["error"]["details"]["issues"].as_array().unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0]["path"], json!(["limit"]));
    assert_eq!(issues[0]["message"], "Limit must be between 1 and 100");
}

#[tokio::test]
async fn test_product_seo_update_accepted() {
    let title = "Handmade Ceramic Coffee Mug - 12oz Stoneware";
    let response = server()
        .post("/api/products/seo")
        .json(&json!({
            "productId": "gid://shopify/Product/42",
            "title": title
        }))
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["productId"], "gid://shopify/Product/42");
    assert_eq!(json["title"], title);
}

#[tokio::test]
async fn test_product_seo_update_refinement_rejected() {
    let response = server()
        .post("/api/products/seo")
        .json(&json!({ "productId": "gid://shopify/Product/42" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<Value>();
    assert_eq!(
        json["error"]["message"],
        "At least one of title or description must be provided"
    );
    assert_eq!(json["error"]["details"]["issues"][0]["path"], json!([]));
}

#[tokio::test]
async fn test_query_type_and_range_errors_are_both_listed() {
    let response = server()
        .get("/api/products")
        .add_query_param("shop", "my-store.myshopify.com")
        .add_query_param("page", "abc")
        .add_query_param("limit", "500")
        .await;

    response.assert_status_bad_request();

    let json = response.json::<Value>();
    assert_eq!(json["error"]["message"], "Expected number, received \"abc\"");

    let issues = json["error"]["details"]["issues"].as_array().unwrap();
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0]["path"], json!(["page"]));
    assert_eq!(issues[1]["path"], json!(["limit"]));
}

#[tokio::test]
async fn test_body_type_error_names_the_field() {
    let response = server()
        .post("/api/products/seo")
        .json(&json!({ "productId": "gid://shopify/Product/42", "title": 5 }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<Value>();
    assert_eq!(json["error"]["message"], "Expected string, received number");
    assert_eq!(json["error"]["details"]["issues"][0]["path"], json!(["title"]));
}
