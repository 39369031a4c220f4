use seo_guard::prelude::*;
use seo_guard::sanitize::{sanitize_file_path, strip_dangerous_schemes};
use seo_guard::schema::{Connection, SiteIssue, WebhookRegistration, parse_uuid};
use seo_guard::{IssueKind, ValidationError};
use serde_json::json;

#[test]
fn test_shop_domains_round_trip_unchanged() {
    let valid = [
        "a.myshopify.com",
        "my-store.myshopify.com",
        "STORE-2024.myshopify.com",
        "0-0.myshopify.com",
    ];
    for shop in valid {
        let parsed = ShopDomain::safe_parse(&json!(shop)).unwrap();
        assert_eq!(parsed.as_str(), shop);
    }

    let invalid = [
        "",
        "store.shopify.com",
        "store.myshopify.co",
        "-store.myshopify.com",
        "sto re.myshopify.com",
        "https://store.myshopify.com",
    ];
    for shop in invalid {
        assert!(ShopDomain::safe_parse(&json!(shop)).is_err(), "{shop}");
    }
}

#[test]
fn test_object_id_requires_exactly_24_hex_chars() {
    let hex = "0123456789abcdefABCDEF00";
    assert_eq!(hex.len(), 24);
    assert!(ObjectId::parse(hex).is_ok());

    for len in [0, 1, 23, 25, 48] {
        let id = "a".repeat(len);
        assert!(ObjectId::parse(&id).is_err(), "length {len}");
    }
    assert!(ObjectId::parse("0123456789abcdefABCDEF0Z").is_err());
}

#[test]
fn test_email_normalization_is_idempotent() {
    let once = Email::parse("Test@Example.COM").unwrap();
    assert_eq!(once.as_str(), "test@example.com");
    assert_eq!(Email::parse(once.as_str()).unwrap(), once);
}

#[test]
fn test_safe_string_idempotent() {
    let rule = SafeString::new(0, 500);
    for text in ["hello", "multiple words here", "a-b_c.d"] {
        let once = rule.parse(text).unwrap();
        assert_eq!(rule.parse(&once).unwrap(), once);
    }
}

#[test]
fn test_pagination_properties() {
    assert_eq!(
        validate_pagination(&json!({})).unwrap(),
        Pagination { page: 1, limit: 20 }
    );
    assert_eq!(
        validate_pagination(&json!({"page": "2", "limit": "50"})).unwrap(),
        Pagination { page: 2, limit: 50 }
    );
    assert!(validate_pagination(&json!({"page": 0})).is_err());
    assert!(validate_pagination(&json!({"limit": 101})).is_err());

    let err = validate_pagination(&json!({"page": "abc", "limit": 500})).unwrap_err();
    let paths: Vec<_> = err.issues().iter().map(|i| i.path.clone()).collect();
    assert_eq!(paths, [["page"], ["limit"]]);
}

#[test]
fn test_date_range_properties() {
    assert!(
        DateRange::safe_parse(&json!({"startDate": "2024-01-01", "endDate": "2024-12-31"}))
            .is_ok()
    );

    let err = DateRange::safe_parse(&json!({"startDate": "2024-12-31", "endDate": "2024-01-01"}))
        .unwrap_err();
    assert_eq!(err.issues()[0].path, ["endDate"]);
    assert_eq!(err.issues()[0].kind, IssueKind::Refinement);
}

#[test]
fn test_product_seo_update_properties() {
    let product = "gid://shopify/Product/1";

    let title = "x".repeat(45);
    assert!(ProductSeoUpdate::safe_parse(&json!({"productId": product, "title": title})).is_ok());
    assert!(
        ProductSeoUpdate::safe_parse(&json!({"productId": product, "title": "x".repeat(10)}))
            .is_err()
    );
    assert!(ProductSeoUpdate::safe_parse(&json!({"productId": product})).is_err());

    let err = ProductSeoUpdate::safe_parse(&json!({"title": title})).unwrap_err();
    assert_eq!(err.issues()[0].path, ["productId"]);
    assert_eq!(err.first_message(), "Required");
}

#[test]
fn test_execution_mode_is_case_sensitive() {
    assert_eq!(
        ExecutionMode::safe_parse(&json!("APPROVE")).unwrap(),
        ExecutionMode::Approve
    );
    assert!(ExecutionMode::safe_parse(&json!("Approve")).is_err());
}

#[test]
fn test_sanitizer_properties() {
    assert_eq!(sanitize_html(r#"<script>alert("xss")</script>Hello"#), "Hello");
    assert_eq!(
        sanitize_html(r#"<div onclick="alert(1)">Click me</div>"#),
        "<div>Click me</div>"
    );
    assert_eq!(sanitize_html("javascript:alert(1)"), ":alert(1)");
    assert_eq!(strip_dangerous_schemes("javascript:alert(1)"), "alert(1)");
    assert_eq!(sanitize_file_path("../../../etc/passwd"), "etc/passwd");
    assert_eq!(sanitize_file_path("///path/to/file"), "path/to/file");
}

#[test]
fn test_origin_properties() {
    let allowed = ["https://example.com", "https://*.vercel.app"];
    assert!(validate_request_origin(Some("https://my-app.vercel.app"), &allowed));
    assert!(!validate_request_origin(None, &allowed));
    assert!(!validate_request_origin(None, &["*"]));
}

#[test]
fn test_entry_point_messages() {
    assert_eq!(
        validate_shop_param(None).unwrap_err().to_string(),
        "Shop parameter is required"
    );
    assert_eq!(
        validate_object_id(None, Some("User ID"))
            .unwrap_err()
            .to_string(),
        "User ID is required"
    );

    let err = validate_object_id(Some("nope"), None).unwrap_err();
    assert!(matches!(err, ValidationError::Invalid { .. }));
    assert_eq!(err.to_string(), "Invalid ID: Invalid ObjectId format");
}

#[test]
fn test_other_payloads_reject_wrong_shapes() {
    assert!(Connection::safe_parse(&json!("SHOPIFY")).is_err());
    assert!(SiteIssue::safe_parse(&json!({})).is_err());
    assert!(WebhookRegistration::safe_parse(&json!(null)).is_err());
    assert!(parse_uuid("123e4567-e89b-12d3-a456-426614174000").is_ok());
}
