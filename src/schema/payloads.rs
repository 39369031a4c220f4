//! Domain payloads accepted by the automation API.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use super::fields::{Field, Kind};
use super::{Schema, parse_object, parse_variant};
use crate::error::{Issue, SchemaError};

/// Prefix of every Shopify product identifier.
pub const PRODUCT_GID_PREFIX: &str = "gid://shopify/Product/";

static PRODUCT_GID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{}", regex::escape(PRODUCT_GID_PREFIX))).unwrap());

/// Title/description change for a catalog item.
///
/// At least one of `title` and `description` must be present. The lengths
/// are the ranges search engines display without truncation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductSeoUpdate {
    #[validate(regex(path = *PRODUCT_GID_REGEX, message = "Invalid Shopify product ID"))]
    pub product_id: String,

    #[validate(length(
        min = 30,
        max = 60,
        message = "SEO title must be between 30 and 60 characters"
    ))]
    pub title: Option<String>,

    #[validate(length(
        min = 120,
        max = 160,
        message = "SEO description must be between 120 and 160 characters"
    ))]
    pub description: Option<String>,
}

impl ProductSeoUpdate {
    const FIELDS: &'static [Field] = &[
        Field::required("productId", Kind::Text),
        Field::optional("title", Kind::Text),
        Field::optional("description", Kind::Text),
    ];
}

impl Schema for ProductSeoUpdate {
    fn safe_parse(raw: &Value) -> Result<Self, SchemaError> {
        let update: Self = parse_object(raw, Self::FIELDS)?;

        if update.title.is_none() && update.description.is_none() {
            return Err(SchemaError::single(Issue::refinement(
                &[],
                "At least one of title or description must be provided",
            )));
        }

        Ok(update)
    }
}

/// How much autonomy the automation has when applying fixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionMode {
    /// Apply fixes without review.
    Automatic,
    /// Produce a plan only.
    Plan,
    /// Apply each fix after explicit approval.
    Approve,
}

impl ExecutionMode {
    pub const ALL: [Self; 3] = [Self::Automatic, Self::Plan, Self::Approve];

    /// Wire names, in declaration order.
    pub const NAMES: &'static [&'static str] = &["AUTOMATIC", "PLAN", "APPROVE"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Automatic => "AUTOMATIC",
            Self::Plan => "PLAN",
            Self::Approve => "APPROVE",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Site or storefront platform a connection points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Platform {
    Shopify,
    Wordpress,
    Webflow,
    Wix,
    Squarespace,
    Custom,
}

impl Platform {
    pub const NAMES: &'static [&'static str] = &[
        "SHOPIFY",
        "WORDPRESS",
        "WEBFLOW",
        "WIX",
        "SQUARESPACE",
        "CUSTOM",
    ];
}

/// Binding between an account and an external site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub platform: Platform,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Domain must be between 1 and 255 characters"
    ))]
    pub domain: String,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Display name must be between 1 and 100 characters"
    ))]
    pub display_name: Option<String>,

    /// Opaque provider credentials; passed through untouched.
    pub credentials: Option<Map<String, Value>>,
}

impl Connection {
    const FIELDS: &'static [Field] = &[
        Field::required("platform", Kind::Variant(Platform::NAMES)),
        Field::required("domain", Kind::Text),
        Field::optional("displayName", Kind::Text),
        Field::optional("credentials", Kind::Object),
    ];
}

/// Kind of defect found on a crawled page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueType {
    MissingTitle,
    MissingMetaDescription,
    DuplicateTitle,
    DuplicateMetaDescription,
    MissingAltText,
    BrokenLink,
    MissingH1,
    SlowPage,
    MissingSchemaMarkup,
    MissingCanonical,
}

impl IssueType {
    pub const NAMES: &'static [&'static str] = &[
        "MISSING_TITLE",
        "MISSING_META_DESCRIPTION",
        "DUPLICATE_TITLE",
        "DUPLICATE_META_DESCRIPTION",
        "MISSING_ALT_TEXT",
        "BROKEN_LINK",
        "MISSING_H1",
        "SLOW_PAGE",
        "MISSING_SCHEMA_MARKUP",
        "MISSING_CANONICAL",
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const NAMES: &'static [&'static str] = &["LOW", "MEDIUM", "HIGH", "CRITICAL"];
}

/// A defect detected on a monitored site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SiteIssue {
    #[serde(rename = "type")]
    pub issue_type: IssueType,

    pub severity: Severity,

    #[validate(url(message = "Invalid page URL"))]
    pub page_url: String,

    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: String,

    #[validate(length(
        min = 1,
        max = 5000,
        message = "Description must be between 1 and 5000 characters"
    ))]
    pub description: String,

    #[validate(length(
        min = 1,
        max = 5000,
        message = "Recommendation must be between 1 and 5000 characters"
    ))]
    pub recommendation: Option<String>,
}

impl SiteIssue {
    const FIELDS: &'static [Field] = &[
        Field::required("type", Kind::Variant(IssueType::NAMES)),
        Field::required("severity", Kind::Variant(Severity::NAMES)),
        Field::required("pageUrl", Kind::Text),
        Field::required("title", Kind::Text),
        Field::required("description", Kind::Text),
        Field::optional("recommendation", Kind::Text),
    ];
}

/// Outbound notification subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct WebhookRegistration {
    #[validate(url(message = "Invalid webhook URL"))]
    pub url: String,

    #[validate(length(min = 1, message = "At least one event is required"))]
    pub events: Vec<String>,

    /// Signing secret shared with the receiver.
    #[validate(length(min = 32, message = "Webhook secret must be at least 32 characters"))]
    pub secret: Option<String>,
}

impl WebhookRegistration {
    const FIELDS: &'static [Field] = &[
        Field::required("url", Kind::Text),
        Field::required("events", Kind::TextList),
        Field::optional("secret", Kind::Text),
    ];
}

impl Schema for Connection {
    fn safe_parse(raw: &Value) -> Result<Self, SchemaError> {
        parse_object(raw, Self::FIELDS)
    }
}

impl Schema for SiteIssue {
    fn safe_parse(raw: &Value) -> Result<Self, SchemaError> {
        parse_object(raw, Self::FIELDS)
    }
}

impl Schema for WebhookRegistration {
    fn safe_parse(raw: &Value) -> Result<Self, SchemaError> {
        parse_object(raw, Self::FIELDS)
    }
}

impl Schema for ExecutionMode {
    fn safe_parse(raw: &Value) -> Result<Self, SchemaError> {
        parse_variant(raw, Self::NAMES)
    }
}

impl Schema for Platform {
    fn safe_parse(raw: &Value) -> Result<Self, SchemaError> {
        parse_variant(raw, Self::NAMES)
    }
}

impl Schema for IssueType {
    fn safe_parse(raw: &Value) -> Result<Self, SchemaError> {
        parse_variant(raw, Self::NAMES)
    }
}

impl Schema for Severity {
    fn safe_parse(raw: &Value) -> Result<Self, SchemaError> {
        parse_variant(raw, Self::NAMES)
    }
}
