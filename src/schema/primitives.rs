//! Scalar schemas: shop domains, identifiers, emails, URLs and free text.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;
use uuid::Uuid;
use validator::ValidateEmail;

use super::{Schema, expect_str};
use crate::error::{Issue, SchemaError};
use crate::sanitize::strip_html_tags;

static SHOP_DOMAIN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9-]*\.myshopify\.com$").unwrap());

static OBJECT_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]{24}$").unwrap());

const SHOP_DOMAIN_MAX_LEN: usize = 100;
const EMAIL_MIN_LEN: usize = 3;
const EMAIL_MAX_LEN: usize = 255;
const URL_MAX_LEN: usize = 2048;

/// Collects issues from checks that all run against the same value.
fn finish<T>(issues: Vec<Issue>, value: impl FnOnce() -> T) -> Result<T, SchemaError> {
    if issues.is_empty() {
        Ok(value())
    } else {
        Err(SchemaError::new(issues))
    }
}

/// A Shopify store identifier, e.g. `my-store.myshopify.com`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShopDomain(String);

impl ShopDomain {
    /// Validates a shop domain. The accepted value is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns every failing check: empty, pattern mismatch, over 100 characters.
    pub fn parse(input: &str) -> Result<Self, SchemaError> {
        let mut issues = Vec::new();

        if input.is_empty() {
            issues.push(Issue::structural(&[], "Shop domain is required"));
        }
        if !SHOP_DOMAIN_REGEX.is_match(input) {
            issues.push(Issue::structural(&[], "Invalid Shopify domain format"));
        }
        if input.chars().count() > SHOP_DOMAIN_MAX_LEN {
            issues.push(Issue::structural(
                &[],
                format!("Shop domain must be at most {SHOP_DOMAIN_MAX_LEN} characters"),
            ));
        }

        finish(issues, || Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A 24-character hexadecimal document identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectId(String);

impl ObjectId {
    /// Validates an identifier; case is preserved.
    ///
    /// # Errors
    ///
    /// Returns an issue unless the input is exactly 24 hex digits.
    pub fn parse(input: &str) -> Result<Self, SchemaError> {
        if OBJECT_ID_REGEX.is_match(input) {
            Ok(Self(input.to_string()))
        } else {
            Err(SchemaError::single(Issue::structural(
                &[],
                "Invalid ObjectId format",
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Parses a hyphenated `8-4-4-4-12` UUID.
///
/// Braced, URN and unhyphenated forms are rejected.
///
/// # Errors
///
/// Returns an issue if the input is not an RFC-shaped UUID.
pub fn parse_uuid(input: &str) -> Result<Uuid, SchemaError> {
    let hyphenated = input.len() == 36
        && input
            .char_indices()
            .all(|(i, c)| matches!(i, 8 | 13 | 18 | 23) == (c == '-'));

    hyphenated
        .then(|| Uuid::try_parse(input).ok())
        .flatten()
        .ok_or_else(|| SchemaError::single(Issue::structural(&[], "Invalid UUID")))
}

/// An email address, lowercased on success.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// # Errors
    ///
    /// Returns every failing check: format, shorter than 3, longer than 255.
    pub fn parse(input: &str) -> Result<Self, SchemaError> {
        let mut issues = Vec::new();
        let len = input.chars().count();

        if !input.validate_email() {
            issues.push(Issue::structural(&[], "Invalid email address"));
        }
        if len < EMAIL_MIN_LEN {
            issues.push(Issue::structural(
                &[],
                format!("Email must be at least {EMAIL_MIN_LEN} characters"),
            ));
        }
        if len > EMAIL_MAX_LEN {
            issues.push(Issue::structural(
                &[],
                format!("Email must be at most {EMAIL_MAX_LEN} characters"),
            ));
        }

        finish(issues, || Self(input.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An absolute URL of at most 2048 characters, kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceUrl(String);

impl ResourceUrl {
    /// # Errors
    ///
    /// Returns every failing check: not parseable as a URL, too long.
    pub fn parse(input: &str) -> Result<Self, SchemaError> {
        let mut issues = Vec::new();

        if Url::parse(input).is_err() {
            issues.push(Issue::structural(&[], "Invalid URL"));
        }
        if input.chars().count() > URL_MAX_LEN {
            issues.push(Issue::structural(
                &[],
                format!("URL must be at most {URL_MAX_LEN} characters"),
            ));
        }

        finish(issues, || Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Bounded free-text input.
///
/// The bounds are checked against the raw input. On success, HTML tags and
/// NUL bytes are removed and surrounding whitespace is trimmed, so the
/// returned text may be shorter than `min`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeString {
    pub min: usize,
    pub max: usize,
}

impl SafeString {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// # Errors
    ///
    /// Returns every failing length check.
    pub fn parse(&self, input: &str) -> Result<String, SchemaError> {
        let mut issues = Vec::new();
        let len = input.chars().count();

        if len < self.min {
            issues.push(Issue::structural(
                &[],
                format!("String must contain at least {} character(s)", self.min),
            ));
        }
        if len > self.max {
            issues.push(Issue::structural(
                &[],
                format!("String must contain at most {} character(s)", self.max),
            ));
        }

        finish(issues, || sanitize_text(input))
    }

    /// # Errors
    ///
    /// Rejects non-string input, then applies [`SafeString::parse`].
    pub fn safe_parse(&self, raw: &Value) -> Result<String, SchemaError> {
        self.parse(expect_str(raw)?)
    }
}

fn sanitize_text(input: &str) -> String {
    strip_html_tags(input).replace('\0', "").trim().to_string()
}

macro_rules! string_schema {
    ($($ty:ident),+) => {
        $(
            impl Schema for $ty {
                fn safe_parse(raw: &Value) -> Result<Self, SchemaError> {
                    Self::parse(expect_str(raw)?)
                }
            }

            impl TryFrom<String> for $ty {
                type Error = SchemaError;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    Self::parse(&value)
                }
            }

            impl From<$ty> for String {
                fn from(value: $ty) -> Self {
                    value.0
                }
            }

            impl AsRef<str> for $ty {
                fn as_ref(&self) -> &str {
                    &self.0
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }
        )+
    };
}

string_schema!(ShopDomain, ObjectId, Email, ResourceUrl);

impl Schema for Uuid {
    fn safe_parse(raw: &Value) -> Result<Self, SchemaError> {
        parse_uuid(expect_str(raw)?)
    }
}
