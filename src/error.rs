//! Error types for rejected input.
//!
//! Two layers:
//!
//! - [`SchemaError`] is what a schema returns: every failed check as an
//!   [`Issue`] with a path into the input.
//! - [`ValidationError`] is what the entry points in [`crate::entry`] return.
//!   It wraps a schema failure or reports a missing/rewrapped value with a
//!   fixed message format.
//!
//! [`AppError`] turns either one into the JSON error envelope returned by
//! API handlers.

use std::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use validator::{ValidationErrors, ValidationErrorsKind};

/// Whether an issue came from a single-field check or a cross-field rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// Type, shape, range, pattern or enum membership.
    Structural,
    /// Individually valid fields violate a relationship.
    Refinement,
}

/// A single rejected check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Field names (or list indices) from the root of the input. Empty for
    /// scalar schemas and object-level refinements.
    pub path: Vec<String>,
    pub message: String,
    #[serde(skip)]
    pub kind: IssueKind,
}

impl Issue {
    pub fn structural(path: &[&str], message: impl Into<String>) -> Self {
        Self {
            path: path.iter().map(|p| (*p).to_string()).collect(),
            message: message.into(),
            kind: IssueKind::Structural,
        }
    }

    pub fn refinement(path: &[&str], message: impl Into<String>) -> Self {
        Self {
            path: path.iter().map(|p| (*p).to_string()).collect(),
            message: message.into(),
            kind: IssueKind::Refinement,
        }
    }
}

/// Structured failure of a schema: one or more issues, in check order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    issues: Vec<Issue>,
}

impl SchemaError {
    /// Builds an error from collected issues.
    ///
    /// Callers only construct this after at least one check failed.
    pub fn new(issues: Vec<Issue>) -> Self {
        debug_assert!(!issues.is_empty());
        Self { issues }
    }

    pub fn single(issue: Issue) -> Self {
        Self {
            issues: vec![issue],
        }
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// The message surfaced by the entry points.
    pub fn first_message(&self) -> &str {
        self.issues
            .first()
            .map_or("Invalid input", |issue| issue.message.as_str())
    }
}

/// Flattens `validator` field errors into issues with camelCase paths.
pub(crate) fn validator_issues(errors: &ValidationErrors) -> Vec<Issue> {
    let mut issues = Vec::new();
    collect_issues(errors, &[], &mut issues);
    issues
}

fn collect_issues(errors: &ValidationErrors, prefix: &[String], out: &mut Vec<Issue>) {
    for (field, kind) in errors.errors() {
        let mut path = prefix.to_vec();
        path.push(wire_name(&field.to_string()));

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error.message.as_ref().map_or_else(
                        || format!("Invalid value ({})", error.code),
                        ToString::to_string,
                    );
                    out.push(Issue {
                        path: path.clone(),
                        message,
                        kind: IssueKind::Structural,
                    });
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_issues(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    let mut item_path = path.clone();
                    item_path.push(index.to_string());
                    collect_issues(nested, &item_path, out);
                }
            }
        }
    }
}

/// Rust field name to the camelCase name used on the wire.
fn wire_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for ch in field.chars() {
        if ch == '_' && !out.is_empty() {
            upper_next = true;
        } else if upper_next {
            out.push(ch.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.first_message())
    }
}

impl std::error::Error for SchemaError {}

/// Failure returned by the value-or-error entry points.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The schema rejected the value; propagated as-is.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A required raw input was absent.
    #[error("{field} is required")]
    Missing { field: String },

    /// A present value was malformed; carries the first schema message.
    #[error("Invalid {field}: {message}")]
    Invalid { field: String, message: String },
}

impl ValidationError {
    /// The `(path, message)` pairs behind this error.
    pub fn issues(&self) -> Vec<Issue> {
        match self {
            Self::Schema(err) => err.issues().to_vec(),
            Self::Missing { .. } | Self::Invalid { .. } => {
                vec![Issue::structural(&[], self.to_string())]
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

/// Rejected-input response for API handlers.
///
/// Always `400 Bad Request`; the message text is reused verbatim.
#[derive(Debug)]
pub struct AppError {
    message: String,
    details: Value,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self {
            message: message.into(),
            details,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        let issues = err.issues();
        tracing::debug!(issues = issues.len(), "Rejected input: {}", err);
        Self::bad_request(err.to_string(), json!({ "issues": issues }))
    }
}

impl From<SchemaError> for AppError {
    fn from(err: SchemaError) -> Self {
        ValidationError::Schema(err).into()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorInfo {
                code: "validation_error",
                message: self.message,
                details: self.details,
            },
        };

        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_name() {
        assert_eq!(wire_name("end_date"), "endDate");
        assert_eq!(wire_name("product_id"), "productId");
        assert_eq!(wire_name("title"), "title");
        assert_eq!(wire_name("pageUrl"), "pageUrl");
    }

    #[test]
    fn test_first_message() {
        let err = SchemaError::new(vec![
            Issue::structural(&["title"], "first"),
            Issue::structural(&["description"], "second"),
        ]);
        assert_eq!(err.first_message(), "first");
        assert_eq!(err.to_string(), "first");
    }

    #[test]
    fn test_validation_error_messages() {
        let missing = ValidationError::Missing {
            field: "User ID".to_string(),
        };
        assert_eq!(missing.to_string(), "User ID is required");

        let invalid = ValidationError::Invalid {
            field: "shop parameter".to_string(),
            message: "Invalid Shopify domain format".to_string(),
        };
        assert_eq!(
            invalid.to_string(),
            "Invalid shop parameter: Invalid Shopify domain format"
        );
    }

    #[test]
    fn test_schema_error_is_transparent() {
        let err: ValidationError =
            SchemaError::single(Issue::structural(&["page"], "Page must be at least 1")).into();
        assert_eq!(err.to_string(), "Page must be at least 1");
        assert_eq!(err.issues()[0].path, vec!["page".to_string()]);
    }

    #[test]
    fn test_app_error_status() {
        let err: AppError = ValidationError::Missing {
            field: "Shop parameter".to_string(),
        }
        .into();
        assert_eq!(err.message(), "Shop parameter is required");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
