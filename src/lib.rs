//! # SEO Guard
//!
//! Input validation and sanitization for the SEO automation API. Route
//! handlers call it on every untrusted value before that value reaches
//! business logic or the database.
//!
//! ## Layout
//!
//! - **Schemas** ([`schema`]) - Acceptance rules and success-path
//!   normalization for every input shape the API takes
//! - **Sanitizers** ([`sanitize`]) - Denylist transforms for HTML, SQL text,
//!   file paths and origin checks
//! - **Entry points** ([`entry`]) - Value-or-error wrappers with fixed
//!   messages for the most common parameters
//! - **Errors** ([`error`]) - Issue lists, entry point errors and the
//!   HTTP error envelope
//!
//! ## Usage
//!
//! ```
//! use seo_guard::prelude::*;
//! use serde_json::json;
//!
//! let page = Pagination::safe_parse(&json!({ "page": "2" })).unwrap();
//! assert_eq!((page.page, page.limit), (2, 20));
//!
//! let err = validate_object_id(None, Some("User ID")).unwrap_err();
//! assert_eq!(err.to_string(), "User ID is required");
//! ```
//!
//! In an axum handler, failures convert into [`AppError`], which renders as
//! `400 Bad Request` with the message reused verbatim:
//!
//! ```rust,ignore
//! async fn list_issues(Query(q): Query<Value>) -> Result<Json<Page>, AppError> {
//!     let paging = validate_pagination(&q)?;
//!     // ...
//! }
//! ```
//!
//! ## Configuration
//!
//! The command-line tool reads its settings from environment variables via
//! [`config::Config`].

pub mod config;
pub mod entry;
pub mod error;
pub mod sanitize;
pub mod schema;
pub mod telemetry;

pub use error::{AppError, Issue, IssueKind, SchemaError, ValidationError};
pub use schema::Schema;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for route handlers
/// and integration tests.
pub mod prelude {
    pub use crate::entry::{validate_object_id, validate_pagination, validate_shop_param};
    pub use crate::error::{AppError, SchemaError, ValidationError};
    pub use crate::sanitize::{sanitize_html, validate_request_origin};
    pub use crate::schema::{
        DateRange, Email, ExecutionMode, ObjectId, Pagination, ProductSeoUpdate, SafeString,
        Schema, ShopDomain,
    };
}
