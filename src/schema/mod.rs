//! Schema registry: acceptance rules for every input the API boundary takes.
//!
//! Each schema turns an untyped [`serde_json::Value`] (a query parameter, a
//! JSON body) into a typed, normalized value or a [`SchemaError`].
//!
//! - [`primitives`] - shop domains, identifiers, emails, URLs, safe strings
//! - [`pagination`] - list paging and date windows
//! - [`payloads`] - product SEO updates, execution modes, connections,
//!   detected issues and webhook registrations
//!
//! Rules are stateless. Compiled patterns live in `LazyLock` statics and are
//! shared by every caller.

pub(crate) mod fields;
pub mod pagination;
pub mod payloads;
pub mod primitives;

pub use pagination::{DateRange, Pagination};
pub use payloads::{
    Connection, ExecutionMode, IssueType, Platform, ProductSeoUpdate, Severity, SiteIssue,
    WebhookRegistration,
};
pub use primitives::{Email, ObjectId, ResourceUrl, SafeString, ShopDomain, parse_uuid};

use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

use crate::error::{Issue, SchemaError, validator_issues};
use fields::{Decoded, Field};

/// A validated input type.
///
/// `safe_parse` never panics on untrusted input; every rejection comes back
/// as a [`SchemaError`].
pub trait Schema: Sized {
    /// # Errors
    ///
    /// Returns [`SchemaError`] listing every failed check.
    fn safe_parse(raw: &Value) -> Result<Self, SchemaError>;
}

/// JavaScript-style type name used in type mismatch messages.
pub(crate) fn type_name(raw: &Value) -> &'static str {
    match raw {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Requires a string without coercing other primitives.
pub(crate) fn expect_str(raw: &Value) -> Result<&str, SchemaError> {
    raw.as_str().ok_or_else(|| {
        SchemaError::single(Issue::structural(
            &[],
            format!("Expected string, received {}", type_name(raw)),
        ))
    })
}

/// Pre-checks and deserializes an object-shaped input, then runs its
/// `validator` field rules.
///
/// Issues from both stages come back together, in `fields` order.
pub(crate) fn parse_object<T>(raw: &Value, fields: &[Field]) -> Result<T, SchemaError>
where
    T: DeserializeOwned + Validate,
{
    let mut decoded: Decoded<T> = fields::decode(raw, fields)?;

    if let Err(errors) = decoded.value.validate() {
        decoded.extend(validator_issues(&errors));
    }

    decoded.finish(fields)
}

/// Deserializes a closed enumeration member; no case folding.
///
/// `names` are the wire names of the members.
pub(crate) fn parse_variant<T: DeserializeOwned>(
    raw: &Value,
    names: &[&str],
) -> Result<T, SchemaError> {
    let s = expect_str(raw)?;

    if !names.contains(&s) {
        return Err(SchemaError::single(Issue::structural(
            &[],
            fields::unknown_variant(names, s),
        )));
    }

    <T as serde::Deserialize>::deserialize(raw).map_err(|_| {
        SchemaError::single(Issue::structural(&[], fields::unknown_variant(names, s)))
    })
}
