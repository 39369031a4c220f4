//! Per-field pre-checks for object schemas.
//!
//! Object schemas declare their fields here. Each wrong type, absent required
//! field and unknown enum member is reported on its own path before the
//! struct is deserialized, so one bad field does not hide the others.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

use super::type_name;
use crate::error::{Issue, SchemaError};

/// Wire-level type a field must have before its rules run.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Kind {
    Text,
    TextList,
    Object,
    /// Integer or numeric string.
    Integer,
    /// RFC 3339 timestamp or `YYYY-MM-DD`.
    Date,
    /// One of the listed enumeration members, case-sensitive.
    Variant(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    /// Must be present and non-null.
    Required,
    /// May be absent or `null`.
    Optional,
    /// May be absent; a present `null` is checked like any other value.
    Defaulted,
}

/// One declared field of an object schema.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Field {
    pub name: &'static str,
    kind: Kind,
    presence: Presence,
}

impl Field {
    pub const fn required(name: &'static str, kind: Kind) -> Self {
        Self {
            name,
            kind,
            presence: Presence::Required,
        }
    }

    pub const fn optional(name: &'static str, kind: Kind) -> Self {
        Self {
            name,
            kind,
            presence: Presence::Optional,
        }
    }

    pub const fn defaulted(name: &'static str, kind: Kind) -> Self {
        Self {
            name,
            kind,
            presence: Presence::Defaulted,
        }
    }

    /// Pushes an issue for every problem with `value`.
    fn check(&self, value: Option<&Value>, out: &mut Vec<Issue>) {
        match value {
            None if self.presence == Presence::Required => {
                out.push(Issue::structural(&[self.name], "Required"));
            }
            None => {}
            Some(Value::Null) if self.presence == Presence::Optional => {}
            Some(value) => self.kind.check(self.name, value, out),
        }
    }

    /// A stand-in that deserializes cleanly, for required fields that failed.
    fn placeholder(&self) -> Option<Value> {
        if self.presence != Presence::Required {
            return None;
        }

        Some(match self.kind {
            Kind::Text => json!(""),
            Kind::TextList => json!([]),
            Kind::Object => json!({}),
            Kind::Integer => json!(0),
            Kind::Date => json!("1970-01-01"),
            Kind::Variant(names) => json!(names.first().copied().unwrap_or_default()),
        })
    }
}

impl Kind {
    fn check(self, name: &str, value: &Value, out: &mut Vec<Issue>) {
        let message = match (self, value) {
            (Self::Text, Value::String(_)) | (Self::Object, Value::Object(_)) => return,
            (Self::Object, other) => expected("object", other),
            (Self::TextList, Value::Array(items)) => {
                for (index, item) in items.iter().enumerate() {
                    if !item.is_string() {
                        let index = index.to_string();
                        out.push(Issue::structural(
                            &[name, index.as_str()],
                            expected("string", item),
                        ));
                    }
                }
                return;
            }
            (Self::TextList, other) => expected("array", other),
            (Self::Integer, value) => match integer(value) {
                Ok(_) => return,
                Err(message) => message,
            },
            (Self::Date, Value::String(s)) => {
                if parse_date(s).is_some() {
                    return;
                }
                format!("Invalid date, received \"{s}\"")
            }
            (Self::Variant(names), Value::String(s)) => {
                if names.contains(&s.as_str()) {
                    return;
                }
                unknown_variant(names, s)
            }
            (Self::Text | Self::Date | Self::Variant(_), other) => expected("string", other),
        };

        out.push(Issue::structural(&[name], message));
    }
}

fn expected(what: &str, received: &Value) -> String {
    format!("Expected {what}, received {}", type_name(received))
}

pub(crate) fn unknown_variant(names: &[&str], received: &str) -> String {
    format!(
        "Expected one of {}, received \"{received}\"",
        names.join(", ")
    )
}

/// Coerces `2`, `2.0`, `"2"` or `" 2 "` to an integer.
///
/// # Errors
///
/// Returns the issue message for fractions, non-numeric text and other JSON
/// types.
pub(crate) fn integer(raw: &Value) -> Result<i64, String> {
    match raw {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(whole_number))
            .ok_or_else(|| format!("Expected integer, received {n}")),
        Value::String(s) => {
            let trimmed = s.trim();
            if let Ok(n) = trimmed.parse::<i64>() {
                return Ok(n);
            }
            match trimmed.parse::<f64>() {
                Ok(f) if f.is_finite() => {
                    whole_number(f).ok_or_else(|| format!("Expected integer, received {trimmed}"))
                }
                _ => Err(format!("Expected number, received \"{s}\"")),
            }
        }
        other => Err(expected("number", other)),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn whole_number(f: f64) -> Option<i64> {
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.fract() == 0.0 && in_range).then_some(f as i64)
}

/// RFC 3339 timestamp, or a calendar date at midnight UTC.
pub(crate) fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// An object whose declared fields all have the right wire type.
pub(crate) struct Decoded<T> {
    pub value: T,
    /// Pre-check failures, one or more per failed field.
    pub issues: Vec<Issue>,
    /// Fields that failed the pre-check.
    failed: Vec<&'static str>,
}

impl<T> Decoded<T> {
    /// Adds later-stage issues, dropping any on a field that already failed.
    pub fn extend(&mut self, issues: Vec<Issue>) {
        let failed = &self.failed;
        self.issues.extend(issues.into_iter().filter(|issue| {
            issue
                .path
                .first()
                .is_none_or(|head| !failed.contains(&head.as_str()))
        }));
    }

    /// The value, or every collected issue in field declaration order.
    pub fn finish(mut self, fields: &[Field]) -> Result<T, SchemaError> {
        if self.issues.is_empty() {
            return Ok(self.value);
        }

        self.issues.sort_by_key(|issue| {
            issue
                .path
                .first()
                .and_then(|head| fields.iter().position(|f| f.name == head.as_str()))
                .unwrap_or(fields.len())
        });

        Err(SchemaError::new(self.issues))
    }
}

/// Pre-checks every declared field, then deserializes.
///
/// Fields that fail are removed (or given a placeholder when required) so
/// the remaining fields still reach their `validator` rules.
///
/// # Errors
///
/// Returns [`SchemaError`] if `raw` is not an object.
pub(crate) fn decode<T: DeserializeOwned>(
    raw: &Value,
    fields: &[Field],
) -> Result<Decoded<T>, SchemaError> {
    let Value::Object(object) = raw else {
        return Err(SchemaError::single(Issue::structural(
            &[],
            expected("object", raw),
        )));
    };

    let mut patched: Map<String, Value> = object.clone();
    let mut issues = Vec::new();
    let mut failed = Vec::new();

    for field in fields {
        let before = issues.len();
        field.check(object.get(field.name), &mut issues);

        if issues.len() > before {
            failed.push(field.name);
            match field.placeholder() {
                Some(value) => {
                    patched.insert(field.name.to_string(), value);
                }
                None => {
                    patched.remove(field.name);
                }
            }
        }
    }

    let value = serde_json::from_value(Value::Object(patched))
        .map_err(|_| SchemaError::single(Issue::structural(&[], "Invalid object")))?;

    Ok(Decoded {
        value,
        issues,
        failed,
    })
}
