//! Pagination and date window parameters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::serde_as;
use validator::Validate;

use super::fields::{self, Field, Kind};
use super::{Schema, parse_object};
use crate::error::{Issue, SchemaError};

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 20;

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// List-page request.
///
/// Both fields accept integers or numeric strings (query parameters arrive as
/// text). Defaults apply only when a field is absent.
///
/// # Defaults
///
/// - `page`: 1
/// - `limit`: 20
///
/// # Validation
///
/// - Page must be >= 1
/// - Limit must be between 1 and 100
#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Pagination {
    #[serde_as(as = "coerce::Integer")]
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: i64,

    #[serde_as(as = "coerce::Integer")]
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: i64,
}

impl Pagination {
    const FIELDS: &'static [Field] = &[
        Field::defaulted("page", Kind::Integer),
        Field::defaulted("limit", Kind::Integer),
    ];

    /// Row offset of the first item on this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Schema for Pagination {
    fn safe_parse(raw: &Value) -> Result<Self, SchemaError> {
        parse_object(raw, Self::FIELDS)
    }
}

/// String-to-integer coercion for query parameters.
mod coerce {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::Value;
    use serde_with::{DeserializeAs, SerializeAs};

    /// Accepts `2`, `2.0` or `"2"`; rejects fractions, non-numeric text and
    /// other JSON types.
    pub struct Integer;

    impl<'de> DeserializeAs<'de, i64> for Integer {
        fn deserialize_as<D>(deserializer: D) -> Result<i64, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw = Value::deserialize(deserializer)?;
            crate::schema::fields::integer(&raw).map_err(D::Error::custom)
        }
    }

    impl SerializeAs<i64> for Integer {
        fn serialize_as<S>(source: &i64, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            source.serialize(serializer)
        }
    }
}

/// Start/end window for reports and listings.
///
/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates (midnight UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    #[serde(deserialize_with = "flexible_date::deserialize")]
    pub start_date: DateTime<Utc>,

    #[serde(deserialize_with = "flexible_date::deserialize")]
    pub end_date: DateTime<Utc>,
}

impl DateRange {
    const FIELDS: &'static [Field] = &[
        Field::required("startDate", Kind::Date),
        Field::required("endDate", Kind::Date),
    ];

    /// Window length in whole days.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

impl Schema for DateRange {
    fn safe_parse(raw: &Value) -> Result<Self, SchemaError> {
        let decoded = fields::decode::<Self>(raw, Self::FIELDS)?;
        if !decoded.issues.is_empty() {
            return decoded.finish(Self::FIELDS);
        }

        let range = decoded.value;
        if range.end_date < range.start_date {
            return Err(SchemaError::single(Issue::refinement(
                &["endDate"],
                "End date must be after or equal to start date",
            )));
        }

        Ok(range)
    }
}

/// Custom Serde deserializer for RFC 3339 or calendar-date strings.
mod flexible_date {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        crate::schema::fields::parse_date(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid date, received \"{s}\"")))
    }
}
