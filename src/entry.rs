//! Value-or-error wrappers for route handlers.
//!
//! Only the shop and identifier validators rewrap schema failures with a
//! friendlier message; pagination returns the schema failure as-is.

use serde_json::Value;

use crate::error::{SchemaError, ValidationError};
use crate::schema::{ObjectId, Pagination, Schema, ShopDomain};

const DEFAULT_ID_FIELD: &str = "ID";

/// Validates the `shop` query parameter.
///
/// An empty string counts as absent.
///
/// # Errors
///
/// - [`ValidationError::Missing`]: `Shop parameter is required`
/// - [`ValidationError::Invalid`]: `Invalid shop parameter: <reason>`
///
/// # Examples
///
/// ```
/// use seo_guard::entry::validate_shop_param;
///
/// let shop = validate_shop_param(Some("my-store.myshopify.com")).unwrap();
/// assert_eq!(shop.as_str(), "my-store.myshopify.com");
///
/// let err = validate_shop_param(None).unwrap_err();
/// assert_eq!(err.to_string(), "Shop parameter is required");
/// ```
pub fn validate_shop_param(shop: Option<&str>) -> Result<ShopDomain, ValidationError> {
    let shop = shop
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ValidationError::Missing {
            field: "Shop parameter".to_string(),
        })?;

    ShopDomain::parse(shop).map_err(|err| ValidationError::Invalid {
        field: "shop parameter".to_string(),
        message: err.first_message().to_string(),
    })
}

/// Validates list paging parameters, applying defaults for absent fields.
///
/// # Errors
///
/// Returns the [`SchemaError`] from [`Pagination`] unchanged.
pub fn validate_pagination(params: &Value) -> Result<Pagination, SchemaError> {
    Pagination::safe_parse(params)
}

/// Validates a 24-character hex identifier.
///
/// `field_name` names the value in messages and defaults to `ID`. An empty
/// string counts as absent.
///
/// # Errors
///
/// - [`ValidationError::Missing`]: `<field_name> is required`
/// - [`ValidationError::Invalid`]: `Invalid <field_name>: <reason>`
pub fn validate_object_id(
    id: Option<&str>,
    field_name: Option<&str>,
) -> Result<ObjectId, ValidationError> {
    let field = field_name.unwrap_or(DEFAULT_ID_FIELD);

    let id = id.filter(|s| !s.is_empty()).ok_or_else(|| ValidationError::Missing {
        field: field.to_string(),
    })?;

    ObjectId::parse(id).map_err(|err| ValidationError::Invalid {
        field: field.to_string(),
        message: err.first_message().to_string(),
    })
}
