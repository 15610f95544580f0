use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Cow;
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Message returned when name, category or price is missing or blank
pub const INVALID_PAYLOAD: &str = "Invalid payload. Name, category, and price are required.";

/// Message returned for a negative price
pub const NEGATIVE_PRICE: &str = "Price must be a positive number.";

/// Item entity - one record of the catalog collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Creation timestamp in milliseconds, doubles as the identifier
    pub id: i64,
    pub name: String,
    pub category: String,
    /// Non-negative price
    #[serde(serialize_with = "serialize_price")]
    pub price: f64,
}

/// Largest integer an f64 holds exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Writes whole prices as JSON integers so `2499` stays `2499` on disk.
fn serialize_price<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if price.fract() == 0.0 && price.abs() < MAX_EXACT_INTEGER {
        serializer.serialize_i64(*price as i64)
    } else {
        serializer.serialize_f64(*price)
    }
}

/// DTO for creating a new item
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateItem {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub category: String,
    #[validate(range(min = 0.0, message = "Price must be a positive number."))]
    pub price: f64,
}

impl CreateItem {
    pub fn new(name: impl Into<String>, category: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            price,
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed(INVALID_PAYLOAD)));
    }
    Ok(())
}

/// Query parameters for listing items
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ItemQuery {
    /// Case-insensitive substring matched against name and category
    pub q: Option<String>,
    /// 1-based page number (default 1)
    pub page: Option<i64>,
    /// Page size (default 50)
    pub limit: Option<i64>,
}

/// Pagination metadata computed for a filtered result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Number of items matching the filter
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    /// More matching items exist after this page
    pub has_next: bool,
    /// The page number is above 1
    pub has_prev: bool,
}

/// One page of items with its pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemPage {
    pub items: Vec<Item>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// Aggregate statistics over the whole collection
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total: usize,
    pub average_price: f64,
    /// Item count per distinct category
    pub categories: BTreeMap<String, usize>,
    pub price_range: PriceRange,
    /// When the snapshot was computed; absent for an empty collection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl StatsSnapshot {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_item_rejects_blank_fields() {
        let input = CreateItem::new("   ", "Furniture", 10.0);
        let err = input.validate().unwrap_err();
        assert!(err.field_errors().contains_key("name"));
        assert!(!err.field_errors().contains_key("category"));
    }

    #[test]
    fn test_create_item_rejects_negative_price() {
        let input = CreateItem::new("Desk", "Furniture", -100.0);
        let err = input.validate().unwrap_err();
        assert!(err.field_errors().contains_key("price"));
    }

    #[test]
    fn test_create_item_accepts_zero_price() {
        assert!(CreateItem::new("Sticker", "Misc", 0.0).validate().is_ok());
    }

    #[test]
    fn test_create_item_defaults_missing_strings() {
        let input: CreateItem = serde_json::from_value(json!({ "price": 5 })).unwrap();
        assert_eq!(input.name, "");
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_create_item_requires_numeric_price() {
        let result = serde_json::from_value::<CreateItem>(json!({
            "name": "Test Item",
            "category": "Test Category",
            "price": "invalid"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_item_whole_price_serializes_as_integer() {
        let item = Item {
            id: 1,
            name: "Laptop Pro".into(),
            category: "Electronics".into(),
            price: 2499.0,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["price"], json!(2499));
        assert!(json["price"].is_i64());

        let fractional = Item { price: 99.99, ..item };
        let json = serde_json::to_value(&fractional).unwrap();
        assert_eq!(json["price"], json!(99.99));
    }

    #[test]
    fn test_pagination_serializes_camel_case() {
        let pagination = Pagination {
            total: 5,
            page: 2,
            page_size: 2,
            total_pages: 3,
            has_next: true,
            has_prev: true,
        };
        let value = serde_json::to_value(pagination).unwrap();
        assert_eq!(value["pageSize"], 2);
        assert_eq!(value["totalPages"], 3);
        assert_eq!(value["hasNext"], true);
        assert_eq!(value["hasPrev"], true);
    }

    #[test]
    fn test_empty_stats_omit_last_updated() {
        let value = serde_json::to_value(StatsSnapshot::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "total": 0,
                "averagePrice": 0.0,
                "categories": {},
                "priceRange": { "min": 0.0, "max": 0.0 }
            })
        );
    }
}
