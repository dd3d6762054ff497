//! Aggregation API data types
//!
//! Field names mirror the wire format of the aggregation endpoints. All
//! non-identity fields are optional so a well-shaped payload with missing
//! values still renders best-effort ("N/A" placeholders downstream).

use serde::{Deserialize, Serialize};

/// Sort direction shared by every listing endpoint and the client pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Desc
    }
}

/// Optional date window for the summary endpoint, `YYYY-MM-DD` bounds
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateRange {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Pre-aggregated headline metrics from GET /summary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryMetrics {
    #[serde(default)]
    pub total_sales: Option<f64>,
    #[serde(default)]
    pub total_orders: Option<u64>,
    #[serde(default)]
    pub unique_products: Option<u64>,
}

/// One row of GET /top-category, keyed by the full pipe-delimited path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub item_category_detail: String,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub units_sold: Option<f64>,
}

/// One point of GET /sales-trend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: String,
    #[serde(default)]
    pub total_sales: f64,
    #[serde(default)]
    pub total_orders: f64,
    #[serde(default)]
    pub unique_products: u64,
}

/// One product card from POST /product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub sales: Option<f64>,
    #[serde(default)]
    pub seller: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// One row of GET /seller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerRecord {
    #[serde(default)]
    pub seller_name: Option<String>,
    #[serde(default)]
    pub total_sales: Option<f64>,
    #[serde(default)]
    pub orders: Option<f64>,
    #[serde(default)]
    pub average_rating: Option<f64>,
}

/// POST /product request body; filtering and sorting are deferred to the
/// API, the client only carries state and offset arithmetic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductQuery {
    pub searchterm: String,
    pub rating: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub sort_by: String,
    pub sort_order: SortOrder,
    pub limit: u32,
    pub offset: u32,
}

impl ProductQuery {
    /// Offset for a 1-indexed page
    pub fn offset_for_page(page: u32, limit: u32) -> u32 {
        page.saturating_sub(1) * limit
    }
}

/// Envelope of POST /product
#[derive(Debug, Clone, Deserialize)]
pub struct ProductsEnvelope {
    pub products: Vec<ProductRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_arithmetic() {
        assert_eq!(ProductQuery::offset_for_page(1, 10), 0);
        assert_eq!(ProductQuery::offset_for_page(2, 10), 10);
        assert_eq!(ProductQuery::offset_for_page(3, 10), 20);
        assert_eq!(ProductQuery::offset_for_page(0, 10), 0);
    }

    #[test]
    fn test_product_query_wire_names() {
        let query = ProductQuery {
            searchterm: "usb cable".to_string(),
            rating: 4.0,
            min_price: 100.0,
            max_price: 1000.0,
            sort_by: "total_sold".to_string(),
            sort_order: SortOrder::Desc,
            limit: 10,
            offset: 20,
        };

        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["searchterm"], "usb cable");
        assert_eq!(json["sort_order"], "desc");
        assert_eq!(json["offset"], 20);
    }

    #[test]
    fn test_seller_record_tolerates_missing_fields() {
        let record: SellerRecord = serde_json::from_str(r#"{"seller_name":"Acme"}"#).unwrap();
        assert_eq!(record.seller_name.as_deref(), Some("Acme"));
        assert!(record.average_rating.is_none());
    }

    #[test]
    fn test_sort_order_round_trip() {
        assert_eq!(serde_json::to_value(SortOrder::Asc).unwrap(), "asc");
        let order: SortOrder = serde_json::from_str("\"desc\"").unwrap();
        assert_eq!(order, SortOrder::Desc);
    }
}
