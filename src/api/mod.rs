//! Aggregation API client
//!
//! Thin typed client over the remote aggregation endpoints. All heavy
//! aggregation happens on the API side; this module only issues requests
//! and validates response shape at the boundary. Requests go straight to
//! the API origin, no relay in between.

pub mod types;

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use types::*;
use url::Url;

/// Client for the marketplace aggregation API
pub struct MarketApi {
    client: Client,
    base_url: Url,
}

impl MarketApi {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let base_url = Url::parse(&config.api_base_url)
            .map_err(|e| AppError::Config(format!("Invalid API base URL: {}", e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Config("API base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push(path);
        Ok(url)
    }

    /// GET /summary with an optional date window
    pub async fn summary(&self, range: &DateRange) -> Result<SummaryMetrics> {
        let mut url = self.endpoint("summary")?;

        {
            let mut pairs = url.query_pairs_mut();
            if let Some(start) = &range.start_date {
                pairs.append_pair("start_date", start);
            }
            if let Some(end) = &range.end_date {
                pairs.append_pair("end_date", end);
            }
        }

        self.get_json(url, "summary").await
    }

    /// GET /top-category, always sorted by revenue on the server
    pub async fn top_categories(
        &self,
        sort_order: SortOrder,
        limit: u32,
    ) -> Result<Vec<CategoryRecord>> {
        let mut url = self.endpoint("top-category")?;
        url.query_pairs_mut()
            .append_pair("sort_by", "revenue")
            .append_pair("sort_order", sort_order.as_str())
            .append_pair("limit", &limit.to_string());

        self.get_json(url, "top-category").await
    }

    /// GET /sales-trend
    pub async fn sales_trend(&self) -> Result<Vec<TrendPoint>> {
        let url = self.endpoint("sales-trend")?;
        self.get_json(url, "sales-trend").await
    }

    /// GET /seller with server-side sort parameters
    pub async fn sellers(
        &self,
        sort_by: &str,
        sort_order: SortOrder,
    ) -> Result<Vec<SellerRecord>> {
        let mut url = self.endpoint("seller")?;
        url.query_pairs_mut()
            .append_pair("sort_by", sort_by)
            .append_pair("sort_order", sort_order.as_str());

        self.get_json(url, "seller").await
    }

    /// POST /product; filtering, sorting and slicing happen server-side
    pub async fn products(&self, query: &ProductQuery) -> Result<Vec<ProductRecord>> {
        let url = self.endpoint("product")?;

        let response = self
            .client
            .post(url)
            .json(query)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let envelope: ProductsEnvelope = decode(&body, "product")?;
        Ok(envelope.products)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T> {
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?.error_for_status()?;

        let body = response.text().await?;
        decode(&body, what)
    }
}

/// Decode a response body, rejecting malformed payloads at the boundary
/// instead of propagating missing shapes into the render path
fn decode<T: DeserializeOwned>(body: &str, what: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        tracing::warn!("Malformed {} payload: {}", what, e);
        AppError::MalformedResponse(format!("{} endpoint: {}", what, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_rejects_non_array() {
        let result: Result<Vec<SellerRecord>> = decode(r#"{"oops": true}"#, "seller");
        assert!(matches!(result, Err(AppError::MalformedResponse(_))));
    }

    #[test]
    fn test_decode_array_best_effort_fields() {
        let body = r#"[{"seller_name":"Acme","total_sales":120.5},{"orders":3}]"#;
        let sellers: Vec<SellerRecord> = decode(body, "seller").unwrap();

        assert_eq!(sellers.len(), 2);
        assert_eq!(sellers[0].total_sales, Some(120.5));
        assert!(sellers[1].seller_name.is_none());
    }

    #[test]
    fn test_decode_products_envelope() {
        let body = r#"{"products":[{"title":"Cable","price":12.9,"rating":4.7}]}"#;
        let envelope: ProductsEnvelope = decode(body, "product").unwrap();

        assert_eq!(envelope.products.len(), 1);
        assert_eq!(envelope.products[0].title.as_deref(), Some("Cable"));
    }

    #[test]
    fn test_endpoint_joins_path() {
        let config = AppConfig {
            api_base_url: "https://api.example.com/dev".to_string(),
            auth_base_url: "https://identitytoolkit.googleapis.com/v1".to_string(),
            auth_api_key: String::new(),
            http_timeout_secs: 30,
        };
        let api = MarketApi::new(&config).unwrap();

        let url = api.endpoint("sales-trend").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/dev/sales-trend");
    }
}
