//! Product Service
//!
//! Products filter server-side: the service translates the view's filter
//! state into the POST /product payload and passes results through.

use crate::api::types::{ProductQuery, ProductRecord, SortOrder};
use crate::error::{AppError, Result};
use crate::state::AppState;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Products shown per page
pub const PAGE_SIZE: u32 = 10;

/// View-owned filter state for the products page
#[derive(Debug, Clone, Deserialize)]
pub struct ProductFilter {
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub min_rating: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub sort_field: String,
    #[serde(default)]
    pub sort_order: SortOrder,
    /// 1-indexed
    pub page: u32,
}

/// One page of products as returned by the API
#[derive(Debug, Clone, Serialize)]
pub struct ProductPage {
    pub products: Vec<ProductRecord>,
    pub page: u32,
    pub page_size: u32,
}

/// Product service for the server-backed listing pipeline
pub struct ProductService;

impl ProductService {
    /// Fetch one page of filtered, sorted products
    pub async fn top_products(state: &AppState, filter: ProductFilter) -> Result<ProductPage> {
        info!(
            "ProductService::top_products - page {} sort {} {}",
            filter.page,
            filter.sort_field,
            filter.sort_order.as_str()
        );

        let query = Self::build_query(&filter)?;
        let products = state.api.products(&query).await?;

        Ok(ProductPage {
            products,
            page: filter.page.max(1),
            page_size: PAGE_SIZE,
        })
    }

    fn build_query(filter: &ProductFilter) -> Result<ProductQuery> {
        if filter.min_price > filter.max_price {
            return Err(AppError::Validation(
                "min_price must not exceed max_price".to_string(),
            ));
        }
        if !(0.0..=5.0).contains(&filter.min_rating) {
            return Err(AppError::Validation(
                "min_rating must be between 0 and 5".to_string(),
            ));
        }

        let page = filter.page.max(1);

        Ok(ProductQuery {
            searchterm: filter.search_term.clone(),
            rating: filter.min_rating,
            min_price: filter.min_price,
            max_price: filter.max_price,
            sort_by: filter.sort_field.clone(),
            sort_order: filter.sort_order,
            limit: PAGE_SIZE,
            offset: ProductQuery::offset_for_page(page, PAGE_SIZE),
        })
    }
}
