//! Seller Service
//!
//! Sellers are fetched with server-side sort parameters, then searched,
//! re-sorted and paginated client-side through the listing pipeline.

use crate::analytics::{page_listings, ListQuery};
use crate::api::types::{SellerRecord, SortOrder};
use crate::error::Result;
use crate::state::AppState;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Sellers shown per page
pub const PAGE_SIZE: u32 = 20;

/// View-owned filter state for the sellers page
#[derive(Debug, Clone, Deserialize)]
pub struct SellerListRequest {
    #[serde(default)]
    pub search_term: String,
    pub sort_field: String,
    #[serde(default)]
    pub sort_order: SortOrder,
    /// 1-indexed
    pub page: u32,
}

/// One page of sellers after the client-side pipeline
#[derive(Debug, Clone, Serialize)]
pub struct SellerPage {
    pub sellers: Vec<SellerRecord>,
    pub total_count: usize,
    pub page: u32,
    pub page_size: u32,
}

/// Seller service for the verified-sellers view
pub struct SellerService;

impl SellerService {
    /// Fetch sellers and run the filter/sort/paginate pipeline
    pub async fn top_sellers(state: &AppState, request: SellerListRequest) -> Result<SellerPage> {
        info!(
            "SellerService::top_sellers - page {} sort {} {}",
            request.page,
            request.sort_field,
            request.sort_order.as_str()
        );

        let records = state
            .api
            .sellers(&request.sort_field, request.sort_order)
            .await?;

        Ok(Self::paginate(&records, &request))
    }

    fn paginate(records: &[SellerRecord], request: &SellerListRequest) -> SellerPage {
        let query = ListQuery {
            search_term: request.search_term.clone(),
            sort_field: request.sort_field.clone(),
            sort_order: request.sort_order,
            page: request.page.max(1),
            page_size: PAGE_SIZE,
        };

        let result = page_listings(records, &query);

        SellerPage {
            sellers: result.items,
            total_count: result.total_count,
            page: query.page,
            page_size: PAGE_SIZE,
        }
    }
}
