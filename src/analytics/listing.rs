//! Client-side filter/sort/paginate pipeline
//!
//! Stateless: the view layer owns the filter state and passes it in whole
//! on every change. Listing types that filter server-side (products) skip
//! this and build a [`crate::api::types::ProductQuery`] instead.

use crate::api::types::{SellerRecord, SortOrder};
use serde::Deserialize;
use std::cmp::Ordering;

/// Filter state for a client-side listing, owned by the view
#[derive(Debug, Clone, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub search_term: String,
    pub sort_field: String,
    #[serde(default)]
    pub sort_order: SortOrder,
    /// 1-indexed
    pub page: u32,
    pub page_size: u32,
}

/// Sort key extracted from a record field
pub enum SortValue<'a> {
    Number(f64),
    Text(&'a str),
}

/// Record that can flow through the client-side pipeline
pub trait Listing {
    /// Identity field matched against the search term
    fn identity(&self) -> &str;

    /// Value of a named sort field; unknown fields sort as zero
    fn sort_value(&self, field: &str) -> SortValue<'_>;
}

/// One page of a filtered, sorted listing
#[derive(Debug, Clone)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total_count: usize,
}

/// Filter, stable-sort and slice `records` according to `query`.
///
/// The search term matches case-insensitively as a substring of the
/// identity field; an empty term matches everything. The sort is stable so
/// re-sorting by the same field never reorders equal rows. A page past the
/// end returns an empty slice, not an error.
pub fn page_listings<T: Listing + Clone>(records: &[T], query: &ListQuery) -> PageResult<T> {
    let needle = query.search_term.to_lowercase();

    let mut filtered: Vec<T> = records
        .iter()
        .filter(|r| needle.is_empty() || r.identity().to_lowercase().contains(&needle))
        .cloned()
        .collect();

    filtered.sort_by(|a, b| {
        let ordering = compare_field(a, b, &query.sort_field);
        match query.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    let total_count = filtered.len();
    let start = (query.page.saturating_sub(1) as usize) * query.page_size as usize;
    let items = if start >= total_count {
        Vec::new()
    } else {
        let end = (start + query.page_size as usize).min(total_count);
        filtered[start..end].to_vec()
    };

    PageResult { items, total_count }
}

fn compare_field<T: Listing>(a: &T, b: &T, field: &str) -> Ordering {
    match (a.sort_value(field), b.sort_value(field)) {
        (SortValue::Number(x), SortValue::Number(y)) => x.total_cmp(&y),
        (SortValue::Text(x), SortValue::Text(y)) => x.cmp(y),
        // Mixed types should not happen for a well-typed field; numbers first
        (SortValue::Number(_), SortValue::Text(_)) => Ordering::Less,
        (SortValue::Text(_), SortValue::Number(_)) => Ordering::Greater,
    }
}

impl Listing for SellerRecord {
    fn identity(&self) -> &str {
        self.seller_name.as_deref().unwrap_or("")
    }

    fn sort_value(&self, field: &str) -> SortValue<'_> {
        match field {
            "seller_name" => SortValue::Text(self.identity()),
            "total_sales" => SortValue::Number(self.total_sales.unwrap_or(0.0)),
            "orders" => SortValue::Number(self.orders.unwrap_or(0.0)),
            "average_rating" => SortValue::Number(self.average_rating.unwrap_or(0.0)),
            _ => SortValue::Number(0.0),
        }
    }
}
