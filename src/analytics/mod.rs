//! Display-oriented data shaping
//!
//! Pure, stateless transforms re-run whenever their inputs change. No
//! business aggregation happens here; that is the API's job.

pub mod listing;
pub mod outliers;
pub mod rollup;

pub use listing::{page_listings, ListQuery, Listing, PageResult, SortValue};
pub use outliers::{cap_outliers, percentage_change, TrendDelta};
pub use rollup::{rollup_categories, CategoryRollup, UNCATEGORIZED};
