//! Category Service
//!
//! Fetches flat category-detail rows and rolls them up into the two-level
//! hierarchy the categories page charts.

use crate::analytics::{rollup_categories, CategoryRollup};
use crate::api::types::SortOrder;
use crate::error::Result;
use crate::state::AppState;
use tracing::info;

/// Rows requested from the API; the rollup shrinks them client-side
const FETCH_LIMIT: u32 = 1000;

/// Category service for the revenue-by-category view
pub struct CategoryService;

impl CategoryService {
    /// Fetch, roll up and sort categories by summed revenue
    pub async fn top_categories(
        state: &AppState,
        sort_order: SortOrder,
    ) -> Result<Vec<CategoryRollup>> {
        info!(
            "CategoryService::top_categories - sort {}",
            sort_order.as_str()
        );

        let records = state.api.top_categories(SortOrder::Asc, FETCH_LIMIT).await?;
        let mut rollups = rollup_categories(&records);
        Self::sort_by_revenue(&mut rollups, sort_order);
        Ok(rollups)
    }

    fn sort_by_revenue(rollups: &mut [CategoryRollup], sort_order: SortOrder) {
        rollups.sort_by(|a, b| {
            let ordering = a.revenue.total_cmp(&b.revenue);
            match sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rollup(category: &str, revenue: f64) -> CategoryRollup {
        CategoryRollup {
            category: category.to_string(),
            revenue,
            subcategories: Vec::new(),
        }
    }

    #[test]
    fn test_sort_ascending_and_descending() {
        let mut rollups = vec![rollup("b", 20.0), rollup("a", 5.0), rollup("c", 10.0)];

        CategoryService::sort_by_revenue(&mut rollups, SortOrder::Asc);
        let asc: Vec<f64> = rollups.iter().map(|r| r.revenue).collect();
        assert_eq!(asc, vec![5.0, 10.0, 20.0]);

        CategoryService::sort_by_revenue(&mut rollups, SortOrder::Desc);
        let desc: Vec<f64> = rollups.iter().map(|r| r.revenue).collect();
        assert_eq!(desc, vec![20.0, 10.0, 5.0]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_revenue() {
        let mut rollups = vec![rollup("first", 10.0), rollup("second", 10.0)];

        CategoryService::sort_by_revenue(&mut rollups, SortOrder::Asc);
        assert_eq!(rollups[0].category, "first");

        CategoryService::sort_by_revenue(&mut rollups, SortOrder::Asc);
        assert_eq!(rollups[0].category, "first");
    }
}
