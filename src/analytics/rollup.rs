//! Category rollup
//!
//! Regroups flat category-detail records into a two-level hierarchy with
//! summed revenue. The detail path is pipe-delimited ("Main|Fashion|T-shirts");
//! the second segment groups, the third labels the subcategory.

use crate::api::types::CategoryRecord;
use serde::Serialize;
use std::collections::HashMap;

/// Bucket for records whose detail path has fewer than two segments
pub const UNCATEGORIZED: &str = "Uncategorized";

/// One aggregated category with its revenue sum and subcategory labels
#[derive(Debug, Clone, Serialize)]
pub struct CategoryRollup {
    pub category: String,
    pub revenue: f64,
    pub subcategories: Vec<String>,
}

/// Roll flat category records up by the second path segment.
///
/// Output order is first-sighting order of each category key; callers are
/// responsible for any subsequent sort. Subcategory labels deduplicate,
/// preserving first-sighting order. Records without a second segment land
/// in the [`UNCATEGORIZED`] bucket so no revenue is dropped.
pub fn rollup_categories(records: &[CategoryRecord]) -> Vec<CategoryRollup> {
    let mut rollups: Vec<CategoryRollup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let segments: Vec<&str> = record
            .item_category_detail
            .split('|')
            .map(str::trim)
            .collect();

        let category = segments.get(1).copied().unwrap_or(UNCATEGORIZED);
        let subcategory = segments.get(2).copied();

        let slot = *index.entry(category.to_string()).or_insert_with(|| {
            rollups.push(CategoryRollup {
                category: category.to_string(),
                revenue: 0.0,
                subcategories: Vec::new(),
            });
            rollups.len() - 1
        });

        let entry = &mut rollups[slot];
        entry.revenue += record.revenue;

        if let Some(label) = subcategory {
            if !entry.subcategories.iter().any(|s| s == label) {
                entry.subcategories.push(label.to_string());
            }
        }
    }

    rollups
}
