//! Category rollup commands

use crate::analytics::CategoryRollup;
use crate::api::types::SortOrder;
use crate::error::Result;
use crate::services::CategoryService;
use crate::state::AppState;
use tauri::State;

/// Get categories rolled up by revenue
#[tauri::command]
pub async fn get_top_categories(
    state: State<'_, AppState>,
    sort_order: Option<SortOrder>,
) -> Result<Vec<CategoryRollup>> {
    state.require_session()?;

    let ticket = state.requests.begin("categories");
    let rollups =
        CategoryService::top_categories(&state, sort_order.unwrap_or(SortOrder::Asc)).await?;
    state.requests.ensure_current(&ticket)?;

    Ok(rollups)
}
