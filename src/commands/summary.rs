//! Summary commands

use crate::api::types::{DateRange, SummaryMetrics};
use crate::error::Result;
use crate::services::SummaryService;
use crate::state::AppState;
use tauri::State;

/// Get headline metrics for an optional date window
#[tauri::command]
pub async fn get_summary(
    state: State<'_, AppState>,
    range: Option<DateRange>,
) -> Result<SummaryMetrics> {
    state.require_session()?;

    let ticket = state.requests.begin("summary");
    let metrics = SummaryService::metrics(&state, range.unwrap_or_default()).await?;
    state.requests.ensure_current(&ticket)?;

    Ok(metrics)
}
