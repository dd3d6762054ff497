//! Sales trend commands

use crate::error::Result;
use crate::services::trend_service::TrendReport;
use crate::services::TrendService;
use crate::state::AppState;
use tauri::State;

/// Get the capped trend series and its percentage deltas
#[tauri::command]
pub async fn get_sales_trend(state: State<'_, AppState>) -> Result<TrendReport> {
    state.require_session()?;

    let ticket = state.requests.begin("trend");
    let report = TrendService::report(&state).await?;
    state.requests.ensure_current(&ticket)?;

    Ok(report)
}
