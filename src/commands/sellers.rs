//! Seller listing commands

use crate::error::Result;
use crate::services::seller_service::{SellerListRequest, SellerPage};
use crate::services::SellerService;
use crate::state::AppState;
use tauri::State;

/// Get one page of sellers through the client-side pipeline
#[tauri::command]
pub async fn get_top_sellers(
    state: State<'_, AppState>,
    request: SellerListRequest,
) -> Result<SellerPage> {
    state.require_session()?;

    let ticket = state.requests.begin("sellers");
    let page = SellerService::top_sellers(&state, request).await?;
    state.requests.ensure_current(&ticket)?;

    Ok(page)
}
