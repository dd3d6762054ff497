//! Product listing commands

use crate::error::Result;
use crate::services::product_service::{ProductFilter, ProductPage};
use crate::services::ProductService;
use crate::state::AppState;
use tauri::State;

/// Get one page of filtered, sorted products
#[tauri::command]
pub async fn get_top_products(
    state: State<'_, AppState>,
    filter: ProductFilter,
) -> Result<ProductPage> {
    state.require_session()?;

    let ticket = state.requests.begin("products");
    let page = ProductService::top_products(&state, filter).await?;
    state.requests.ensure_current(&ticket)?;

    Ok(page)
}
