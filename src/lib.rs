//! MarketPulse Desktop - Marketplace Analytics Dashboard
//!
//! A desktop dashboard over pre-aggregated marketplace metrics (summary
//! KPIs, product listings, sales trends, category rollups, seller
//! rankings) fetched from a remote aggregation API, gated behind an
//! external auth provider.

pub mod analytics;
pub mod api;
pub mod auth;
pub mod commands;
pub mod config;
pub mod error;
pub mod requests;
pub mod services;
pub mod session;
pub mod state;

use config::AppConfig;
use state::AppState;
use tauri::Manager;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize and run the Tauri application
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marketpulse_desktop=debug,tauri=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting MarketPulse Desktop...");

    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .setup(|app| {
            // Initialize application state
            let app_state = AppState::new(AppConfig::from_env())?;

            // No stored provider session exists at startup; resolve so the
            // route guard leaves its pending state
            app_state.resolve_session();

            app.manage(app_state);

            tracing::info!("Application state initialized");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Auth commands
            commands::auth::sign_up,
            commands::auth::login,
            commands::auth::google_login,
            commands::auth::logout,
            commands::auth::reset_password,
            commands::auth::confirm_password_reset,
            commands::auth::update_profile,
            commands::auth::update_password,
            commands::auth::check_session,
            commands::auth::get_current_user,
            commands::auth::guard_route,
            // Summary commands
            commands::summary::get_summary,
            // Product commands
            commands::products::get_top_products,
            // Category commands
            commands::categories::get_top_categories,
            // Seller commands
            commands::sellers::get_top_sellers,
            // Trend commands
            commands::trend::get_sales_trend,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
