//! Tauri command handlers

pub mod auth;
pub mod categories;
pub mod products;
pub mod sellers;
pub mod summary;
pub mod trend;
