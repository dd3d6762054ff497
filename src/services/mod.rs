//! Business services called by the Tauri commands

pub mod category_service;
pub mod product_service;
pub mod seller_service;
pub mod summary_service;
pub mod trend_service;

pub use category_service::CategoryService;
pub use product_service::ProductService;
pub use seller_service::SellerService;
pub use summary_service::SummaryService;
pub use trend_service::TrendService;
