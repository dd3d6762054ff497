//! Trend Service
//!
//! Sales-trend series with outlier capping for chart scale and
//! first-vs-last percentage deltas for the stat cards.

use crate::analytics::{cap_outliers, percentage_change, TrendDelta};
use crate::api::types::TrendPoint;
use crate::error::Result;
use crate::state::AppState;
use serde::Serialize;
use tracing::info;

/// Percentile at which total_sales spikes are capped
const CAP_PERCENTILE: f64 = 85.0;

/// Chart-ready trend series plus precomputed deltas
#[derive(Debug, Clone, Serialize)]
pub struct TrendReport {
    pub points: Vec<TrendPoint>,
    pub sales_change: Option<TrendDelta>,
    pub orders_change: Option<TrendDelta>,
}

/// Trend service for the sales-trend view
pub struct TrendService;

impl TrendService {
    /// Fetch the trend series and shape it for display
    pub async fn report(state: &AppState) -> Result<TrendReport> {
        info!("TrendService::report");

        let raw = state.api.sales_trend().await?;
        Ok(Self::build_report(raw))
    }

    fn build_report(raw: Vec<TrendPoint>) -> TrendReport {
        let points = cap_outliers(
            &raw,
            |p| p.total_sales,
            |p, v| p.total_sales = v,
            CAP_PERCENTILE,
        );

        let (sales_change, orders_change) = match (points.first(), points.last()) {
            (Some(first), Some(last)) if points.len() > 1 => (
                Some(percentage_change(first.total_sales, last.total_sales)),
                Some(percentage_change(first.total_orders, last.total_orders)),
            ),
            _ => (None, None),
        };

        TrendReport {
            points,
            sales_change,
            orders_change,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(date: &str, sales: f64, orders: f64) -> TrendPoint {
        TrendPoint {
            date: date.to_string(),
            total_sales: sales,
            total_orders: orders,
            unique_products: 0,
        }
    }

    #[test]
    fn test_report_caps_sales_and_computes_deltas() {
        let raw = vec![
            point("2024-01-01", 15000.0, 100.0),
            point("2024-01-02", 16000.0, 110.0),
            point("2024-01-03", 17000.0, 120.0),
            point("2024-01-04", 18000.0, 130.0),
            point("2024-01-05", 20000.0, 150.0),
        ];

        let report = TrendService::build_report(raw);

        // floor(85/100 * 5) = 4 -> threshold is the series maximum
        assert_eq!(report.points[4].total_sales, 20000.0);

        let sales = report.sales_change.unwrap();
        assert_eq!(sales.formatted, "33.33%");
        assert!(sales.positive);

        let orders = report.orders_change.unwrap();
        assert_eq!(orders.formatted, "50.00%");
    }

    #[test]
    fn test_report_negative_delta() {
        let raw = vec![point("a", 20000.0, 10.0), point("b", 15000.0, 5.0)];
        let report = TrendService::build_report(raw);

        let sales = report.sales_change.unwrap();
        assert_eq!(sales.formatted, "-25.00%");
        assert!(!sales.positive);
    }

    #[test]
    fn test_short_series_reports_no_change() {
        let report = TrendService::build_report(vec![point("a", 100.0, 1.0)]);
        assert!(report.sales_change.is_none());
        assert!(report.orders_change.is_none());

        let empty = TrendService::build_report(Vec::new());
        assert!(empty.points.is_empty());
        assert!(empty.sales_change.is_none());
    }
}
