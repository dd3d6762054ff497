//! Summary Service
//!
//! Headline KPI cards for the landing page.

use crate::api::types::{DateRange, SummaryMetrics};
use crate::error::{AppError, Result};
use crate::state::AppState;
use chrono::NaiveDate;
use tracing::info;

/// Summary service for the key-metrics cards
pub struct SummaryService;

impl SummaryService {
    /// Fetch pre-aggregated summary metrics for an optional date window
    pub async fn metrics(state: &AppState, range: DateRange) -> Result<SummaryMetrics> {
        info!(
            "SummaryService::metrics - {:?}..{:?}",
            range.start_date, range.end_date
        );

        Self::validate_range(&range)?;
        state.api.summary(&range).await
    }

    fn validate_range(range: &DateRange) -> Result<()> {
        let start = range
            .start_date
            .as_deref()
            .map(Self::parse_date)
            .transpose()?;
        let end = range.end_date.as_deref().map(Self::parse_date).transpose()?;

        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(AppError::Validation(
                    "start_date must not be after end_date".to_string(),
                ));
            }
        }

        Ok(())
    }

    fn parse_date(value: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_err(|_| AppError::Validation(format!("invalid date '{}', expected YYYY-MM-DD", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: Option<&str>, end: Option<&str>) -> DateRange {
        DateRange {
            start_date: start.map(str::to_string),
            end_date: end.map(str::to_string),
        }
    }

    #[test]
    fn test_valid_ranges_pass() {
        assert!(SummaryService::validate_range(&range(None, None)).is_ok());
        assert!(SummaryService::validate_range(&range(Some("2024-01-01"), None)).is_ok());
        assert!(
            SummaryService::validate_range(&range(Some("2024-01-01"), Some("2024-02-01"))).is_ok()
        );
    }

    #[test]
    fn test_malformed_date_rejected() {
        let result = SummaryService::validate_range(&range(Some("01/02/2024"), None));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let result =
            SummaryService::validate_range(&range(Some("2024-02-01"), Some("2024-01-01")));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
