use crate::shared::api_error::ApiError;
use crate::shared::config::Messages;
use contracts::dashboards::d400_sales_summary::{ReportType, SummaryQuery};

/// Optional summary parameters chosen in the UI. `None` means "not sent".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportOptions {
    pub product_filter: Option<String>,
    pub forecast_periods: Option<u32>,
    pub include_forecast: Option<bool>,
    pub forecast_quantity: Option<bool>,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Build the summary query for the current selection.
///
/// Fails with `Validation` before any request when no file is selected.
pub fn build_summary_query(
    selected_file: Option<&str>,
    report_type: ReportType,
    options: &ReportOptions,
    messages: &Messages,
) -> Result<SummaryQuery, ApiError> {
    let file_id = non_blank(selected_file)
        .ok_or_else(|| ApiError::Validation(messages.no_file_selected.clone()))?;

    Ok(SummaryQuery {
        file_id,
        report_type,
        product_filter: non_blank(options.product_filter.as_deref()),
        forecast_periods: options.forecast_periods.filter(|p| *p > 0),
        include_forecast: options.include_forecast,
        forecast_quantity: options.forecast_quantity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_selected_file() {
        let messages = Messages::default();
        for selected in [None, Some(""), Some("   ")] {
            let err = build_summary_query(
                selected,
                ReportType::Daily,
                &ReportOptions::default(),
                &messages,
            )
            .unwrap_err();
            assert_eq!(err, ApiError::Validation(messages.no_file_selected.clone()));
        }
    }

    #[test]
    fn test_blank_options_are_dropped() {
        let options = ReportOptions {
            product_filter: Some("  ".into()),
            forecast_periods: Some(0),
            include_forecast: None,
            forecast_quantity: None,
        };
        let query =
            build_summary_query(Some("f1"), ReportType::Monthly, &options, &Messages::default())
                .unwrap();
        assert_eq!(query.file_id, "f1");
        assert_eq!(query.report_type, ReportType::Monthly);
        assert_eq!(query.product_filter, None);
        assert_eq!(query.forecast_periods, None);
    }

    #[test]
    fn test_set_options_are_kept() {
        let options = ReportOptions {
            product_filter: Some(" Bagel ".into()),
            forecast_periods: Some(3),
            include_forecast: Some(true),
            forecast_quantity: Some(false),
        };
        let query =
            build_summary_query(Some("f1"), ReportType::All, &options, &Messages::default())
                .unwrap();
        assert_eq!(query.product_filter.as_deref(), Some("Bagel"));
        assert_eq!(query.forecast_periods, Some(3));
        assert_eq!(query.include_forecast, Some(true));
        assert_eq!(query.forecast_quantity, Some(false));
    }
}
