use super::dto::{
    ForecastSeries, ReportType, SalesRecord, TopProduct, DAILY_SALES, FORECAST, MONTHLY_SALES,
    TOP_PRODUCTS, YEARLY_SALES,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Payload of one summary section
#[derive(Debug, Clone, PartialEq)]
pub enum SummarySection {
    Sales(Vec<SalesRecord>),
    Forecast(ForecastSeries),
    TopProducts(Vec<TopProduct>),
    /// Section this client does not understand, kept verbatim
    Other(Value),
}

/// Response of `GET /dashboard/summary/`.
///
/// The backend only includes the sections that were requested, so the summary
/// is a map from section name to payload. A missing section is a normal state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Value>", into = "BTreeMap<String, Value>")]
pub struct DashboardSummary {
    sections: BTreeMap<String, SummarySection>,
}

impl DashboardSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_section(mut self, name: impl Into<String>, section: SummarySection) -> Self {
        self.sections.insert(name.into(), section);
        self
    }

    pub fn section(&self, name: &str) -> Option<&SummarySection> {
        self.sections.get(name)
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Sales rows of a named sales section
    pub fn sales(&self, name: &str) -> Option<&[SalesRecord]> {
        match self.sections.get(name)? {
            SummarySection::Sales(rows) => Some(rows),
            _ => None,
        }
    }

    /// Sales rows matching a report type (daily/monthly/yearly only)
    pub fn sales_for(&self, report_type: ReportType) -> Option<&[SalesRecord]> {
        self.sales(report_type.sales_section()?)
    }

    pub fn forecast(&self) -> Option<&ForecastSeries> {
        match self.sections.get(FORECAST)? {
            SummarySection::Forecast(series) => Some(series),
            _ => None,
        }
    }

    pub fn top_products(&self) -> Option<&[TopProduct]> {
        match self.sections.get(TOP_PRODUCTS)? {
            SummarySection::TopProducts(rows) => Some(rows),
            _ => None,
        }
    }
}

fn is_sales_section(name: &str) -> bool {
    matches!(name, DAILY_SALES | MONTHLY_SALES | YEARLY_SALES) || name.ends_with("_sales")
}

fn decode_section(name: &str, value: Value) -> SummarySection {
    let decoded = if is_sales_section(name) {
        serde_json::from_value::<Vec<SalesRecord>>(value.clone())
            .map(SummarySection::Sales)
            .ok()
    } else if name == FORECAST {
        serde_json::from_value::<ForecastSeries>(value.clone())
            .map(SummarySection::Forecast)
            .ok()
    } else if name == TOP_PRODUCTS {
        serde_json::from_value::<Vec<TopProduct>>(value.clone())
            .map(SummarySection::TopProducts)
            .ok()
    } else {
        None
    };
    decoded.unwrap_or(SummarySection::Other(value))
}

impl From<BTreeMap<String, Value>> for DashboardSummary {
    fn from(raw: BTreeMap<String, Value>) -> Self {
        let sections = raw
            .into_iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(name, value)| {
                let section = decode_section(&name, value);
                (name, section)
            })
            .collect();
        Self { sections }
    }
}

impl From<DashboardSummary> for BTreeMap<String, Value> {
    fn from(summary: DashboardSummary) -> Self {
        summary
            .sections
            .into_iter()
            .map(|(name, section)| {
                let value = match section {
                    SummarySection::Sales(rows) => serde_json::to_value(rows),
                    SummarySection::Forecast(series) => serde_json::to_value(series),
                    SummarySection::TopProducts(rows) => serde_json::to_value(rows),
                    SummarySection::Other(value) => Ok(value),
                };
                (name, value.unwrap_or(Value::Null))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_daily_section() {
        let summary: DashboardSummary = serde_json::from_str(
            r#"{"daily_sales":[{"Date":"2024-01-01","Total Sales":100}]}"#,
        )
        .unwrap();

        let rows = summary.sales_for(ReportType::Daily).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, "2024-01-01");
        assert_eq!(rows[0].total_sales, 100.0);
        assert_eq!(rows[0].growth_rate, None);
        assert!(summary.sales_for(ReportType::Monthly).is_none());
        assert!(summary.forecast().is_none());
    }

    #[test]
    fn test_decode_forecast_and_growth() {
        let summary: DashboardSummary = serde_json::from_str(
            r#"{
                "monthly_sales":[{"Date":"2024-01","Total Sales":10.5,"Growth Rate":0.25}],
                "forecast":{"dates":["2024-02","2024-03"],"sales":[11.0,12.0]}
            }"#,
        )
        .unwrap();

        assert_eq!(
            summary.sales_for(ReportType::Monthly).unwrap()[0].growth_rate,
            Some(0.25)
        );
        let forecast = summary.forecast().unwrap();
        let points: Vec<_> = forecast.points().collect();
        assert_eq!(points, vec![("2024-02", 11.0), ("2024-03", 12.0)]);
    }

    #[test]
    fn test_unknown_and_malformed_sections_are_kept() {
        let summary: DashboardSummary = serde_json::from_str(
            r#"{"yearly_sales":"not a list","insights":{"note":"x"},"daily_sales":null}"#,
        )
        .unwrap();

        assert!(summary.sales_for(ReportType::Yearly).is_none());
        assert!(matches!(
            summary.section("yearly_sales"),
            Some(SummarySection::Other(_))
        ));
        assert!(matches!(
            summary.section("insights"),
            Some(SummarySection::Other(_))
        ));
        assert!(summary.section("daily_sales").is_none());
    }

    #[test]
    fn test_top_products() {
        let summary: DashboardSummary = serde_json::from_str(
            r#"{"top_products":[{"product":"Bagel","quantity":3,"revenue":7.5}]}"#,
        )
        .unwrap();
        let top = summary.top_products().unwrap();
        assert_eq!(top[0].product, "Bagel");
        assert_eq!(top[0].revenue, 7.5);
    }
}
