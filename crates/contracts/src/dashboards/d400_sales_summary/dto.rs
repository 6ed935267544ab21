use serde::{Deserialize, Serialize};

/// Report granularity requested from `/dashboard/summary/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    #[default]
    Daily,
    Monthly,
    Yearly,
    TopProducts,
    Forecast,
    All,
}

impl ReportType {
    /// Wire value used in the `report_type` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Daily => "daily",
            ReportType::Monthly => "monthly",
            ReportType::Yearly => "yearly",
            ReportType::TopProducts => "top_products",
            ReportType::Forecast => "forecast",
            ReportType::All => "all",
        }
    }

    /// Parse from the wire value, `None` for anything unknown
    pub fn parse(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|rt| rt.as_str() == s)
    }

    /// Summary section holding the sales series for this report type.
    /// Only the time-granular reports map onto a single section.
    pub fn sales_section(&self) -> Option<&'static str> {
        match self {
            ReportType::Daily => Some(DAILY_SALES),
            ReportType::Monthly => Some(MONTHLY_SALES),
            ReportType::Yearly => Some(YEARLY_SALES),
            _ => None,
        }
    }

    pub fn all() -> [ReportType; 6] {
        [
            ReportType::Daily,
            ReportType::Monthly,
            ReportType::Yearly,
            ReportType::TopProducts,
            ReportType::Forecast,
            ReportType::All,
        ]
    }
}

pub const DAILY_SALES: &str = "daily_sales";
pub const MONTHLY_SALES: &str = "monthly_sales";
pub const YEARLY_SALES: &str = "yearly_sales";
pub const TOP_PRODUCTS: &str = "top_products";
pub const FORECAST: &str = "forecast";

/// Previously uploaded dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileItem {
    pub id: String,
    pub filename: String,
    #[serde(alias = "upload_date", alias = "uploaded_at", default)]
    pub upload_timestamp: Option<String>,
}

/// Response of `GET /getfiles/`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileListResponse {
    #[serde(default)]
    pub files: Vec<FileItem>,
}

/// Response of `POST /upload/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub file_id: String,
}

/// One row of a daily/monthly/yearly sales section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    #[serde(rename = "Date", alias = "date")]
    pub date: String,
    #[serde(rename = "Total Sales", alias = "total_sales", alias = "sales")]
    pub total_sales: f64,
    #[serde(
        rename = "Growth Rate",
        alias = "growth_rate",
        alias = "growth",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub growth_rate: Option<f64>,
}

/// Forecast section: parallel `dates` / `sales` sequences
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastSeries {
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub sales: Vec<f64>,
}

impl ForecastSeries {
    /// Date/value pairs, truncated to the shorter sequence
    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.dates
            .iter()
            .map(String::as_str)
            .zip(self.sales.iter().copied())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopProduct {
    pub product: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub revenue: f64,
}

/// Query parameters of `GET /dashboard/summary/`.
/// Unset optional fields are skipped, never sent as empty values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryQuery {
    pub file_id: String,
    pub report_type: ReportType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast_periods: Option<u32>,
    /// "Include forecast" toggle; the backend names it `forecast_3`
    #[serde(rename = "forecast_3", skip_serializing_if = "Option::is_none")]
    pub include_forecast: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast_quantity: Option<bool>,
}

/// Error payload returned by the backend on non-2xx responses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ApiErrorBody {
    /// Server-supplied message: `message` first, then a string `detail`
    pub fn text(&self) -> Option<String> {
        if let Some(message) = self.message.as_deref().filter(|m| !m.trim().is_empty()) {
            return Some(message.to_string());
        }
        match &self.detail {
            Some(serde_json::Value::String(detail)) if !detail.trim().is_empty() => {
                Some(detail.clone())
            }
            _ => None,
        }
    }
}
