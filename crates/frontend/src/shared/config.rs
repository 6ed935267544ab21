//! Application configuration
//!
//! The config is embedded at build time. The only external knob is the
//! `SALES_DASHBOARD_API_BASE` build variable which overrides `api.base_url`.

use contracts::dashboards::d400_sales_summary::ReportType;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    /// Per-key overrides of the localized messages
    #[serde(default)]
    pub messages: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ApiConfig {
    /// Empty means "same host as the page, port 3000"
    #[serde(default)]
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    #[serde(default)]
    pub locale: Locale,
    #[serde(default = "default_login_route")]
    pub login_route: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            login_route: default_login_route(),
        }
    }
}

fn default_login_route() -> String {
    "/login".to_string()
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Th,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = ""

[ui]
locale = "en"
login_route = "/login"
"#;

/// Parse a TOML config and apply the build-time API base override
pub fn parse_config(contents: &str, api_base_override: Option<&str>) -> anyhow::Result<AppConfig> {
    let mut config: AppConfig = toml::from_str(contents)?;
    if let Some(base) = api_base_override.map(str::trim).filter(|b| !b.is_empty()) {
        config.api.base_url = base.trim_end_matches('/').to_string();
    }
    Ok(config)
}

/// Load the embedded configuration
pub fn load_config() -> anyhow::Result<AppConfig> {
    let override_base = option_env!("SALES_DASHBOARD_API_BASE");
    if let Some(base) = override_base {
        log::info!("API base overridden at build time: {}", base);
    }
    parse_config(DEFAULT_CONFIG, override_base)
}

static CONFIG: Lazy<AppConfig> = Lazy::new(|| match load_config() {
    Ok(config) => config,
    Err(e) => {
        log::error!("Invalid embedded configuration, using defaults: {}", e);
        AppConfig {
            api: ApiConfig::default(),
            ui: UiConfig::default(),
            messages: BTreeMap::new(),
        }
    }
});

pub fn config() -> &'static AppConfig {
    &CONFIG
}

/// User-facing strings. The default table is English; Thai is the
/// language the dashboard was first shipped in.
#[derive(Debug, Clone, PartialEq)]
pub struct Messages {
    pub title: String,
    pub no_file_selected: String,
    pub network_error: String,
    pub server_error_fallback: String,
    pub upload_error_fallback: String,
    pub upload_label: String,
    pub select_file_placeholder: String,
    pub fetch_button: String,
    pub product_filter_label: String,
    pub forecast_periods_label: String,
    pub include_forecast_label: String,
    pub forecast_quantity_label: String,
    pub loading: String,
    pub sales_series_label: String,
    pub forecast_series_label: String,
    pub dark_mode: String,
    pub light_mode: String,
    pub report_daily: String,
    pub report_monthly: String,
    pub report_yearly: String,
    pub report_top_products: String,
    pub report_forecast: String,
    pub report_all: String,
}

impl Messages {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::En => Self {
                title: "Sales Dashboard".into(),
                no_file_selected: "Please select a file first".into(),
                network_error: "Network error occurred".into(),
                server_error_fallback: "Error fetching dashboard data. Please try again.".into(),
                upload_error_fallback: "Error uploading file. Please try again.".into(),
                upload_label: "Upload file".into(),
                select_file_placeholder: "-- Select a file --".into(),
                fetch_button: "Load report".into(),
                product_filter_label: "Product filter".into(),
                forecast_periods_label: "Forecast periods".into(),
                include_forecast_label: "Include forecast".into(),
                forecast_quantity_label: "Forecast quantity".into(),
                loading: "Loading...".into(),
                sales_series_label: "Total Sales".into(),
                forecast_series_label: "Forecast Sales".into(),
                dark_mode: "Dark mode".into(),
                light_mode: "Light mode".into(),
                report_daily: "Daily".into(),
                report_monthly: "Monthly".into(),
                report_yearly: "Yearly".into(),
                report_top_products: "Top products".into(),
                report_forecast: "Forecast".into(),
                report_all: "All".into(),
            },
            Locale::Th => Self {
                title: "แดชบอร์ดยอดขาย".into(),
                no_file_selected: "กรุณาเลือกไฟล์ก่อน".into(),
                network_error: "เกิดข้อผิดพลาดด้านเครือข่าย".into(),
                server_error_fallback: "เกิดข้อผิดพลาดในการดึงข้อมูล กรุณาลองใหม่อีกครั้ง".into(),
                upload_error_fallback: "เกิดข้อผิดพลาดในการอัปโหลดไฟล์ กรุณาลองใหม่อีกครั้ง".into(),
                upload_label: "อัปโหลดไฟล์".into(),
                select_file_placeholder: "-- เลือกไฟล์ --".into(),
                fetch_button: "ดึงรายงาน".into(),
                product_filter_label: "กรองสินค้า".into(),
                forecast_periods_label: "จำนวนงวดพยากรณ์".into(),
                include_forecast_label: "รวมการพยากรณ์".into(),
                forecast_quantity_label: "พยากรณ์จำนวนสินค้า".into(),
                loading: "กำลังโหลด...".into(),
                sales_series_label: "ยอดขายรวม".into(),
                forecast_series_label: "ยอดขายที่คาดการณ์".into(),
                dark_mode: "โหมดมืด".into(),
                light_mode: "โหมดสว่าง".into(),
                report_daily: "รายวัน".into(),
                report_monthly: "รายเดือน".into(),
                report_yearly: "รายปี".into(),
                report_top_products: "สินค้าขายดี".into(),
                report_forecast: "พยากรณ์".into(),
                report_all: "ทั้งหมด".into(),
            },
        }
    }

    /// Apply `[messages]` overrides; unknown keys are logged and ignored
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, String>) -> Self {
        for (key, value) in overrides {
            let slot = match key.as_str() {
                "title" => &mut self.title,
                "no_file_selected" => &mut self.no_file_selected,
                "network_error" => &mut self.network_error,
                "server_error_fallback" => &mut self.server_error_fallback,
                "upload_error_fallback" => &mut self.upload_error_fallback,
                "upload_label" => &mut self.upload_label,
                "select_file_placeholder" => &mut self.select_file_placeholder,
                "fetch_button" => &mut self.fetch_button,
                "product_filter_label" => &mut self.product_filter_label,
                "forecast_periods_label" => &mut self.forecast_periods_label,
                "include_forecast_label" => &mut self.include_forecast_label,
                "forecast_quantity_label" => &mut self.forecast_quantity_label,
                "loading" => &mut self.loading,
                "sales_series_label" => &mut self.sales_series_label,
                "forecast_series_label" => &mut self.forecast_series_label,
                "dark_mode" => &mut self.dark_mode,
                "light_mode" => &mut self.light_mode,
                "report_daily" => &mut self.report_daily,
                "report_monthly" => &mut self.report_monthly,
                "report_yearly" => &mut self.report_yearly,
                "report_top_products" => &mut self.report_top_products,
                "report_forecast" => &mut self.report_forecast,
                "report_all" => &mut self.report_all,
                other => {
                    log::warn!("Unknown message key in config: {}", other);
                    continue;
                }
            };
            *slot = value.clone();
        }
        self
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::for_locale(config.ui.locale).with_overrides(&config.messages)
    }

    pub fn report_label(&self, report_type: ReportType) -> &str {
        match report_type {
            ReportType::Daily => &self.report_daily,
            ReportType::Monthly => &self.report_monthly,
            ReportType::Yearly => &self.report_yearly,
            ReportType::TopProducts => &self.report_top_products,
            ReportType::Forecast => &self.report_forecast,
            ReportType::All => &self.report_all,
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::for_locale(Locale::En)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG, None).unwrap();
        assert_eq!(config.api.base_url, "");
        assert_eq!(config.ui.locale, Locale::En);
        assert_eq!(config.ui.login_route, "/login");
        assert!(config.messages.is_empty());
    }

    #[test]
    fn test_api_base_override() {
        let config = parse_config(DEFAULT_CONFIG, Some("https://api.example.com/")).unwrap();
        assert_eq!(config.api.base_url, "https://api.example.com");

        let config = parse_config(DEFAULT_CONFIG, Some("  ")).unwrap();
        assert_eq!(config.api.base_url, "");
    }

    #[test]
    fn test_thai_locale_with_override() {
        let config = parse_config(
            r#"
            [api]
            base_url = "http://localhost:8000"

            [ui]
            locale = "th"

            [messages]
            network_error = "offline"
            not_a_key = "ignored"
            "#,
            None,
        )
        .unwrap();
        let messages = Messages::from_config(&config);
        assert_eq!(messages.network_error, "offline");
        assert_eq!(messages.no_file_selected, "กรุณาเลือกไฟล์ก่อน");
        assert_eq!(config.ui.login_route, "/login");
    }

    #[test]
    fn test_missing_api_table_is_an_error() {
        assert!(parse_config("[ui]\nlocale = \"en\"\n", None).is_err());
    }
}
