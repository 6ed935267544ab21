//! Chart presenter
//!
//! Turns a [`DashboardSummary`] into declarative chart configs (Chart.js
//! shape) and keeps exactly one live chart per slot on a [`ChartSurface`].

use contracts::dashboards::d400_sales_summary::{DashboardSummary, ReportType};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Fixed UI region holding at most one chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChartSlot {
    Sales,
    Forecast,
}

impl ChartSlot {
    /// DOM id of the canvas bound to this slot
    pub fn canvas_id(&self) -> &'static str {
        match self {
            ChartSlot::Sales => "d400-sales-chart",
            ChartSlot::Forecast => "d400-forecast-chart",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub background_color: String,
    pub border_color: String,
    pub border_width: u32,
    pub fill: bool,
    pub tension: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisColors {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub begin_at_zero: bool,
    pub ticks: AxisColors,
    pub grid: AxisColors,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub x: Axis,
    pub y: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendLabels {
    pub labels: AxisColors,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: LegendLabels,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub scales: Scales,
    pub plugins: Plugins,
}

/// Declarative chart configuration handed to the drawing surface
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

impl ChartConfig {
    pub fn labels(&self) -> &[String] {
        &self.data.labels
    }

    /// Values of the first dataset
    pub fn values(&self) -> &[f64] {
        self.data
            .datasets
            .first()
            .map(|d| d.data.as_slice())
            .unwrap_or(&[])
    }
}

/// Colors following the light/dark mode
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPalette {
    pub text: String,
    pub grid: String,
    pub sales_fill: String,
    pub sales_border: String,
    pub forecast_border: String,
}

impl ChartPalette {
    pub fn for_mode(dark: bool) -> Self {
        if dark {
            Self {
                text: "#e5e7eb".into(),
                grid: "rgba(255, 255, 255, 0.1)".into(),
                sales_fill: "rgba(96, 165, 250, 0.6)".into(),
                sales_border: "rgb(96, 165, 250)".into(),
                forecast_border: "rgb(251, 146, 60)".into(),
            }
        } else {
            Self {
                text: "#374151".into(),
                grid: "rgba(0, 0, 0, 0.1)".into(),
                sales_fill: "rgba(54, 162, 235, 0.5)".into(),
                sales_border: "rgb(54, 162, 235)".into(),
                forecast_border: "rgb(255, 99, 132)".into(),
            }
        }
    }
}

/// Legend texts for the two series
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesLabels {
    pub sales: String,
    pub forecast: String,
}

fn options(palette: &ChartPalette) -> ChartOptions {
    let axis = || Axis {
        begin_at_zero: true,
        ticks: AxisColors {
            color: palette.text.clone(),
        },
        grid: AxisColors {
            color: palette.grid.clone(),
        },
    };
    ChartOptions {
        responsive: true,
        maintain_aspect_ratio: false,
        scales: Scales { x: axis(), y: axis() },
        plugins: Plugins {
            legend: LegendLabels {
                labels: AxisColors {
                    color: palette.text.clone(),
                },
            },
        },
    }
}

/// Labels and values of the categorical chart for a report type.
/// `None` when the summary has no matching section.
pub fn categorical_series(
    summary: &DashboardSummary,
    report_type: ReportType,
) -> Option<(Vec<String>, Vec<f64>)> {
    match report_type {
        ReportType::Daily | ReportType::Monthly | ReportType::Yearly => {
            let rows = summary.sales_for(report_type)?;
            Some((
                rows.iter().map(|r| r.date.clone()).collect(),
                rows.iter().map(|r| r.total_sales).collect(),
            ))
        }
        ReportType::TopProducts => {
            let rows = summary.top_products()?;
            Some((
                rows.iter().map(|r| r.product.clone()).collect(),
                rows.iter().map(|r| r.revenue).collect(),
            ))
        }
        ReportType::All => [ReportType::Daily, ReportType::Monthly, ReportType::Yearly]
            .into_iter()
            .find_map(|rt| categorical_series(summary, rt)),
        ReportType::Forecast => None,
    }
}

pub fn sales_chart_config(
    summary: &DashboardSummary,
    report_type: ReportType,
    palette: &ChartPalette,
    labels: &SeriesLabels,
) -> Option<ChartConfig> {
    let (categories, values) = categorical_series(summary, report_type)?;
    Some(ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: categories,
            datasets: vec![Dataset {
                label: labels.sales.clone(),
                data: values,
                background_color: palette.sales_fill.clone(),
                border_color: palette.sales_border.clone(),
                border_width: 1,
                fill: true,
                tension: 0.0,
            }],
        },
        options: options(palette),
    })
}

/// Forecast line chart, independent of the report type
pub fn forecast_chart_config(
    summary: &DashboardSummary,
    palette: &ChartPalette,
    labels: &SeriesLabels,
) -> Option<ChartConfig> {
    let forecast = summary.forecast()?;
    let (dates, values): (Vec<String>, Vec<f64>) = forecast
        .points()
        .map(|(date, value)| (date.to_string(), value))
        .unzip();
    if dates.len() != forecast.dates.len() || values.len() != forecast.sales.len() {
        log::warn!(
            "Forecast series length mismatch: {} dates, {} values",
            forecast.dates.len(),
            forecast.sales.len()
        );
    }
    Some(ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels: dates,
            datasets: vec![Dataset {
                label: labels.forecast.clone(),
                data: values,
                background_color: "transparent".into(),
                border_color: palette.forecast_border.clone(),
                border_width: 2,
                fill: false,
                tension: 0.1,
            }],
        },
        options: options(palette),
    })
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("drawing surface for {0:?} not found")]
    SurfaceMissing(ChartSlot),
    #[error("chart library unavailable: {0}")]
    Library(String),
}

/// Drawing backend. Handles are opaque and must be destroyed before a slot is redrawn.
pub trait ChartSurface {
    type Handle;

    fn create(&mut self, slot: ChartSlot, config: &ChartConfig) -> Result<Self::Handle, ChartError>;

    fn destroy(&mut self, handle: Self::Handle);
}

pub struct ChartPresenter<S: ChartSurface> {
    surface: S,
    handles: BTreeMap<ChartSlot, S::Handle>,
    palette: ChartPalette,
    labels: SeriesLabels,
}

impl<S: ChartSurface> ChartPresenter<S> {
    pub fn new(surface: S, labels: SeriesLabels, dark_mode: bool) -> Self {
        Self {
            surface,
            handles: BTreeMap::new(),
            palette: ChartPalette::for_mode(dark_mode),
            labels,
        }
    }

    pub fn set_dark_mode(&mut self, dark: bool) {
        self.palette = ChartPalette::for_mode(dark);
    }

    /// Destroy every live chart. Safe to call when nothing is drawn.
    pub fn clear(&mut self) {
        for (_, handle) in std::mem::take(&mut self.handles) {
            self.surface.destroy(handle);
        }
    }

    pub fn is_drawn(&self, slot: ChartSlot) -> bool {
        self.handles.contains_key(&slot)
    }

    /// Redraw both slots from scratch
    pub fn render(&mut self, summary: &DashboardSummary, report_type: ReportType) {
        self.clear();

        let sales = sales_chart_config(summary, report_type, &self.palette, &self.labels);
        let forecast = forecast_chart_config(summary, &self.palette, &self.labels);

        for (slot, config) in [(ChartSlot::Sales, sales), (ChartSlot::Forecast, forecast)] {
            let Some(config) = config else {
                log::debug!("No data for {:?} chart", slot);
                continue;
            };
            match self.surface.create(slot, &config) {
                Ok(handle) => {
                    self.handles.insert(slot, handle);
                }
                Err(e) => log::error!("Failed to draw {:?} chart: {}", slot, e),
            }
        }
    }
}

impl<S: ChartSurface> Drop for ChartPresenter<S> {
    fn drop(&mut self) {
        self.clear();
    }
}
