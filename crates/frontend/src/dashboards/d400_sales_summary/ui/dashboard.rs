use crate::dashboards::d400_sales_summary::chart::ChartSlot;
use crate::dashboards::d400_sales_summary::chartjs::ChartJsSurface;
use crate::dashboards::d400_sales_summary::controller::{
    ControllerSettings, DashboardController, DashboardDeps,
};
use crate::dashboards::d400_sales_summary::query::ReportOptions;
use crate::shared::api_utils::api_base;
use crate::shared::config::config;
use crate::shared::date_utils::file_option_label;
use crate::shared::http::GlooTransport;
use crate::shared::notify::BrowserNotifier;
use crate::shared::theme::{use_theme, ThemeToggle};
use crate::system::auth::provider::LocalStorageAuth;
use crate::system::navigation::BrowserNavigator;
use contracts::dashboards::d400_sales_summary::{FileItem, ReportType};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;
use thaw::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlInputElement;

type Controller = Rc<DashboardController<ChartJsSurface>>;

async fn read_file_bytes(file: &web_sys::File) -> Result<Vec<u8>, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Failed to read file: {:?}", e))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// Sales summary dashboard: file registry, upload, report parameters and charts
#[component]
pub fn SalesSummaryDashboard() -> impl IntoView {
    let theme = use_theme();
    let settings =
        ControllerSettings::from_config(config(), api_base(), theme.dark_mode.get_untracked());
    let deps = DashboardDeps {
        transport: Rc::new(GlooTransport),
        auth: Rc::new(LocalStorageAuth),
        navigator: Rc::new(BrowserNavigator),
        notifier: Rc::new(BrowserNotifier),
    };
    let controller: Controller =
        Rc::new(DashboardController::new(deps, ChartJsSurface, settings));
    let messages = controller.messages().clone();

    // Mirror of the controller state for the view
    let state = RwSignal::new(controller.snapshot());
    controller.set_observer(move |s| state.set(s.clone()));
    let ctrl = StoredValue::new_local(controller);

    // Session gate + file registry, once on mount
    Effect::new(move |_| {
        let controller = ctrl.get_value();
        spawn_local(async move {
            controller.activate().await;
        });
    });

    // Redraw charts with the new palette when the theme flips
    Effect::new(move |prev: Option<bool>| {
        let dark = theme.dark_mode.get();
        if prev.is_some() {
            ctrl.get_value().set_dark_mode(dark);
        }
        dark
    });

    let on_file_change = move |ev: web_sys::Event| {
        let input = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok());
        let Some(input) = input else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        // Allow picking the same file again
        input.set_value("");

        let controller = ctrl.get_value();
        spawn_local(async move {
            match read_file_bytes(&file).await {
                Ok(bytes) => {
                    let _ = controller.upload(bytes, &file.name()).await;
                }
                Err(e) => controller.report_unreadable_file(&file.name(), &e),
            }
        });
    };

    let on_select_file = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        ctrl.get_value()
            .select_file(if value.is_empty() { None } else { Some(value) });
    };

    let on_select_report = move |ev: web_sys::Event| {
        if let Some(report_type) = ReportType::parse(&event_target_value(&ev)) {
            ctrl.get_value().select_report_type(report_type);
        }
    };

    let update_options = move |f: &dyn Fn(&mut ReportOptions)| {
        let mut options = state.with_untracked(|s| s.options.clone());
        f(&mut options);
        ctrl.get_value().set_options(options);
    };

    let on_product_filter = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        update_options(&|o| o.product_filter = Some(value.clone()));
    };

    let on_forecast_periods = move |ev: web_sys::Event| {
        let periods = event_target_value(&ev).trim().parse::<u32>().ok();
        update_options(&|o| o.forecast_periods = periods);
    };

    let on_include_forecast = move |ev: web_sys::Event| {
        let checked = event_target_checked(&ev);
        update_options(&|o| o.include_forecast = Some(checked));
    };

    let on_forecast_quantity = move |ev: web_sys::Event| {
        let checked = event_target_checked(&ev);
        update_options(&|o| o.forecast_quantity = Some(checked));
    };

    let fetch = move |_: leptos::ev::MouseEvent| {
        let controller = ctrl.get_value();
        let report_type = state.with_untracked(|s| s.report_type);
        spawn_local(async move {
            let _ = controller.fetch_summary(report_type).await;
        });
    };

    let title = messages.title.clone();
    let upload_label = messages.upload_label.clone();
    let placeholder = messages.select_file_placeholder.clone();
    let product_filter_label = messages.product_filter_label.clone();
    let fetch_label = messages.fetch_button.clone();
    let forecast_periods_label = messages.forecast_periods_label.clone();
    let include_forecast_label = messages.include_forecast_label.clone();
    let forecast_quantity_label = messages.forecast_quantity_label.clone();
    let loading_label = StoredValue::new(messages.loading.clone());
    let dark_label = messages.dark_mode.clone();
    let light_label = messages.light_mode.clone();
    let report_options = ReportType::all()
        .into_iter()
        .map(|rt| (rt.as_str(), messages.report_label(rt).to_string()))
        .collect::<Vec<_>>();

    view! {
        <div id="d400_sales_summary--dashboard" class="d400-dashboard">
            <div class="d400-header">
                <h2>{title}</h2>
                <ThemeToggle dark_label=dark_label light_label=light_label />
            </div>

            <div class="d400-controls">
                <label class="d400-upload">
                    {upload_label}
                    <input type="file" accept=".csv,.xlsx,.xls" on:change=on_file_change />
                </label>

                <select
                    class="d400-file-select"
                    on:change=on_select_file
                    prop:value=move || state.with(|s| s.selected_file.clone().unwrap_or_default())
                >
                    <option value="">{placeholder}</option>
                    <For
                        each=move || state.with(|s| s.files.clone())
                        key=|file: &FileItem| file.id.clone()
                        children=move |file: FileItem| {
                            let label = file_option_label(&file.filename, file.upload_timestamp.as_deref());
                            view! { <option value={file.id.clone()}>{label}</option> }
                        }
                    />
                </select>

                <select
                    class="d400-report-select"
                    on:change=on_select_report
                    prop:value=move || state.with(|s| s.report_type.as_str().to_string())
                >
                    {report_options
                        .into_iter()
                        .map(|(value, label)| view! { <option value=value>{label}</option> })
                        .collect_view()}
                </select>

                <input
                    type="text"
                    class="d400-product-filter"
                    placeholder=product_filter_label
                    on:change=on_product_filter
                />
                <input
                    type="number"
                    min="1"
                    class="d400-forecast-periods"
                    placeholder=forecast_periods_label
                    on:change=on_forecast_periods
                />
                <label class="d400-option">
                    <input type="checkbox" on:change=on_include_forecast />
                    {include_forecast_label}
                </label>
                <label class="d400-option">
                    <input type="checkbox" on:change=on_forecast_quantity />
                    {forecast_quantity_label}
                </label>

                <Button appearance=ButtonAppearance::Primary on_click=fetch>
                    {fetch_label}
                </Button>

                <Show when=move || state.with(|s| s.is_loading())>
                    <Space gap=SpaceGap::Small>
                        <Spinner />
                        <span>{move || loading_label.get_value()}</span>
                    </Space>
                </Show>
            </div>

            <div class="d400-charts">
                <div class="d400-chart">
                    <canvas id={ChartSlot::Sales.canvas_id()}></canvas>
                </div>
                <div class="d400-chart">
                    <canvas id={ChartSlot::Forecast.canvas_id()}></canvas>
                </div>
            </div>
        </div>
    }
}
