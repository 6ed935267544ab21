use crate::dashboards::SalesSummaryDashboard;
use crate::shared::theme::ThemeProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <ThemeProvider>
            <SalesSummaryDashboard />
        </ThemeProvider>
    }
}
