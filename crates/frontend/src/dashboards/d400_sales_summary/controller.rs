//! Dashboard controller
//!
//! Coordinates the session guard, file registry, upload, summary fetch and
//! chart presenter over one explicit [`DashboardState`]. Runs on the single UI
//! thread: state lives in a `RefCell` and no borrow is held across `.await`,
//! so overlapping operations spawned from the view are fine.

use super::api::DashboardApi;
use super::chart::{ChartPresenter, ChartSurface, SeriesLabels};
use super::query::{build_summary_query, ReportOptions};
use super::state::DashboardState;
use crate::shared::api_error::ApiError;
use crate::shared::config::{AppConfig, Messages};
use crate::shared::http::HttpTransport;
use crate::shared::notify::Notifier;
use crate::system::auth::guard::{guard_session, GuardOutcome};
use crate::system::auth::provider::AuthProvider;
use crate::system::navigation::Navigator;
use contracts::dashboards::d400_sales_summary::{ReportType, UploadResponse};
use std::cell::RefCell;
use std::rc::Rc;

/// External collaborators
#[derive(Clone)]
pub struct DashboardDeps {
    pub transport: Rc<dyn HttpTransport>,
    pub auth: Rc<dyn AuthProvider>,
    pub navigator: Rc<dyn Navigator>,
    pub notifier: Rc<dyn Notifier>,
}

#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub api_base: String,
    pub login_route: String,
    pub messages: Messages,
    pub dark_mode: bool,
}

impl ControllerSettings {
    pub fn from_config(config: &AppConfig, api_base: String, dark_mode: bool) -> Self {
        Self {
            api_base,
            login_route: config.ui.login_route.clone(),
            messages: Messages::from_config(config),
            dark_mode,
        }
    }
}

type Observer = Rc<dyn Fn(&DashboardState)>;

pub struct DashboardController<S: ChartSurface> {
    api: DashboardApi,
    auth: Rc<dyn AuthProvider>,
    navigator: Rc<dyn Navigator>,
    notifier: Rc<dyn Notifier>,
    messages: Messages,
    login_route: String,
    state: RefCell<DashboardState>,
    presenter: RefCell<ChartPresenter<S>>,
    observer: RefCell<Option<Observer>>,
}

impl<S: ChartSurface> DashboardController<S> {
    pub fn new(deps: DashboardDeps, surface: S, settings: ControllerSettings) -> Self {
        let labels = SeriesLabels {
            sales: settings.messages.sales_series_label.clone(),
            forecast: settings.messages.forecast_series_label.clone(),
        };
        Self {
            api: DashboardApi::new(deps.transport, deps.auth.clone(), settings.api_base),
            auth: deps.auth,
            navigator: deps.navigator,
            notifier: deps.notifier,
            messages: settings.messages,
            login_route: settings.login_route,
            state: RefCell::new(DashboardState::default()),
            presenter: RefCell::new(ChartPresenter::new(surface, labels, settings.dark_mode)),
            observer: RefCell::new(None),
        }
    }

    /// Called with a fresh snapshot after every state change
    pub fn set_observer(&self, observer: impl Fn(&DashboardState) + 'static) {
        *self.observer.borrow_mut() = Some(Rc::new(observer));
    }

    pub fn snapshot(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    pub fn with_presenter<R>(&self, f: impl FnOnce(&ChartPresenter<S>) -> R) -> R {
        f(&self.presenter.borrow())
    }

    fn update<R>(&self, f: impl FnOnce(&mut DashboardState) -> R) -> R {
        let result = f(&mut self.state.borrow_mut());
        let observer = self.observer.borrow().clone();
        if let Some(observer) = observer {
            let snapshot = self.snapshot();
            observer(&snapshot);
        }
        result
    }

    /// Session gate plus initial registry load. Stops at the gate without a session;
    /// a 401 from the registry also counts as redirected.
    pub async fn activate(&self) -> GuardOutcome {
        self.update(|s| s.begin_activation());

        let outcome = guard_session(self.auth.as_ref(), self.navigator.as_ref(), &self.login_route);
        if outcome == GuardOutcome::Redirected {
            self.update(|s| s.sign_out());
            return outcome;
        }

        self.update(|s| s.begin_files_load());
        // Other failures are already reported to the user
        match self.refresh_files().await {
            Err(e) if e.is_unauthorized() => GuardOutcome::Redirected,
            _ => outcome,
        }
    }

    /// Re-read the file registry, replacing the local list wholesale.
    /// Errors are reported before being returned.
    pub async fn refresh_files(&self) -> Result<(), ApiError> {
        self.update(|s| s.begin_operation());
        let result = self.api.list_files().await;

        match result {
            Ok(files) => {
                log::info!("Loaded {} files", files.len());
                self.update(|s| {
                    s.end_operation();
                    s.files_loaded(files);
                });
                Ok(())
            }
            Err(e) => {
                self.update(|s| {
                    s.end_operation();
                    s.files_failed();
                });
                self.handle_error(e.clone());
                Err(e)
            }
        }
    }

    /// Upload one file, then refresh the registry. The new file is not selected.
    pub async fn upload(&self, bytes: Vec<u8>, filename: &str) -> Result<UploadResponse, ApiError> {
        log::info!("Uploading {} ({} bytes)", filename, bytes.len());
        self.update(|s| s.begin_operation());
        let result = self.api.upload_file(bytes, filename).await;
        self.update(|s| s.end_operation());

        match result {
            Ok(response) => {
                log::info!("File uploaded successfully: {}", response.file_id);
                let _ = self.refresh_files().await;
                Ok(response)
            }
            Err(e) => {
                self.handle_error_with(e.clone(), &self.messages.upload_error_fallback);
                Err(e)
            }
        }
    }

    /// The picked file could not be read in the browser, so nothing was sent
    pub fn report_unreadable_file(&self, filename: &str, detail: &str) {
        log::error!("Failed to read {}: {}", filename, detail);
        self.notifier.alert(&self.messages.upload_error_fallback);
    }

    pub fn select_file(&self, file_id: Option<String>) {
        self.update(|s| s.select_file(file_id));
    }

    pub fn select_report_type(&self, report_type: ReportType) {
        self.update(|s| s.select_report_type(report_type));
    }

    pub fn set_options(&self, options: ReportOptions) {
        self.update(|s| s.set_options(options));
    }

    /// Fetch the summary for the selected file and redraw the charts.
    ///
    /// Without a selected file nothing is sent and the user is prompted.
    /// Only the most recent request may replace the summary.
    pub async fn fetch_summary(&self, report_type: ReportType) -> Result<(), ApiError> {
        self.update(|s| s.select_report_type(report_type));

        let query = {
            let state = self.state.borrow();
            build_summary_query(
                state.selected_file.as_deref(),
                report_type,
                &state.options,
                &self.messages,
            )
        };
        let query = match query {
            Ok(query) => query,
            Err(e) => {
                self.handle_error(e.clone());
                return Err(e);
            }
        };

        let ticket = self.update(|s| {
            s.begin_operation();
            s.begin_summary()
        });
        let result = self.api.fetch_summary(&query).await;

        match result {
            Ok(summary) => {
                let applied = self.update(|s| {
                    s.end_operation();
                    s.complete_summary(ticket, report_type, summary)
                });
                if applied {
                    self.rerender();
                } else {
                    log::info!("Discarding stale summary for {}", query.file_id);
                }
                Ok(())
            }
            Err(e) => {
                let applied = self.update(|s| {
                    s.end_operation();
                    s.fail_summary(ticket, e.clone())
                });
                if applied || e.is_unauthorized() {
                    self.handle_error(e.clone());
                } else {
                    log::info!("Ignoring stale summary failure: {}", e);
                }
                Err(e)
            }
        }
    }

    /// Redraw from the current summary, e.g. after a theme change.
    /// Uses the report type the summary was fetched for, not the current selection.
    pub fn rerender(&self) {
        let state = self.state.borrow();
        let mut presenter = self.presenter.borrow_mut();
        match &state.summary {
            Some(summary) => presenter.render(summary, state.summary_report_type),
            None => presenter.clear(),
        }
    }

    pub fn set_dark_mode(&self, dark: bool) {
        self.presenter.borrow_mut().set_dark_mode(dark);
        self.rerender();
    }

    fn handle_error(&self, error: ApiError) {
        self.handle_error_with(error, &self.messages.server_error_fallback);
    }

    /// `fallback` is shown for server errors without a message
    fn handle_error_with(&self, error: ApiError, fallback: &str) {
        log::warn!("Dashboard request failed: {}", error);
        match error {
            ApiError::Unauthorized => {
                self.auth.clear_token();
                self.update(|s| s.sign_out());
                self.navigator.navigate(&self.login_route);
            }
            other => {
                let message = other.user_message_or(&self.messages, fallback);
                self.update(|s| s.record_error(other));
                if let Some(message) = message {
                    self.notifier.alert(&message);
                }
            }
        }
    }
}
