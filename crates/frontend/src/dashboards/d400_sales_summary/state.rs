use super::query::ReportOptions;
use crate::shared::api_error::ApiError;
use contracts::dashboards::d400_sales_summary::{DashboardSummary, FileItem, ReportType};

/// View lifecycle.
///
/// `Unauthenticated → Authenticating → FilesLoading → FilesLoaded →
/// ReportIdle ⇄ ReportLoading → ReportLoaded | ReportError`.
/// Any 401 drops back to `Unauthenticated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewPhase {
    #[default]
    Unauthenticated,
    Authenticating,
    FilesLoading,
    FilesLoaded,
    ReportIdle,
    ReportLoading,
    ReportLoaded,
    ReportError,
}

impl ViewPhase {
    fn is_report_phase(&self) -> bool {
        matches!(
            self,
            ViewPhase::FilesLoaded
                | ViewPhase::ReportIdle
                | ViewPhase::ReportLoaded
                | ViewPhase::ReportError
        )
    }
}

/// Identifies one summary request; only the latest may land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryTicket(u64);

/// Whole dashboard state, mutated only through the methods below
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardState {
    pub phase: ViewPhase,
    pub files: Vec<FileItem>,
    pub selected_file: Option<String>,
    pub report_type: ReportType,
    pub options: ReportOptions,
    pub summary: Option<DashboardSummary>,
    /// Report type `summary` was requested for
    pub summary_report_type: ReportType,
    pub last_error: Option<ApiError>,
    pending: u32,
    summary_seq: u64,
}

impl DashboardState {
    pub fn is_loading(&self) -> bool {
        self.pending > 0
    }

    pub fn begin_operation(&mut self) {
        self.pending += 1;
    }

    pub fn end_operation(&mut self) {
        self.pending = self.pending.saturating_sub(1);
    }

    pub fn begin_activation(&mut self) {
        self.phase = ViewPhase::Authenticating;
        self.last_error = None;
    }

    pub fn sign_out(&mut self) {
        self.phase = ViewPhase::Unauthenticated;
    }

    pub fn begin_files_load(&mut self) {
        if self.phase == ViewPhase::Authenticating {
            self.phase = ViewPhase::FilesLoading;
        }
    }

    /// Replace the registry wholesale. Clears a selection that no longer exists.
    pub fn files_loaded(&mut self, files: Vec<FileItem>) {
        if let Some(selected) = &self.selected_file {
            if !files.iter().any(|f| &f.id == selected) {
                self.selected_file = None;
                self.to_idle();
            }
        }
        self.files = files;
        if self.phase == ViewPhase::FilesLoading {
            self.phase = ViewPhase::FilesLoaded;
        }
    }

    /// Registry load failed; the view still leaves the loading phase
    pub fn files_failed(&mut self) {
        if self.phase == ViewPhase::FilesLoading {
            self.phase = ViewPhase::FilesLoaded;
        }
    }

    pub fn select_file(&mut self, file_id: Option<String>) {
        let file_id = file_id.filter(|id| !id.trim().is_empty());
        if file_id != self.selected_file {
            self.selected_file = file_id;
            self.to_idle();
        }
    }

    pub fn select_report_type(&mut self, report_type: ReportType) {
        if report_type != self.report_type {
            self.report_type = report_type;
            self.to_idle();
        }
    }

    pub fn set_options(&mut self, options: ReportOptions) {
        self.options = options;
    }

    fn to_idle(&mut self) {
        if self.phase.is_report_phase() {
            self.phase = ViewPhase::ReportIdle;
        }
    }

    /// Start a summary request; any older ticket becomes stale
    pub fn begin_summary(&mut self) -> SummaryTicket {
        self.summary_seq += 1;
        self.phase = ViewPhase::ReportLoading;
        self.last_error = None;
        SummaryTicket(self.summary_seq)
    }

    pub fn is_current(&self, ticket: SummaryTicket) -> bool {
        ticket.0 == self.summary_seq
    }

    /// Store the response if the ticket is still current. Returns whether it was applied.
    pub fn complete_summary(
        &mut self,
        ticket: SummaryTicket,
        report_type: ReportType,
        summary: DashboardSummary,
    ) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.summary = Some(summary);
        self.summary_report_type = report_type;
        self.phase = ViewPhase::ReportLoaded;
        true
    }

    pub fn fail_summary(&mut self, ticket: SummaryTicket, error: ApiError) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.phase = ViewPhase::ReportError;
        self.last_error = Some(error);
        true
    }

    pub fn record_error(&mut self, error: ApiError) {
        self.last_error = Some(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::dashboards::d400_sales_summary::{SalesRecord, SummarySection};

    fn file(id: &str) -> FileItem {
        FileItem {
            id: id.to_string(),
            filename: format!("{id}.csv"),
            upload_timestamp: None,
        }
    }

    fn daily(value: f64) -> DashboardSummary {
        DashboardSummary::new().with_section(
            "daily_sales",
            SummarySection::Sales(vec![SalesRecord {
                date: "2024-01-01".into(),
                total_sales: value,
                growth_rate: None,
            }]),
        )
    }

    #[test]
    fn test_activation_phases() {
        let mut state = DashboardState::default();
        assert_eq!(state.phase, ViewPhase::Unauthenticated);
        state.begin_activation();
        assert_eq!(state.phase, ViewPhase::Authenticating);
        state.begin_files_load();
        assert_eq!(state.phase, ViewPhase::FilesLoading);
        state.files_loaded(vec![file("f1")]);
        assert_eq!(state.phase, ViewPhase::FilesLoaded);

        state.select_file(Some("f1".into()));
        assert_eq!(state.phase, ViewPhase::ReportIdle);

        let ticket = state.begin_summary();
        assert_eq!(state.phase, ViewPhase::ReportLoading);
        assert!(state.complete_summary(ticket, ReportType::Daily, daily(1.0)));
        assert_eq!(state.phase, ViewPhase::ReportLoaded);

        state.select_report_type(ReportType::Monthly);
        assert_eq!(state.phase, ViewPhase::ReportIdle);

        state.sign_out();
        assert_eq!(state.phase, ViewPhase::Unauthenticated);
    }

    #[test]
    fn test_loading_counter_survives_overlap() {
        let mut state = DashboardState::default();
        state.begin_operation();
        state.begin_operation();
        state.end_operation();
        assert!(state.is_loading());
        state.end_operation();
        assert!(!state.is_loading());
        state.end_operation();
        assert!(!state.is_loading());
    }

    #[test]
    fn test_stale_summary_is_discarded() {
        let mut state = DashboardState::default();
        let first = state.begin_summary();
        let second = state.begin_summary();

        assert!(state.complete_summary(second, ReportType::Daily, daily(2.0)));
        assert!(!state.complete_summary(first, ReportType::Daily, daily(1.0)));
        assert!(!state.fail_summary(first, ApiError::NetworkUnreachable));

        assert_eq!(state.summary, Some(daily(2.0)));
        assert_eq!(state.phase, ViewPhase::ReportLoaded);
        assert_eq!(state.last_error, None);
    }

    #[test]
    fn test_refresh_drops_vanished_selection() {
        let mut state = DashboardState::default();
        state.files_loaded(vec![file("f1"), file("f2")]);
        state.select_file(Some("f2".into()));
        state.files_loaded(vec![file("f1")]);
        assert_eq!(state.selected_file, None);
        assert_eq!(state.files, vec![file("f1")]);
    }

    #[test]
    fn test_summary_keeps_requested_report_type() {
        let mut state = DashboardState::default();
        let ticket = state.begin_summary();
        state.select_report_type(ReportType::Monthly);
        assert!(state.complete_summary(ticket, ReportType::Daily, daily(1.0)));
        assert_eq!(state.report_type, ReportType::Monthly);
        assert_eq!(state.summary_report_type, ReportType::Daily);
    }

    #[test]
    fn test_failed_registry_load_leaves_loading_phase() {
        let mut state = DashboardState::default();
        state.begin_activation();
        state.begin_files_load();
        state.files_failed();
        assert_eq!(state.phase, ViewPhase::FilesLoaded);
        assert!(state.files.is_empty());
    }

    #[test]
    fn test_blank_selection_is_unset() {
        let mut state = DashboardState::default();
        state.select_file(Some("  ".into()));
        assert_eq!(state.selected_file, None);
    }
}
