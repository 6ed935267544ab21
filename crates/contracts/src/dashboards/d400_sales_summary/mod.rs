pub mod dto;
pub mod summary;

pub use dto::*;
pub use summary::{DashboardSummary, SummarySection};
