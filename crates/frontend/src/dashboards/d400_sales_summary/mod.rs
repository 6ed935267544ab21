pub mod api;
pub mod chart;
pub mod chartjs;
pub mod controller;
pub mod query;
pub mod state;
pub mod ui;
