pub mod api_error;
pub mod api_utils;
pub mod config;
pub mod date_utils;
pub mod http;
pub mod notify;
pub mod theme;
