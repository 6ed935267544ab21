//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

use super::config::config;

/// Get the base URL for API requests
///
/// Uses `api.base_url` from the configuration when it is set. Otherwise the
/// base is derived from the current window location, using port 3000 for the
/// backend server.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.ngrok-free.app"
/// - Empty string if neither the config nor the window provide one
pub fn api_base() -> String {
    let configured = &config().api.base_url;
    if !configured.is_empty() {
        return configured.clone();
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Join a base URL and an endpoint path without doubling slashes
///
/// # Example
/// ```rust
/// use frontend::shared::api_utils::join_url;
/// assert_eq!(join_url("http://h:3000/", "/getfiles/"), "http://h:3000/getfiles/");
/// ```
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
