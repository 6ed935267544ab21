//! User-facing notifications

/// Blocking alert sink used for every error except a silent 401 redirect
pub trait Notifier {
    fn alert(&self, message: &str);
}

/// `window.alert`
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserNotifier;

impl Notifier for BrowserNotifier {
    fn alert(&self, message: &str) {
        match web_sys::window() {
            Some(window) => {
                let _ = window.alert_with_message(message);
            }
            None => log::warn!("alert without window: {}", message),
        }
    }
}
