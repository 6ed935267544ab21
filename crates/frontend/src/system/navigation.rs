//! Navigation side effects

pub trait Navigator {
    fn navigate(&self, path: &str);
}

/// Full-page navigation through `window.location`
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, path: &str) {
        log::info!("Navigating to {}", path);
        let Some(window) = web_sys::window() else {
            log::warn!("No window, cannot navigate to {}", path);
            return;
        };
        if let Err(e) = window.location().set_href(path) {
            log::error!("Navigation to {} failed: {:?}", path, e);
        }
    }
}
