//! Theme management module for the application.
//!
//! The dashboard only knows two modes, light and dark. The flag is exposed as
//! a signal so chart colors can follow it, and is persisted in localStorage.

use leptos::prelude::*;
use thaw::*;
use web_sys::window;

const THEME_STORAGE_KEY: &str = "app-dark-mode";

/// Parse the persisted flag. Anything but "dark" is light.
fn parse_stored(value: Option<&str>) -> bool {
    value == Some("dark")
}

fn mode_name(dark: bool) -> &'static str {
    if dark {
        "dark"
    } else {
        "light"
    }
}

/// Load the dark-mode flag from localStorage.
fn load_dark_mode_from_storage() -> bool {
    let stored = window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(THEME_STORAGE_KEY).ok().flatten());
    parse_stored(stored.as_deref())
}

/// Save the dark-mode flag to localStorage.
fn save_dark_mode_to_storage(dark: bool) {
    if let Some(storage) = window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.set_item(THEME_STORAGE_KEY, mode_name(dark));
    }
}

/// Set `data-theme` on body for the stylesheet hooks.
fn apply_theme_attribute(dark: bool) {
    if let Some(body) = window().and_then(|w| w.document()).and_then(|d| d.body()) {
        let _ = body.set_attribute("data-theme", mode_name(dark));
    }
}

/// Theme context type.
#[derive(Clone, Copy)]
pub struct ThemeContext {
    /// Current dark-mode flag; subscribe by reading the signal.
    pub dark_mode: RwSignal<bool>,
}

impl ThemeContext {
    pub fn set_dark_mode(&self, dark: bool) {
        self.dark_mode.set(dark);
        save_dark_mode_to_storage(dark);
        apply_theme_attribute(dark);
    }

    pub fn toggle(&self) {
        self.set_dark_mode(!self.dark_mode.get_untracked());
    }
}

/// Provides theme context to children components.
#[component]
pub fn ThemeProvider(children: Children) -> impl IntoView {
    let initial = load_dark_mode_from_storage();
    apply_theme_attribute(initial);

    provide_context(ThemeContext {
        dark_mode: RwSignal::new(initial),
    });

    children()
}

/// Hook to use the theme context.
pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>().expect("ThemeContext not found. Wrap your app with ThemeProvider.")
}

/// Light/dark toggle button.
#[component]
pub fn ThemeToggle(
    #[prop(into)] dark_label: String,
    #[prop(into)] light_label: String,
) -> impl IntoView {
    let ctx = use_theme();

    view! {
        <Button
            appearance=ButtonAppearance::Subtle
            on_click=move |_| ctx.toggle()
        >
            {move || if ctx.dark_mode.get() { light_label.clone() } else { dark_label.clone() }}
        </Button>
    }
}
