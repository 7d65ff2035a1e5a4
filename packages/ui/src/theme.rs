//! Light/dark theme preference.
//!
//! `None` follows the OS preference. The choice is stored in `localStorage` and
//! applied as a `data-theme` attribute on the document element.

use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaMoon, FaSun};
use dioxus_free_icons::Icon;

use crate::persist::{self, THEME_KEY};

pub type ThemeSignal = Signal<Option<String>>;

pub fn load_theme_from_storage(theme: &mut ThemeSignal) {
    let stored = persist::get_item(THEME_KEY).filter(|t| t == "light" || t == "dark");
    apply_theme(stored.as_deref());
    theme.set(stored);
}

pub fn apply_theme(theme: Option<&str>) {
    match theme {
        Some(value) => persist::set_item(THEME_KEY, value),
        None => persist::remove_item(THEME_KEY),
    }
    #[cfg(target_arch = "wasm32")]
    {
        let Some(root) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        else {
            return;
        };
        let result = match theme {
            Some(value) => root.set_attribute("data-theme", value),
            None => root.remove_attribute("data-theme"),
        };
        if result.is_err() {
            tracing::warn!("could not apply theme");
        }
    }
}

/// Navbar button flipping between light and dark.
#[component]
pub fn ThemeToggle() -> Element {
    let mut theme = use_context::<ThemeSignal>();
    let dark = theme().as_deref() == Some("dark");

    rsx! {
        button {
            class: "btn btn-ghost btn-circle",
            title: if dark { "Switch to light theme" } else { "Switch to dark theme" },
            onclick: move |_| {
                let next = if dark { "light" } else { "dark" };
                apply_theme(Some(next));
                theme.set(Some(next.to_string()));
            },
            if dark {
                Icon { icon: FaSun, width: 16, height: 16 }
            } else {
                Icon { icon: FaMoon, width: 16, height: 16 }
            }
        }
    }
}
