use dioxus::prelude::*;
use ui::icons::{FaBan, FaCompass};
use ui::Icon;

use crate::Route;

/// Shown in place of admin pages for signed-in non-admins.
#[component]
pub fn Forbidden() -> Element {
    rsx! {
        div {
            class: "flex flex-col items-center text-center gap-4 py-20",
            Icon { icon: FaBan, width: 48, height: 48 }
            h1 { class: "text-3xl font-bold", "Access denied" }
            p {
                class: "view-muted max-w-md",
                "This area is reserved for administrators. If you think this is a mistake, contact the site admin."
            }
            Link { to: Route::Home {}, class: "btn btn-primary", "Back to home" }
        }
    }
}

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));
    rsx! {
        div {
            class: "flex flex-col items-center text-center gap-4 py-20",
            Icon { icon: FaCompass, width: 48, height: 48 }
            h1 { class: "text-3xl font-bold", "Page not found" }
            p { class: "view-muted", "Nothing lives at {path}." }
            Link { to: Route::Home {}, class: "btn btn-primary", "Back to home" }
        }
    }
}

/// Inline not-found panel for records that no longer exist.
#[component]
pub fn MissingRecord(what: String) -> Element {
    rsx! {
        div {
            class: "flex flex-col items-center text-center gap-3 py-16",
            h2 { class: "text-2xl font-bold", "{what} not found" }
            p { class: "view-muted", "It may have been removed by its author or a moderator." }
            Link { to: Route::PublicLessons {}, class: "btn btn-outline btn-sm", "Browse lessons" }
        }
    }
}
