//! Small presentational pieces shared by the views.

use dioxus::prelude::*;

#[component]
pub fn Spinner(#[props(default = "Loading...".to_string())] label: String) -> Element {
    rsx! {
        div {
            class: "flex flex-col items-center justify-center gap-3 py-16",
            span { class: "loading loading-spinner loading-lg" }
            p { class: "view-muted", "{label}" }
        }
    }
}

/// Inline "failed to load" panel with a retry button.
#[component]
pub fn LoadError(message: String, on_retry: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "alert alert-error flex flex-col items-start gap-2",
            role: "alert",
            p { class: "font-semibold", "Failed to load" }
            p { class: "text-sm", "{message}" }
            button {
                class: "btn btn-sm",
                onclick: move |_| on_retry.call(()),
                "Retry"
            }
        }
    }
}

#[component]
pub fn EmptyState(title: String, #[props(default)] hint: Option<String>) -> Element {
    rsx! {
        div {
            class: "text-center py-16",
            h3 { class: "text-lg font-semibold", "{title}" }
            if let Some(hint) = hint {
                p { class: "view-muted mt-1", "{hint}" }
            }
        }
    }
}

/// Profile photo, or the first letter of the name.
#[component]
pub fn Avatar(
    name: String,
    #[props(default)] photo_url: Option<String>,
    #[props(default = 40)] size: u32,
) -> Element {
    let initial = name
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_else(|| "?".to_string());
    let style = format!("width:{size}px;height:{size}px");

    rsx! {
        match photo_url.filter(|url| !url.trim().is_empty()) {
            Some(url) => rsx! {
                img {
                    class: "rounded-full object-cover",
                    style: "{style}",
                    src: "{url}",
                    alt: "{name}",
                    referrerpolicy: "no-referrer",
                }
            },
            None => rsx! {
                div {
                    class: "rounded-full bg-primary text-primary-content flex items-center justify-center font-bold",
                    style: "{style}",
                    "{initial}"
                }
            },
        }
    }
}

#[component]
pub fn Badge(label: String, #[props(default = "badge-ghost".to_string())] tone: String) -> Element {
    rsx! {
        span { class: "badge {tone}", "{label}" }
    }
}

#[component]
pub fn StatCard(label: String, value: u64) -> Element {
    rsx! {
        div {
            class: "stat bg-base-100 rounded-box shadow",
            div { class: "stat-title", "{label}" }
            div { class: "stat-value", "{value}" }
        }
    }
}

/// Previous/next pager over zero-based pages.
#[component]
pub fn Pager(index: usize, total_pages: usize, on_change: EventHandler<usize>) -> Element {
    if total_pages <= 1 {
        return rsx! {};
    }
    rsx! {
        div {
            class: "join flex justify-center mt-8",
            button {
                class: "join-item btn",
                disabled: index == 0,
                onclick: move |_| on_change.call(index.saturating_sub(1)),
                "«"
            }
            for page in 0..total_pages {
                button {
                    key: "{page}",
                    class: if page == index { "join-item btn btn-active" } else { "join-item btn" },
                    onclick: move |_| on_change.call(page),
                    "{page + 1}"
                }
            }
            button {
                class: "join-item btn",
                disabled: index + 1 >= total_pages,
                onclick: move |_| on_change.call(index + 1),
                "»"
            }
        }
    }
}
