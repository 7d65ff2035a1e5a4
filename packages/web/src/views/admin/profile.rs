use dioxus::prelude::*;
use ui::{use_backend, Avatar, Badge, LoadError, Spinner, StatCard};

use crate::Route;

#[component]
pub fn AdminProfile() -> Element {
    let backend = use_backend();
    let mut profile = use_resource(move || {
        let backend = backend.clone();
        async move { backend.admin_profile().await }
    });

    match profile() {
        None => rsx! { Spinner {} },
        Some(Err(err)) => rsx! {
            LoadError { message: err.to_string(), on_retry: move |_| profile.restart() }
        },
        Some(Ok(p)) => rsx! { ProfileCard { profile: p } },
    }
}

#[component]
fn ProfileCard(profile: api::AdminProfile) -> Element {
    let user = &profile.user;
    let joined = user
        .created_at
        .map(|t| t.format("%B %Y").to_string())
        .unwrap_or_default();

    rsx! {
        div {
            class: "flex flex-col gap-8 max-w-4xl",
            div {
                class: "flex items-center gap-4",
                Avatar {
                    name: user.display_name().to_string(),
                    photo_url: user.photo_url.clone(),
                    size: 80,
                }
                div {
                    h1 { class: "text-3xl font-bold", "{user.display_name()}" }
                    p { class: "view-muted", "{user.email}" }
                    div {
                        class: "flex gap-2 mt-1",
                        Badge { label: "admin", tone: "badge-secondary" }
                        if !joined.is_empty() {
                            span { class: "text-sm view-muted", "Member since {joined}" }
                        }
                    }
                }
            }
            div {
                class: "grid gap-4 sm:grid-cols-3",
                StatCard { label: "Lessons reviewed", value: profile.lessons_reviewed }
                StatCard { label: "Lessons featured", value: profile.lessons_featured }
                StatCard { label: "Reports resolved", value: profile.reports_resolved }
            }
            p {
                class: "view-muted",
                "Edit your name and photo from "
                Link { to: Route::Profile {}, class: "link link-primary", "your profile" }
                "."
            }
        }
    }
}
