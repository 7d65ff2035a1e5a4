use api::AdminStats;
use dioxus::prelude::*;
use ui::{keys, use_backend, use_query, LoadError, Spinner, StatCard};

use crate::Route;

#[component]
pub fn AdminHome() -> Element {
    let backend = use_backend();
    let mut stats = use_query(keys::admin_stats, move |_| {
        let backend = backend.clone();
        async move { backend.admin_stats().await }
    });

    rsx! {
        h1 { class: "text-3xl font-bold mb-6", "Platform statistics" }
        match stats() {
            None => rsx! { Spinner {} },
            Some(Err(err)) => rsx! {
                LoadError { message: err.to_string(), on_retry: move |_| stats.restart() }
            },
            Some(Ok(s)) => rsx! { StatsGrid { stats: s } },
        }
    }
}

#[component]
fn StatsGrid(stats: AdminStats) -> Element {
    rsx! {
        div {
            class: "grid gap-4 sm:grid-cols-2 lg:grid-cols-4",
            StatCard { label: "Users", value: stats.total_users }
            StatCard { label: "Premium users", value: stats.premium_users }
            StatCard { label: "Lessons", value: stats.total_lessons }
            StatCard { label: "Added today", value: stats.todays_lessons }
            StatCard { label: "Public lessons", value: stats.public_lessons }
            StatCard { label: "Private lessons", value: stats.private_lessons }
            StatCard { label: "Reported lessons", value: stats.reported_lessons }
        }
        div {
            class: "flex gap-2 mt-8",
            Link { to: Route::ManageLessons {}, class: "btn btn-outline btn-sm", "Moderate lessons" }
            Link { to: Route::ReportedLessons {}, class: "btn btn-outline btn-sm", "Review reports" }
        }
    }
}
