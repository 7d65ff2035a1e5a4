use api::{AdminStats, Lesson, Report, ReportedLesson};
use dioxus::prelude::*;
use ui::{
    keys, use_backend, use_query, use_query_client, use_toast, Badge, EmptyState, LoadError,
    Spinner,
};

use crate::Route;

/// What the admin decided for a reported lesson.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Resolution {
    Ignore,
    Delete,
}

#[component]
pub fn ReportedLessons() -> Element {
    let backend = use_backend();
    let reported_client = use_query_client::<Vec<ReportedLesson>>();
    let lists = use_query_client::<Vec<Lesson>>();
    let stats_client = use_query_client::<AdminStats>();
    let toast = use_toast();
    let mut expanded = use_signal(|| Option::<String>::None);

    let fetch_backend = backend.clone();
    let mut reported = use_query(keys::reported_lessons, move |_| {
        let backend = fetch_backend.clone();
        async move { backend.reported_lessons().await }
    });

    let resolve = move |(row, resolution): (ReportedLesson, Resolution)| {
        let backend = backend.clone();
        let reported_client = reported_client.clone();
        let lists = lists.clone();
        let stats_client = stats_client.clone();
        spawn(async move {
            let id = row.lesson_id.clone();
            let drop_row = |list: &mut Vec<ReportedLesson>| list.retain(|r| r.lesson_id != id);
            let result = match resolution {
                Resolution::Ignore => {
                    let request = backend.ignore_reports(&id);
                    reported_client
                        .mutate_optimistic(&keys::reported_lessons(), drop_row, request)
                        .await
                }
                Resolution::Delete => {
                    let request = backend.delete_lesson_admin(&id);
                    reported_client
                        .mutate_optimistic(&keys::reported_lessons(), drop_row, request)
                        .await
                }
            };
            match result {
                Ok(()) => {
                    lists.invalidate(&keys::admin_lessons());
                    stats_client.invalidate(&keys::admin_stats());
                    match resolution {
                        Resolution::Ignore => toast.info(format!("Reports on \"{}\" cleared", row.title)),
                        Resolution::Delete => {
                            lists.invalidate_lesson_lists();
                            toast.success(format!("\"{}\" deleted", row.title));
                        }
                    }
                }
                Err(err) => toast.error(format!("Could not resolve the reports: {err}")),
            }
        });
    };

    rsx! {
        h1 { class: "text-3xl font-bold mb-6", "Reported lessons" }
        match reported() {
            None => rsx! { Spinner {} },
            Some(Err(err)) => rsx! {
                LoadError { message: err.to_string(), on_retry: move |_| reported.restart() }
            },
            Some(Ok(rows)) if rows.is_empty() => rsx! {
                EmptyState { title: "No open reports", hint: "Reported lessons land here for review." }
            },
            Some(Ok(rows)) => rsx! {
                div {
                    class: "flex flex-col gap-4",
                    for row in rows {
                        ReportCard {
                            key: "{row.lesson_id}",
                            open: expanded() == Some(row.lesson_id.clone()),
                            row: row.clone(),
                            on_expand: move |id: String| {
                                let next = if expanded.peek().as_deref() == Some(id.as_str()) { None } else { Some(id) };
                                expanded.set(next);
                            },
                            on_resolve: resolve.clone(),
                        }
                    }
                }
            },
        }
    }
}

#[component]
fn ReportCard(
    row: ReportedLesson,
    open: bool,
    on_expand: EventHandler<String>,
    on_resolve: EventHandler<(ReportedLesson, Resolution)>,
) -> Element {
    let id = row.lesson_id.clone();
    let ignore_target = row.clone();
    let delete_target = row.clone();

    rsx! {
        div {
            class: "card bg-base-200",
            div {
                class: "card-body gap-3",
                div {
                    class: "flex flex-wrap items-center justify-between gap-2",
                    div {
                        h3 { class: "card-title", "{row.title}" }
                        p { class: "text-sm view-muted", "{row.author_email}" }
                    }
                    Badge { label: format!("{} reports", row.report_count), tone: "badge-error" }
                }
                div {
                    class: "flex flex-wrap gap-1",
                    for reason in row.reasons() {
                        Badge { key: "{reason}", label: reason.to_string(), tone: "badge-outline" }
                    }
                }
                div {
                    class: "card-actions",
                    Link {
                        to: Route::LessonDetail { id: row.lesson_id.clone() },
                        class: "btn btn-sm btn-ghost",
                        "Open lesson"
                    }
                    button {
                        class: "btn btn-sm btn-ghost",
                        onclick: move |_| on_expand.call(id.clone()),
                        if open { "Hide reports" } else { "Show reports" }
                    }
                    button {
                        class: "btn btn-sm btn-outline",
                        onclick: move |_| on_resolve.call((ignore_target.clone(), Resolution::Ignore)),
                        "Ignore"
                    }
                    button {
                        class: "btn btn-sm btn-error",
                        onclick: move |_| on_resolve.call((delete_target.clone(), Resolution::Delete)),
                        "Delete lesson"
                    }
                }
                if open {
                    ReportList { lesson_id: row.lesson_id.clone() }
                }
            }
        }
    }
}

/// Individual reports, fetched when a card is expanded.
#[component]
fn ReportList(lesson_id: String) -> Element {
    let backend = use_backend();
    let mut reports = use_resource(move || {
        let backend = backend.clone();
        let id = lesson_id.clone();
        async move { backend.lesson_reports(&id).await }
    });

    match reports() {
        None => rsx! { span { class: "loading loading-dots loading-sm" } },
        Some(Err(err)) => rsx! {
            LoadError { message: err.to_string(), on_retry: move |_| reports.restart() }
        },
        Some(Ok(list)) => rsx! {
            ul {
                class: "flex flex-col gap-2",
                for report in list {
                    ReportItem { key: "{report.id}", report: report.clone() }
                }
            }
        },
    }
}

#[component]
fn ReportItem(report: Report) -> Element {
    let reporter = report
        .reporter_name
        .clone()
        .unwrap_or_else(|| report.reporter_email.clone());
    let when = report.created_at.map(|t| t.format("%Y-%m-%d").to_string());

    rsx! {
        li {
            class: "bg-base-100 rounded-box px-3 py-2 text-sm",
            span { class: "font-medium", "{report.reason}" }
            " · "
            span { class: "view-muted", "{reporter}" }
            if let Some(when) = when {
                span { class: "view-muted", " · {when}" }
            }
        }
    }
}
