use api::{AdminStats, Lesson, Visibility, CATEGORIES};
use dioxus::prelude::*;
use ui::filter::selected;
use ui::icons::{FaEye, FaTrash};
use ui::query::set_lesson_flag;
use ui::{
    keys, use_backend, use_query, use_query_client, use_toast, Badge, ConfirmDialog, EmptyState,
    Icon, LessonFilter, LoadError, SortOrder, Spinner,
};

use crate::Route;

/// Which moderation flag a toggle flips.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Flag {
    Featured,
    Reviewed,
}

impl Flag {
    fn current(self, lesson: &Lesson) -> bool {
        match self {
            Flag::Featured => lesson.is_featured,
            Flag::Reviewed => lesson.is_reviewed,
        }
    }

    fn set(self, lesson: &mut Lesson, value: bool) {
        match self {
            Flag::Featured => lesson.is_featured = value,
            Flag::Reviewed => lesson.is_reviewed = value,
        }
    }
}

#[component]
pub fn ManageLessons() -> Element {
    let backend = use_backend();
    let lists = use_query_client::<Vec<Lesson>>();
    let stats_client = use_query_client::<AdminStats>();
    let toast = use_toast();
    let mut category = use_signal(String::new);
    let mut visibility = use_signal(|| Option::<Visibility>::None);
    let mut flagged_only = use_signal(|| false);
    let mut pending_delete = use_signal(|| Option::<Lesson>::None);

    let fetch_backend = backend.clone();
    let mut lessons = use_query(keys::admin_lessons, move |_| {
        let backend = fetch_backend.clone();
        async move { backend.admin_lessons().await }
    });

    let flag_backend = backend.clone();
    let flag_lists = lists.clone();
    let toggle_flag = move |(lesson, flag): (Lesson, Flag)| {
        let backend = flag_backend.clone();
        let lists = flag_lists.clone();
        spawn(async move {
            let next = !flag.current(&lesson);
            let result = match flag {
                Flag::Featured => {
                    let request = backend.set_featured(&lesson.id, next);
                    lists
                        .mutate_optimistic(
                            &keys::admin_lessons(),
                            |list: &mut Vec<Lesson>| {
                                set_lesson_flag(list, &lesson.id, |l| flag.set(l, next));
                            },
                            request,
                        )
                        .await
                }
                Flag::Reviewed => {
                    let request = backend.set_reviewed(&lesson.id, next);
                    lists
                        .mutate_optimistic(
                            &keys::admin_lessons(),
                            |list: &mut Vec<Lesson>| {
                                set_lesson_flag(list, &lesson.id, |l| flag.set(l, next));
                            },
                            request,
                        )
                        .await
                }
            };
            match result {
                Ok(()) => {
                    // Featured lessons feed the home page
                    if flag == Flag::Featured {
                        lists.invalidate(&keys::featured_lessons());
                    }
                }
                Err(err) => toast.error(format!("Could not update \"{}\": {err}", lesson.title)),
            }
        });
    };

    let confirm_delete = move |lesson: Lesson| {
        let backend = backend.clone();
        let lists = lists.clone();
        let stats_client = stats_client.clone();
        spawn(async move {
            let request = backend.delete_lesson_admin(&lesson.id);
            match lists
                .mutate_optimistic(
                    &keys::admin_lessons(),
                    |list: &mut Vec<Lesson>| list.retain(|l| l.id != lesson.id),
                    request,
                )
                .await
            {
                Ok(()) => {
                    lists.invalidate_lesson_lists();
                    stats_client.invalidate(&keys::admin_stats());
                    toast.success(format!("\"{}\" deleted", lesson.title));
                }
                Err(err) => toast.error(format!("Could not delete the lesson: {err}")),
            }
        });
    };

    rsx! {
        h1 { class: "text-3xl font-bold mb-6", "Manage lessons" }
        div {
            class: "flex flex-wrap items-center gap-2 mb-6",
            select {
                class: "select select-bordered select-sm",
                onchange: move |evt: FormEvent| category.set(evt.value()),
                option { value: "", "All categories" }
                for c in CATEGORIES {
                    option { key: "{c}", value: "{c}", "{c}" }
                }
            }
            select {
                class: "select select-bordered select-sm",
                onchange: move |evt: FormEvent| visibility.set(Visibility::parse(&evt.value())),
                option { value: "", "All visibility" }
                for v in Visibility::ALL {
                    option { key: "{v.as_str()}", value: v.as_str(), "{v.label()}" }
                }
            }
            label {
                class: "label cursor-pointer gap-2",
                input {
                    class: "checkbox checkbox-sm",
                    r#type: "checkbox",
                    checked: flagged_only(),
                    onchange: move |evt: FormEvent| flagged_only.set(evt.checked()),
                }
                span { class: "label-text", "Flagged only" }
            }
        }

        match lessons() {
            None => rsx! { Spinner {} },
            Some(Err(err)) => rsx! {
                LoadError { message: err.to_string(), on_retry: move |_| lessons.restart() }
            },
            Some(Ok(all)) => {
                let filter = LessonFilter {
                    category: selected(&category()),
                    visibility: visibility(),
                    flagged_only: flagged_only(),
                    hide_deleted: true,
                    ..LessonFilter::default()
                };
                let mut rows = filter.apply(&all);
                SortOrder::Newest.sort(&mut rows);
                if rows.is_empty() {
                    rsx! { EmptyState { title: "No lessons match these filters" } }
                } else {
                    rsx! {
                        div {
                            class: "overflow-x-auto",
                            table {
                                class: "table table-sm",
                                thead {
                                    tr {
                                        th { "Title" }
                                        th { "Author" }
                                        th { "Category" }
                                        th { "Visibility" }
                                        th { "Reports" }
                                        th { "Featured" }
                                        th { "Reviewed" }
                                        th {}
                                    }
                                }
                                tbody {
                                    for lesson in rows {
                                        ModerationRow {
                                            key: "{lesson.id}",
                                            lesson: lesson.clone(),
                                            on_toggle: toggle_flag.clone(),
                                            on_delete: move |l| pending_delete.set(Some(l)),
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        if let Some(lesson) = pending_delete() {
            ConfirmDialog {
                title: "Delete lesson?".to_string(),
                message: format!("\"{}\" by {} will be removed.", lesson.title, lesson.author_email),
                on_confirm: move |_| confirm_delete(lesson.clone()),
                on_close: move |_| pending_delete.set(None),
            }
        }
    }
}

#[component]
fn ModerationRow(
    lesson: Lesson,
    on_toggle: EventHandler<(Lesson, Flag)>,
    on_delete: EventHandler<Lesson>,
) -> Element {
    let featured_target = lesson.clone();
    let reviewed_target = lesson.clone();
    let delete_target = lesson.clone();

    rsx! {
        tr {
            td {
                class: "font-medium",
                "{lesson.title}"
                if lesson.is_flagged {
                    Badge { label: "flagged", tone: "badge-error badge-sm ml-2" }
                }
            }
            td { "{lesson.author_email}" }
            td { "{lesson.category}" }
            td { "{lesson.visibility.label()}" }
            td { "{lesson.reports_count}" }
            td {
                input {
                    class: "toggle toggle-sm toggle-secondary",
                    r#type: "checkbox",
                    checked: lesson.is_featured,
                    onchange: move |_| on_toggle.call((featured_target.clone(), Flag::Featured)),
                }
            }
            td {
                input {
                    class: "toggle toggle-sm toggle-success",
                    r#type: "checkbox",
                    checked: lesson.is_reviewed,
                    onchange: move |_| on_toggle.call((reviewed_target.clone(), Flag::Reviewed)),
                }
            }
            td {
                class: "flex gap-1",
                Link {
                    to: Route::LessonDetail { id: lesson.id.clone() },
                    class: "btn btn-xs btn-ghost",
                    Icon { icon: FaEye, width: 12, height: 12 }
                }
                button {
                    class: "btn btn-xs btn-ghost text-error",
                    onclick: move |_| on_delete.call(delete_target.clone()),
                    Icon { icon: FaTrash, width: 12, height: 12 }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_reads_and_writes_its_field() {
        let mut lesson: Lesson = serde_json::from_value(serde_json::json!({
            "_id": "a",
            "isFeatured": true,
        }))
        .unwrap();

        assert!(Flag::Featured.current(&lesson));
        assert!(!Flag::Reviewed.current(&lesson));

        Flag::Reviewed.set(&mut lesson, true);
        Flag::Featured.set(&mut lesson, false);
        assert!(lesson.is_reviewed);
        assert!(!lesson.is_featured);
    }
}
