use api::{Lesson, Visibility};
use dioxus::prelude::*;
use ui::icons::{FaEye, FaPen, FaTrash};
use ui::{
    keys, use_auth, use_backend, use_query, use_query_client, use_toast, Badge, ConfirmDialog,
    EmptyState, Icon, LessonFilter, LoadError, SortOrder, Spinner,
};

use crate::Route;

#[component]
pub fn MyLessons() -> Element {
    let auth = use_auth();
    let backend = use_backend();
    let lists = use_query_client::<Vec<Lesson>>();
    let toast = use_toast();
    let mut visibility = use_signal(|| Option::<Visibility>::None);
    let mut pending_delete = use_signal(|| Option::<Lesson>::None);

    let email = move || auth().email().map(str::to_string).unwrap_or_default();

    let fetch_backend = backend.clone();
    let mut lessons = use_query(
        move || keys::my_lessons(&email()),
        move |key| {
            let backend = fetch_backend.clone();
            let email = key.params().first().cloned().unwrap_or_default();
            async move { backend.my_lessons(&email).await }
        },
    );

    let confirm_delete = move |lesson: Lesson| {
        let backend = backend.clone();
        let lists = lists.clone();
        let key = keys::my_lessons(&email());
        spawn(async move {
            let id = lesson.id.clone();
            let request = backend.trash_lesson(&id);
            match lists
                .mutate_optimistic(&key, |list: &mut Vec<Lesson>| list.retain(|l| l.id != id), request)
                .await
            {
                Ok(()) => {
                    lists.invalidate_lesson_lists();
                    toast.success(format!("\"{}\" deleted", lesson.title));
                }
                Err(err) => toast.error(format!("Could not delete the lesson: {err}")),
            }
        });
    };

    rsx! {
        div {
            class: "flex flex-wrap items-center justify-between gap-4 mb-6",
            h1 { class: "text-3xl font-bold", "My lessons" }
            div {
                class: "flex gap-2",
                select {
                    class: "select select-bordered select-sm",
                    onchange: move |evt: FormEvent| visibility.set(Visibility::parse(&evt.value())),
                    option { value: "", "All visibility" }
                    for v in Visibility::ALL {
                        option { key: "{v.as_str()}", value: v.as_str(), "{v.label()}" }
                    }
                }
                Link { to: Route::AddLesson {}, class: "btn btn-primary btn-sm", "Add lesson" }
            }
        }

        match lessons() {
            None => rsx! { Spinner {} },
            Some(Err(err)) => rsx! {
                LoadError { message: err.to_string(), on_retry: move |_| lessons.restart() }
            },
            Some(Ok(all)) => {
                let filter = LessonFilter {
                    visibility: visibility(),
                    hide_deleted: true,
                    ..LessonFilter::default()
                };
                let mut rows = filter.apply(&all);
                SortOrder::Newest.sort(&mut rows);
                if rows.is_empty() {
                    rsx! {
                        EmptyState {
                            title: "No lessons here",
                            hint: "Lessons you write show up in this table.",
                        }
                    }
                } else {
                    rsx! {
                        div {
                            class: "overflow-x-auto",
                            table {
                                class: "table",
                                thead {
                                    tr {
                                        th { "Title" }
                                        th { "Category" }
                                        th { "Visibility" }
                                        th { "Access" }
                                        th { "Likes" }
                                        th { "Saves" }
                                        th { "Created" }
                                        th {}
                                    }
                                }
                                tbody {
                                    for lesson in rows {
                                        LessonRow {
                                            key: "{lesson.id}",
                                            lesson: lesson.clone(),
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
                message: format!("\"{}\" will be removed from every list.", lesson.title),
                on_confirm: move |_| confirm_delete(lesson.clone()),
                on_close: move |_| pending_delete.set(None),
            }
        }
    }
}

#[component]
fn LessonRow(lesson: Lesson, on_delete: EventHandler<Lesson>) -> Element {
    let created = lesson
        .created_at
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let row = lesson.clone();

    rsx! {
        tr {
            td { class: "font-medium", "{lesson.title}" }
            td { "{lesson.category}" }
            td { Badge { label: lesson.visibility.label().to_string() } }
            td {
                if lesson.is_premium() {
                    Badge { label: "Premium", tone: "badge-warning" }
                } else {
                    Badge { label: "Free" }
                }
            }
            td { "{lesson.likes_count}" }
            td { "{lesson.favorites_count}" }
            td { "{created}" }
            td {
                class: "flex gap-1",
                Link {
                    to: Route::LessonDetail { id: lesson.id.clone() },
                    class: "btn btn-xs btn-ghost",
                    Icon { icon: FaEye, width: 12, height: 12 }
                }
                Link {
                    to: Route::UpdateLesson { id: lesson.id.clone() },
                    class: "btn btn-xs btn-ghost",
                    Icon { icon: FaPen, width: 12, height: 12 }
                }
                button {
                    class: "btn btn-xs btn-ghost text-error",
                    title: "Delete",
                    onclick: move |_| on_delete.call(row.clone()),
                    Icon { icon: FaTrash, width: 12, height: 12 }
                }
            }
        }
    }
}
