use api::{Lesson, CATEGORIES, EMOTIONAL_TONES};
use dioxus::prelude::*;
use ui::filter::selected;
use ui::icons::{FaBookmark, FaEye};
use ui::{
    keys, use_auth, use_backend, use_query, use_query_client, use_toast, EmptyState, Icon,
    LessonFilter, LoadError, Spinner,
};

use crate::Route;

#[component]
pub fn MyFavorites() -> Element {
    let auth = use_auth();
    let backend = use_backend();
    let lists = use_query_client::<Vec<Lesson>>();
    let lessons_client = use_query_client::<Lesson>();
    let toast = use_toast();
    let mut category = use_signal(String::new);
    let mut tone = use_signal(String::new);

    let email = move || auth().email().map(str::to_string).unwrap_or_default();

    let fetch_backend = backend.clone();
    let mut saved = use_query(
        move || keys::saved_lessons(&email()),
        move |key| {
            let backend = fetch_backend.clone();
            let email = key.params().first().cloned().unwrap_or_default();
            async move { backend.saved_lessons(&email).await }
        },
    );

    let remove = move |lesson_id: String| {
        let backend = backend.clone();
        let lists = lists.clone();
        let lessons_client = lessons_client.clone();
        let email = email();
        spawn(async move {
            let key = keys::saved_lessons(&email);
            let request = backend.toggle_favorite(&lesson_id, &email);
            match lists
                .mutate_optimistic(
                    &key,
                    |list: &mut Vec<Lesson>| list.retain(|l| l.id != lesson_id),
                    request,
                )
                .await
            {
                Ok(()) => {
                    lists.invalidate_lesson_lists();
                    lessons_client.invalidate(&keys::lesson(&lesson_id));
                    toast.info("Removed from favorites");
                }
                Err(err) => toast.error(format!("Could not remove the favorite: {err}")),
            }
        });
    };

    rsx! {
        div {
            class: "flex flex-wrap items-center justify-between gap-4 mb-6",
            h1 { class: "text-3xl font-bold", "My favorites" }
            div {
                class: "flex gap-2",
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
                    onchange: move |evt: FormEvent| tone.set(evt.value()),
                    option { value: "", "All tones" }
                    for t in EMOTIONAL_TONES {
                        option { key: "{t}", value: "{t}", "{t}" }
                    }
                }
            }
        }

        match saved() {
            None => rsx! { Spinner {} },
            Some(Err(err)) => rsx! {
                LoadError { message: err.to_string(), on_retry: move |_| saved.restart() }
            },
            Some(Ok(all)) => {
                let filter = LessonFilter {
                    category: selected(&category()),
                    emotional_tone: selected(&tone()),
                    hide_deleted: true,
                    ..LessonFilter::default()
                };
                let rows = filter.apply(&all);
                if rows.is_empty() {
                    rsx! {
                        EmptyState {
                            title: "Nothing saved yet",
                            hint: "Save a lesson from its page to keep it here.",
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
                                        th { "Author" }
                                        th { "Category" }
                                        th { "Tone" }
                                        th {}
                                    }
                                }
                                tbody {
                                    for lesson in rows {
                                        tr {
                                            key: "{lesson.id}",
                                            td { class: "font-medium", "{lesson.title}" }
                                            td { "{lesson.author_name}" }
                                            td { "{lesson.category}" }
                                            td { "{lesson.emotional_tone}" }
                                            td {
                                                class: "flex gap-1",
                                                Link {
                                                    to: Route::LessonDetail { id: lesson.id.clone() },
                                                    class: "btn btn-xs btn-ghost",
                                                    Icon { icon: FaEye, width: 12, height: 12 }
                                                }
                                                button {
                                                    class: "btn btn-xs btn-ghost text-error",
                                                    title: "Remove from favorites",
                                                    onclick: {
                                                        let remove = remove.clone();
                                                        let id = lesson.id.clone();
                                                        move |_| remove(id.clone())
                                                    },
                                                    Icon { icon: FaBookmark, width: 12, height: 12 }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
