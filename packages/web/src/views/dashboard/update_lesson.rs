use api::Lesson;
use dioxus::prelude::*;
use ui::{keys, use_auth, use_backend, use_query, use_query_client, use_toast, LessonDraft, LoadError, Spinner};

use super::lesson_form::LessonForm;
use crate::views::{Forbidden, MissingRecord};
use crate::Route;

#[component]
pub fn UpdateLesson(id: String) -> Element {
    let mut id_signal = use_signal(|| id.clone());
    if *id_signal.peek() != id {
        id_signal.set(id.clone());
    }

    let auth = use_auth();
    let backend = use_backend();
    let lessons = use_query_client::<Lesson>();
    let lists = use_query_client::<Vec<Lesson>>();
    let toast = use_toast();
    let nav = use_navigator();
    let mut busy = use_signal(|| false);

    let fetch_backend = backend.clone();
    let mut lesson = use_query(
        move || keys::lesson(&id_signal()),
        move |_| {
            let backend = fetch_backend.clone();
            let id = id_signal.peek().clone();
            async move { backend.lesson(&id).await }
        },
    );

    let handle_submit = move |draft: LessonDraft| {
        let backend = backend.clone();
        let lessons = lessons.clone();
        let lists = lists.clone();
        let id = id_signal();
        spawn(async move {
            busy.set(true);
            let update = draft.into_update();
            let key = keys::lesson(&id);
            let request = backend.update_lesson(&id, &update);
            match lessons
                .mutate_optimistic(&key, |l: &mut Lesson| update.apply_to(l), request)
                .await
            {
                Ok(()) => {
                    lists.invalidate_lesson_lists();
                    toast.success("Lesson updated");
                    nav.push(Route::MyLessons {});
                }
                Err(err) => {
                    busy.set(false);
                    toast.error(format!("Could not update the lesson: {err}"));
                }
            }
        });
    };

    let email = auth().email().map(str::to_string);

    rsx! {
        h1 { class: "text-3xl font-bold mb-6", "Update lesson" }
        match lesson() {
            None => rsx! { Spinner {} },
            Some(Err(err)) if err.is_not_found() => rsx! { MissingRecord { what: "Lesson" } },
            Some(Err(err)) => rsx! {
                LoadError { message: err.to_string(), on_retry: move |_| lesson.restart() }
            },
            Some(Ok(l)) if email.as_deref().is_some_and(|e| !l.is_authored_by(e)) => rsx! {
                Forbidden {}
            },
            Some(Ok(l)) => rsx! {
                LessonForm {
                    key: "{l.id}",
                    initial: LessonDraft::from(&l),
                    submit_label: "Save changes",
                    busy: busy(),
                    on_submit: handle_submit,
                }
            },
        }
    }
}
