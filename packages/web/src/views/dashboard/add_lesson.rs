use api::Lesson;
use dioxus::prelude::*;
use ui::{use_auth, use_backend, use_query_client, use_toast, LessonDraft};

use super::lesson_form::LessonForm;
use crate::Route;

#[component]
pub fn AddLesson() -> Element {
    let auth = use_auth();
    let backend = use_backend();
    let lists = use_query_client::<Vec<Lesson>>();
    let toast = use_toast();
    let nav = use_navigator();
    let mut busy = use_signal(|| false);

    let handle_submit = move |draft: LessonDraft| {
        let Some(user) = auth().user else {
            return;
        };
        let backend = backend.clone();
        let lists = lists.clone();
        spawn(async move {
            busy.set(true);
            let lesson = draft.into_new_lesson(&user);
            match backend.create_lesson(&lesson).await {
                Ok(created) => {
                    tracing::info!(id = ?created.inserted_id, "lesson created");
                    lists.invalidate_lesson_lists();
                    toast.success("Lesson published");
                    nav.push(Route::MyLessons {});
                }
                Err(err) => {
                    busy.set(false);
                    toast.error(format!("Could not save the lesson: {err}"));
                }
            }
        });
    };

    rsx! {
        h1 { class: "text-3xl font-bold mb-6", "Add a lesson" }
        LessonForm {
            initial: LessonDraft::default(),
            submit_label: "Publish lesson",
            busy: busy(),
            on_submit: handle_submit,
        }
    }
}
