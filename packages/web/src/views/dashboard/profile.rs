use api::Lesson;
use dioxus::prelude::*;
use ui::validation::{validate_display_name, validate_optional_url};
use ui::{
    is_premium, keys, use_auth, use_auth_actions, use_backend, use_premium, use_query,
    use_query_client, use_toast, Avatar, Badge, LessonFilter, SortOrder,
};

use crate::components::LessonGrid;

#[component]
pub fn Profile() -> Element {
    let auth = use_auth();
    let premium = use_premium();
    let actions = use_auth_actions();
    let backend = use_backend();
    let lists = use_query_client::<Vec<Lesson>>();
    let toast = use_toast();

    let current = auth().user;
    let mut name = use_signal(|| {
        current
            .as_ref()
            .and_then(|u| u.name.clone())
            .unwrap_or_default()
    });
    let mut photo = use_signal(|| {
        current
            .as_ref()
            .and_then(|u| u.photo_url.clone())
            .unwrap_or_default()
    });
    let mut error = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);

    let email = move || auth().email().map(str::to_string).unwrap_or_default();
    let lessons = use_query(
        move || keys::my_lessons(&email()),
        move |key| {
            let backend = backend.clone();
            let email = key.params().first().cloned().unwrap_or_default();
            async move { backend.my_lessons(&email).await }
        },
    );

    let handle_save = move |evt: FormEvent| {
        evt.prevent_default();
        let new_name = name().trim().to_string();
        let new_photo = photo().trim().to_string();
        if let Err(msg) =
            validate_display_name(&new_name).and_then(|()| validate_optional_url(&new_photo))
        {
            error.set(Some(msg));
            return;
        }
        error.set(None);
        let actions = actions.clone();
        let lists = lists.clone();
        spawn(async move {
            saving.set(true);
            let photo_url = (!new_photo.is_empty()).then_some(new_photo);
            match actions.update_profile(&new_name, photo_url).await {
                Ok(_) => {
                    // Author name and photo are denormalised onto lessons
                    lists.invalidate_lesson_lists();
                    toast.success("Profile updated");
                }
                Err(err) => toast.error(format!("Could not update the profile: {err}")),
            }
            saving.set(false);
        });
    };

    let Some(user) = current else {
        return rsx! {};
    };
    let member_premium = is_premium(&auth.read(), &premium.read());

    let public_lessons = match lessons() {
        Some(Ok(all)) => {
            let mut public = LessonFilter::public_feed().apply(&all);
            SortOrder::Newest.sort(&mut public);
            Some(public)
        }
        _ => None,
    };

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
                    if member_premium {
                        Badge { label: "Premium ⭐", tone: "badge-warning" }
                    }
                }
            }

            form {
                class: "card bg-base-200 p-6 flex flex-col gap-4 max-w-lg",
                onsubmit: handle_save,
                h2 { class: "text-xl font-bold", "Edit profile" }
                if let Some(err) = error() {
                    div { class: "alert alert-error text-sm", "{err}" }
                }
                label {
                    class: "form-control",
                    span { class: "label-text mb-1", "Display name" }
                    input {
                        class: "input input-bordered",
                        r#type: "text",
                        value: name(),
                        oninput: move |evt: FormEvent| name.set(evt.value()),
                    }
                }
                label {
                    class: "form-control",
                    span { class: "label-text mb-1", "Photo URL" }
                    input {
                        class: "input input-bordered",
                        r#type: "url",
                        value: photo(),
                        oninput: move |evt: FormEvent| photo.set(evt.value()),
                    }
                }
                button {
                    class: "btn btn-primary self-start",
                    r#type: "submit",
                    disabled: saving(),
                    if saving() { "Saving..." } else { "Save" }
                }
            }

            section {
                h2 { class: "text-xl font-bold mb-4", "My public lessons" }
                if let Some(public) = public_lessons {
                    LessonGrid {
                        lessons: public,
                        empty: "You have no public lessons yet.",
                    }
                }
            }
        }
    }
}
