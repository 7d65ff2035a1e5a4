//! The add/update lesson form.

use api::{AccessLevel, Visibility, CATEGORIES, EMOTIONAL_TONES};
use dioxus::prelude::*;
use ui::{is_premium, use_auth, use_premium, LessonDraft};

use crate::Route;

/// Validated form; `on_submit` only fires with a draft that passed validation.
#[component]
pub fn LessonForm(
    initial: LessonDraft,
    submit_label: String,
    busy: bool,
    on_submit: EventHandler<LessonDraft>,
) -> Element {
    let auth = use_auth();
    let premium = use_premium();
    let mut draft = use_signal(|| initial.clone());
    let mut error = use_signal(|| Option::<String>::None);

    let author_premium = is_premium(&auth.read(), &premium.read());

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let current = draft();
        match current.validate(author_premium) {
            Ok(()) => {
                error.set(None);
                on_submit.call(current);
            }
            Err(msg) => error.set(Some(msg)),
        }
    };

    let d = draft();

    rsx! {
        form {
            class: "flex flex-col gap-4 max-w-2xl",
            onsubmit: handle_submit,

            if let Some(err) = error() {
                div { class: "alert alert-error text-sm", "{err}" }
            }

            label {
                class: "form-control",
                span { class: "label-text mb-1", "Title" }
                input {
                    class: "input input-bordered",
                    r#type: "text",
                    value: d.title.clone(),
                    oninput: move |evt: FormEvent| draft.write().title = evt.value(),
                }
            }

            label {
                class: "form-control",
                span { class: "label-text mb-1", "Description" }
                textarea {
                    class: "textarea textarea-bordered",
                    rows: "8",
                    value: d.description.clone(),
                    oninput: move |evt: FormEvent| draft.write().description = evt.value(),
                }
            }

            div {
                class: "grid gap-4 sm:grid-cols-2",
                label {
                    class: "form-control",
                    span { class: "label-text mb-1", "Category" }
                    select {
                        class: "select select-bordered",
                        value: d.category.clone(),
                        onchange: move |evt: FormEvent| draft.write().category = evt.value(),
                        option { value: "", disabled: true, "Choose a category" }
                        for c in CATEGORIES {
                            option { key: "{c}", value: "{c}", "{c}" }
                        }
                    }
                }
                label {
                    class: "form-control",
                    span { class: "label-text mb-1", "Emotional tone" }
                    select {
                        class: "select select-bordered",
                        value: d.emotional_tone.clone(),
                        onchange: move |evt: FormEvent| draft.write().emotional_tone = evt.value(),
                        option { value: "", disabled: true, "Choose a tone" }
                        for t in EMOTIONAL_TONES {
                            option { key: "{t}", value: "{t}", "{t}" }
                        }
                    }
                }
                label {
                    class: "form-control",
                    span { class: "label-text mb-1", "Visibility" }
                    select {
                        class: "select select-bordered",
                        value: d.visibility.as_str(),
                        onchange: move |evt: FormEvent| {
                            if let Some(v) = Visibility::parse(&evt.value()) {
                                draft.write().visibility = v;
                            }
                        },
                        for v in Visibility::ALL {
                            option { key: "{v.as_str()}", value: v.as_str(), "{v.label()}" }
                        }
                    }
                }
                label {
                    class: "form-control",
                    span { class: "label-text mb-1", "Access level" }
                    select {
                        class: "select select-bordered",
                        value: d.access_level.as_str(),
                        onchange: move |evt: FormEvent| {
                            if let Some(a) = AccessLevel::parse(&evt.value()) {
                                draft.write().access_level = a;
                            }
                        },
                        for a in AccessLevel::ALL {
                            option {
                                key: "{a.as_str()}",
                                value: a.as_str(),
                                disabled: a == AccessLevel::Premium && !author_premium,
                                "{a.label()}"
                            }
                        }
                    }
                    if !author_premium {
                        span {
                            class: "label-text-alt mt-1",
                            "Premium lessons are for Premium members. "
                            Link { to: Route::Pricing {}, class: "link link-primary", "Upgrade" }
                        }
                    }
                }
            }

            label {
                class: "form-control",
                span { class: "label-text mb-1", "Image URL (optional)" }
                input {
                    class: "input input-bordered",
                    r#type: "url",
                    value: d.image.clone(),
                    oninput: move |evt: FormEvent| draft.write().image = evt.value(),
                }
            }

            button {
                class: "btn btn-primary self-start",
                r#type: "submit",
                disabled: busy,
                if busy { "Saving..." } else { "{submit_label}" }
            }
        }
    }
}
