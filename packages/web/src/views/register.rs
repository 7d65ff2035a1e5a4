//! Registration page view with email/password form.

use dioxus::prelude::*;
use ui::validation::validate_registration;
use ui::{use_auth, use_auth_actions, use_toast};

use crate::Route;

/// Register page component.
#[component]
pub fn Register() -> Element {
    let auth = use_auth();
    let actions = use_auth_actions();
    let toast = use_toast();
    let nav = use_navigator();

    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut photo_url = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // If already logged in, go home
    if !auth().loading && auth().user.is_some() && !loading() {
        nav.replace(Route::Home {});
    }

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let actions = actions.clone();
        spawn(async move {
            error.set(None);

            let n = name().trim().to_string();
            let e = email().trim().to_string();
            let photo = photo_url().trim().to_string();
            let p = password();

            if let Err(msg) = validate_registration(&n, &e, &photo, &p) {
                error.set(Some(msg));
                return;
            }

            loading.set(true);
            let photo = (!photo.is_empty()).then_some(photo);
            match actions.register(&n, &e, &p, photo).await {
                Ok(_) => {
                    toast.success("Account created");
                    nav.replace(Route::Home {});
                }
                Err(err) => {
                    loading.set(false);
                    error.set(Some(err.to_string()));
                }
            }
        });
    };

    rsx! {
        div {
            class: "flex justify-center py-10",
            div {
                class: "card w-full max-w-sm bg-base-100 shadow-xl",
                form {
                    class: "card-body gap-3",
                    onsubmit: handle_register,

                    h1 { class: "text-2xl font-bold text-center", "Create Account" }
                    p { class: "view-muted text-center", "Start preserving your life lessons" }

                    if let Some(err) = error() {
                        div { class: "alert alert-error text-sm", "{err}" }
                    }

                    input {
                        class: "input input-bordered w-full",
                        r#type: "text",
                        placeholder: "Name",
                        value: name(),
                        oninput: move |evt: FormEvent| name.set(evt.value()),
                    }
                    input {
                        class: "input input-bordered w-full",
                        r#type: "email",
                        placeholder: "Email",
                        autocomplete: "email",
                        value: email(),
                        oninput: move |evt: FormEvent| email.set(evt.value()),
                    }
                    input {
                        class: "input input-bordered w-full",
                        r#type: "url",
                        placeholder: "Photo URL (optional)",
                        value: photo_url(),
                        oninput: move |evt: FormEvent| photo_url.set(evt.value()),
                    }
                    input {
                        class: "input input-bordered w-full",
                        r#type: "password",
                        placeholder: "Password",
                        autocomplete: "new-password",
                        value: password(),
                        oninput: move |evt: FormEvent| password.set(evt.value()),
                    }
                    p {
                        class: "text-xs view-muted",
                        "At least 6 characters, with an uppercase and a lowercase letter."
                    }
                    button {
                        class: "btn btn-primary w-full",
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Creating account..." } else { "Register" }
                    }
                    p {
                        class: "text-sm text-center mt-2",
                        "Already have an account? "
                        Link {
                            to: Route::Login { redirect: String::new() },
                            class: "link link-primary",
                            "Log in"
                        }
                    }
                }
            }
        }
    }
}
