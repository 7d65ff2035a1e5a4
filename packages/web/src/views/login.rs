//! Login page: email/password and Google sign-in.

use api::auth::google::{self, PendingSignIn};
use dioxus::prelude::*;
use store::ClientConfig;
use ui::icons::FaGoogle;
use ui::validation::validate_login;
use ui::{browser, login_return_path, persist, use_auth, use_auth_actions, use_toast, Icon};

use crate::Route;

#[component]
pub fn Login(redirect: String) -> Element {
    let auth = use_auth();
    let actions = use_auth_actions();
    let config = use_context::<ClientConfig>();
    let toast = use_toast();
    let nav = use_navigator();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let target = login_return_path(&redirect);

    // Already signed in: go where the user was heading
    if !auth().loading && auth().user.is_some() && !loading() {
        nav.replace(target.as_str());
    }

    let submit_target = target.clone();
    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let actions = actions.clone();
        let target = submit_target.clone();
        spawn(async move {
            error.set(None);
            let e = email().trim().to_string();
            let p = password();
            if let Err(msg) = validate_login(&e, &p) {
                error.set(Some(msg));
                return;
            }

            loading.set(true);
            match actions.sign_in_with_password(&e, &p).await {
                Ok(user) => {
                    toast.success(format!("Welcome back, {}", user.display_name()));
                    nav.replace(target.as_str());
                }
                Err(err) => {
                    loading.set(false);
                    error.set(Some(err.to_string()));
                }
            }
        });
    };

    let google_config = config.clone();
    let google_target = target.clone();
    let handle_google = move |_| {
        let (Some(state), Some(nonce)) = (browser::random_token(), browser::random_token()) else {
            error.set(Some("This browser cannot start a secure Google sign-in".to_string()));
            return;
        };
        let pending = PendingSignIn {
            state,
            nonce,
            return_to: google_target.clone(),
        };
        if !persist::save_google_sign_in(&pending) {
            error.set(Some("Google sign-in needs session storage enabled".to_string()));
            return;
        }
        match google::authorization_url(
            &google_config.google.client_id,
            &google_config.google.redirect_uri,
            &pending,
        ) {
            Ok(url) => browser::redirect(&url),
            Err(err) => error.set(Some(err.to_string())),
        }
    };

    rsx! {
        div {
            class: "flex justify-center py-10",
            div {
                class: "card w-full max-w-sm bg-base-100 shadow-xl",
                form {
                    class: "card-body gap-3",
                    onsubmit: handle_login,

                    h1 { class: "text-2xl font-bold text-center", "Welcome back" }
                    p { class: "view-muted text-center", "Log in to continue your journey" }

                    if let Some(err) = error() {
                        div { class: "alert alert-error text-sm", "{err}" }
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
                        r#type: "password",
                        placeholder: "Password",
                        autocomplete: "current-password",
                        value: password(),
                        oninput: move |evt: FormEvent| password.set(evt.value()),
                    }
                    button {
                        class: "btn btn-primary w-full",
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Logging in..." } else { "Login" }
                    }

                    if config.google_enabled() {
                        div { class: "divider", "or" }
                        button {
                            class: "btn btn-outline w-full gap-2",
                            r#type: "button",
                            disabled: loading(),
                            onclick: handle_google,
                            Icon { icon: FaGoogle, width: 16, height: 16 }
                            "Continue with Google"
                        }
                    }

                    p {
                        class: "text-sm text-center mt-2",
                        "New here? "
                        Link { to: Route::Register {}, class: "link link-primary", "Create an account" }
                    }
                }
            }
        }
    }
}
