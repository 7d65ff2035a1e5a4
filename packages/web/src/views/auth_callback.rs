//! Landing page of the Google redirect. The id token arrives in the fragment.

use api::auth::google;
use dioxus::prelude::*;
use store::ClientConfig;
use ui::{browser, login_return_path, persist, use_auth_actions, use_toast, Spinner};

use crate::Route;

#[component]
pub fn AuthCallback() -> Element {
    let actions = use_auth_actions();
    let config = use_context::<ClientConfig>();
    let toast = use_toast();
    let nav = use_navigator();
    let mut error = use_signal(|| Option::<String>::None);

    use_hook(move || {
        spawn(async move {
            let Some(fragment) = browser::location_hash() else {
                error.set(Some("Google sign-in did not return a token".to_string()));
                return;
            };
            let pending = persist::take_google_sign_in();
            let callback = match google::parse_callback(&fragment)
                .and_then(|callback| callback.verify(pending.as_ref()).map(|()| callback))
            {
                Ok(callback) => callback,
                Err(err) => {
                    error.set(Some(err.to_string()));
                    return;
                }
            };
            let return_to = pending.map(|p| p.return_to).unwrap_or_default();
            match actions
                .sign_in_with_google(&callback.id_token, &config.google.redirect_uri)
                .await
            {
                Ok(user) => {
                    toast.success(format!("Welcome, {}", user.display_name()));
                    let target = login_return_path(&return_to);
                    nav.replace(target.as_str());
                }
                Err(err) => error.set(Some(err.to_string())),
            }
        });
    });

    rsx! {
        match error() {
            Some(err) => rsx! {
                div {
                    class: "flex flex-col items-center gap-4 py-20",
                    div { class: "alert alert-error max-w-md", "{err}" }
                    Link {
                        to: Route::Login { redirect: String::new() },
                        class: "btn btn-primary",
                        "Back to login"
                    }
                }
            },
            None => rsx! {
                Spinner { label: "Signing you in..." }
            },
        }
    }
}
