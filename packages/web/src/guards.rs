//! Router layouts enforcing the sign-in and admin preconditions.

use dioxus::prelude::*;
use ui::{login_return_path, resolve_guard, use_auth, use_role, GuardKind, GuardState, Spinner};

use crate::views::Forbidden;
use crate::Route;

/// Signed-in users only; everyone else goes to `/login?redirect=<here>`.
#[component]
pub fn PrivateGuard() -> Element {
    render_guard(GuardKind::Authenticated)
}

/// Admins only. Signed-in non-admins see the access-denied view.
#[component]
pub fn AdminGuard() -> Element {
    render_guard(GuardKind::Admin)
}

fn render_guard(kind: GuardKind) -> Element {
    let auth = use_auth();
    let role = use_role();
    let route = use_route::<Route>();
    let nav = use_navigator();

    let state = resolve_guard(kind, &auth.read(), &role.read());
    match state {
        GuardState::Loading => rsx! {
            Spinner {}
        },
        GuardState::Allowed => rsx! {
            Outlet::<Route> {}
        },
        GuardState::RedirectLogin => {
            let redirect = login_return_path(&route.to_string());
            tracing::debug!(%redirect, "not signed in, redirecting to login");
            nav.replace(Route::Login { redirect });
            rsx! {}
        }
        GuardState::Forbidden => rsx! {
            Forbidden {}
        },
    }
}
