//! Route guard decisions.
//!
//! A guard instance is always in one of four states:
//!
//! ```text
//! Loading ──► Allowed
//!         ├─► RedirectLogin   (no session)
//!         └─► Forbidden       (admin guard, resolved role is not admin)
//! ```
//!
//! `Loading` is re-entered whenever the session or the role lookup re-fetches.
//! The router layouts in the web crate render a spinner, the wrapped outlet,
//! a navigation to `/login`, or the access-denied view accordingly.

use api::Role;

use crate::auth::{AuthState, Lookup};

/// Which precondition a guard enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardKind {
    /// Any signed-in user.
    Authenticated,
    /// A signed-in user whose resolved role is `admin`.
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Loading,
    Allowed,
    RedirectLogin,
    Forbidden,
}

/// Decide what a guard renders for the current auth and role state.
pub fn resolve_guard(kind: GuardKind, auth: &AuthState, role: &Lookup<Role>) -> GuardState {
    // An expired session is already being sent to login
    if auth.loading || auth.expired {
        return GuardState::Loading;
    }
    let Some(email) = auth.email() else {
        return GuardState::RedirectLogin;
    };
    match kind {
        GuardKind::Authenticated => GuardState::Allowed,
        GuardKind::Admin => match role.value_for(email) {
            None => GuardState::Loading,
            Some(role) if role.is_admin() => GuardState::Allowed,
            Some(_) => GuardState::Forbidden,
        },
    }
}

/// Sanitise a post-login return path.
///
/// Only same-origin absolute paths are honoured; anything else, and the login
/// and register pages themselves, fall back to `/`.
pub fn login_return_path(from: &str) -> String {
    let from = from.trim();
    let is_local = from.starts_with('/') && !from.starts_with("//") && !from.contains("://");
    let is_auth_page = ["/login", "/register"].iter().any(|page| {
        from == *page
            || from.starts_with(&format!("{page}?"))
            || from.starts_with(&format!("{page}/"))
    });
    if is_local && !is_auth_page {
        from.to_string()
    } else {
        "/".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SessionUser;

    const GUARDED: &[&str] = &[
        "/dashboard",
        "/dashboard/add-lesson",
        "/dashboard/my-lessons",
        "/dashboard/admin/manage-users",
        "/lessons/65f0a1",
        "/pricing",
    ];

    fn signed_in(email: &str) -> AuthState {
        AuthState::signed_in(SessionUser {
            email: email.to_string(),
            name: None,
            photo_url: None,
        })
    }

    fn role(email: &str, value: Role) -> Lookup<Role> {
        Lookup::Ready {
            email: email.to_string(),
            value,
        }
    }

    #[test]
    fn test_unauthenticated_always_redirects() {
        let auth = AuthState::signed_out();
        for kind in [GuardKind::Authenticated, GuardKind::Admin] {
            for lookup in [Lookup::Loading, role("x@example.com", Role::Admin)] {
                assert_eq!(resolve_guard(kind, &auth, &lookup), GuardState::RedirectLogin);
            }
        }
        for path in GUARDED {
            assert_eq!(login_return_path(path), *path);
        }
    }

    #[test]
    fn test_non_admin_is_forbidden_never_allowed() {
        let auth = signed_in("bo@example.com");
        let lookup = role("bo@example.com", Role::User);
        assert_eq!(
            resolve_guard(GuardKind::Admin, &auth, &lookup),
            GuardState::Forbidden
        );
        assert_eq!(
            resolve_guard(GuardKind::Authenticated, &auth, &lookup),
            GuardState::Allowed
        );
    }

    #[test]
    fn test_admin_allowed() {
        let auth = signed_in("root@example.com");
        assert_eq!(
            resolve_guard(GuardKind::Admin, &auth, &role("root@example.com", Role::Admin)),
            GuardState::Allowed
        );
    }

    #[test]
    fn test_loading_states() {
        assert_eq!(
            resolve_guard(GuardKind::Authenticated, &AuthState::default(), &Lookup::Loading),
            GuardState::Loading
        );

        // Role still in flight
        let auth = signed_in("root@example.com");
        assert_eq!(
            resolve_guard(GuardKind::Admin, &auth, &Lookup::Loading),
            GuardState::Loading
        );

        // Role resolved for a previous account
        assert_eq!(
            resolve_guard(GuardKind::Admin, &auth, &role("bo@example.com", Role::User)),
            GuardState::Loading
        );

        // A rejected session is already on its way to login
        for kind in [GuardKind::Authenticated, GuardKind::Admin] {
            assert_eq!(
                resolve_guard(kind, &AuthState::expired(), &Lookup::Loading),
                GuardState::Loading
            );
        }

        // The authenticated guard does not wait for the role
        assert_eq!(
            resolve_guard(GuardKind::Authenticated, &auth, &Lookup::Loading),
            GuardState::Allowed
        );
    }

    #[test]
    fn test_return_path_rejects_foreign_targets() {
        assert_eq!(login_return_path("https://evil.example"), "/");
        assert_eq!(login_return_path("//evil.example/x"), "/");
        assert_eq!(login_return_path("dashboard"), "/");
        assert_eq!(login_return_path(""), "/");
        assert_eq!(login_return_path("/login"), "/");
        assert_eq!(login_return_path("/login?redirect=%2Fx"), "/");
        assert_eq!(login_return_path("/lessons?page=2"), "/lessons?page=2");
        assert_eq!(login_return_path("/loginhelp"), "/loginhelp");
    }
}
