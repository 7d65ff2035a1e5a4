//! Authentication context, role resolution and sign-in actions for the UI.
//!
//! [`AuthProvider`] owns the single [`Session`] shared by the backend client and
//! publishes four contexts:
//!
//! - `Signal<AuthState>` — who is signed in ([`use_auth`])
//! - `Signal<Lookup<Role>>` — the role resolved for that email ([`use_role`])
//! - `Signal<Lookup<bool>>` — the premium flag ([`use_premium`])
//! - [`AuthActions`] — sign in, register, profile update, sign out
//!
//! The role and premium lookups re-run whenever the signed-in email changes and
//! go back to [`Lookup::Loading`] while in flight. When the backend rejects the
//! token the session's teardown listener marks the state expired and sends the
//! browser to `/login` once, carrying the page the user was on.

use api::auth::{IdentityClient, IdentitySession, Session};
use api::{ApiClient, ApiError, HttpTransport, NewUser, ProfileUpdate, Role};
use dioxus::prelude::*;
use serde::{Deserialize, Serialize};
use store::ClientConfig;

use crate::browser;
use crate::guard::login_return_path;
use crate::persist::{self, PersistedSession};

/// Backend client used by every view.
pub type Backend = ApiClient<HttpTransport>;
/// Identity provider client.
pub type Identity = IdentityClient<HttpTransport>;

/// The signed-in account as the UI shows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub email: String,
    pub name: Option<String>,
    pub photo_url: Option<String>,
}

impl SessionUser {
    /// Get display name, falling back to email if name is not set.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.email,
        }
    }
}

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<SessionUser>,
    pub loading: bool,
    /// The backend ended the session and the login redirect is under way.
    pub expired: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
            expired: false,
        }
    }
}

impl AuthState {
    pub fn signed_in(user: SessionUser) -> Self {
        Self {
            user: Some(user),
            loading: false,
            expired: false,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            user: None,
            loading: false,
            expired: false,
        }
    }

    pub fn expired() -> Self {
        Self {
            expired: true,
            ..Self::signed_out()
        }
    }

    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.email.as_str())
    }
}

/// A per-user value fetched from the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Loading,
    Ready { email: String, value: T },
}

impl<T> Default for Lookup<T> {
    fn default() -> Self {
        Self::Loading
    }
}

impl<T> Lookup<T> {
    /// The value, but only if it was resolved for `email`.
    ///
    /// A lookup left over from a previous account counts as still loading.
    pub fn value_for(&self, email: &str) -> Option<&T> {
        match self {
            Lookup::Ready { email: owner, value } if owner == email => Some(value),
            _ => None,
        }
    }
}

/// Whether the signed-in user has been resolved as an admin.
pub fn is_admin(auth: &AuthState, role: &Lookup<Role>) -> bool {
    auth.email()
        .and_then(|email| role.value_for(email))
        .is_some_and(|r| r.is_admin())
}

/// Whether the signed-in user has been resolved as premium.
pub fn is_premium(auth: &AuthState, premium: &Lookup<bool>) -> bool {
    auth.email()
        .and_then(|email| premium.value_for(email))
        .copied()
        .unwrap_or(false)
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

pub fn use_role() -> Signal<Lookup<Role>> {
    use_context::<Signal<Lookup<Role>>>()
}

pub fn use_premium() -> Signal<Lookup<bool>> {
    use_context::<Signal<Lookup<bool>>>()
}

pub fn use_backend() -> Backend {
    use_context::<Backend>()
}

pub fn use_auth_actions() -> AuthActions {
    use_context::<AuthActions>()
}

/// Sign-in flows and session mutations, shared through context.
#[derive(Clone)]
pub struct AuthActions {
    backend: Backend,
    identity: Identity,
    state: Signal<AuthState>,
    premium_epoch: Signal<u64>,
}

impl AuthActions {
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SessionUser, ApiError> {
        let session = self.identity.sign_in_with_password(email, password).await?;
        self.establish(session).await
    }

    /// Create the account, set its display name and photo, and sign in.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        photo_url: Option<String>,
    ) -> Result<SessionUser, ApiError> {
        let mut session = self.identity.sign_up(email, password).await?;
        match self
            .identity
            .update_profile(&session.id_token, name, photo_url.as_deref())
            .await
        {
            Ok(profile) => {
                if let Some(token) = profile.id_token {
                    session.id_token = token;
                }
            }
            Err(err) => tracing::warn!(%err, "account created but profile update failed"),
        }
        session.display_name = Some(name.to_string());
        session.photo_url = photo_url;
        self.establish(session).await
    }

    /// Finish the Google redirect flow with the token from the URL fragment.
    pub async fn sign_in_with_google(
        &self,
        google_id_token: &str,
        request_uri: &str,
    ) -> Result<SessionUser, ApiError> {
        let session = self
            .identity
            .sign_in_with_google(google_id_token, request_uri)
            .await?;
        self.establish(session).await
    }

    async fn establish(&self, session: IdentitySession) -> Result<SessionUser, ApiError> {
        let user = SessionUser {
            email: session.email,
            name: session.display_name,
            photo_url: session.photo_url,
        };
        self.backend.session().begin(session.id_token.clone());
        persist::save_session(&PersistedSession {
            token: session.id_token,
            user: user.clone(),
        });
        let mut state = self.state;
        state.set(AuthState::signed_in(user.clone()));
        tracing::info!(email = %user.email, "signed in");

        let record = NewUser {
            email: user.email.clone(),
            name: user.name.clone(),
            photo_url: user.photo_url.clone(),
        };
        if let Err(err) = self.backend.save_user(&record).await {
            tracing::warn!(%err, "could not save user record");
            if err.is_unauthorized() {
                return Err(err);
            }
        }
        Ok(user)
    }

    /// Update display name and photo with the identity provider and the backend.
    pub async fn update_profile(
        &self,
        name: &str,
        photo_url: Option<String>,
    ) -> Result<SessionUser, ApiError> {
        let current = self
            .state
            .peek()
            .user
            .clone()
            .ok_or_else(|| ApiError::Invalid("You are not signed in".to_string()))?;
        let session = self.backend.session();
        let token = session
            .token()
            .ok_or_else(|| ApiError::Invalid("You are not signed in".to_string()))?;

        let profile = self
            .identity
            .update_profile(&token, name, photo_url.as_deref())
            .await?;
        if let Some(token) = profile.id_token {
            session.replace_token(token);
        }

        self.backend
            .update_profile(&ProfileUpdate {
                email: current.email.clone(),
                name: name.to_string(),
                photo_url: photo_url.clone(),
            })
            .await?;

        let user = SessionUser {
            name: Some(name.to_string()),
            photo_url,
            ..current
        };
        if let Some(token) = session.token() {
            persist::save_session(&PersistedSession {
                token,
                user: user.clone(),
            });
        }
        let mut state = self.state;
        state.set(AuthState::signed_in(user.clone()));
        Ok(user)
    }

    /// Voluntary logout.
    pub fn sign_out(&self) {
        self.backend.session().end();
        persist::clear_session();
        let mut state = self.state;
        state.set(AuthState::signed_out());
        tracing::info!("signed out");
    }

    /// Re-fetch the premium flag, e.g. after a completed payment.
    pub fn refresh_premium(&self) {
        let mut epoch = self.premium_epoch;
        *epoch.write() += 1;
    }
}

/// Where a forced sign-out sends the browser: the login page, asked to return
/// to `current` afterwards.
pub fn expired_login_href(current: &str) -> String {
    let target = login_return_path(current);
    if target == "/" {
        "/login".to_string()
    } else {
        format!("/login?redirect={}", urlencoding::encode(&target))
    }
}

/// Sign out and navigate when the backend rejects the session.
///
/// The session fires its listeners once per login, so `navigate` runs once per
/// teardown no matter how many requests failed. Guards see
/// [`AuthState::expired`] and leave the navigation to this handler.
fn install_teardown(
    session: &Session,
    set_state: impl Fn(AuthState) + 'static,
    current_path: impl Fn() -> String + 'static,
    navigate: impl Fn(&str) + 'static,
) {
    session.on_teardown(move |teardown| {
        tracing::warn!(status = teardown.status, "backend rejected the session, signing out");
        persist::clear_session();
        set_state(AuthState::expired());
        navigate(&expired_login_href(&current_path()));
    });
}

fn restore(session: &Session) -> AuthState {
    match persist::load_session() {
        Some(saved) => {
            session.begin(saved.token);
            AuthState::signed_in(saved.user)
        }
        None => AuthState::signed_out(),
    }
}

/// Provider component that manages authentication state.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(config: ClientConfig, children: Element) -> Element {
    let session = use_hook(Session::new);
    let backend = use_context_provider(|| Backend::from_config(&config, session.clone()));
    let identity = use_hook(|| Identity::from_config(&config));

    let auth_state = use_signal(|| restore(&session));
    let mut role = use_signal(Lookup::<Role>::default);
    let mut premium = use_signal(Lookup::<bool>::default);
    let premium_epoch = use_signal(|| 0u64);

    use_hook(|| {
        install_teardown(
            &session,
            move |next| {
                let mut state = auth_state;
                state.set(next);
            },
            browser::current_path,
            browser::redirect,
        );
    });

    // Resolve the role whenever the signed-in account changes
    let role_backend = backend.clone();
    let _role_loader = use_resource(move || {
        let email = auth_state.read().email().map(str::to_string);
        let backend = role_backend.clone();
        async move {
            role.set(Lookup::Loading);
            let Some(email) = email else {
                return;
            };
            let value = match backend.role_of(&email).await {
                Ok(value) => value,
                Err(err) => {
                    tracing::warn!(%err, "role lookup failed, treating account as user");
                    Role::User
                }
            };
            role.set(Lookup::Ready { email, value });
        }
    });

    let premium_backend = backend.clone();
    let _premium_loader = use_resource(move || {
        let email = auth_state.read().email().map(str::to_string);
        let _epoch = premium_epoch();
        let backend = premium_backend.clone();
        async move {
            premium.set(Lookup::Loading);
            let Some(email) = email else {
                return;
            };
            let value = match backend.is_premium(&email).await {
                Ok(value) => value,
                Err(err) => {
                    tracing::warn!(%err, "premium lookup failed");
                    false
                }
            };
            premium.set(Lookup::Ready { email, value });
        }
    });

    use_context_provider(|| auth_state);
    use_context_provider(|| role);
    use_context_provider(|| premium);
    use_context_provider(|| AuthActions {
        backend: backend.clone(),
        identity: identity.clone(),
        state: auth_state,
        premium_epoch,
    });

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let actions = use_auth_actions();

    let onclick = move |_| {
        actions.sign_out();
        browser::redirect("/");
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> SessionUser {
        SessionUser {
            email: email.to_string(),
            name: None,
            photo_url: None,
        }
    }

    #[test]
    fn test_lookup_ignores_other_account() {
        let lookup = Lookup::Ready {
            email: "old@example.com".to_string(),
            value: Role::Admin,
        };
        assert_eq!(lookup.value_for("old@example.com"), Some(&Role::Admin));
        assert_eq!(lookup.value_for("new@example.com"), None);
        assert_eq!(Lookup::<Role>::default().value_for("old@example.com"), None);
    }

    #[test]
    fn test_is_admin_and_premium() {
        let auth = AuthState::signed_in(user("ana@example.com"));
        let admin = Lookup::Ready {
            email: "ana@example.com".to_string(),
            value: Role::Admin,
        };
        assert!(is_admin(&auth, &admin));
        assert!(!is_admin(&AuthState::signed_out(), &admin));
        assert!(!is_admin(&auth, &Lookup::Loading));

        let premium = Lookup::Ready {
            email: "ana@example.com".to_string(),
            value: true,
        };
        assert!(is_premium(&auth, &premium));
        assert!(!is_premium(&auth, &Lookup::Loading));
    }

    #[test]
    fn test_teardown_navigates_once_with_return_path() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let session = Session::new();
        session.begin("tok");
        let states = Rc::new(RefCell::new(Vec::new()));
        let hrefs = Rc::new(RefCell::new(Vec::new()));
        let (s, h) = (Rc::clone(&states), Rc::clone(&hrefs));
        install_teardown(
            &session,
            move |next| s.borrow_mut().push(next),
            || "/dashboard/my-lessons".to_string(),
            move |href| h.borrow_mut().push(href.to_string()),
        );

        let generation = session.ticket().generation;
        assert!(session.expire(generation, 401));
        assert!(!session.expire(generation, 401));
        assert!(!session.expire(generation, 403));

        assert_eq!(*hrefs.borrow(), ["/login?redirect=%2Fdashboard%2Fmy-lessons"]);
        assert_eq!(*states.borrow(), [AuthState::expired()]);
    }

    #[test]
    fn test_expired_login_href_skips_useless_targets() {
        assert_eq!(expired_login_href("/"), "/login");
        assert_eq!(expired_login_href("/login?redirect=%2Fx"), "/login");
        assert_eq!(
            expired_login_href("/lessons/42"),
            "/login?redirect=%2Flessons%2F42"
        );
    }

    #[test]
    fn test_display_name_fallback() {
        let mut u = user("bo@example.com");
        assert_eq!(u.display_name(), "bo@example.com");
        u.name = Some("Bo".to_string());
        assert_eq!(u.display_name(), "Bo");
    }
}
