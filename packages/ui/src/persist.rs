//! Browser storage: the session and theme in `localStorage`, an unfinished
//! Google sign-in in `sessionStorage`.
//!
//! On native targets (tests, tooling) every read misses and every write is a
//! no-op, so callers never need their own `cfg` gates.

use api::auth::google::PendingSignIn;
use serde::{Deserialize, Serialize};

use crate::auth::SessionUser;

const SESSION_KEY: &str = "dll.session";
const GOOGLE_SIGN_IN_KEY: &str = "dll.google_sign_in";
pub(crate) const THEME_KEY: &str = "dll.theme";

/// What survives a page reload: the identity token and the profile it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub token: String,
    pub user: SessionUser,
}

pub fn load_session() -> Option<PersistedSession> {
    let raw = get_item(SESSION_KEY)?;
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(err) => {
            tracing::warn!(%err, "discarding unreadable stored session");
            remove_item(SESSION_KEY);
            None
        }
    }
}

pub fn save_session(session: &PersistedSession) {
    match serde_json::to_string(session) {
        Ok(raw) => set_item(SESSION_KEY, &raw),
        Err(err) => tracing::error!(%err, "failed to serialise session"),
    }
}

pub fn clear_session() {
    remove_item(SESSION_KEY);
}

/// Remember a Google sign-in for the callback page. `false` if it could not be
/// stored, in which case the callback would be rejected anyway.
pub fn save_google_sign_in(pending: &PendingSignIn) -> bool {
    match serde_json::to_string(pending) {
        Ok(raw) => set_tab_item(GOOGLE_SIGN_IN_KEY, &raw),
        Err(err) => {
            tracing::error!(%err, "failed to serialise google sign-in");
            false
        }
    }
}

/// The pending Google sign-in, removed so a callback is accepted at most once.
pub fn take_google_sign_in() -> Option<PendingSignIn> {
    let raw = take_tab_item(GOOGLE_SIGN_IN_KEY)?;
    serde_json::from_str(&raw).ok()
}

#[cfg(target_arch = "wasm32")]
fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn get_item(key: &str) -> Option<String> {
    storage()?.get_item(key).ok().flatten()
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn set_item(key: &str, value: &str) {
    if let Some(storage) = storage() {
        if storage.set_item(key, value).is_err() {
            tracing::warn!(key, "localStorage write failed");
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn remove_item(key: &str) {
    if let Some(storage) = storage() {
        let _ = storage.remove_item(key);
    }
}

#[cfg(target_arch = "wasm32")]
fn set_tab_item(key: &str, value: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.session_storage().ok().flatten())
        .is_some_and(|storage| storage.set_item(key, value).is_ok())
}

#[cfg(target_arch = "wasm32")]
fn take_tab_item(key: &str) -> Option<String> {
    let storage = web_sys::window()?.session_storage().ok().flatten()?;
    let value = storage.get_item(key).ok().flatten();
    let _ = storage.remove_item(key);
    value
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn get_item(_key: &str) -> Option<String> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn set_item(_key: &str, _value: &str) {}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn remove_item(_key: &str) {}

#[cfg(not(target_arch = "wasm32"))]
fn set_tab_item(_key: &str, _value: &str) -> bool {
    false
}

#[cfg(not(target_arch = "wasm32"))]
fn take_tab_item(_key: &str) -> Option<String> {
    None
}
