//! This crate contains all shared UI for the workspace.
//!
//! Route-agnostic pieces live here: the auth/role/premium context, guard
//! decisions, cached queries, list filtering, form validation and the small
//! components every page reuses. Anything that needs the app's `Route` enum
//! lives in the `web` package.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_brands_icons::FaGoogle;
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod auth;
pub use auth::{
    is_admin, is_premium, use_auth, use_auth_actions, use_backend, use_premium, use_role,
    AuthActions, AuthProvider, AuthState, Backend, Identity, Lookup, LogoutButton, SessionUser,
};

pub mod browser;

mod components;
pub use components::{Avatar, Badge, EmptyState, LoadError, Pager, Spinner, StatCard};

mod debounce;
pub use debounce::{sleep, use_debounced, Debouncer};

pub mod dialog;
pub use dialog::ConfirmDialog;

pub mod filter;
pub use filter::{paginate, LessonFilter, Page, SortOrder};

pub mod guard;
pub use guard::{login_return_path, resolve_guard, GuardKind, GuardState};

pub mod persist;

pub mod query;
pub use query::{keys, use_query, use_query_client, QueryClient, QueryProvider};

mod theme;
pub use theme::{apply_theme, load_theme_from_storage, ThemeSignal, ThemeToggle};

mod toast;
pub use toast::{use_toast, ToastHost, ToastKind, Toasts};

pub mod validation;
pub use validation::LessonDraft;
