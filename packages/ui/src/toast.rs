//! Transient notifications for mutation results, shown through the
//! `dioxus-primitives` toast stack.

use dioxus::prelude::*;
use dioxus_primitives::toast::{self, ToastOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

/// Handle to the toast stack. Copy it into event handlers freely.
#[derive(Clone, Copy)]
pub struct Toasts {
    show: Callback<(ToastKind, String)>,
}

impl Toasts {
    pub fn success(&self, message: impl Into<String>) {
        self.show.call((ToastKind::Success, message.into()));
    }

    /// Failed actions are logged as well as shown.
    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!(%message, "action failed");
        self.show.call((ToastKind::Error, message));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.show.call((ToastKind::Info, message.into()));
    }
}

pub fn use_toast() -> Toasts {
    let stack = toast::use_toast();
    let show = use_callback(move |(kind, message): (ToastKind, String)| match kind {
        ToastKind::Success => {
            stack.success(message, ToastOptions::new());
        }
        ToastKind::Error => {
            stack.error(message, ToastOptions::new());
        }
        ToastKind::Info => {
            stack.info(message, ToastOptions::new());
        }
    });
    Toasts { show }
}

/// Provides the toast stack to its children.
#[component]
pub fn ToastHost(children: Element) -> Element {
    rsx! {
        toast::ToastProvider {
            {children}
        }
    }
}
