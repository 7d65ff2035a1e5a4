//! Modal dialogs built on the `dioxus-primitives` dialog components.

use dioxus::prelude::*;
use dioxus_primitives::alert_dialog::{
    AlertDialogAction, AlertDialogActions, AlertDialogCancel, AlertDialogContent,
    AlertDialogDescription, AlertDialogRoot, AlertDialogTitle,
};
pub use dioxus_primitives::dialog::{DialogContent, DialogDescription, DialogRoot, DialogTitle};

/// Confirmation for a destructive action.
///
/// Mount it while there is something to confirm. `on_close` runs when the
/// dialog is dismissed, including after `on_confirm`.
#[component]
pub fn ConfirmDialog(
    title: String,
    message: String,
    #[props(default = "Delete".to_string())] confirm_label: String,
    on_confirm: EventHandler<()>,
    on_close: EventHandler<()>,
) -> Element {
    rsx! {
        AlertDialogRoot {
            class: "dialog-backdrop",
            open: true,
            on_open_change: move |open: bool| {
                if !open {
                    on_close.call(());
                }
            },
            AlertDialogContent {
                class: "modal-box",
                AlertDialogTitle { class: "font-bold text-lg", "{title}" }
                AlertDialogDescription { class: "py-4", "{message}" }
                AlertDialogActions {
                    class: "modal-action",
                    AlertDialogCancel { class: "btn btn-ghost", "Cancel" }
                    AlertDialogAction {
                        class: "btn btn-error",
                        on_click: move |_| on_confirm.call(()),
                        "{confirm_label}"
                    }
                }
            }
        }
    }
}
