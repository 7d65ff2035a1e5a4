use dioxus::prelude::*;

use super::{Footer, Navbar};
use crate::Route;

/// Top-level layout: navbar, the routed page, footer.
#[component]
pub fn Shell() -> Element {
    rsx! {
        div {
            class: "app-shell",
            Navbar {}
            main {
                class: "app-main",
                Outlet::<Route> {}
            }
            Footer {}
        }
    }
}
