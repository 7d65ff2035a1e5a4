use dioxus::prelude::*;
use ui::icons::{FaBrain, FaHandshake, FaLightbulb, FaSeedling};
use ui::{keys, use_auth, use_backend, use_query, Icon, LoadError, Spinner};

use crate::components::LessonGrid;
use crate::Route;

#[component]
pub fn Home() -> Element {
    let auth = use_auth();
    let backend = use_backend();

    let mut featured = use_query(keys::featured_lessons, move |_| {
        let backend = backend.clone();
        async move { backend.featured_lessons().await }
    });

    rsx! {
        section {
            class: "hero bg-base-200 rounded-box py-16",
            div {
                class: "hero-content text-center",
                div {
                    class: "max-w-2xl",
                    h1 { class: "text-4xl md:text-5xl font-bold", "Every experience leaves a lesson" }
                    p {
                        class: "py-6 view-muted",
                        "Write down what life taught you, keep it private or share it, and learn from the wisdom of others."
                    }
                    div {
                        class: "flex gap-3 justify-center",
                        Link { to: Route::PublicLessons {}, class: "btn btn-primary", "Explore lessons" }
                        if auth().user.is_some() {
                            Link { to: Route::AddLesson {}, class: "btn btn-outline", "Share a lesson" }
                        } else {
                            Link { to: Route::Register {}, class: "btn btn-outline", "Join now" }
                        }
                    }
                }
            }
        }

        section {
            class: "mt-12",
            h2 { class: "text-2xl font-bold mb-6", "Featured lessons" }
            match featured() {
                None => rsx! { Spinner {} },
                Some(Err(err)) => rsx! {
                    LoadError {
                        message: err.to_string(),
                        on_retry: move |_| featured.restart(),
                    }
                },
                Some(Ok(lessons)) => rsx! {
                    LessonGrid { lessons, empty: "No featured lessons yet" }
                },
            }
        }

        section {
            class: "mt-16",
            h2 { class: "text-2xl font-bold mb-6", "Why learning from life matters" }
            div {
                class: "grid gap-4 md:grid-cols-4",
                Benefit {
                    icon: rsx! { Icon { icon: FaLightbulb, width: 24, height: 24 } },
                    title: "Clarity",
                    text: "Writing a lesson down turns a vague feeling into something you can act on.",
                }
                Benefit {
                    icon: rsx! { Icon { icon: FaSeedling, width: 24, height: 24 } },
                    title: "Growth",
                    text: "Revisiting old lessons shows how far you have come.",
                }
                Benefit {
                    icon: rsx! { Icon { icon: FaHandshake, width: 24, height: 24 } },
                    title: "Connection",
                    text: "Someone else may be facing exactly what you already lived through.",
                }
                Benefit {
                    icon: rsx! { Icon { icon: FaBrain, width: 24, height: 24 } },
                    title: "Memory",
                    text: "Lessons fade. A journal keeps them within reach.",
                }
            }
        }
    }
}

#[component]
fn Benefit(icon: Element, title: String, text: String) -> Element {
    rsx! {
        div {
            class: "card bg-base-100 shadow",
            div {
                class: "card-body",
                {icon}
                h3 { class: "card-title", "{title}" }
                p { class: "view-muted", "{text}" }
            }
        }
    }
}
