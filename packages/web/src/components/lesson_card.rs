use api::Lesson;
use dioxus::prelude::*;
use ui::icons::{FaBookmark, FaHeart, FaLock};
use ui::{Avatar, Badge, Icon};

use crate::Route;

/// Summary card for lesson grids. Locked cards blur the body and point at the
/// pricing page instead of the lesson.
#[component]
pub fn LessonCard(lesson: Lesson, #[props(default)] locked: bool) -> Element {
    let created = lesson
        .created_at
        .map(|t| t.format("%b %e, %Y").to_string())
        .unwrap_or_default();
    let excerpt = lesson.excerpt(140);
    let card_class = if locked {
        "card bg-base-100 shadow lesson-card lesson-card-locked"
    } else {
        "card bg-base-100 shadow lesson-card"
    };

    rsx! {
        div {
            class: card_class,
            if let Some(image) = lesson.image.clone() {
                figure {
                    img {
                        class: "h-44 w-full object-cover",
                        src: "{image}",
                        alt: "{lesson.title}",
                    }
                }
            }
            div {
                class: "card-body gap-3",
                div {
                    class: "flex flex-wrap gap-1",
                    Badge { label: lesson.category.clone(), tone: "badge-primary badge-outline" }
                    Badge { label: lesson.emotional_tone.clone() }
                    if lesson.is_premium() {
                        Badge { label: "Premium", tone: "badge-warning" }
                    } else {
                        Badge { label: "Free", tone: "badge-success badge-outline" }
                    }
                }
                h2 { class: "card-title", "{lesson.title}" }
                p { class: "view-muted", "{excerpt}" }
                div {
                    class: "flex items-center gap-2",
                    Avatar {
                        name: lesson.author_name.clone(),
                        photo_url: lesson.author_photo.clone(),
                        size: 28,
                    }
                    div {
                        p { class: "text-sm font-medium", "{lesson.author_name}" }
                        p { class: "text-xs view-muted", "{created}" }
                    }
                }
                div {
                    class: "card-actions items-center justify-between",
                    div {
                        class: "flex gap-3 text-sm view-muted",
                        span {
                            class: "flex items-center gap-1",
                            Icon { icon: FaHeart, width: 12, height: 12 }
                            "{lesson.likes_count}"
                        }
                        span {
                            class: "flex items-center gap-1",
                            Icon { icon: FaBookmark, width: 12, height: 12 }
                            "{lesson.favorites_count}"
                        }
                    }
                    Link {
                        to: Route::LessonDetail { id: lesson.id.clone() },
                        class: "btn btn-sm btn-primary",
                        "See details"
                    }
                }
            }
            if locked {
                div {
                    class: "lesson-lock-overlay",
                    Icon { icon: FaLock, width: 24, height: 24 }
                    p { class: "font-semibold", "Premium lesson" }
                    Link {
                        to: Route::Pricing {},
                        class: "btn btn-warning btn-sm",
                        "Upgrade to view"
                    }
                }
            }
        }
    }
}
