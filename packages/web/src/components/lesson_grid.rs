use api::Lesson;
use dioxus::prelude::*;
use ui::{is_premium, use_auth, use_premium, EmptyState};

use super::LessonCard;

/// Grid of lesson cards, locking premium lessons the viewer cannot open.
#[component]
pub fn LessonGrid(
    lessons: Vec<Lesson>,
    #[props(default = "No lessons yet".to_string())] empty: String,
) -> Element {
    let auth = use_auth();
    let premium = use_premium();

    if lessons.is_empty() {
        return rsx! {
            EmptyState { title: empty }
        };
    }

    let state = auth();
    let viewer_premium = is_premium(&state, &premium.read());

    rsx! {
        div {
            class: "lesson-grid",
            for lesson in lessons {
                LessonCard {
                    key: "{lesson.id}",
                    locked: lesson.is_locked_for(state.email(), viewer_premium),
                    lesson: lesson.clone(),
                }
            }
        }
    }
}
