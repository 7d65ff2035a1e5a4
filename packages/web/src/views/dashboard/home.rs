use api::Lesson;
use dioxus::prelude::*;
use ui::{keys, use_auth, use_backend, use_query, LoadError, SortOrder, Spinner, StatCard};

use crate::Route;

/// Counts derived from the author's own lessons.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Overview {
    total: u64,
    public: u64,
    private: u64,
    premium: u64,
    likes: u64,
    saves: u64,
}

impl Overview {
    fn of(lessons: &[Lesson]) -> Self {
        lessons
            .iter()
            .filter(|l| !l.is_deleted)
            .fold(Self::default(), |mut acc, l| {
                acc.total += 1;
                if l.is_public() {
                    acc.public += 1;
                } else {
                    acc.private += 1;
                }
                if l.is_premium() {
                    acc.premium += 1;
                }
                acc.likes += l.likes_count;
                acc.saves += l.favorites_count;
                acc
            })
    }
}

#[component]
pub fn DashboardHome() -> Element {
    let auth = use_auth();
    let backend = use_backend();
    let saved_backend = backend.clone();

    let email = move || auth().email().map(str::to_string).unwrap_or_default();

    let mut mine = use_query(
        move || keys::my_lessons(&email()),
        move |key| {
            let backend = backend.clone();
            let email = key.params().first().cloned().unwrap_or_default();
            async move { backend.my_lessons(&email).await }
        },
    );
    let saved = use_query(
        move || keys::saved_lessons(&email()),
        move |key| {
            let backend = saved_backend.clone();
            let email = key.params().first().cloned().unwrap_or_default();
            async move { backend.saved_lessons(&email).await }
        },
    );

    let saved_count = match saved() {
        Some(Ok(list)) => list.len().to_string(),
        Some(Err(_)) => "-".to_string(),
        None => "…".to_string(),
    };
    let name = auth()
        .user
        .map(|u| u.display_name().to_string())
        .unwrap_or_default();

    rsx! {
        h1 { class: "text-3xl font-bold mb-2", "Welcome, {name}" }
        p { class: "view-muted mb-6", "Favorites saved: {saved_count}" }

        match mine() {
            None => rsx! { Spinner {} },
            Some(Err(err)) => rsx! {
                LoadError { message: err.to_string(), on_retry: move |_| mine.restart() }
            },
            Some(Ok(lessons)) => {
                let overview = Overview::of(&lessons);
                let mut recent: Vec<Lesson> = lessons.into_iter().filter(|l| !l.is_deleted).collect();
                SortOrder::Newest.sort(&mut recent);
                recent.truncate(5);
                rsx! {
                    div {
                        class: "grid gap-4 sm:grid-cols-2 lg:grid-cols-3",
                        StatCard { label: "Lessons created", value: overview.total }
                        StatCard { label: "Public", value: overview.public }
                        StatCard { label: "Private", value: overview.private }
                        StatCard { label: "Premium", value: overview.premium }
                        StatCard { label: "Likes received", value: overview.likes }
                        StatCard { label: "Times saved", value: overview.saves }
                    }

                    h2 { class: "text-xl font-bold mt-10 mb-4", "Recently added" }
                    if recent.is_empty() {
                        p {
                            class: "view-muted",
                            "You have not written any lessons yet. "
                            Link { to: Route::AddLesson {}, class: "link link-primary", "Write your first one" }
                        }
                    } else {
                        ul {
                            class: "flex flex-col gap-2",
                            for lesson in recent {
                                li {
                                    key: "{lesson.id}",
                                    class: "flex justify-between items-center bg-base-200 rounded-box px-4 py-2",
                                    span { class: "font-medium", "{lesson.title}" }
                                    Link {
                                        to: Route::LessonDetail { id: lesson.id.clone() },
                                        class: "btn btn-xs btn-ghost",
                                        "Open"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overview_counts() {
        let lessons: Vec<Lesson> = serde_json::from_value(serde_json::json!([
            { "_id": "1", "visibility": "public", "likesCount": 3, "favoritesCount": 1 },
            { "_id": "2", "visibility": "private", "accessLevel": "premium", "likesCount": 2 },
            { "_id": "3", "visibility": "public", "isDeleted": true, "likesCount": 10 },
        ]))
        .unwrap();

        let overview = Overview::of(&lessons);
        assert_eq!(
            overview,
            Overview {
                total: 2,
                public: 1,
                private: 1,
                premium: 1,
                likes: 5,
                saves: 1,
            }
        );
    }
}
