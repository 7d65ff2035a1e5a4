use api::{Comment, Lesson, NewReport, REPORT_REASONS};
use dioxus::prelude::*;
use ui::icons::{FaBookmark, FaEye, FaFlag, FaHeart, FaLock};
use ui::dialog::{DialogContent, DialogDescription, DialogRoot, DialogTitle};
use ui::validation::comment_from;
use ui::{
    is_premium, keys, use_auth, use_backend, use_premium, use_query, use_query_client, use_toast,
    Avatar, Badge, EmptyState, Icon, LoadError, Spinner,
};

use super::MissingRecord;
use crate::Route;

#[component]
pub fn LessonDetail(id: String) -> Element {
    // Track the id in a signal so the queries re-run on route param change
    let mut id_signal = use_signal(|| id.clone());
    if *id_signal.peek() != id {
        id_signal.set(id.clone());
    }

    let backend = use_backend();
    let auth = use_auth();
    let premium = use_premium();

    let mut lesson = use_query(
        move || keys::lesson(&id_signal()),
        move |_| {
            let backend = backend.clone();
            let id = id_signal.peek().clone();
            async move { backend.lesson(&id).await }
        },
    );

    let state = auth();
    let viewer_premium = is_premium(&state, &premium.read());

    rsx! {
        match lesson() {
            None => rsx! { Spinner {} },
            Some(Err(err)) if err.is_not_found() => rsx! {
                MissingRecord { what: "Lesson" }
            },
            Some(Err(err)) => rsx! {
                LoadError {
                    message: err.to_string(),
                    on_retry: move |_| lesson.restart(),
                }
            },
            Some(Ok(l)) if l.is_deleted => rsx! {
                MissingRecord { what: "Lesson" }
            },
            Some(Ok(l)) if l.is_locked_for(state.email(), viewer_premium) => rsx! {
                LockedLesson { lesson: l }
            },
            Some(Ok(l)) => rsx! {
                LessonBody { lesson: l }
            },
        }
    }
}

#[component]
fn LockedLesson(lesson: Lesson) -> Element {
    rsx! {
        div {
            class: "flex flex-col items-center text-center gap-4 py-16",
            Icon { icon: FaLock, width: 40, height: 40 }
            h1 { class: "text-2xl font-bold", "{lesson.title}" }
            p {
                class: "view-muted max-w-md",
                "This is a premium lesson by {lesson.author_name}. Upgrade to Premium to read it and every other premium lesson."
            }
            Link { to: Route::Pricing {}, class: "btn btn-warning", "Upgrade to Premium" }
        }
    }
}

#[component]
fn LessonBody(lesson: Lesson) -> Element {
    let backend = use_backend();
    let auth = use_auth();
    let lessons = use_query_client::<Lesson>();
    let lists = use_query_client::<Vec<Lesson>>();
    let toast = use_toast();
    let mut show_report = use_signal(|| false);

    let email = auth().email().map(str::to_string).unwrap_or_default();
    let liked = lesson.liked_by(&email);
    let saved = lesson.favorited_by(&email);
    let created = lesson
        .created_at
        .map(|t| t.format("%B %e, %Y").to_string())
        .unwrap_or_default();
    let updated = lesson
        .updated_at
        .map(|t| t.format("%B %e, %Y").to_string());

    let lesson_id = lesson.id.clone();
    let toggle = move |favorite: bool| {
        let backend = backend.clone();
        let lessons = lessons.clone();
        let lists = lists.clone();
        let id = lesson_id.clone();
        let email = email.clone();
        spawn(async move {
            let key = keys::lesson(&id);
            let result = if favorite {
                let request = backend.toggle_favorite(&id, &email);
                lessons
                    .mutate_optimistic(&key, |l: &mut Lesson| {
                        l.toggle_favorite(&email);
                    }, request)
                    .await
            } else {
                let request = backend.toggle_like(&id, &email);
                lessons
                    .mutate_optimistic(&key, |l: &mut Lesson| {
                        l.toggle_like(&email);
                    }, request)
                    .await
            };
            match result {
                Ok(()) => lists.invalidate_lesson_lists(),
                Err(err) => toast.error(err.to_string()),
            }
        });
    };
    let toggle_like = toggle.clone();
    let toggle_favorite = toggle;

    rsx! {
        article {
            class: "max-w-3xl mx-auto flex flex-col gap-6",

            if let Some(image) = lesson.image.clone() {
                img {
                    class: "w-full max-h-96 object-cover rounded-box",
                    src: "{image}",
                    alt: "{lesson.title}",
                }
            }

            div {
                class: "flex flex-wrap gap-2",
                Badge { label: lesson.category.clone(), tone: "badge-primary badge-outline" }
                Badge { label: lesson.emotional_tone.clone() }
                Badge { label: lesson.visibility.label().to_string() }
                if lesson.is_premium() {
                    Badge { label: "Premium", tone: "badge-warning" }
                }
                if lesson.is_featured {
                    Badge { label: "Featured", tone: "badge-secondary" }
                }
            }

            h1 { class: "text-4xl font-bold", "{lesson.title}" }
            p {
                class: "text-sm view-muted",
                "Created {created}"
                if let Some(updated) = updated {
                    " · Updated {updated}"
                }
            }

            p { class: "lesson-body", "{lesson.description}" }

            div {
                class: "flex flex-wrap items-center gap-3 border-y border-base-300 py-3",
                span {
                    class: "flex items-center gap-1 view-muted",
                    Icon { icon: FaEye, width: 14, height: 14 }
                    "{lesson.views} views"
                }
                button {
                    class: if liked { "btn btn-sm btn-error" } else { "btn btn-sm btn-outline" },
                    onclick: move |_| toggle_like(false),
                    Icon { icon: FaHeart, width: 14, height: 14 }
                    "{lesson.likes_count}"
                }
                button {
                    class: if saved { "btn btn-sm btn-primary" } else { "btn btn-sm btn-outline" },
                    onclick: move |_| toggle_favorite(true),
                    Icon { icon: FaBookmark, width: 14, height: 14 }
                    if saved { "Saved" } else { "Save" }
                    " ({lesson.favorites_count})"
                }
                button {
                    class: "btn btn-sm btn-ghost text-error ml-auto",
                    onclick: move |_| show_report.set(true),
                    Icon { icon: FaFlag, width: 14, height: 14 }
                    "Report"
                }
            }

            AuthorCard {
                name: lesson.author_name.clone(),
                email: lesson.author_email.clone(),
                photo_url: lesson.author_photo.clone(),
            }

            Comments { lesson_id: lesson.id.clone() }

            if show_report() {
                ReportDialog {
                    lesson_id: lesson.id.clone(),
                    on_close: move |_| show_report.set(false),
                }
            }
        }
    }
}

#[component]
fn AuthorCard(name: String, email: String, photo_url: Option<String>) -> Element {
    rsx! {
        div {
            class: "card bg-base-200",
            div {
                class: "card-body flex-row items-center gap-4",
                Avatar { name: name.clone(), photo_url, size: 56 }
                div {
                    p { class: "text-xs uppercase view-muted", "Written by" }
                    p { class: "font-semibold", "{name}" }
                    p { class: "text-sm view-muted", "{email}" }
                }
            }
        }
    }
}

#[component]
fn ReportDialog(lesson_id: String, on_close: EventHandler<()>) -> Element {
    let backend = use_backend();
    let auth = use_auth();
    let toast = use_toast();
    let mut reason = use_signal(|| REPORT_REASONS[0].to_string());
    let mut sending = use_signal(|| false);

    let submit = move |_| {
        let Some(user) = auth().user else {
            return;
        };
        let backend = backend.clone();
        let id = lesson_id.clone();
        spawn(async move {
            sending.set(true);
            let report = NewReport {
                reason: reason(),
                reporter_email: user.email.clone(),
                reporter_name: user.name.clone(),
            };
            match backend.report_lesson(&id, &report).await {
                Ok(()) => {
                    toast.success("Thanks, the lesson was reported to the moderators");
                    on_close.call(());
                }
                Err(err) => {
                    sending.set(false);
                    toast.error(err.to_string());
                }
            }
        });
    };

    rsx! {
        DialogRoot {
            class: "dialog-backdrop",
            open: true,
            on_open_change: move |open: bool| {
                if !open {
                    on_close.call(());
                }
            },
            DialogContent {
                class: "modal-box",
                DialogTitle { class: "font-bold text-lg", "Report this lesson" }
                DialogDescription { class: "view-muted text-sm py-2", "Tell us what is wrong with it." }
                select {
                    class: "select select-bordered w-full",
                    value: reason(),
                    onchange: move |evt: FormEvent| reason.set(evt.value()),
                    for r in REPORT_REASONS {
                        option { key: "{r}", value: "{r}", "{r}" }
                    }
                }
                div {
                    class: "modal-action",
                    button {
                        class: "btn",
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-error",
                        disabled: sending(),
                        onclick: submit,
                        "Submit report"
                    }
                }
            }
        }
    }
}

#[component]
fn Comments(lesson_id: String) -> Element {
    let mut id_signal = use_signal(|| lesson_id.clone());
    if *id_signal.peek() != lesson_id {
        id_signal.set(lesson_id.clone());
    }

    let backend = use_backend();
    let auth = use_auth();
    let client = use_query_client::<Vec<Comment>>();
    let toast = use_toast();
    let mut draft = use_signal(String::new);
    let mut posting = use_signal(|| false);

    let fetch_backend = backend.clone();
    let mut comments = use_query(
        move || keys::comments(&id_signal()),
        move |_| {
            let backend = fetch_backend.clone();
            let id = id_signal.peek().clone();
            async move { backend.comments(&id).await }
        },
    );

    let post = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(user) = auth().user else {
            return;
        };
        let comment = match comment_from(&user, &draft()) {
            Ok(comment) => comment,
            Err(msg) => {
                toast.error(msg);
                return;
            }
        };
        let backend = backend.clone();
        let client = client.clone();
        let id = id_signal();
        spawn(async move {
            posting.set(true);
            match backend.add_comment(&id, &comment).await {
                Ok(()) => {
                    draft.set(String::new());
                    client.invalidate(&keys::comments(&id));
                }
                Err(err) => toast.error(err.to_string()),
            }
            posting.set(false);
        });
    };

    rsx! {
        section {
            class: "flex flex-col gap-4",
            h2 { class: "text-2xl font-bold", "Comments" }

            form {
                class: "flex flex-col gap-2",
                onsubmit: post,
                textarea {
                    class: "textarea textarea-bordered w-full",
                    rows: "3",
                    placeholder: "Share your thoughts",
                    value: draft(),
                    oninput: move |evt: FormEvent| draft.set(evt.value()),
                }
                button {
                    class: "btn btn-primary btn-sm self-end",
                    r#type: "submit",
                    disabled: posting() || draft().trim().is_empty(),
                    "Post comment"
                }
            }

            match comments() {
                None => rsx! { Spinner { label: "Loading comments..." } },
                Some(Err(err)) => rsx! {
                    LoadError {
                        message: err.to_string(),
                        on_retry: move |_| comments.restart(),
                    }
                },
                Some(Ok(list)) if list.is_empty() => rsx! {
                    EmptyState { title: "No comments yet", hint: "Be the first to respond." }
                },
                Some(Ok(list)) => rsx! {
                    ul {
                        class: "flex flex-col gap-3",
                        for comment in list {
                            CommentItem { key: "{comment.id}", comment: comment.clone() }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn CommentItem(comment: Comment) -> Element {
    let posted = comment
        .created_at
        .map(|t| t.format("%b %e, %Y %H:%M").to_string())
        .unwrap_or_default();
    rsx! {
        li {
            class: "flex gap-3",
            Avatar { name: comment.user_name.clone(), photo_url: comment.user_photo.clone(), size: 32 }
            div {
                class: "bg-base-200 rounded-box px-4 py-2 flex-1",
                p {
                    class: "text-sm",
                    span { class: "font-semibold", "{comment.user_name}" }
                    span { class: "view-muted ml-2 text-xs", "{posted}" }
                }
                p { class: "whitespace-pre-wrap", "{comment.content}" }
            }
        }
    }
}
