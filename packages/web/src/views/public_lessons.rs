use api::{CATEGORIES, EMOTIONAL_TONES};
use dioxus::prelude::*;
use store::ClientConfig;
use ui::filter::selected;
use ui::{
    keys, paginate, use_backend, use_debounced, use_query, LessonFilter, LoadError, Pager,
    SortOrder, Spinner,
};

use crate::components::LessonGrid;

/// The public feed: search, filter, sort and page through public lessons.
#[component]
pub fn PublicLessons() -> Element {
    let backend = use_backend();
    let config = use_context::<ClientConfig>();

    let mut search = use_signal(String::new);
    let debounce_ms = u32::try_from(config.feed.search_debounce_ms).unwrap_or(u32::MAX);
    let debounced_search = use_debounced(search, debounce_ms);
    let mut category = use_signal(String::new);
    let mut tone = use_signal(String::new);
    let mut sort = use_signal(SortOrder::default);
    let mut page = use_signal(|| 0usize);

    let mut lessons = use_query(keys::public_lessons, move |_| {
        let backend = backend.clone();
        async move { backend.public_lessons().await }
    });

    let filter = LessonFilter {
        search: debounced_search(),
        category: selected(&category()),
        emotional_tone: selected(&tone()),
        ..LessonFilter::public_feed()
    };

    rsx! {
        div {
            class: "flex flex-col gap-2 mb-6",
            h1 { class: "text-3xl font-bold", "Public Lessons" }
            p { class: "view-muted", "Wisdom shared by the community." }
        }

        div {
            class: "flex flex-wrap gap-3 mb-6",
            input {
                class: "input input-bordered flex-1 min-w-[220px]",
                r#type: "search",
                placeholder: "Search by title or keyword",
                value: search(),
                oninput: move |evt: FormEvent| {
                    search.set(evt.value());
                    page.set(0);
                },
            }
            select {
                class: "select select-bordered",
                value: category(),
                onchange: move |evt: FormEvent| {
                    category.set(evt.value());
                    page.set(0);
                },
                option { value: "", "All categories" }
                for c in CATEGORIES {
                    option { key: "{c}", value: "{c}", "{c}" }
                }
            }
            select {
                class: "select select-bordered",
                value: tone(),
                onchange: move |evt: FormEvent| {
                    tone.set(evt.value());
                    page.set(0);
                },
                option { value: "", "All tones" }
                for t in EMOTIONAL_TONES {
                    option { key: "{t}", value: "{t}", "{t}" }
                }
            }
            select {
                class: "select select-bordered",
                value: sort().as_str(),
                onchange: move |evt: FormEvent| {
                    sort.set(SortOrder::parse(&evt.value()));
                    page.set(0);
                },
                for order in [SortOrder::Newest, SortOrder::MostSaved] {
                    option { key: "{order.as_str()}", value: order.as_str(), "{order.label()}" }
                }
            }
        }

        match lessons() {
            None => rsx! { Spinner {} },
            Some(Err(err)) => rsx! {
                LoadError {
                    message: err.to_string(),
                    on_retry: move |_| lessons.restart(),
                }
            },
            Some(Ok(all)) => {
                let mut matching = filter.apply(&all);
                sort().sort(&mut matching);
                let current = paginate(&matching, page(), config.feed.page_size);
                rsx! {
                    p { class: "text-sm view-muted mb-3", "{matching.len()} lessons" }
                    LessonGrid {
                        lessons: current.items,
                        empty: "No lessons match your filters",
                    }
                    Pager {
                        index: current.index,
                        total_pages: current.total_pages,
                        on_change: move |p| page.set(p),
                    }
                }
            }
        }
    }
}
