//! Lesson list filtering, sorting and paging.
//!
//! Every list view (public feed, favorites, my lessons, admin moderation) narrows
//! the fetched lessons with a [`LessonFilter`]. Filtering never reorders: the
//! result is the matching subset in its original relative order. Ordering is a
//! separate, stable [`SortOrder`] step.

use api::{AccessLevel, Lesson, Visibility};

/// Predicates combined with AND. `None` / `false` / empty means "any".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LessonFilter {
    /// Case-insensitive substring of title or description.
    pub search: String,
    pub category: Option<String>,
    pub emotional_tone: Option<String>,
    pub visibility: Option<Visibility>,
    pub access_level: Option<AccessLevel>,
    /// Only lessons flagged by moderation or carrying reports.
    pub flagged_only: bool,
    /// Hide soft-deleted lessons.
    pub hide_deleted: bool,
}

impl LessonFilter {
    /// The public feed: public, not deleted.
    pub fn public_feed() -> Self {
        Self {
            visibility: Some(Visibility::Public),
            hide_deleted: true,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, lesson: &Lesson) -> bool {
        if self.hide_deleted && lesson.is_deleted {
            return false;
        }
        if self.flagged_only && !lesson.is_reported() {
            return false;
        }
        if self.visibility.is_some_and(|v| v != lesson.visibility) {
            return false;
        }
        if self.access_level.is_some_and(|a| a != lesson.access_level) {
            return false;
        }
        if let Some(category) = &self.category {
            if !lesson.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if let Some(tone) = &self.emotional_tone {
            if !lesson.emotional_tone.eq_ignore_ascii_case(tone) {
                return false;
            }
        }
        let needle = self.search.trim().to_lowercase();
        needle.is_empty()
            || lesson.title.to_lowercase().contains(&needle)
            || lesson.description.to_lowercase().contains(&needle)
    }

    pub fn apply(&self, lessons: &[Lesson]) -> Vec<Lesson> {
        lessons.iter().filter(|l| self.matches(l)).cloned().collect()
    }
}

/// Turn a `<select>` value into an optional filter ("" means all).
pub fn selected(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    MostSaved,
    MostLiked,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::Newest,
        SortOrder::Oldest,
        SortOrder::MostSaved,
        SortOrder::MostLiked,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
            SortOrder::MostSaved => "most-saved",
            SortOrder::MostLiked => "most-liked",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Newest => "Newest",
            SortOrder::Oldest => "Oldest",
            SortOrder::MostSaved => "Most saved",
            SortOrder::MostLiked => "Most liked",
        }
    }

    pub fn parse(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .unwrap_or_default()
    }

    /// Stable sort; lessons without a timestamp sort last for `Newest`.
    pub fn sort(self, lessons: &mut [Lesson]) {
        match self {
            SortOrder::Newest => lessons.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortOrder::Oldest => lessons.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            SortOrder::MostSaved => {
                lessons.sort_by(|a, b| b.favorites_count.cmp(&a.favorites_count))
            }
            SortOrder::MostLiked => lessons.sort_by(|a, b| b.likes_count.cmp(&a.likes_count)),
        }
    }
}

/// One page of a list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Zero-based, clamped to the last page.
    pub index: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < self.total_pages
    }
}

/// Slice `items` into pages of `per_page` and return page `index`.
pub fn paginate<T: Clone>(items: &[T], index: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_pages = items.len().div_ceil(per_page).max(1);
    let index = index.min(total_pages - 1);
    let items = items
        .iter()
        .skip(index * per_page)
        .take(per_page)
        .cloned()
        .collect();
    Page {
        items,
        index,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(id: &str, visibility: Visibility) -> Lesson {
        let mut l: Lesson =
            serde_json::from_value(serde_json::json!({ "_id": id, "title": format!("Lesson {id}") }))
                .unwrap();
        l.visibility = visibility;
        l
    }

    fn ids(lessons: &[Lesson]) -> Vec<&str> {
        lessons.iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn test_private_filter_keeps_order() {
        let lessons = vec![
            lesson("a", Visibility::Private),
            lesson("b", Visibility::Public),
            lesson("c", Visibility::Public),
            lesson("d", Visibility::Private),
        ];
        let filter = LessonFilter {
            visibility: Some(Visibility::Private),
            ..LessonFilter::default()
        };
        assert_eq!(ids(&filter.apply(&lessons)), vec!["a", "d"]);
    }

    #[test]
    fn test_result_is_exact_subset() {
        let mut lessons = Vec::new();
        for (i, category) in ["Career", "Mindset", "Career", "Relationships", "career"]
            .iter()
            .enumerate()
        {
            let mut l = lesson(&i.to_string(), Visibility::Public);
            l.category = category.to_string();
            l.is_flagged = i % 2 == 0;
            lessons.push(l);
        }

        let predicates = [
            LessonFilter {
                category: Some("Career".into()),
                ..LessonFilter::default()
            },
            LessonFilter {
                flagged_only: true,
                ..LessonFilter::default()
            },
            LessonFilter {
                category: Some("Career".into()),
                flagged_only: true,
                ..LessonFilter::default()
            },
        ];
        for filter in predicates {
            let expected: Vec<&str> = lessons
                .iter()
                .filter(|l| filter.matches(l))
                .map(|l| l.id.as_str())
                .collect();
            assert_eq!(ids(&filter.apply(&lessons)), expected);
        }

        let career = LessonFilter {
            category: Some("Career".into()),
            ..LessonFilter::default()
        };
        assert_eq!(ids(&career.apply(&lessons)), vec!["0", "2", "4"]);

        let flagged = LessonFilter {
            flagged_only: true,
            ..LessonFilter::default()
        };
        assert_eq!(ids(&flagged.apply(&lessons)), vec!["0", "2", "4"]);
    }

    #[test]
    fn test_reports_count_as_flagged() {
        let mut l = lesson("r", Visibility::Public);
        l.reports_count = 2;
        let filter = LessonFilter {
            flagged_only: true,
            ..LessonFilter::default()
        };
        assert!(filter.matches(&l));
    }

    #[test]
    fn test_search_title_and_description() {
        let mut a = lesson("a", Visibility::Public);
        a.title = "Letting Go".into();
        let mut b = lesson("b", Visibility::Public);
        b.description = "on letting things be".into();
        let c = lesson("c", Visibility::Public);

        let filter = LessonFilter {
            search: "  LETTING ".into(),
            ..LessonFilter::default()
        };
        assert_eq!(ids(&filter.apply(&[a, b, c])), vec!["a", "b"]);
    }

    #[test]
    fn test_public_feed_hides_private_and_deleted() {
        let mut deleted = lesson("x", Visibility::Public);
        deleted.is_deleted = true;
        let lessons = vec![
            lesson("a", Visibility::Public),
            lesson("b", Visibility::Private),
            deleted,
        ];
        assert_eq!(ids(&LessonFilter::public_feed().apply(&lessons)), vec!["a"]);
        assert!(LessonFilter::default().is_empty());
        assert!(!LessonFilter::public_feed().is_empty());
    }

    #[test]
    fn test_sort_orders() {
        let mut lessons: Vec<Lesson> = ["a", "b", "c"]
            .iter()
            .map(|id| lesson(id, Visibility::Public))
            .collect();
        lessons[0].favorites_count = 1;
        lessons[1].favorites_count = 5;
        lessons[2].favorites_count = 1;
        lessons[0].created_at = "2025-01-01T00:00:00Z".parse().ok();
        lessons[1].created_at = "2025-03-01T00:00:00Z".parse().ok();

        let mut saved = lessons.clone();
        SortOrder::MostSaved.sort(&mut saved);
        assert_eq!(ids(&saved), vec!["b", "a", "c"]);

        let mut newest = lessons.clone();
        SortOrder::Newest.sort(&mut newest);
        assert_eq!(ids(&newest), vec!["b", "a", "c"]);

        let mut oldest = lessons;
        SortOrder::Oldest.sort(&mut oldest);
        assert_eq!(ids(&oldest), vec!["c", "a", "b"]);

        assert_eq!(SortOrder::parse("most-liked"), SortOrder::MostLiked);
        assert_eq!(SortOrder::parse("bogus"), SortOrder::Newest);
    }

    #[test]
    fn test_paginate() {
        let items: Vec<u32> = (1..=10).collect();
        let first = paginate(&items, 0, 4);
        assert_eq!(first.items, vec![1, 2, 3, 4]);
        assert_eq!(first.total_pages, 3);
        assert!(!first.has_previous());
        assert!(first.has_next());

        let last = paginate(&items, 7, 4);
        assert_eq!(last.index, 2);
        assert_eq!(last.items, vec![9, 10]);
        assert!(!last.has_next());

        let empty = paginate::<u32>(&[], 3, 9);
        assert_eq!(empty.total_pages, 1);
        assert!(empty.items.is_empty());
    }

    #[test]
    fn test_selected() {
        assert_eq!(selected(""), None);
        assert_eq!(selected("Career"), Some("Career".to_string()));
    }
}
