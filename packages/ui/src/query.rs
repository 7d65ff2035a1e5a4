//! Reactive queries over the in-memory cache.
//!
//! A [`QueryClient<V>`] pairs a [`QueryCache<V>`] with a revision signal. Reads go
//! through [`use_query`], which subscribes to the revision: invalidating or
//! optimistically rewriting an entry bumps the revision and every mounted query
//! of that value type re-reads the cache, refetching only what went stale.

use std::future::Future;
use std::rc::Rc;

use api::{AdminStats, ApiError, Comment, Lesson, ReportedLesson, User};
use dioxus::prelude::*;
use store::{QueryCache, QueryKey};

pub struct QueryClient<V> {
    cache: QueryCache<V>,
    revision: Signal<u64>,
}

impl<V> Clone for QueryClient<V> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            revision: self.revision,
        }
    }
}

impl<V: Clone + 'static> QueryClient<V> {
    pub fn new(revision: Signal<u64>) -> Self {
        Self {
            cache: QueryCache::new(),
            revision,
        }
    }

    pub fn cache(&self) -> &QueryCache<V> {
        &self.cache
    }

    fn bump(&self) {
        let mut revision = self.revision;
        *revision.write() += 1;
    }

    pub fn set(&self, key: QueryKey, value: V) {
        self.cache.set(key, value);
        self.bump();
    }

    pub fn invalidate(&self, key: &QueryKey) {
        if self.cache.invalidate(key) {
            self.bump();
        }
    }

    pub fn invalidate_resource(&self, resource: &str) {
        if self.cache.invalidate_resource(resource) > 0 {
            self.bump();
        }
    }

    /// Rewrite the cached entry now, then await `request`; on failure the entry
    /// is put back and views re-render with the prior state.
    pub async fn mutate_optimistic<T, Fut>(
        &self,
        key: &QueryKey,
        apply: impl FnOnce(&mut V),
        request: Fut,
    ) -> Result<T, ApiError>
    where
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let mut revision = self.revision;
        let result = store::mutate_optimistic(&self.cache, key, apply, async move {
            // Runs after `apply`, so the optimistic value renders while in flight
            *revision.write() += 1;
            request.await
        })
        .await;
        if result.is_err() {
            self.bump();
        }
        result
    }
}

/// Read `key()` through the cache, fetching with `fetch` when missing or stale.
///
/// `key` may read signals (route params, the signed-in email); the query re-runs
/// when they change.
pub fn use_query<V, K, F, Fut>(key: K, fetch: F) -> Resource<Result<V, ApiError>>
where
    V: Clone + 'static,
    K: Fn() -> QueryKey + 'static,
    F: Fn(QueryKey) -> Fut + 'static,
    Fut: Future<Output = Result<V, ApiError>> + 'static,
{
    let client = use_context::<QueryClient<V>>();
    let fetch = Rc::new(fetch);
    use_resource(move || {
        let _revision = *client.revision.read();
        let key = key();
        let cache = client.cache.clone();
        let fetch = Rc::clone(&fetch);
        async move {
            if let Some(value) = cache.fresh(&key) {
                return Ok(value);
            }
            tracing::debug!(%key, "fetching query");
            let value = fetch(key.clone()).await?;
            cache.set(key, value.clone());
            Ok(value)
        }
    })
}

pub fn use_query_client<V: Clone + 'static>() -> QueryClient<V> {
    use_context::<QueryClient<V>>()
}

/// Provides one [`QueryClient`] per cached value type.
#[component]
pub fn QueryProvider(children: Element) -> Element {
    let revision = use_signal(|| 0u64);
    use_context_provider(|| QueryClient::<Vec<Lesson>>::new(revision));
    use_context_provider(|| QueryClient::<Lesson>::new(revision));
    use_context_provider(|| QueryClient::<Vec<User>>::new(revision));
    use_context_provider(|| QueryClient::<Vec<Comment>>::new(revision));
    use_context_provider(|| QueryClient::<Vec<ReportedLesson>>::new(revision));
    use_context_provider(|| QueryClient::<AdminStats>::new(revision));

    rsx! {
        {children}
    }
}

/// Cache keys shared between readers and the mutations that invalidate them.
pub mod keys {
    use store::QueryKey;

    pub const PUBLIC_LESSONS: &str = "public-lessons";
    pub const FEATURED_LESSONS: &str = "featured-lessons";
    pub const MY_LESSONS: &str = "my-lessons";
    pub const SAVED_LESSONS: &str = "saved-lessons";
    pub const ADMIN_LESSONS: &str = "admin-lessons";
    pub const LESSON: &str = "lesson";
    pub const COMMENTS: &str = "comments";
    pub const USERS: &str = "users";
    pub const REPORTED_LESSONS: &str = "reported-lessons";
    pub const ADMIN_STATS: &str = "admin-stats";

    /// Every list a lesson can appear in.
    pub const LESSON_LISTS: [&str; 5] = [
        PUBLIC_LESSONS,
        FEATURED_LESSONS,
        MY_LESSONS,
        SAVED_LESSONS,
        ADMIN_LESSONS,
    ];

    pub fn public_lessons() -> QueryKey {
        QueryKey::new(PUBLIC_LESSONS)
    }

    pub fn featured_lessons() -> QueryKey {
        QueryKey::new(FEATURED_LESSONS)
    }

    pub fn my_lessons(email: &str) -> QueryKey {
        QueryKey::new(MY_LESSONS).with(email)
    }

    pub fn saved_lessons(email: &str) -> QueryKey {
        QueryKey::new(SAVED_LESSONS).with(email)
    }

    pub fn admin_lessons() -> QueryKey {
        QueryKey::new(ADMIN_LESSONS)
    }

    pub fn lesson(id: &str) -> QueryKey {
        QueryKey::new(LESSON).with(id)
    }

    pub fn comments(lesson_id: &str) -> QueryKey {
        QueryKey::new(COMMENTS).with(lesson_id)
    }

    pub fn users() -> QueryKey {
        QueryKey::new(USERS)
    }

    pub fn reported_lessons() -> QueryKey {
        QueryKey::new(REPORTED_LESSONS)
    }

    pub fn admin_stats() -> QueryKey {
        QueryKey::new(ADMIN_STATS)
    }
}

impl QueryClient<Vec<Lesson>> {
    /// Mark every lesson list stale after a lesson mutation.
    pub fn invalidate_lesson_lists(&self) {
        let mut any = false;
        for resource in keys::LESSON_LISTS {
            any |= self.cache.invalidate_resource(resource) > 0;
        }
        if any {
            self.bump();
        }
    }
}

/// Flip one flag on the lesson with `id` inside a cached list.
pub fn set_lesson_flag(
    lessons: &mut [Lesson],
    id: &str,
    flag: impl Fn(&mut Lesson),
) -> bool {
    match lessons.iter_mut().find(|l| l.id == id) {
        Some(lesson) => {
            flag(lesson);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lessons() -> Vec<Lesson> {
        ["a", "b"]
            .iter()
            .map(|id| serde_json::from_value(serde_json::json!({ "_id": id })).unwrap())
            .collect()
    }

    #[test]
    fn test_keys_are_scoped() {
        assert_eq!(keys::my_lessons("ana@example.com").to_string(), "my-lessons:ana@example.com");
        assert_ne!(keys::my_lessons("a@x.io"), keys::saved_lessons("a@x.io"));
        assert_eq!(keys::lesson("42").resource(), keys::LESSON);
    }

    #[test]
    fn test_set_lesson_flag() {
        let mut list = lessons();
        assert!(set_lesson_flag(&mut list, "b", |l| l.is_featured = true));
        assert!(!list[0].is_featured);
        assert!(list[1].is_featured);
        assert!(!set_lesson_flag(&mut list, "zz", |l| l.is_featured = true));
    }

    #[tokio::test]
    async fn test_toggle_reverts_on_failure() {
        let cache = QueryCache::new();
        let key = keys::admin_lessons();
        cache.set(key.clone(), lessons());

        let result: Result<(), ApiError> = store::mutate_optimistic(
            &cache,
            &key,
            |list: &mut Vec<Lesson>| {
                set_lesson_flag(list, "a", |l| l.is_reviewed = true);
            },
            async { Err(ApiError::Transport("offline".to_string())) },
        )
        .await;
        assert!(result.is_err());
        assert!(!cache.get(&key).unwrap()[0].is_reviewed);

        let ok: Result<(), ApiError> = store::mutate_optimistic(
            &cache,
            &key,
            |list: &mut Vec<Lesson>| {
                set_lesson_flag(list, "a", |l| l.is_reviewed = true);
            },
            async { Ok(()) },
        )
        .await;
        assert!(ok.is_ok());
        assert!(cache.get(&key).unwrap()[0].is_reviewed);
    }
}
