//! # In-memory query cache
//!
//! Every list or record a view fetches from the backend is kept here under a
//! [`QueryKey`] (a logical resource name plus the parameters that select it,
//! e.g. `my-lessons` + the author's email). Views read through the cache and only
//! go to the network when the entry is missing or has been invalidated.
//!
//! The cache lives on the single UI thread, so it is a cheap `Rc<RefCell<..>>`
//! handle: clones share the same entries.
//!
//! ## Mutations
//!
//! | Method | Effect |
//! |--------|--------|
//! | [`set`](QueryCache::set) | Stores a freshly fetched value. |
//! | [`invalidate`](QueryCache::invalidate) / [`invalidate_resource`](QueryCache::invalidate_resource) | Marks entries stale so the next read refetches. |
//! | [`update`](QueryCache::update) | Rewrites an entry in place and hands back a [`Snapshot`] of the prior state. |
//! | [`restore`](QueryCache::restore) | Puts a snapshot back, undoing an optimistic update. |
//!
//! [`mutate_optimistic`] ties `update` and `restore` to a request future.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::rc::Rc;

/// Identifies one cached query.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QueryKey {
    resource: &'static str,
    params: Vec<String>,
}

impl QueryKey {
    pub fn new(resource: &'static str) -> Self {
        Self {
            resource,
            params: Vec::new(),
        }
    }

    /// Builder method appending an identifying parameter.
    pub fn with(mut self, param: impl Into<String>) -> Self {
        self.params.push(param.into());
        self
    }

    pub fn resource(&self) -> &'static str {
        self.resource
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource)?;
        for param in &self.params {
            write!(f, ":{param}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
struct Entry<V> {
    value: V,
    stale: bool,
}

/// The state of one entry before an optimistic update.
#[derive(Debug)]
pub struct Snapshot<V> {
    key: QueryKey,
    previous: Entry<V>,
}

impl<V> Snapshot<V> {
    pub fn key(&self) -> &QueryKey {
        &self.key
    }
}

/// Shared handle to the cached values of one type.
#[derive(Debug)]
pub struct QueryCache<V> {
    entries: Rc<RefCell<HashMap<QueryKey, Entry<V>>>>,
}

impl<V> Clone for QueryCache<V> {
    fn clone(&self) -> Self {
        Self {
            entries: Rc::clone(&self.entries),
        }
    }
}

impl<V> Default for QueryCache<V> {
    fn default() -> Self {
        Self {
            entries: Rc::new(RefCell::new(HashMap::new())),
        }
    }
}

impl<V> PartialEq for QueryCache<V> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.entries, &other.entries)
    }
}

impl<V: Clone> QueryCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value, stale or not.
    pub fn get(&self, key: &QueryKey) -> Option<V> {
        self.entries.borrow().get(key).map(|e| e.value.clone())
    }

    /// Returns the cached value only if it has not been invalidated.
    pub fn fresh(&self, key: &QueryKey) -> Option<V> {
        self.entries
            .borrow()
            .get(key)
            .filter(|e| !e.stale)
            .map(|e| e.value.clone())
    }

    pub fn set(&self, key: QueryKey, value: V) {
        self.entries
            .borrow_mut()
            .insert(key, Entry { value, stale: false });
    }

    pub fn remove(&self, key: &QueryKey) -> Option<V> {
        self.entries.borrow_mut().remove(key).map(|e| e.value)
    }

    /// Marks one entry stale. Returns whether the entry existed.
    pub fn invalidate(&self, key: &QueryKey) -> bool {
        match self.entries.borrow_mut().get_mut(key) {
            Some(entry) => {
                entry.stale = true;
                true
            }
            None => false,
        }
    }

    /// Marks every entry of a resource stale, whatever its parameters.
    pub fn invalidate_resource(&self, resource: &str) -> usize {
        let mut count = 0;
        for (key, entry) in self.entries.borrow_mut().iter_mut() {
            if key.resource == resource {
                entry.stale = true;
                count += 1;
            }
        }
        tracing::debug!(resource, count, "invalidated cached queries");
        count
    }

    /// Rewrites a cached value in place.
    ///
    /// Returns `None` without calling `f` when nothing is cached under `key`.
    pub fn update(&self, key: &QueryKey, f: impl FnOnce(&mut V)) -> Option<Snapshot<V>> {
        let mut entries = self.entries.borrow_mut();
        let entry = entries.get_mut(key)?;
        let previous = entry.clone();
        f(&mut entry.value);
        Some(Snapshot {
            key: key.clone(),
            previous,
        })
    }

    pub fn restore(&self, snapshot: Snapshot<V>) {
        self.entries
            .borrow_mut()
            .insert(snapshot.key, snapshot.previous);
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

/// Applies `apply` to the cached entry, awaits `request`, and rolls the entry
/// back if the request fails.
pub async fn mutate_optimistic<V, T, E, Fut>(
    cache: &QueryCache<V>,
    key: &QueryKey,
    apply: impl FnOnce(&mut V),
    request: Fut,
) -> Result<T, E>
where
    V: Clone,
    Fut: Future<Output = Result<T, E>>,
{
    let snapshot = cache.update(key, apply);
    match request.await {
        Ok(value) => Ok(value),
        Err(err) => {
            if let Some(snapshot) = snapshot {
                tracing::debug!(key = %snapshot.key(), "rolling back optimistic update");
                cache.restore(snapshot);
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Item {
        id: u32,
        featured: bool,
    }

    fn items() -> Vec<Item> {
        vec![
            Item { id: 1, featured: false },
            Item { id: 2, featured: true },
        ]
    }

    #[test]
    fn test_key_display() {
        let key = QueryKey::new("my-lessons").with("a@b.com");
        assert_eq!(key.to_string(), "my-lessons:a@b.com");
        assert_eq!(QueryKey::new("featured").to_string(), "featured");
    }

    #[test]
    fn test_set_get_and_invalidate() {
        let cache = QueryCache::new();
        let key = QueryKey::new("admin-lessons");
        assert!(cache.get(&key).is_none());
        assert!(!cache.invalidate(&key));

        cache.set(key.clone(), items());
        assert_eq!(cache.fresh(&key), Some(items()));

        assert!(cache.invalidate(&key));
        assert!(cache.fresh(&key).is_none());
        // Stale data is still readable as a placeholder
        assert_eq!(cache.get(&key), Some(items()));
    }

    #[test]
    fn test_invalidate_resource_matches_all_params() {
        let cache = QueryCache::new();
        cache.set(QueryKey::new("comments").with("l1"), 1u32);
        cache.set(QueryKey::new("comments").with("l2"), 2u32);
        cache.set(QueryKey::new("reports").with("l1"), 3u32);

        assert_eq!(cache.invalidate_resource("comments"), 2);
        assert!(cache.fresh(&QueryKey::new("comments").with("l1")).is_none());
        assert_eq!(cache.fresh(&QueryKey::new("reports").with("l1")), Some(3));
    }

    #[test]
    fn test_clones_share_entries() {
        let cache = QueryCache::new();
        let other = cache.clone();
        other.set(QueryKey::new("users"), 5u32);
        assert_eq!(cache.get(&QueryKey::new("users")), Some(5));
        assert_eq!(cache, other);
        assert_ne!(cache, QueryCache::new());
    }

    #[test]
    fn test_update_missing_entry_is_noop() {
        let cache: QueryCache<Vec<Item>> = QueryCache::new();
        let snapshot = cache.update(&QueryKey::new("x"), |_| panic!("must not run"));
        assert!(snapshot.is_none());
    }

    #[tokio::test]
    async fn test_optimistic_success_keeps_update() {
        let cache = QueryCache::new();
        let key = QueryKey::new("admin-lessons");
        cache.set(key.clone(), items());

        let result: Result<(), String> = mutate_optimistic(
            &cache,
            &key,
            |list: &mut Vec<Item>| list[0].featured = true,
            async { Ok(()) },
        )
        .await;

        assert!(result.is_ok());
        assert!(cache.get(&key).unwrap()[0].featured);
    }

    #[tokio::test]
    async fn test_optimistic_failure_rolls_back() {
        let cache = QueryCache::new();
        let key = QueryKey::new("admin-lessons");
        cache.set(key.clone(), items());

        let probe = cache.clone();
        let probe_key = key.clone();
        let result: Result<(), String> = mutate_optimistic(
            &cache,
            &key,
            |list: &mut Vec<Item>| list[1].featured = false,
            async move {
                // The optimistic value is visible while the request is in flight
                assert!(!probe.get(&probe_key).unwrap()[1].featured);
                Err("500".to_string())
            },
        )
        .await;

        assert_eq!(result, Err("500".to_string()));
        assert_eq!(cache.get(&key), Some(items()));
    }
}
