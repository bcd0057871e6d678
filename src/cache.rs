//! Short-lived cache of listing pages keyed by the listing query.
//!
//! Entries go stale after the configured time and the whole cache is dropped
//! whenever a note is created or deleted, so a write is visible on the next
//! listing request. Every invalidation starts a new generation; a page
//! fetched during an older generation is not stored.

use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use lru::LruCache;

use crate::domain::note::NotePage;
use crate::repository::NoteListQuery;

struct CacheEntry {
    page: NotePage,
    stored_at: Instant,
}

struct CacheState {
    entries: LruCache<NoteListQuery, CacheEntry>,
    generation: u64,
}

pub struct NotesCache {
    state: Mutex<CacheState>,
    ttl: Duration,
}

impl NotesCache {
    /// A zero `ttl` disables caching.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            state: Mutex::new(CacheState {
                entries: LruCache::new(capacity),
                generation: 0,
            }),
            ttl,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current generation, to be read before fetching a page for [`put`].
    ///
    /// [`put`]: NotesCache::put
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Returns a fresh page for the query, evicting it if it went stale.
    pub fn get(&self, query: &NoteListQuery) -> Option<NotePage> {
        if !self.is_enabled() {
            return None;
        }

        let mut state = self.lock();
        let entries = &mut state.entries;
        let fresh = entries
            .get(query)
            .map(|entry| entry.stored_at.elapsed() < self.ttl)?;

        if fresh {
            log::debug!("Cache hit for {query:?}");
            entries.get(query).map(|entry| entry.page.clone())
        } else {
            log::debug!("Cache entry for {query:?} is stale");
            entries.pop(query);
            None
        }
    }

    /// Stores a page fetched during `generation`, dropping it if the cache
    /// was invalidated since.
    pub fn put(&self, query: NoteListQuery, page: NotePage, generation: u64) {
        if !self.is_enabled() {
            return;
        }

        let mut state = self.lock();
        if state.generation != generation {
            log::debug!("Discarding page for {query:?} fetched before an invalidation");
            return;
        }
        state.entries.put(
            query,
            CacheEntry {
                page,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drops every cached listing page.
    pub fn invalidate_all(&self) {
        let mut state = self.lock();
        if !state.entries.is_empty() {
            log::debug!("Invalidating {} cached listing pages", state.entries.len());
        }
        state.entries.clear();
        state.generation = state.generation.wrapping_add(1);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::NoteTag;

    fn page(total_pages: usize) -> NotePage {
        NotePage {
            notes: Vec::new(),
            total_pages,
        }
    }

    #[test]
    fn stores_pages_per_query() {
        let cache = NotesCache::new(8, Duration::from_secs(60));
        let work = NoteListQuery::new(12).tag(NoteTag::Work);
        let todo = NoteListQuery::new(12).tag(NoteTag::Todo);

        cache.put(work.clone(), page(2), cache.generation());

        assert_eq!(cache.get(&work), Some(page(2)));
        assert_eq!(cache.get(&todo), None);
        assert_eq!(cache.get(&work.clone().paginate(2, 12)), None);
    }

    #[test]
    fn invalidation_drops_everything() {
        let cache = NotesCache::new(8, Duration::from_secs(60));
        cache.put(NoteListQuery::new(12), page(1), 0);
        cache.put(NoteListQuery::new(12).search("milk"), page(1), 0);

        cache.invalidate_all();

        assert!(cache.is_empty());
        assert_eq!(cache.get(&NoteListQuery::new(12)), None);
    }

    #[test]
    fn stale_entries_are_evicted() {
        let cache = NotesCache::new(8, Duration::from_millis(5));
        let query = NoteListQuery::new(12);
        cache.put(query.clone(), page(1), 0);

        std::thread::sleep(Duration::from_millis(20));

        assert_eq!(cache.get(&query), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn capacity_is_bounded() {
        let cache = NotesCache::new(2, Duration::from_secs(60));
        for p in 1..=3 {
            cache.put(NoteListQuery::new(12).paginate(p, 12), page(3), 0);
        }

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&NoteListQuery::new(12).paginate(1, 12)), None);
    }

    #[test]
    fn pages_fetched_before_invalidation_are_dropped() {
        let cache = NotesCache::new(8, Duration::from_secs(60));
        let query = NoteListQuery::new(12);
        let before = cache.generation();

        cache.invalidate_all();
        cache.put(query.clone(), page(1), before);

        assert!(cache.is_empty());
        cache.put(query.clone(), page(2), cache.generation());
        assert_eq!(cache.get(&query), Some(page(2)));
    }

    #[test]
    fn zero_ttl_disables_caching() {
        let cache = NotesCache::new(1, Duration::ZERO);
        cache.put(NoteListQuery::new(12), page(1), 0);

        assert!(!cache.is_enabled());
        assert!(cache.is_empty());
    }
}
