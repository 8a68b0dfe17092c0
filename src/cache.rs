//! Thread-local line index cache.
//!
//! Building a [`LineIndex`] is linear in the source length; repeated
//! extractions from the same file reuse the first index built for that text.
//! Cache is capped at 64 entries; when full it is cleared and rebuilt on demand.

use crate::lines::LineIndex;
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;
use xxhash_rust::xxh3::xxh3_64;

const MAX_CACHE_ENTRIES: usize = 64;

thread_local! {
    // Key is (xxh3 of the text, text length).
    static LINE_INDEX_CACHE: RefCell<HashMap<(u64, usize), Arc<LineIndex>>> =
        RefCell::new(HashMap::new());
}

/// Get the line index for `source`, building and caching it on first use.
pub fn line_index(source: &str) -> Arc<LineIndex> {
    let cache_key = (xxh3_64(source.as_bytes()), source.len());

    LINE_INDEX_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();

        if let Some(index) = cache.get(&cache_key) {
            return Arc::clone(index);
        }

        if cache.len() >= MAX_CACHE_ENTRIES {
            cache.clear();
        }

        let index = Arc::new(LineIndex::new(source));
        cache.insert(cache_key, Arc::clone(&index));
        index
    })
}

/// Clear the cache (mainly for testing).
pub fn clear_cache() {
    LINE_INDEX_CACHE.with(|cache| {
        cache.borrow_mut().clear();
    });
}

/// Number of cached indexes on this thread.
pub fn cache_size() -> usize {
    LINE_INDEX_CACHE.with(|cache| cache.borrow().len())
}
