use crate::error::Result;
use crate::index::Index;
use crate::vectorizer::{build_index, VectorizerConfig};
use parking_lot::Mutex;
use sha1::{Digest, Sha1};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// Slot for one document set. Its own lock serializes builds of that set only.
type Slot = Arc<Mutex<Option<Arc<Index>>>>;

#[derive(Default)]
struct CacheInner {
    entries: HashMap<String, Slot>,
    order: VecDeque<String>, // oldest first
}

/// Keeps fitted indexes for recently seen document sets so a repeated search over
/// an unchanged upload skips the rebuild.
///
/// The shared map lock is only held to find or create a key's slot. The build runs
/// under that slot's lock: a caller never sees an index another caller is still
/// building, while different document sets build in parallel.
pub struct IndexCache {
    capacity: usize,
    inner: Mutex<CacheInner>,
}

impl IndexCache {
    pub fn new(capacity: usize) -> Self {
        Self { capacity: capacity.max(1), inner: Mutex::new(CacheInner::default()) }
    }

    /// Number of cached indexes, not counting builds in progress.
    pub fn len(&self) -> usize {
        let slots: Vec<Slot> = self.inner.lock().entries.values().cloned().collect();
        slots.iter().filter(|slot| slot.lock().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the cached index for this exact document set and configuration, or
    /// build and remember it. Failed builds are not cached.
    pub fn get_or_build(&self, documents: &[String], config: &VectorizerConfig) -> Result<Arc<Index>> {
        let key = fingerprint(documents, config);
        let slot = self.slot(&key);
        let mut guard = slot.lock();
        if let Some(index) = guard.as_ref() {
            tracing::debug!(%key, "index cache hit");
            return Ok(Arc::clone(index));
        }
        match build_index(documents.to_vec(), config) {
            Ok(index) => {
                let index = Arc::new(index);
                *guard = Some(Arc::clone(&index));
                tracing::debug!(%key, "index cache miss");
                Ok(index)
            }
            Err(err) => {
                drop(guard);
                self.forget(&key, &slot);
                Err(err)
            }
        }
    }

    fn slot(&self, key: &str) -> Slot {
        let mut inner = self.inner.lock();
        if let Some(slot) = inner.entries.get(key) {
            return Arc::clone(slot);
        }
        while inner.order.len() >= self.capacity {
            if let Some(oldest) = inner.order.pop_front() {
                inner.entries.remove(&oldest);
            }
        }
        let slot: Slot = Arc::new(Mutex::new(None));
        inner.order.push_back(key.to_string());
        inner.entries.insert(key.to_string(), Arc::clone(&slot));
        slot
    }

    fn forget(&self, key: &str, slot: &Slot) {
        let mut inner = self.inner.lock();
        let same = inner.entries.get(key).is_some_and(|s| Arc::ptr_eq(s, slot));
        if same && slot.lock().is_none() {
            inner.entries.remove(key);
            inner.order.retain(|k| k != key);
        }
    }
}

/// SHA-1 over the vectorizer settings and every document, each length-prefixed so
/// that `["ab", "c"]` and `["a", "bc"]` differ.
pub fn fingerprint(documents: &[String], config: &VectorizerConfig) -> String {
    let mut hasher = Sha1::new();
    hasher.update(format!("{:?}|{:?}|{:?}", config.max_df, config.min_df, config.max_features).as_bytes());
    let mut stop_words: Vec<&str> = config.stop_words.iter().copied().collect();
    stop_words.sort_unstable();
    for w in stop_words {
        hasher.update(w.as_bytes());
        hasher.update([0u8]);
    }
    for doc in documents {
        hasher.update((doc.len() as u64).to_le_bytes());
        hasher.update(doc.as_bytes());
    }
    format!("{:x}", hasher.finalize())
}
