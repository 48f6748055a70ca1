use crate::config::StreamConfig;
use crate::error::{MiningError, Result};
use crate::quickmine::suffix_list::{Suffix, SuffixList};
use crate::sequence::Symbol;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Prefix → ranked suffixes, bounded at both levels
///
/// Prefixes are evicted least-recently-used; adding a rule and predicting
/// from a prefix both count as a use. Each prefix keeps at most
/// `max_suffix_num` suffixes (see [`SuffixList`]).
pub struct RuleCache<S: Symbol> {
    prefixes: LruCache<Vec<S>, SuffixList<S>>,
    max_suffix_num: usize,
}

impl<S: Symbol> RuleCache<S> {
    pub fn new(max_prefix_num: usize, max_suffix_num: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(max_prefix_num)
            .ok_or_else(|| MiningError::invalid("max_prefix_num", "must be >= 1, got 0"))?;
        if max_suffix_num == 0 {
            return Err(MiningError::invalid("max_suffix_num", "must be >= 1, got 0"));
        }

        Ok(Self {
            prefixes: LruCache::new(capacity),
            max_suffix_num,
        })
    }

    pub fn from_config(config: &StreamConfig) -> Result<Self> {
        Self::new(config.max_prefix_num, config.max_suffix_num)
    }

    /// Record that `suffix` followed `prefix`
    ///
    /// Returns `true` when `prefix` was not cached before.
    pub fn add_rule(&mut self, prefix: &[S], suffix: S) -> bool {
        if let Some(suffixes) = self.prefixes.get_mut(prefix) {
            suffixes.add(suffix);
            return false;
        }

        let mut suffixes = SuffixList::new(self.max_suffix_num);
        suffixes.add(suffix);
        if let Some((evicted, _)) = self.prefixes.push(prefix.to_vec(), suffixes) {
            tracing::trace!(evicted = ?evicted, "prefix evicted from rule cache");
        }
        true
    }

    /// Ranked suffixes for `prefix`, marking it most recently used
    pub fn predict(&mut self, prefix: &[S]) -> &[Suffix<S>] {
        self.prefixes
            .get(prefix)
            .map(SuffixList::entries)
            .unwrap_or(&[])
    }

    /// Like [`predict`](Self::predict) without touching recency
    pub fn peek(&self, prefix: &[S]) -> Option<&SuffixList<S>> {
        self.prefixes.peek(prefix)
    }

    pub fn contains(&self, prefix: &[S]) -> bool {
        self.prefixes.contains(prefix)
    }

    /// Number of cached prefixes
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Cached prefixes, most recently used first
    pub fn iter(&self) -> impl Iterator<Item = (&Vec<S>, &SuffixList<S>)> {
        self.prefixes.iter()
    }
}

impl<S: Symbol> std::fmt::Debug for RuleCache<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleCache")
            .field("prefixes", &self.prefixes.len())
            .field("max_prefix_num", &self.prefixes.cap())
            .field("max_suffix_num", &self.max_suffix_num)
            .finish()
    }
}

/// [`RuleCache`] shared between threads
///
/// Every call takes the lock, including `predict`, which updates recency.
#[derive(Debug)]
pub struct SharedRuleCache<S: Symbol> {
    inner: Arc<Mutex<RuleCache<S>>>,
}

impl<S: Symbol> Clone for SharedRuleCache<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Symbol> SharedRuleCache<S> {
    pub fn new(cache: RuleCache<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RuleCache<S>> {
        // A panic while holding the lock leaves the cache structurally valid
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_rule(&self, prefix: &[S], suffix: S) -> bool {
        self.lock().add_rule(prefix, suffix)
    }

    /// Up to `limit` best suffixes for `prefix`
    pub fn predict(&self, prefix: &[S], limit: usize) -> Vec<Suffix<S>> {
        self.lock()
            .predict(prefix)
            .iter()
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
