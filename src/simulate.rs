//! Cache-hit simulation for predictive prefetching
//!
//! Replays an access trace against a fixed-size LRU file cache. On every miss
//! the active [`Strategy`] may name symbols to prefetch into the cache; the
//! report compares how often later accesses then hit.

use crate::config::StreamConfig;
use crate::error::{MiningError, Result};
use crate::predict::PredictiveMatcher;
use crate::quickmine::QuickMine;
use crate::sequence::{RuleSet, Symbol};
use lru::LruCache;
use serde::Serialize;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// LRU set of cached symbols
pub struct FileCache<S: Symbol> {
    entries: LruCache<S, ()>,
}

impl<S: Symbol> FileCache<S> {
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity)
            .ok_or_else(|| MiningError::invalid("cache_size", "must be >= 1, got 0"))?;
        Ok(Self {
            entries: LruCache::new(capacity),
        })
    }

    /// Read `symbol`: `true` on a hit, otherwise it is loaded into the cache
    pub fn access(&mut self, symbol: &S) -> bool {
        if self.entries.get(symbol).is_some() {
            return true;
        }
        self.entries.put(symbol.clone(), ());
        false
    }

    pub fn insert(&mut self, symbol: S) {
        self.entries.put(symbol, ());
    }

    /// Membership test that leaves recency unchanged
    pub fn contains(&self, symbol: &S) -> bool {
        self.entries.contains(symbol)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Decides what to prefetch when the cache misses
pub trait Strategy<S: Symbol> {
    fn name(&self) -> &'static str;

    /// Symbols to prefetch after a miss on `access`
    fn on_miss(&mut self, access: &S, cache: &FileCache<S>) -> Vec<S>;

    /// Called once per access, after hit or miss handling
    fn after_access(&mut self, _access: &S) {}
}

/// Plain LRU caching, never prefetches
#[derive(Debug, Default)]
pub struct NonPredictive;

impl<S: Symbol> Strategy<S> for NonPredictive {
    fn name(&self) -> &'static str {
        "none"
    }

    fn on_miss(&mut self, _access: &S, _cache: &FileCache<S>) -> Vec<S> {
        Vec::new()
    }
}

/// Batch-mined rules matched against the misses
#[derive(Debug)]
pub struct CMinerStrategy<S: Symbol> {
    matcher: PredictiveMatcher<S>,
}

impl<S: Symbol> CMinerStrategy<S> {
    pub fn new(rules: Arc<RuleSet<S>>, max_gap: usize) -> Self {
        Self {
            matcher: PredictiveMatcher::new(rules, max_gap),
        }
    }
}

impl<S: Symbol> Strategy<S> for CMinerStrategy<S> {
    fn name(&self) -> &'static str {
        "cminer"
    }

    fn on_miss(&mut self, access: &S, _cache: &FileCache<S>) -> Vec<S> {
        self.matcher.observe(access.clone()).into_iter().collect()
    }
}

/// Rules learned online from every access
#[derive(Debug)]
pub struct QuickMineStrategy<S: Symbol> {
    miner: QuickMine<S>,
    prefetch_num: usize,
}

impl<S: Symbol> QuickMineStrategy<S> {
    pub fn new(config: StreamConfig) -> Result<Self> {
        let prefetch_num = config.prefetch_num;
        Ok(Self {
            miner: QuickMine::new(config)?,
            prefetch_num,
        })
    }
}

impl<S: Symbol> Strategy<S> for QuickMineStrategy<S> {
    fn name(&self) -> &'static str {
        "quickmine"
    }

    /// Best suffixes of the two accesses before this one that are not cached yet
    fn on_miss(&mut self, _access: &S, cache: &FileCache<S>) -> Vec<S> {
        self.miner
            .predict_next(usize::MAX)
            .into_iter()
            .filter(|symbol| !cache.contains(symbol))
            .take(self.prefetch_num)
            .collect()
    }

    fn after_access(&mut self, access: &S) {
        self.miner.observe(access.clone());
    }
}

/// Outcome of replaying one trace
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub strategy: &'static str,
    pub cache_size: usize,
    pub accesses: usize,
    pub hits: usize,
    pub prefetches: usize,
    pub elapsed: Duration,
}

impl SimulationReport {
    /// Fraction of accesses served from the cache (0.0 for an empty trace)
    pub fn hit_ratio(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.hits as f64 / self.accesses as f64
        }
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cache Simulation ({})", self.strategy)?;
        writeln!(f, "{}", "=".repeat(40))?;
        writeln!(f, "Cache size:        {}", self.cache_size)?;
        writeln!(f, "Accesses:          {}", self.accesses)?;
        writeln!(f, "Hits:              {}", self.hits)?;
        writeln!(f, "Hit ratio:         {:.4}", self.hit_ratio())?;
        writeln!(f, "Prefetches:        {}", self.prefetches)?;
        if self.accesses > 0 {
            let per_access = self.elapsed.as_secs_f64() * 1e6 / self.accesses as f64;
            writeln!(f, "Time per access:   {:.3}us", per_access)?;
        }
        Ok(())
    }
}

/// Replays traces through a [`FileCache`] driven by one [`Strategy`]
pub struct Simulator<S: Symbol> {
    cache: FileCache<S>,
    cache_size: usize,
    strategy: Box<dyn Strategy<S>>,
}

impl<S: Symbol> Simulator<S> {
    pub fn new(cache_size: usize, strategy: Box<dyn Strategy<S>>) -> Result<Self> {
        Ok(Self {
            cache: FileCache::new(cache_size)?,
            cache_size,
            strategy,
        })
    }

    pub fn run(&mut self, trace: &[S]) -> SimulationReport {
        let mut hits = 0;
        let mut prefetches = 0;
        let start = Instant::now();

        for access in trace {
            if self.cache.access(access) {
                hits += 1;
            } else {
                for symbol in self.strategy.on_miss(access, &self.cache) {
                    self.cache.insert(symbol);
                    prefetches += 1;
                }
            }
            self.strategy.after_access(access);
        }

        let report = SimulationReport {
            strategy: self.strategy.name(),
            cache_size: self.cache_size,
            accesses: trace.len(),
            hits,
            prefetches,
            elapsed: start.elapsed(),
        };
        tracing::info!(
            strategy = report.strategy,
            hits = report.hits,
            accesses = report.accesses,
            prefetches = report.prefetches,
            "simulation finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::{Rule, Subsequence};

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    #[test]
    fn test_file_cache_lru() {
        let mut cache = FileCache::new(2).unwrap();
        assert!(!cache.access(&'a'));
        assert!(!cache.access(&'b'));
        assert!(cache.access(&'a'));
        // 'b' is now least recently used
        assert!(!cache.access(&'c'));
        assert!(!cache.contains(&'b'));
        assert!(cache.contains(&'a'));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_zero_cache_rejected() {
        assert!(Simulator::<char>::new(0, Box::new(NonPredictive)).is_err());
    }

    #[test]
    fn test_non_predictive_baseline() {
        let mut sim = Simulator::new(2, Box::new(NonPredictive)).unwrap();
        let report = sim.run(&chars("ababcc"));
        assert_eq!(report.accesses, 6);
        assert_eq!(report.hits, 3);
        assert_eq!(report.prefetches, 0);
        assert_eq!(report.hit_ratio(), 0.5);
    }

    #[test]
    fn test_cminer_prefetches_prediction() {
        let rule = Rule {
            history: Subsequence::from("ab"),
            prediction: 'c',
            support: 4,
            confidence: 1.0,
        };
        let rules = Arc::new(std::iter::once(rule).collect());
        let mut sim = Simulator::new(4, Box::new(CMinerStrategy::new(rules, 1))).unwrap();

        let report = sim.run(&chars("abc"));
        assert_eq!(report.prefetches, 1);
        assert_eq!(report.hits, 1);
    }

    #[test]
    fn test_quickmine_beats_baseline_on_cycle() {
        let trace = chars("abcdabcdabcdabcd");

        let mut baseline = Simulator::new(2, Box::new(NonPredictive)).unwrap();
        let baseline = baseline.run(&trace);
        assert_eq!(baseline.hits, 0);

        let strategy = QuickMineStrategy::new(StreamConfig::simulation()).unwrap();
        let mut sim = Simulator::new(2, Box::new(strategy)).unwrap();
        let report = sim.run(&trace);
        assert!(report.hits > baseline.hits);
        assert!(report.prefetches > 0);
    }

    #[test]
    fn test_empty_trace() {
        let mut sim = Simulator::<char>::new(2, Box::new(NonPredictive)).unwrap();
        let report = sim.run(&[]);
        assert_eq!(report.hit_ratio(), 0.0);
        assert!(report.to_string().contains("Accesses:          0"));
    }
}
