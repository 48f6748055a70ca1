use crate::config::StreamConfig;
use crate::error::Result;
use crate::quickmine::rule_cache::RuleCache;
use crate::sequence::Symbol;
use std::collections::VecDeque;

/// Streaming correlation miner
///
/// Every access `A_k` closes rules `A_i & A_j -> A_k` for all earlier
/// `i < j < k` with `j - i < max_gap` and `k - j < max_gap`. Rules go straight
/// into a bounded [`RuleCache`], so memory stays fixed however long the
/// stream runs. Only the accesses that can still take part in a future rule
/// are remembered.
#[derive(Debug)]
pub struct QuickMine<S: Symbol> {
    config: StreamConfig,
    cache: RuleCache<S>,
    history: VecDeque<S>,
}

impl<S: Symbol> QuickMine<S> {
    pub fn new(config: StreamConfig) -> Result<Self> {
        config.validate()?;
        let cache = RuleCache::from_config(&config)?;
        let history = VecDeque::with_capacity(history_len(config.max_gap));

        Ok(Self {
            config,
            cache,
            history,
        })
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    pub fn cache(&self) -> &RuleCache<S> {
        &self.cache
    }

    /// Feed one access and record the rules it completes
    pub fn observe(&mut self, symbol: S) {
        if self.history.len() == history_len(self.config.max_gap) {
            self.history.pop_front();
        }
        self.history.push_back(symbol);

        let k = self.history.len() - 1;
        let reach = self.config.max_gap - 1;
        for j in k.saturating_sub(reach)..k {
            for i in j.saturating_sub(reach)..j {
                let prefix = [self.history[i].clone(), self.history[j].clone()];
                self.cache.add_rule(&prefix, self.history[k].clone());
            }
        }
    }

    /// Mine a whole trace in one pass
    ///
    /// Produces exactly the rules that observing each access in turn would.
    pub fn mine_all(&mut self, trace: &[S]) {
        if trace.is_empty() {
            tracing::warn!("Empty access sequence; nothing to mine");
            return;
        }

        for symbol in trace {
            self.observe(symbol.clone());
        }

        tracing::debug!(
            accesses = trace.len(),
            prefixes = self.cache.len(),
            "stream mining complete"
        );
    }

    /// Up to `limit` symbols expected after the two latest accesses, best first
    pub fn predict_next(&mut self, limit: usize) -> Vec<S> {
        let len = self.history.len();
        if len < 2 {
            return Vec::new();
        }

        let prefix = [self.history[len - 2].clone(), self.history[len - 1].clone()];
        self.cache
            .predict(&prefix)
            .iter()
            .take(limit)
            .map(|suffix| suffix.symbol.clone())
            .collect()
    }

    /// The most recent accesses, oldest first
    pub fn history(&self) -> impl Iterator<Item = &S> {
        self.history.iter()
    }
}

/// Accesses needed to close every rule ending at the newest one
fn history_len(max_gap: usize) -> usize {
    max_gap.saturating_sub(1).saturating_mul(2).saturating_add(1)
}
