use crate::config::{MinerConfig, RuleMergeMode};
use crate::error::{MiningError, Result};
use crate::sequence::frequent::{FrequentSet, SupportMap};
use crate::sequence::subsequence::{Subsequence, Symbol};
use fnv::FnvHashMap;
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::fmt;

/// Correlation rule: after `history`, `prediction` tends to follow
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule<S> {
    pub history: Subsequence<S>,
    pub prediction: S,

    /// Largest support among the closed subsequences that produced this rule
    pub support: usize,

    /// `support({prediction}) / support(history)`
    ///
    /// A co-occurrence ratio, not the probability that `prediction`
    /// immediately follows `history`.
    pub confidence: f64,
}

impl<S: fmt::Display> fmt::Display for Rule<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} (support={}, confidence={:.3})",
            self.history, self.prediction, self.support, self.confidence
        )
    }
}

/// Mined rules keyed by history
///
/// A history maps to exactly one rule; see [`RuleMergeMode`] for how
/// competing predictions for the same history are resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet<S: Symbol> {
    rules: FnvHashMap<Subsequence<S>, Rule<S>>,
}

impl<S: Symbol> Default for RuleSet<S> {
    fn default() -> Self {
        Self {
            rules: FnvHashMap::default(),
        }
    }
}

impl<S: Symbol> RuleSet<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a rule, replacing any rule with the same history
    pub fn insert(&mut self, rule: Rule<S>) -> Option<Rule<S>> {
        self.rules.insert(rule.history.clone(), rule)
    }

    /// Rule whose history is exactly `history`
    pub fn get(&self, history: &[S]) -> Option<&Rule<S>> {
        self.rules.get(history)
    }

    /// Rules whose history begins with `prefix` (including an exact match)
    pub fn starting_with<'a>(&'a self, prefix: &'a [S]) -> impl Iterator<Item = &'a Rule<S>> + 'a {
        self.rules
            .iter()
            .filter(move |(history, _)| history.starts_with(prefix))
            .map(|(_, rule)| rule)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule<S>> {
        self.rules.values()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules by descending support, then by history
    pub fn sorted(&self) -> Vec<&Rule<S>>
    where
        S: Ord,
    {
        let mut rules: Vec<_> = self.rules.values().collect();
        rules.sort_by(|a, b| {
            b.support
                .cmp(&a.support)
                .then_with(|| a.history.cmp(&b.history))
        });
        rules
    }

    fn merge(&mut self, candidate: Rule<S>, mode: RuleMergeMode) {
        match self.rules.entry(candidate.history.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(candidate);
            }
            Entry::Occupied(mut slot) => {
                let rule = slot.get_mut();
                if mode == RuleMergeMode::Strict && candidate.confidence > rule.confidence {
                    rule.prediction = candidate.prediction;
                    rule.confidence = candidate.confidence;
                }
                rule.support = rule.support.max(candidate.support);
            }
        }
    }
}

impl<S: Symbol> FromIterator<Rule<S>> for RuleSet<S> {
    fn from_iter<I: IntoIterator<Item = Rule<S>>>(iter: I) -> Self {
        let mut rules = RuleSet::new();
        for rule in iter {
            rules.insert(rule);
        }
        rules
    }
}

/// Derive rules from the closed subsequences
///
/// Every closed subsequence `S` of length >= 2 yields candidates
/// `S[i..j) -> S[k]` for all `i < j <= k < len`. Candidates with
/// `support(S[k]) / support(S[i..j))` below `min_confidence` are dropped.
///
/// Inner spans (`i > 0`) are not guaranteed to have been located on their own
/// under the greedy gap-bounded model, so a span missing from the frequent
/// set is skipped. A missing prefix span or a missing singleton means the
/// miner lost a count and is reported as [`MiningError::MissingSupportLookup`].
pub fn generate_rules<S: Symbol>(
    frequent: &FrequentSet<S>,
    closed: &SupportMap<S>,
    config: &MinerConfig,
) -> Result<RuleSet<S>> {
    let mut rules = RuleSet::new();

    if frequent.is_empty() || closed.is_empty() {
        tracing::warn!("No closed frequent subsequences; rule set is empty");
        return Ok(rules);
    }

    let mut skipped = 0usize;
    for (closed_seq, &closed_support) in closed {
        let symbols = closed_seq.symbols();
        let len = symbols.len();
        if len < 2 {
            continue;
        }

        for start in 0..len - 1 {
            for end in start + 1..len {
                let history = &symbols[start..end];
                let Some(history_support) = frequent.support(history) else {
                    if start == 0 {
                        return Err(missing(history));
                    }
                    skipped += 1;
                    continue;
                };

                for prediction in &symbols[end..] {
                    let prediction_support = frequent
                        .support(std::slice::from_ref(prediction))
                        .ok_or_else(|| missing(std::slice::from_ref(prediction)))?;

                    let confidence = prediction_support as f64 / history_support as f64;
                    if confidence < config.min_confidence {
                        continue;
                    }

                    rules.merge(
                        Rule {
                            history: Subsequence::from(history),
                            prediction: prediction.clone(),
                            support: closed_support,
                            confidence,
                        },
                        config.merge_mode,
                    );
                }
            }
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, "history spans without a mined support were skipped");
    }
    tracing::debug!(closed = closed.len(), rules = rules.len(), "rule generation complete");

    Ok(rules)
}

fn missing<S: Symbol>(symbols: &[S]) -> MiningError {
    MiningError::MissingSupportLookup {
        subsequence: format!("{:?}", symbols),
    }
}
