//! Online prediction from a mined rule set
//!
//! [`PredictiveMatcher`] watches accesses one at a time and grows a candidate
//! history. Whenever the candidate equals a rule's history, that rule's
//! prediction is returned. Accesses that match nothing are tolerated inside
//! the candidate for up to `max_gap` steps before it restarts.

use crate::sequence::{RuleSet, Symbol};
use std::sync::Arc;

/// Where the matcher stands between two accesses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    /// No candidate history
    Empty,
    /// Some rule history may still be completed
    Pending,
}

/// Per-stream matcher over a shared, read-only rule set
#[derive(Debug, Clone)]
pub struct PredictiveMatcher<S: Symbol> {
    rules: Arc<RuleSet<S>>,
    max_gap: usize,
    candidate: Vec<S>,
    gap: usize,
}

impl<S: Symbol> PredictiveMatcher<S> {
    pub fn new(rules: Arc<RuleSet<S>>, max_gap: usize) -> Self {
        Self {
            rules,
            max_gap,
            candidate: Vec::new(),
            gap: 0,
        }
    }

    /// Feed one access; returns the predicted next symbol, if any
    ///
    /// The access is appended to the candidate, then every rule whose history
    /// starts with the candidate is examined:
    ///
    /// 1. a lone symbol that begins no rule history is dropped;
    /// 2. a longer candidate that leads nowhere and has already been
    ///    stretched past `max_gap` restarts from this symbol;
    /// 3. a candidate that is still a proper prefix of some history resets
    ///    the gap;
    /// 4. otherwise the symbol stays in the candidate and the gap grows.
    pub fn observe(&mut self, symbol: S) -> Option<S> {
        self.candidate.push(symbol.clone());

        let mut prediction = None;
        let mut extends = false;
        for rule in self.rules.starting_with(&self.candidate) {
            if rule.history.len() == self.candidate.len() {
                prediction = Some(rule.prediction.clone());
            } else {
                extends = true;
            }
        }

        if self.candidate.len() == 1 {
            if !extends {
                self.candidate.clear();
            }
            self.gap = 0;
        } else if !extends && self.gap > self.max_gap {
            self.candidate.clear();
            self.candidate.push(symbol);
            self.gap = 0;
        } else if extends {
            self.gap = 0;
        } else {
            self.gap += 1;
        }

        if let Some(predicted) = &prediction {
            tracing::trace!(candidate = ?self.candidate, ?predicted, "rule matched");
        }
        prediction
    }

    pub fn state(&self) -> MatchState {
        if self.candidate.is_empty() {
            MatchState::Empty
        } else {
            MatchState::Pending
        }
    }

    pub fn candidate(&self) -> &[S] {
        &self.candidate
    }

    pub fn gap(&self) -> usize {
        self.gap
    }

    pub fn reset(&mut self) {
        self.candidate.clear();
        self.gap = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::{Rule, Subsequence};

    /// Rule set holding exactly `[a, b] -> c`
    fn ab_to_c() -> Arc<RuleSet<char>> {
        let rule = Rule {
            history: Subsequence::from("ab"),
            prediction: 'c',
            support: 4,
            confidence: 1.0,
        };
        Arc::new(std::iter::once(rule).collect())
    }

    fn run(matcher: &mut PredictiveMatcher<char>, trace: &str) -> Vec<Option<char>> {
        trace.chars().map(|c| matcher.observe(c)).collect()
    }

    #[test]
    fn test_unmatched_symbol_inside_gap() {
        let mut matcher = PredictiveMatcher::new(ab_to_c(), 1);
        assert_eq!(run(&mut matcher, "axb"), vec![None, None, None]);
        assert_eq!(matcher.candidate(), &['a', 'x', 'b']);
        assert_eq!(matcher.gap(), 2);
    }

    #[test]
    fn test_direct_match() {
        let mut matcher = PredictiveMatcher::new(ab_to_c(), 1);
        assert_eq!(run(&mut matcher, "ab"), vec![None, Some('c')]);
    }

    #[test]
    fn test_lone_symbol_without_rules_is_dropped() {
        let mut matcher = PredictiveMatcher::new(ab_to_c(), 1);
        assert_eq!(matcher.observe('z'), None);
        assert_eq!(matcher.state(), MatchState::Empty);

        assert_eq!(matcher.observe('a'), None);
        assert_eq!(matcher.state(), MatchState::Pending);
    }

    #[test]
    fn test_restart_after_gap_exceeded() {
        let mut matcher = PredictiveMatcher::new(ab_to_c(), 1);
        run(&mut matcher, "axy");
        // gap is 2 > 1, the next miss restarts from it
        assert_eq!(matcher.observe('q'), None);
        assert_eq!(matcher.candidate(), &['q']);
        assert_eq!(matcher.gap(), 0);

        matcher.reset();
        assert_eq!(matcher.state(), MatchState::Empty);
        assert_eq!(run(&mut matcher, "ab"), vec![None, Some('c')]);
    }
}
