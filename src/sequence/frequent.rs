use crate::sequence::subsequence::{Subsequence, Symbol};
use fnv::FnvHashMap;
use std::collections::BTreeMap;

/// Support table: subsequence → occurrence count
pub type SupportMap<S> = FnvHashMap<Subsequence<S>, usize>;

/// Frequent subsequences grouped into tiers by length
///
/// Along any prefix-extension chain supports never increase, which is what
/// lets both miners stop extending a prefix as soon as it falls below
/// `min_support`.
///
/// ```text
/// {1: {a=5, b=4, c=5}, 2: {ab=4, ac=5, bc=4}, 3: {abc=4}}
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FrequentSet<S: Symbol> {
    tiers: BTreeMap<usize, SupportMap<S>>,
}

impl<S: Symbol> FrequentSet<S> {
    pub fn new() -> Self {
        Self {
            tiers: BTreeMap::new(),
        }
    }

    /// Record `subsequence` with its support in the tier matching its length
    pub fn insert(&mut self, subsequence: Subsequence<S>, support: usize) {
        self.tiers
            .entry(subsequence.len())
            .or_default()
            .insert(subsequence, support);
    }

    /// Merge a whole tier at once. Empty tiers are not stored.
    pub fn insert_tier(&mut self, length: usize, tier: SupportMap<S>) {
        if tier.is_empty() {
            return;
        }
        self.tiers.entry(length).or_default().extend(tier);
    }

    /// Support of an exact subsequence, looked up by its symbols
    pub fn support(&self, symbols: &[S]) -> Option<usize> {
        self.tiers.get(&symbols.len())?.get(symbols).copied()
    }

    pub fn tier(&self, length: usize) -> Option<&SupportMap<S>> {
        self.tiers.get(&length)
    }

    /// Tiers in ascending length order
    pub fn tiers(&self) -> impl Iterator<Item = (usize, &SupportMap<S>)> {
        self.tiers.iter().map(|(len, tier)| (*len, tier))
    }

    /// Length of the longest frequent subsequence (0 when empty)
    pub fn max_len(&self) -> usize {
        self.tiers.keys().next_back().copied().unwrap_or(0)
    }

    /// Total number of frequent subsequences across all tiers
    pub fn len(&self) -> usize {
        self.tiers.values().map(|tier| tier.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Subsequence<S>, usize)> {
        self.tiers
            .values()
            .flat_map(|tier| tier.iter().map(|(seq, support)| (seq, *support)))
    }
}

impl<S: Symbol> Default for FrequentSet<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_groups_by_length() {
        let mut frequent = FrequentSet::new();
        frequent.insert(Subsequence::from("a"), 5);
        frequent.insert(Subsequence::from("ab"), 4);
        frequent.insert(Subsequence::from("ac"), 5);

        assert_eq!(frequent.len(), 3);
        assert_eq!(frequent.max_len(), 2);
        assert_eq!(frequent.tier(2).map(|t| t.len()), Some(2));
        assert_eq!(frequent.support(&['a', 'c']), Some(5));
        assert_eq!(frequent.support(&['c']), None);
    }

    #[test]
    fn test_empty_tier_not_stored() {
        let mut frequent: FrequentSet<char> = FrequentSet::new();
        frequent.insert_tier(3, SupportMap::default());
        assert!(frequent.is_empty());
        assert_eq!(frequent.max_len(), 0);
    }
}
