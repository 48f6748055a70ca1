use crate::sequence::Symbol;
use fnv::FnvHashMap;
use serde::Serialize;

/// A predicted symbol and how often it followed its prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suffix<S> {
    pub symbol: S,
    pub count: usize,
}

/// Bounded list of suffixes ranked by count, highest first
///
/// A symbol → position index sits alongside the list so membership checks
/// do not scan. Both are only ever changed through [`SuffixList::add`].
#[derive(Debug, Clone)]
pub struct SuffixList<S: Symbol> {
    entries: Vec<Suffix<S>>,
    positions: FnvHashMap<S, usize>,
    capacity: usize,
}

impl<S: Symbol> SuffixList<S> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity.saturating_add(1)),
            positions: FnvHashMap::default(),
            capacity,
        }
    }

    /// Count one more occurrence of `symbol`
    ///
    /// A new symbol enters with count 1 ahead of the other count-1 entries.
    /// A known symbol moves forward past every entry whose count is now
    /// strictly lower, staying behind entries it only ties with. When the
    /// list outgrows its capacity the entry that falls off the end is dropped.
    pub fn add(&mut self, symbol: S) {
        let target = match self.positions.get(&symbol).copied() {
            Some(pos) => {
                self.entries[pos].count += 1;
                let count = self.entries[pos].count;
                let target = self.entries[..pos]
                    .iter()
                    .rposition(|e| e.count >= count)
                    .map_or(0, |i| i + 1);
                if target < pos {
                    let entry = self.entries.remove(pos);
                    self.entries.insert(target, entry);
                }
                target
            }
            None => {
                let target = self
                    .entries
                    .iter()
                    .rposition(|e| e.count > 1)
                    .map_or(0, |i| i + 1);
                self.entries.insert(target, Suffix { symbol, count: 1 });
                target
            }
        };

        if self.entries.len() > self.capacity {
            let dropped = self.entries.remove(self.capacity);
            self.positions.remove(&dropped.symbol);
        }
        self.reindex_from(target);
    }

    fn reindex_from(&mut self, start: usize) {
        for (offset, entry) in self.entries[start..].iter().enumerate() {
            self.positions.insert(entry.symbol.clone(), start + offset);
        }
    }

    /// Ranked entries, highest count first
    pub fn entries(&self) -> &[Suffix<S>] {
        &self.entries
    }

    /// Up to `n` best suffix symbols
    pub fn top(&self, n: usize) -> impl Iterator<Item = &S> {
        self.entries.iter().take(n).map(|e| &e.symbol)
    }

    pub fn count_of(&self, symbol: &S) -> Option<usize> {
        self.positions.get(symbol).map(|&pos| self.entries[pos].count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(list: &SuffixList<char>) -> String {
        list.entries().iter().map(|e| e.symbol).collect()
    }

    fn assert_consistent(list: &SuffixList<char>) {
        assert!(list.len() <= list.capacity());
        assert_eq!(list.positions.len(), list.len());
        for (i, entry) in list.entries().iter().enumerate() {
            assert_eq!(list.positions.get(&entry.symbol), Some(&i));
        }
        assert!(list.entries().windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_new_symbols_enter_front_of_ones() {
        let mut list = SuffixList::new(4);
        list.add('a');
        list.add('b');
        list.add('c');

        assert_eq!(symbols(&list), "cba");
        assert_consistent(&list);
    }

    #[test]
    fn test_new_symbol_lands_after_higher_counts() {
        let mut list = SuffixList::new(4);
        list.add('a');
        list.add('a');
        list.add('b');

        assert_eq!(symbols(&list), "ab");
        assert_eq!(list.count_of(&'a'), Some(2));
        assert_eq!(list.count_of(&'b'), Some(1));
        assert_consistent(&list);
    }

    #[test]
    fn test_increment_moves_past_lower_counts_only() {
        let mut list = SuffixList::new(8);
        for symbol in ['a', 'a', 'b', 'c'] {
            list.add(symbol);
        }
        // a=2, then c=1, b=1
        assert_eq!(symbols(&list), "acb");

        list.add('b');
        // b ties a at 2 and stays behind it
        assert_eq!(symbols(&list), "abc");

        list.add('c');
        list.add('c');
        // c=3 passes both
        assert_eq!(symbols(&list), "cab");
        assert_consistent(&list);
    }

    #[test]
    fn test_overflow_drops_last_entry() {
        let mut list = SuffixList::new(2);
        list.add('a');
        list.add('a');
        list.add('b');
        list.add('c');

        // c entered ahead of b, b fell off
        assert_eq!(symbols(&list), "ac");
        assert_eq!(list.count_of(&'b'), None);
        assert_consistent(&list);

        // a re-added symbol starts again from 1
        list.add('b');
        assert_eq!(list.count_of(&'b'), Some(1));
        assert_eq!(list.count_of(&'c'), None);
        assert_consistent(&list);
    }

    #[test]
    fn test_overflow_can_reject_newcomer() {
        let mut list = SuffixList::new(2);
        for symbol in ['a', 'a', 'b', 'b', 'c'] {
            list.add(symbol);
        }
        assert_eq!(symbols(&list), "ab");
        assert_eq!(list.count_of(&'c'), None);
        assert_consistent(&list);
    }

    #[test]
    fn test_top() {
        let mut list = SuffixList::new(4);
        for symbol in ['x', 'y', 'y', 'z'] {
            list.add(symbol);
        }
        let top: Vec<_> = list.top(2).copied().collect();
        assert_eq!(top, vec!['y', 'z']);
    }
}
