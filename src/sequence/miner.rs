use crate::config::{MinerConfig, MinerKind};
use crate::sequence::bfs::BfsMiner;
use crate::sequence::dfs::DfsMiner;
use crate::sequence::frequent::FrequentSet;
use crate::sequence::subsequence::Symbol;

/// Produces every gap-bounded frequent subsequence of a segmented trace
///
/// Both implementations share one occurrence model. Within a segment a
/// subsequence `s1 s2 ... sn` is located greedily: `s1` at its first
/// position, each following `si` at its first position after `s(i-1)`, at
/// most `max_gap` positions later. Single symbols are counted once per
/// position; longer subsequences once per segment they are located in.
pub trait FrequentMiner<S: Symbol> {
    /// Mine the frequent set and its length tiers
    fn mine(&self, segments: &[&[S]], config: &MinerConfig) -> FrequentSet<S>;

    /// Short name used in logs and reports
    fn name(&self) -> &'static str;
}

impl MinerKind {
    /// Build the miner selected by this kind
    pub fn build<S: Symbol>(self) -> Box<dyn FrequentMiner<S>> {
        match self {
            MinerKind::Bfs => Box::new(BfsMiner),
            MinerKind::Dfs => Box::new(DfsMiner),
        }
    }
}

/// Position of the last symbol of `symbols` under the greedy occurrence
/// model, or `None` when the segment does not contain it
pub(crate) fn locate<S: PartialEq>(segment: &[S], symbols: &[S], max_gap: usize) -> Option<usize> {
    let (first, rest) = symbols.split_first()?;
    let mut pos = segment.iter().position(|s| s == first)?;

    for symbol in rest {
        let window = gap_window(segment, pos, max_gap);
        let offset = window.iter().position(|s| s == symbol)?;
        pos += offset + 1;
    }

    Some(pos)
}

/// The `max_gap + 1` positions following `pos` (fewer at the segment end)
pub(crate) fn gap_window<S>(segment: &[S], pos: usize, max_gap: usize) -> &[S] {
    let start = (pos + 1).min(segment.len());
    let end = pos.saturating_add(max_gap).saturating_add(2).min(segment.len());
    &segment[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    #[test]
    fn test_locate_respects_gap() {
        let segment = chars("axxbc");
        assert_eq!(locate(&segment, &['a', 'b'], 2), Some(3));
        assert_eq!(locate(&segment, &['a', 'b'], 1), None);
        assert_eq!(locate(&segment, &['a', 'b', 'c'], 2), Some(4));
    }

    #[test]
    fn test_locate_searches_after_previous_symbol() {
        // 'a' is found after 'b' even though an earlier 'a' exists
        let segment = chars("abac");
        assert_eq!(locate(&segment, &['b', 'a'], 0), Some(2));
        assert_eq!(locate(&segment, &['c', 'a'], 3), None);
    }

    #[test]
    fn test_gap_window_clamped() {
        let segment = chars("abcde");
        assert_eq!(gap_window(&segment, 1, 1), &['c', 'd'][..]);
        assert_eq!(gap_window(&segment, 3, 5), &['e'][..]);
        assert!(gap_window(&segment, 4, 5).is_empty());
    }
}
