use crate::config::MinerConfig;
use crate::sequence::frequent::{FrequentSet, SupportMap};
use crate::sequence::miner::{gap_window, locate, FrequentMiner};
use crate::sequence::subsequence::{Subsequence, Symbol};

/// Breadth-first miner: one full scan of every segment per subsequence length
///
/// Pass 1 counts single symbols. Pass `k` relocates every frequent
/// length-`(k-1)` prefix in each segment and extends it with each distinct,
/// not-yet-included symbol found in the gap window after the prefix's last
/// matched position. After each pass, candidates below `min_support` are
/// dropped; their extensions are never generated.
#[derive(Debug, Clone, Copy, Default)]
pub struct BfsMiner;

impl<S: Symbol> FrequentMiner<S> for BfsMiner {
    fn mine(&self, segments: &[&[S]], config: &MinerConfig) -> FrequentSet<S> {
        let mut frequent = FrequentSet::new();

        let singletons = count_singletons(segments, config.min_support);
        tracing::debug!(
            miner = "bfs",
            pass = 1,
            survivors = singletons.len(),
            "tier complete"
        );
        if singletons.is_empty() {
            return frequent;
        }
        frequent.insert_tier(1, singletons);

        // A subsequence is built inside one segment, so it never exceeds the window
        for length in 2..=config.window_size {
            let Some(prefixes) = frequent.tier(length - 1) else {
                break;
            };

            let mut candidates: SupportMap<S> = SupportMap::default();
            for prefix in prefixes.keys() {
                extend_prefix(prefix, segments, config.max_gap, &mut candidates);
            }
            candidates.retain(|_, count| *count >= config.min_support);

            tracing::debug!(
                miner = "bfs",
                pass = length,
                survivors = candidates.len(),
                "tier complete"
            );
            if candidates.is_empty() {
                break;
            }
            frequent.insert_tier(length, candidates);
        }

        frequent
    }

    fn name(&self) -> &'static str {
        "bfs"
    }
}

/// Pass 1: one count per symbol position, filtered by `min_support`
pub(crate) fn count_singletons<S: Symbol>(segments: &[&[S]], min_support: usize) -> SupportMap<S> {
    let mut counts: SupportMap<S> = SupportMap::default();
    for segment in segments {
        for symbol in segment.iter() {
            *counts
                .entry(Subsequence::singleton(symbol.clone()))
                .or_insert(0) += 1;
        }
    }
    counts.retain(|_, count| *count >= min_support);
    counts
}

/// Credit every one-symbol extension of `prefix`, once per segment
fn extend_prefix<S: Symbol>(
    prefix: &Subsequence<S>,
    segments: &[&[S]],
    max_gap: usize,
    candidates: &mut SupportMap<S>,
) {
    let mut seen: Vec<&S> = Vec::new();

    for &segment in segments {
        let Some(pos) = locate(segment, prefix.symbols(), max_gap) else {
            continue;
        };

        seen.clear();
        for symbol in gap_window(segment, pos, max_gap) {
            if prefix.contains(symbol) || seen.contains(&symbol) {
                continue;
            }
            seen.push(symbol);
            *candidates
                .entry(prefix.extended(symbol.clone()))
                .or_insert(0) += 1;
        }
    }
}
