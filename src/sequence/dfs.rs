use crate::config::MinerConfig;
use crate::sequence::bfs::count_singletons;
use crate::sequence::frequent::FrequentSet;
use crate::sequence::miner::FrequentMiner;
use crate::sequence::subsequence::{Subsequence, Symbol};
use fnv::FnvHashMap;

/// Depth-first miner over suffix projections
///
/// Each frequent candidate carries its projection: for every segment in which
/// it is located, the tail of that segment after the candidate's last matched
/// symbol. Extending the candidate only looks at the first `max_gap + 1`
/// symbols of each tail, so segments are never rescanned from the start.
///
/// Candidates wait on an explicit worklist rather than the call stack. Each
/// projection belongs to exactly one worklist entry and is dropped as soon as
/// that candidate has been expanded.
#[derive(Debug, Clone, Copy, Default)]
pub struct DfsMiner;

/// Per-segment tails following a candidate's last matched symbol.
/// At most one tail per segment. Equal tails from different segments are
/// all kept: each one is a separate occurrence.
type Projection<'a, S> = Vec<&'a [S]>;

struct Pending<'a, S: Symbol> {
    candidate: Subsequence<S>,
    projection: Projection<'a, S>,
}

impl<S: Symbol> FrequentMiner<S> for DfsMiner {
    fn mine(&self, segments: &[&[S]], config: &MinerConfig) -> FrequentSet<S> {
        let mut frequent = FrequentSet::new();

        let singletons = count_singletons(segments, config.min_support);
        if singletons.is_empty() {
            return frequent;
        }

        let mut worklist: Vec<Pending<'_, S>> = singletons
            .keys()
            .map(|candidate| Pending {
                projection: first_projection(candidate, segments),
                candidate: candidate.clone(),
            })
            .collect();
        frequent.insert_tier(1, singletons);

        let mut expanded = 0usize;
        while let Some(Pending {
            candidate,
            projection,
        }) = worklist.pop()
        {
            expanded += 1;

            for alpha in frequent_symbols(&projection, config.min_support) {
                if candidate.contains(&alpha) {
                    continue;
                }

                let (tails, end_count) = project(&projection, &alpha, config.max_gap);
                let support = tails.len() + end_count;
                if support < config.min_support {
                    continue;
                }

                let extended = candidate.extended(alpha);
                frequent.insert(extended.clone(), support);
                if !tails.is_empty() {
                    worklist.push(Pending {
                        candidate: extended,
                        projection: tails,
                    });
                }
            }
        }

        tracing::debug!(
            miner = "dfs",
            expanded,
            frequent = frequent.len(),
            max_len = frequent.max_len(),
            "worklist drained"
        );

        frequent
    }

    fn name(&self) -> &'static str {
        "dfs"
    }
}

/// Tails after the first occurrence of a single symbol, one per segment
fn first_projection<'a, S: Symbol>(candidate: &Subsequence<S>, segments: &[&'a [S]]) -> Projection<'a, S> {
    let Some(symbol) = candidate.last() else {
        return Vec::new();
    };

    segments
        .iter()
        .filter_map(|&segment| {
            let pos = segment.iter().position(|s| s == symbol)?;
            let tail = &segment[pos + 1..];
            (!tail.is_empty()).then_some(tail)
        })
        .collect()
}

/// Symbols occurring at least `min_support` times across all tails.
///
/// Every located extension consumes one tail occurrence, so no symbol below
/// this count can form a frequent extension.
fn frequent_symbols<S: Symbol>(projection: &[&[S]], min_support: usize) -> Vec<S> {
    let mut counts: FnvHashMap<&S, usize> = FnvHashMap::default();
    for tail in projection {
        for symbol in tail.iter() {
            *counts.entry(symbol).or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .filter(|(_, count)| *count >= min_support)
        .map(|(symbol, _)| symbol.clone())
        .collect()
}

/// Locate `alpha` in the gap window of each tail.
///
/// Returns the new tails (remainders after `alpha`) and the number of tails
/// where `alpha` was the final symbol.
fn project<'a, S: Symbol>(projection: &[&'a [S]], alpha: &S, max_gap: usize) -> (Projection<'a, S>, usize) {
    let mut tails = Vec::new();
    let mut end_count = 0;

    for &tail in projection {
        let window = &tail[..tail.len().min(max_gap.saturating_add(1))];
        if let Some(pos) = window.iter().position(|s| s == alpha) {
            if pos == tail.len() - 1 {
                end_count += 1;
            } else {
                tails.push(&tail[pos + 1..]);
            }
        }
    }

    (tails, end_count)
}
