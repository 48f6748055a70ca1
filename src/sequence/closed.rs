use crate::sequence::frequent::{FrequentSet, SupportMap};
use crate::sequence::subsequence::Symbol;

/// Keep only closed frequent subsequences
///
/// Every subsequence of the longest tier is closed. A shorter subsequence `S`
/// is compared against the next tier only: each `S'` one symbol longer that
/// contains `S` as a contiguous run dominates it. `S` is closed when no such
/// `S'` exists, or when its support is strictly greater than every
/// dominator's. One dominator with equal or greater support is enough to
/// drop it.
///
/// # Example
/// ```
/// use corrminer::sequence::{closed_subsequences, FrequentSet, Subsequence};
///
/// let mut frequent = FrequentSet::new();
/// frequent.insert(Subsequence::from("a"), 5);
/// frequent.insert(Subsequence::from("b"), 4);
/// frequent.insert(Subsequence::from("ab"), 4);
///
/// let closed = closed_subsequences(&frequent);
/// assert!(closed.contains_key(&Subsequence::from("ab")));
/// assert!(closed.contains_key(&Subsequence::from("a"))); // 5 > 4
/// assert!(!closed.contains_key(&Subsequence::from("b"))); // 4 <= 4
/// ```
pub fn closed_subsequences<S: Symbol>(frequent: &FrequentSet<S>) -> SupportMap<S> {
    let mut closed = SupportMap::default();

    let max_len = frequent.max_len();
    if max_len == 0 {
        tracing::warn!("No frequent subsequences to filter; closed set is empty");
        return closed;
    }

    for (length, tier) in frequent.tiers() {
        let supers = frequent.tier(length + 1);

        for (subsequence, &support) in tier {
            let dominated = supers.is_some_and(|supers| {
                supers.iter().any(|(sup, &sup_support)| {
                    subsequence.is_contiguous_in(sup) && support <= sup_support
                })
            });

            if !dominated {
                closed.insert(subsequence.clone(), support);
            }
        }
    }

    tracing::debug!(
        frequent = frequent.len(),
        closed = closed.len(),
        max_len,
        "closed filter complete"
    );

    closed
}
