// Frequent-subsequence mining and rule generation (C-Miner)
//
// The batch pipeline cuts an access trace into fixed windows, mines every
// gap-bounded subsequence that recurs in at least `min_support` windows,
// keeps the closed ones and turns them into history -> prediction rules.
//
//   segment -> {BfsMiner | DfsMiner} -> closed_subsequences -> generate_rules
//
// Reference:
//   Li, Z., Chen, Z., Srinivasan, S. M., & Zhou, Y. (2004). C-Miner: Mining
//   block correlations in storage systems. USENIX FAST.

mod bfs;
mod closed;
mod dfs;
mod frequent;
mod miner;
mod rules;
mod segment;
mod subsequence;

pub use bfs::BfsMiner;
pub use closed::closed_subsequences;
pub use dfs::DfsMiner;
pub use frequent::{FrequentSet, SupportMap};
pub use miner::FrequentMiner;
pub use rules::{generate_rules, Rule, RuleSet};
pub use segment::segment;
pub use subsequence::{Subsequence, Symbol};
