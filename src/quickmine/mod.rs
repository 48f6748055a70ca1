// Streaming rule mining with a bounded rule cache (QuickMine)
//
// Unlike the batch pipeline in `sequence`, rules are derived online from
// every access and kept in a two-level bounded cache:
//
//   prefix (A_i, A_j)  --LRU-->  SuffixList [A_k:count, ...]  (ranked, bounded)
//
// Reference:
//   Soundararajan, G., Mihailescu, M., & Amza, C. (2008). Context-aware
//   prefetching at the storage server. USENIX ATC.

mod rule_cache;
mod stream;
mod suffix_list;

pub use rule_cache::{RuleCache, SharedRuleCache};
pub use stream::QuickMine;
pub use suffix_list::{Suffix, SuffixList};
