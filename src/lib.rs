//! corrminer - access-correlation mining and predictive prefetching
//!
//! This library mines recurring, gap-tolerant correlations from access traces
//! (file paths, block numbers, characters) and turns them into prediction
//! rules: "after seeing history H, symbol P tends to follow".
//!
//! Two pipelines are provided:
//! - [`session::MiningSession`] runs the batch C-Miner pipeline (segment,
//!   frequent subsequences, closed filter, rules) over a whole trace and
//!   [`predict::PredictiveMatcher`] applies the rules online.
//! - [`quickmine::QuickMine`] learns rules incrementally into a bounded
//!   [`quickmine::RuleCache`] and predicts from it directly.
//!
//! [`simulate`] replays traces through an LRU file cache to compare both
//! predictors against plain caching.

pub mod access_log;
pub mod cli;
pub mod config;
pub mod error;
pub mod predict;
pub mod quickmine;
pub mod sequence;
pub mod session;
pub mod simulate;
pub mod trace;

pub use error::{MiningError, Result};
