//! CLI argument parsing for corrminer

use crate::config::{MinerConfig, MinerKind, RuleMergeMode, StreamConfig};
use crate::trace::TraceFormat;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for reports
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

/// Prefetching strategy replayed by `simulate`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SimStrategy {
    /// Plain LRU cache, no prefetching
    None,
    /// Rules mined from the whole trace up front
    Cminer,
    /// Rules learned online while replaying
    Quickmine,
}

#[derive(Parser, Debug)]
#[command(name = "corrminer")]
#[command(version)]
#[command(about = "Mine access correlations from traces and simulate predictive prefetching", long_about = None)]
pub struct Cli {
    /// Enable debug tracing output to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Mine correlation rules from a trace
    Mine(MineArgs),
    /// Replay a trace through a prefetching file cache
    Simulate(SimulateArgs),
    /// Print a random character trace
    Generate(GenerateArgs),
}

/// Where a trace comes from and how to read it
#[derive(Args, Debug)]
pub struct TraceArgs {
    /// Trace file to read
    #[arg(value_name = "TRACE")]
    pub trace: PathBuf,

    /// Trace encoding
    #[arg(long, value_enum, default_value = "lines")]
    pub format: TraceFormat,

    /// Common path prefix to remove from audit-log sources
    #[arg(long = "strip-prefix", value_name = "PREFIX")]
    pub strip_prefix: Option<String>,
}

/// Batch mining parameters; flags override the config file
#[derive(Args, Debug)]
pub struct MiningArgs {
    /// TOML file with miner settings
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Frequent-subsequence miner
    #[arg(long, value_enum)]
    pub miner: Option<MinerKind>,

    /// Segment length (default: 5)
    #[arg(long = "window-size", value_name = "N")]
    pub window_size: Option<usize>,

    /// Maximum skipped positions between correlated accesses (default: window size - 2)
    #[arg(long = "max-gap", value_name = "N")]
    pub max_gap: Option<usize>,

    /// Minimum occurrences for a subsequence to be frequent (default: 4)
    #[arg(long = "min-support", value_name = "N")]
    pub min_support: Option<usize>,

    /// Minimum rule confidence (default: 1.0)
    #[arg(long = "min-confidence", value_name = "F")]
    pub min_confidence: Option<f64>,

    /// How rules sharing a history are merged
    #[arg(long, value_enum)]
    pub merge: Option<RuleMergeMode>,
}

impl MiningArgs {
    /// Resolve flags on top of the config file (or the defaults)
    pub fn miner_config(&self) -> anyhow::Result<MinerConfig> {
        let mut config = match &self.config {
            Some(path) => MinerConfig::from_toml(path)?,
            None => MinerConfig::default(),
        };

        if let Some(window_size) = self.window_size {
            config.window_size = window_size;
            config.max_gap = window_size.saturating_sub(2);
        }
        if let Some(max_gap) = self.max_gap {
            config.max_gap = max_gap;
        }
        if let Some(min_support) = self.min_support {
            config.min_support = min_support;
        }
        if let Some(min_confidence) = self.min_confidence {
            config.min_confidence = min_confidence;
        }
        if let Some(miner) = self.miner {
            config.miner = miner;
        }
        if let Some(merge) = self.merge {
            config.merge_mode = merge;
        }

        config.validate()?;
        Ok(config)
    }
}

#[derive(Args, Debug)]
pub struct MineArgs {
    #[command(flatten)]
    pub trace: TraceArgs,

    #[command(flatten)]
    pub mining: MiningArgs,

    /// Output format (text or json)
    #[arg(long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(Args, Debug)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub trace: TraceArgs,

    /// Prefetching strategy
    #[arg(long, value_enum, default_value = "quickmine")]
    pub strategy: SimStrategy,

    /// Number of entries in the simulated file cache
    #[arg(long = "cache-size", value_name = "N", default_value = "1024")]
    pub cache_size: usize,

    /// Maximum suffixes prefetched per miss (quickmine only, default: 3)
    #[arg(long = "prefetch-num", value_name = "N")]
    pub prefetch_num: Option<usize>,

    /// Mining settings for the cminer strategy. Quickmine reads only
    /// `--max-gap`; the baseline ignores all of them.
    #[command(flatten)]
    pub mining: MiningArgs,

    /// Output format (text or json)
    #[arg(long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

impl SimulateArgs {
    /// Streaming settings for the quickmine strategy
    pub fn stream_config(&self) -> anyhow::Result<StreamConfig> {
        let mut config = StreamConfig::simulation();
        // `--max-gap` counts skipped positions; the stream bound is exclusive
        // on the distance between two correlated accesses
        if let Some(max_gap) = self.mining.max_gap {
            config.max_gap = max_gap.saturating_add(2);
        }
        if let Some(prefetch_num) = self.prefetch_num {
            config.prefetch_num = prefetch_num;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Number of accesses to generate
    #[arg(long, value_name = "N")]
    pub length: usize,

    /// Seed for a reproducible trace
    #[arg(long)]
    pub seed: Option<u64>,

    /// Symbols to draw from (default: a-z)
    #[arg(long)]
    pub alphabet: Option<String>,
}
