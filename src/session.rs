//! Batch mining session
//!
//! Runs the whole C-Miner pipeline over one access trace and keeps every
//! intermediate product so callers can inspect what each stage produced.

use crate::config::MinerConfig;
use crate::error::{MiningError, Result};
use crate::sequence::{closed_subsequences, generate_rules, segment, FrequentSet, RuleSet, SupportMap, Symbol};
use std::fmt;
use std::time::{Duration, Instant};

/// Validated configuration bound to a miner
#[derive(Debug, Clone)]
pub struct MiningSession {
    config: MinerConfig,
}

/// Everything one mining run produced
#[derive(Debug, Clone)]
pub struct MiningReport<S: Symbol> {
    /// Non-overlapping windows the trace was cut into
    pub segments: Vec<Vec<S>>,
    pub frequent: FrequentSet<S>,
    pub closed: SupportMap<S>,
    pub rules: RuleSet<S>,
    pub miner: &'static str,
    pub elapsed: Duration,
}

impl<S: Symbol> MiningReport<S> {
    fn empty(miner: &'static str) -> Self {
        Self {
            segments: Vec::new(),
            frequent: FrequentSet::new(),
            closed: SupportMap::default(),
            rules: RuleSet::new(),
            miner,
            elapsed: Duration::ZERO,
        }
    }
}

impl MiningSession {
    /// Create a session, rejecting out-of-range parameters up front
    pub fn new(config: MinerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MinerConfig {
        &self.config
    }

    /// Mine `sequence` into a rule set
    ///
    /// An empty sequence is not an error here: it yields an empty report and
    /// a warning.
    pub fn mine<S: Symbol>(&self, sequence: &[S]) -> Result<MiningReport<S>> {
        let miner = self.config.miner.build::<S>();
        let start = Instant::now();

        let segments = match segment(sequence, self.config.window_size) {
            Ok(segments) => segments,
            Err(MiningError::EmptyInput) => {
                tracing::warn!("Empty access sequence; nothing to mine");
                return Ok(MiningReport::empty(miner.name()));
            }
            Err(e) => return Err(e),
        };

        tracing::info!(
            miner = miner.name(),
            symbols = sequence.len(),
            segments = segments.len(),
            window_size = self.config.window_size,
            max_gap = self.config.max_gap,
            min_support = self.config.min_support,
            "mining started"
        );

        let frequent = miner.mine(&segments, &self.config);
        if frequent.is_empty() {
            tracing::warn!(
                min_support = self.config.min_support,
                "No symbol reached min_support"
            );
        }

        let closed = closed_subsequences(&frequent);
        let rules = generate_rules(&frequent, &closed, &self.config)?;
        let elapsed = start.elapsed();

        tracing::info!(
            frequent = frequent.len(),
            closed = closed.len(),
            rules = rules.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "mining finished"
        );

        Ok(MiningReport {
            segments: segments.iter().map(|s| s.to_vec()).collect(),
            frequent,
            closed,
            rules,
            miner: miner.name(),
            elapsed,
        })
    }
}

impl<S: Symbol + Ord + fmt::Display> fmt::Display for MiningReport<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Correlation Mining Report ({})", self.miner)?;
        writeln!(f, "{}", "=".repeat(40))?;
        writeln!(f, "Segments:          {}", self.segments.len())?;
        for (length, tier) in self.frequent.tiers() {
            writeln!(f, "  length {:<3}       {} frequent", length, tier.len())?;
        }
        writeln!(f, "Frequent total:    {}", self.frequent.len())?;
        writeln!(f, "Closed:            {}", self.closed.len())?;
        writeln!(f, "Rules:             {}", self.rules.len())?;
        writeln!(f, "Elapsed:           {:.3}s", self.elapsed.as_secs_f64())?;

        if !self.rules.is_empty() {
            writeln!(f)?;
            for rule in self.rules.sorted() {
                writeln!(f, "  {}", rule)?;
            }
        }

        Ok(())
    }
}
