//! Mining and streaming configuration
//!
//! Both configs carry the defaults the C-Miner and QuickMine papers were
//! evaluated with, can be loaded from TOML, and are validated before a run
//! starts.

use crate::error::{MiningError, Result};
use anyhow::Context;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Which frequent-subsequence miner drives a batch session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MinerKind {
    /// Multi-pass, tier-by-length scan
    #[default]
    Bfs,
    /// Suffix-projection worklist
    Dfs,
}

/// How rules that share a history are merged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RuleMergeMode {
    /// Keep the first rule seen for a history; only its support is raised
    /// to the maximum contributing support. Its confidence is never updated.
    #[default]
    Lenient,
    /// Like `Lenient`, but a later candidate with a strictly higher
    /// confidence replaces the prediction and confidence.
    Strict,
}

/// Configuration for batch correlation mining
///
/// # Example
/// ```
/// use corrminer::config::MinerConfig;
///
/// let config = MinerConfig::default();
/// assert_eq!(config.window_size, 5);
/// assert_eq!(config.max_gap, 3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinerConfig {
    /// Length of each non-overlapping segment. Also bounds subsequence length.
    pub window_size: usize,

    /// Maximum number of skipped positions between two matched symbols
    ///
    /// Default: `window_size - 2`
    pub max_gap: usize,

    /// Minimum occurrence count for a subsequence to be frequent
    pub min_support: usize,

    /// Minimum `support(prediction) / support(history)` for a rule (0.0-1.0)
    pub min_confidence: f64,

    /// Frequent-subsequence miner used by the session
    pub miner: MinerKind,

    /// Collision handling for rules keyed by the same history
    pub merge_mode: RuleMergeMode,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            window_size: 5,
            max_gap: 3,
            min_support: 4,
            min_confidence: 1.0,
            miner: MinerKind::Bfs,
            merge_mode: RuleMergeMode::Lenient,
        }
    }
}

impl MinerConfig {
    /// Default configuration with the given window size and `max_gap = window_size - 2`
    pub fn with_window(window_size: usize) -> Self {
        Self {
            window_size,
            max_gap: window_size.saturating_sub(2),
            ..Self::default()
        }
    }

    /// Load a configuration from a TOML file. Missing keys take their defaults.
    ///
    /// # Example TOML
    /// ```toml
    /// window_size = 8
    /// max_gap = 6
    /// min_support = 3
    /// min_confidence = 0.8
    /// miner = "dfs"
    /// merge_mode = "lenient"
    /// ```
    pub fn from_toml<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read miner config: {}", path.as_ref().display())
        })?;
        let config: MinerConfig =
            toml::from_str(&content).context("Failed to parse TOML miner config")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(MiningError::invalid("window_size", "must be >= 1, got 0"));
        }

        if self.min_support == 0 {
            return Err(MiningError::invalid("min_support", "must be >= 1, got 0"));
        }

        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(MiningError::invalid(
                "min_confidence",
                format!("must be in [0, 1], got {}", self.min_confidence),
            ));
        }

        Ok(())
    }
}

/// Largest `StreamConfig::max_gap` accepted; the history window grows with it
pub const MAX_STREAM_GAP: usize = 4096;

/// Configuration for the streaming rule cache (QuickMine)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Correlated accesses must lie fewer than `max_gap` positions apart
    pub max_gap: usize,

    /// Number of prefixes kept in the LRU rule cache
    pub max_prefix_num: usize,

    /// Number of ranked suffixes kept per prefix
    pub max_suffix_num: usize,

    /// Maximum suffixes prefetched per prediction
    pub prefetch_num: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            max_gap: 5,
            max_prefix_num: 1024,
            max_suffix_num: 16,
            prefetch_num: 4,
        }
    }
}

impl StreamConfig {
    /// Settings used for the cache-hit simulation runs
    pub fn simulation() -> Self {
        Self {
            max_gap: 3,
            max_prefix_num: 1024,
            max_suffix_num: 8,
            prefetch_num: 3,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_gap < 2 {
            return Err(MiningError::invalid(
                "max_gap",
                format!("must be >= 2 to relate three accesses, got {}", self.max_gap),
            ));
        }

        if self.max_gap > MAX_STREAM_GAP {
            return Err(MiningError::invalid(
                "max_gap",
                format!("must be <= {}, got {}", MAX_STREAM_GAP, self.max_gap),
            ));
        }

        if self.max_prefix_num == 0 {
            return Err(MiningError::invalid("max_prefix_num", "must be >= 1, got 0"));
        }

        if self.max_suffix_num == 0 {
            return Err(MiningError::invalid("max_suffix_num", "must be >= 1, got 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = MinerConfig::default();
        assert_eq!(config.window_size, 5);
        assert_eq!(config.max_gap, 3);
        assert_eq!(config.min_support, 4);
        assert_eq!(config.min_confidence, 1.0);
        assert_eq!(config.miner, MinerKind::Bfs);
        assert_eq!(config.merge_mode, RuleMergeMode::Lenient);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_window_derives_gap() {
        let config = MinerConfig::with_window(8);
        assert_eq!(config.max_gap, 6);

        let tiny = MinerConfig::with_window(1);
        assert_eq!(tiny.max_gap, 0);
        assert!(tiny.validate().is_ok());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_window_size() {
        let mut config = MinerConfig::default();
        config.window_size = 0;
        assert!(matches!(
            config.validate(),
            Err(MiningError::InvalidParameter {
                name: "window_size",
                ..
            })
        ));
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_min_support() {
        let mut config = MinerConfig::default();
        config.min_support = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_confidence() {
        let mut config = MinerConfig::default();
        config.min_confidence = 1.5;
        assert!(config.validate().is_err());

        config.min_confidence = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "window_size = 8\nminer = \"dfs\"").unwrap();

        let config = MinerConfig::from_toml(file.path()).unwrap();
        assert_eq!(config.window_size, 8);
        assert_eq!(config.miner, MinerKind::Dfs);
        // Unspecified keys keep their defaults
        assert_eq!(config.max_gap, 3);
        assert_eq!(config.min_support, 4);
    }

    #[test]
    fn test_from_toml_rejects_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "min_confidence = 2.0").unwrap();

        assert!(MinerConfig::from_toml(file.path()).is_err());
    }

    #[test]
    fn test_stream_config_defaults() {
        let config = StreamConfig::default();
        assert_eq!(config.max_gap, 5);
        assert_eq!(config.max_prefix_num, 1024);
        assert_eq!(config.max_suffix_num, 16);
        assert_eq!(config.prefetch_num, 4);
        assert!(config.validate().is_ok());
        assert!(StreamConfig::simulation().validate().is_ok());
    }

    #[test]
    fn test_stream_config_invalid() {
        let config = StreamConfig {
            max_gap: 1,
            ..StreamConfig::default()
        };
        assert!(config.validate().is_err());

        let config = StreamConfig {
            max_suffix_num: 0,
            ..StreamConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_stream_config_rejects_huge_gap() {
        let config = StreamConfig {
            max_gap: MAX_STREAM_GAP,
            ..StreamConfig::default()
        };
        assert!(config.validate().is_ok());

        for max_gap in [MAX_STREAM_GAP + 1, usize::MAX / 2 + 1, usize::MAX] {
            let config = StreamConfig {
                max_gap,
                ..StreamConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(MiningError::InvalidParameter { name: "max_gap", .. })
            ));
        }
    }
}
