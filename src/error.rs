//! Error taxonomy for correlation mining

use thiserror::Error;

/// Errors raised by the mining pipeline and the streaming rule cache
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MiningError {
    /// No access sequence to mine. Callers treat this as "no rules", not a crash.
    #[error("Empty input: no access sequence to mine")]
    EmptyInput,

    /// A configuration value is out of range. Fatal to starting a run.
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Rule generation needed a support value the miner never counted.
    ///
    /// Every prefix of a mined subsequence and every symbol inside it is
    /// counted during mining, so this always points at a miner bug.
    #[error("Missing support lookup for {subsequence}")]
    MissingSupportLookup { subsequence: String },
}

impl MiningError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        MiningError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MiningError>;
