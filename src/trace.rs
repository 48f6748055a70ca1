//! Access traces: loading from disk and generating test data

use crate::access_log::AccessLog;
use anyhow::Context;
use clap::ValueEnum;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Lowercase ASCII letters, the default alphabet for generated traces
pub const DEFAULT_ALPHABET: &[char] = &[
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r',
    's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// How a trace file encodes its accesses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TraceFormat {
    /// One access per non-empty line
    #[default]
    Lines,
    /// Every non-whitespace character is one access
    Chars,
    /// HDFS audit log; `open` sources are the accesses
    Audit,
}

/// Split trace text into accesses
///
/// `strip_prefix` only applies to audit-log source paths.
pub fn parse_trace(content: &str, format: TraceFormat, strip_prefix: Option<&str>) -> Vec<String> {
    match format {
        TraceFormat::Lines => content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect(),
        TraceFormat::Chars => content
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(String::from)
            .collect(),
        TraceFormat::Audit => {
            let mut skipped = 0usize;
            let accesses: Vec<String> = content
                .lines()
                .filter_map(|line| {
                    let log = AccessLog::parse(line).filter(AccessLog::is_valid);
                    if log.is_none() {
                        skipped += 1;
                    }
                    log
                })
                .map(|log| match strip_prefix {
                    Some(prefix) => log.strip_prefix(prefix).to_string(),
                    None => log.src,
                })
                .collect();
            if skipped > 0 {
                tracing::debug!(skipped, "audit lines without an open access were skipped");
            }
            accesses
        }
    }
}

/// Read a trace file
pub fn load_trace<P: AsRef<Path>>(
    path: P,
    format: TraceFormat,
    strip_prefix: Option<&str>,
) -> anyhow::Result<Vec<String>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read trace file: {}", path.display()))?;

    let trace = parse_trace(&content, format, strip_prefix);
    tracing::info!(path = %path.display(), ?format, accesses = trace.len(), "trace loaded");
    Ok(trace)
}

/// Uniformly random trace of `len` symbols drawn from `alphabet`
pub fn random_sequence<R: Rng>(len: usize, alphabet: &[char], rng: &mut R) -> Vec<char> {
    if alphabet.is_empty() {
        return Vec::new();
    }
    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
        .collect()
}
