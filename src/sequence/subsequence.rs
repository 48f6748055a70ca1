use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

/// An opaque access-trace identifier: a character, a block number, a file path
pub trait Symbol: Clone + Eq + Hash + fmt::Debug {}

impl<T: Clone + Eq + Hash + fmt::Debug> Symbol for T {}

/// Ordered run of distinct symbols, hashed and compared structurally
///
/// Used directly as the key of support tables, so there is no separator
/// character that could collide with a symbol (file paths may contain `|`).
///
/// # Example
/// ```
/// use corrminer::sequence::Subsequence;
///
/// let ab = Subsequence::from("ab");
/// let cab = Subsequence::from("cab");
/// assert!(ab.is_contiguous_in(&cab));
/// assert_eq!(ab.extended('d'), Subsequence::from("abd"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Subsequence<S>(Vec<S>);

impl<S: Symbol> Subsequence<S> {
    pub fn new(symbols: Vec<S>) -> Self {
        Self(symbols)
    }

    pub fn singleton(symbol: S) -> Self {
        Self(vec![symbol])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn symbols(&self) -> &[S] {
        &self.0
    }

    pub fn last(&self) -> Option<&S> {
        self.0.last()
    }

    pub fn contains(&self, symbol: &S) -> bool {
        self.0.contains(symbol)
    }

    /// Copy of `self` with `symbol` appended
    pub fn extended(&self, symbol: S) -> Self {
        let mut symbols = Vec::with_capacity(self.0.len() + 1);
        symbols.extend_from_slice(&self.0);
        symbols.push(symbol);
        Self(symbols)
    }

    pub fn starts_with(&self, prefix: &[S]) -> bool {
        self.0.starts_with(prefix)
    }

    /// True when `self` appears as a contiguous run inside `other`
    pub fn is_contiguous_in(&self, other: &Subsequence<S>) -> bool {
        if self.0.is_empty() {
            return true;
        }
        other
            .0
            .windows(self.0.len())
            .any(|window| window == self.0.as_slice())
    }
}

impl<S> Borrow<[S]> for Subsequence<S> {
    fn borrow(&self) -> &[S] {
        &self.0
    }
}

impl<S> From<Vec<S>> for Subsequence<S> {
    fn from(symbols: Vec<S>) -> Self {
        Self(symbols)
    }
}

impl<S: Clone> From<&[S]> for Subsequence<S> {
    fn from(symbols: &[S]) -> Self {
        Self(symbols.to_vec())
    }
}

impl From<&str> for Subsequence<char> {
    fn from(text: &str) -> Self {
        Self(text.chars().collect())
    }
}

impl<S: fmt::Display> fmt::Display for Subsequence<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, symbol) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " → ")?;
            }
            write!(f, "{}", symbol)?;
        }
        write!(f, "]")
    }
}
