use crate::error::{MiningError, Result};

/// Splits an access sequence into non-overlapping segments of `window_size`
///
/// The final segment keeps whatever remains and may be shorter. A sequence
/// shorter than the window yields exactly one segment.
///
/// # Example
/// ```
/// use corrminer::sequence::segment;
///
/// let trace: Vec<char> = "abcedabcefagbchabijcaklc".chars().collect();
/// let segments = segment(&trace, 5).unwrap();
///
/// assert_eq!(segments.len(), 5);
/// assert_eq!(segments[4], &['a', 'k', 'l', 'c'][..]);
/// ```
pub fn segment<S>(sequence: &[S], window_size: usize) -> Result<Vec<&[S]>> {
    if window_size == 0 {
        return Err(MiningError::invalid("window_size", "must be >= 1, got 0"));
    }

    if sequence.is_empty() {
        return Err(MiningError::EmptyInput);
    }

    Ok(sequence.chunks(window_size).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_multiple_has_no_empty_tail() {
        let trace: Vec<u32> = (0..10).collect();
        let segments = segment(&trace, 5).unwrap();
        assert_eq!(segments.len(), 2);
        assert!(segments.iter().all(|s| s.len() == 5));
    }

    #[test]
    fn test_shorter_than_window() {
        let trace = vec!["a", "b"];
        let segments = segment(&trace, 5).unwrap();
        assert_eq!(segments, vec![&["a", "b"][..]]);
    }

    #[test]
    fn test_empty_input() {
        let trace: Vec<char> = Vec::new();
        assert_eq!(segment(&trace, 5), Err(MiningError::EmptyInput));
    }

    #[test]
    fn test_zero_window() {
        let trace = vec!['a'];
        assert!(matches!(
            segment(&trace, 0),
            Err(MiningError::InvalidParameter { .. })
        ));
    }
}
