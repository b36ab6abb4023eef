//! Greedy suffix/prefix hypothesis stitching.

/// Merge a new hypothesis fragment into the running hypothesis.
///
/// Finds the longest `k` such that the last `k` bytes of `prev` equal the
/// first `k` bytes of `fragment` (on char boundaries only, so UTF-8 scalars
/// are never split) and returns `prev + fragment[k..]`. With `k = 0` always
/// admissible, the result never loses text, so the running hypothesis grows
/// monotonically.
///
/// This is a greedy, literal-overlap merge: when overlapping audio is
/// re-recognized as different words, no string overlap exists and the
/// fragment is appended verbatim, which can duplicate words. Known
/// limitation, kept deliberately.
pub fn stitch(prev: &str, fragment: &str) -> String {
    if prev.is_empty() {
        return fragment.to_string();
    }
    if fragment.is_empty() {
        return prev.to_string();
    }

    let max_k = prev.len().min(fragment.len());
    for k in (1..=max_k).rev() {
        if !fragment.is_char_boundary(k) || !prev.is_char_boundary(prev.len() - k) {
            continue;
        }
        if prev.as_bytes()[prev.len() - k..] == fragment.as_bytes()[..k] {
            let mut combined = String::with_capacity(prev.len() + fragment.len() - k);
            combined.push_str(prev);
            combined.push_str(&fragment[k..]);
            return combined;
        }
    }

    let mut combined = String::with_capacity(prev.len() + fragment.len());
    combined.push_str(prev);
    combined.push_str(fragment);
    combined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_cases() {
        assert_eq!(stitch("hello", ""), "hello");
        assert_eq!(stitch("", "world"), "world");
        assert_eq!(stitch("", ""), "");
    }

    #[test]
    fn test_full_self_overlap_collapses() {
        assert_eq!(stitch("again", "again"), "again");
    }

    #[test]
    fn test_partial_overlap() {
        assert_eq!(
            stitch("turn on the ki", "the kitchen lights"),
            "turn on the kitchen lights"
        );
    }

    #[test]
    fn test_no_overlap_concatenates() {
        assert_eq!(stitch("alpha", "beta"), "alphabeta");
    }

    #[test]
    fn test_takes_longest_overlap() {
        // Both "a" and "aba" are valid overlaps; the longest wins.
        assert_eq!(stitch("xaba", "abab"), "xabab");
    }

    #[test]
    fn test_multibyte_overlap() {
        assert_eq!(stitch("héllo wör", "wörld"), "héllo wörld");
    }

    #[test]
    fn test_never_splits_multibyte_scalar() {
        // The shared "é" must merge as a whole scalar; k values that fall
        // inside its two-byte encoding are skipped.
        let combined = stitch("café", "étude");
        assert_eq!(combined, "cafétude");
        assert!(std::str::from_utf8(combined.as_bytes()).is_ok());
    }
}
