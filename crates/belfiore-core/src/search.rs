// crates/belfiore-core/src/search.rs

//! Binary search over packed strings of fixed-width tokens.
//!
//! The tokens inside the searched range must be sorted ascending
//! (lexicographically); unsorted input gives unspecified results, never a
//! panic.

use std::cmp::Ordering;
use std::ops::Range;

/// Finds the entry index of `target` inside `packed`, a concatenation of
/// tokens that all have `target.len()` bytes.
///
/// `range` restricts the search to a byte range of `packed` (clamped to its
/// length) and the returned index is relative to the start of that range.
/// Returns `None` when the token is absent, when the range is empty, or when
/// its length is not a multiple of the token width.
///
/// # Examples
/// ```rust
/// use belfiore_core::search::binary_find_index;
///
/// let packed = "00b1us7adpcf";
/// assert_eq!(binary_find_index(packed, "7ad", None), Some(2));
/// assert_eq!(binary_find_index(packed, "7ae", None), None);
/// assert_eq!(binary_find_index(packed, "pcf", Some(6..12)), Some(1));
/// ```
pub fn binary_find_index(packed: &str, target: &str, range: Option<Range<usize>>) -> Option<usize> {
    let haystack = packed.as_bytes();
    let needle = target.as_bytes();
    let width = needle.len();

    let Range { start, end } = range.unwrap_or(0..haystack.len());
    let end = end.min(haystack.len());
    if width == 0 || start >= end || (end - start) % width != 0 {
        return None;
    }

    // Half-open window [lo, hi) of token-aligned byte offsets.
    let mut lo = start;
    let mut hi = end;
    while lo < hi {
        let mid = lo + ((hi - lo) / width / 2) * width;
        match haystack[mid..mid + width].cmp(needle) {
            Ordering::Equal => return Some((mid - start) / width),
            Ordering::Less => lo = mid + width,
            Ordering::Greater => hi = mid,
        }
    }
    None
}
