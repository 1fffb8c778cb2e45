// crates/belfiore-core/src/names.rs

//! Positional access into the `|`-delimited `names` field.
//!
//! Lookups walk the field from the start on every call. Sequential access
//! should go through the scanner, which walks the field once.

use crate::error::{BelfioreError, Result};
use std::fmt::Display;

/// Separator between two names; never part of a name.
pub const NAME_DELIMITER: char = '|';

/// Returns the `index`-th name of a delimited list.
///
/// Accepts any integer type; negative indices and indices past the last
/// segment are [`BelfioreError::Range`], an empty list is
/// [`BelfioreError::Format`].
///
/// ```rust
/// use belfiore_core::names::name_by_index;
///
/// assert_eq!(name_by_index("Roma|Milano|Torino", 2).unwrap(), "Torino");
/// assert!(name_by_index("Roma|Milano", -1).is_err());
/// ```
pub fn name_by_index<I>(list: &str, index: I) -> Result<&str>
where
    I: TryInto<usize> + Copy + Display,
{
    if list.is_empty() {
        return Err(BelfioreError::Format("name list is empty".to_string()));
    }
    let position: usize = index
        .try_into()
        .map_err(|_| BelfioreError::Range(format!("name index {index} is out of range")))?;

    list.split(NAME_DELIMITER)
        .nth(position)
        .ok_or_else(|| BelfioreError::Range(format!("name index {index} is out of range")))
}

/// Number of names in a delimited list (`0` for an empty list).
pub fn name_count(list: &str) -> usize {
    if list.is_empty() {
        0
    } else {
        list.matches(NAME_DELIMITER).count() + 1
    }
}
