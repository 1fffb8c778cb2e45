// crates/belfiore-core/src/common.rs
use serde::{Deserialize, Serialize};

/// Simple aggregate statistics for the dataset.
///
/// Returned by [`Connector::stats`](crate::Connector::stats); counts every
/// packed entry regardless of the view's filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DbStats {
    pub sources: usize,
    pub cities: usize,
    pub countries: usize,
}
