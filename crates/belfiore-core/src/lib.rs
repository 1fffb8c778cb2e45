// crates/belfiore-core/src/lib.rs

//! # belfiore-core
//!
//! Read-only lookups over the packed dataset of Italian cadastral
//! ("Belfiore") codes: Italian cities (`A001`..`Y999`) and foreign countries
//! (`Z000`..`Z999`), with their province or ISO 3166 code, validity dates and
//! data license.
//!
//! ```no_run
//! use belfiore_core::prelude::*;
//!
//! # fn main() -> belfiore_core::Result<()> {
//! let db = Connector::from_dataset(Dataset::load_from_path("belfiore.json.gz")?);
//! let rome = db.cities()?.find_by_name("roma")?;
//! println!("{rome:?}");
//! # Ok(())
//! # }
//! ```

pub mod assembler;
pub mod codec;
pub mod common;
pub mod connector;
pub mod error;
pub mod filter;
#[cfg(feature = "json")]
pub mod loader;
pub mod model;
pub mod names;
#[doc(hidden)]
pub mod raw;
pub mod scan;
pub mod search;
pub mod text;
pub mod traits;

pub use crate::common::DbStats;
pub use crate::connector::Connector;
pub use crate::error::{BelfioreError, Result};
pub use crate::filter::{FilterConfig, FilterConfigBuilder, CITY_MATCHER, COUNTRY_MATCHER};
#[cfg(feature = "json")]
pub use crate::loader::Dataset;
pub use crate::model::{PackedSource, Place, PlaceKind};
pub use crate::raw::PackedSourceRaw;
pub use crate::scan::{NameMatcher, Places};

pub mod prelude {
    pub use crate::traits::NameMatch;
    pub use crate::{BelfioreError, Connector, FilterConfig, Place, PlaceKind, Result};
    #[cfg(feature = "json")]
    pub use crate::Dataset;
}
