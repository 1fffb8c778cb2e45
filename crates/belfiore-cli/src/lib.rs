//! belfiore-cli
//! ============
//!
//! Command-line interface for the `belfiore-core` Belfiore code dataset.
//!
//! This crate primarily provides a binary (`belfiore-cli`). The library
//! target only exists so that docs.rs renders this overview.
//!
//! Quick start
//! -----------
//!
//! ```text
//! cargo install belfiore-cli
//! belfiore-cli --help
//! belfiore-cli --input belfiore.json.gz stats
//! belfiore-cli --input belfiore.json.gz lookup H501
//! belfiore-cli --input belfiore.json.gz --type country search "^stati"
//! belfiore-cli --input belfiore.json.gz --active today folded forli
//! ```
//!
//! Global flags
//! ------------
//!
//! - `--input FILE` or `--dir DIR [--pattern RE] [--license L]...` select the dataset
//! - `--active YYYY-MM-DD|today` keeps places valid on that day
//! - `--province XX` or `--type city|country` narrow the view
//! - `--json` prints results as JSON
//!
//! For programmatic access use the [`belfiore-core`] crate directly.
//!
//! [`belfiore-core`]: https://docs.rs/belfiore-core
