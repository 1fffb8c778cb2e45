// crates/belfiore-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the physical layer (files, gzip) and JSON parsing. The rest of the
//! crate only ever sees validated [`PackedSource`] values.
//!
//! Two layouts are supported:
//! - one JSON document `{ "licenses": [...], "sources": [ {...}, ... ] }`
//! - a directory holding one JSON file per partition, selected by a file
//!   name pattern, with the license table supplied by the caller.

use crate::connector::Connector;
use crate::error::Result;
use crate::model::PackedSource;
use log::{debug, info};
use regex::Regex;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

mod io;

pub use io::{open_stream, read_matching_entries};

/// Parsed dataset: license table plus partitions in priority order.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub licenses: Vec<String>,
    pub sources: Vec<PackedSource>,
}

impl Dataset {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let dataset: Dataset = serde_json::from_reader(reader)?;
        Ok(dataset)
    }

    /// Loads a single dataset document (`.json` or `.json.gz`).
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let dataset = Self::from_reader(open_stream(path)?)?;
        info!(
            "loaded {} sources and {} licenses from {}",
            dataset.sources.len(),
            dataset.licenses.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Builds a dataset from named partition files, in the given order.
    pub fn from_entries<I>(licenses: Vec<String>, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Vec<u8>)>,
    {
        let mut sources = Vec::new();
        for (name, bytes) in entries {
            let reader = io::wrap_reader(bytes.as_slice(), &name)?;
            let source: PackedSource = serde_json::from_reader(reader)?;
            debug!("{name}: {} entries", source.len());
            sources.push(source);
        }
        Ok(Dataset { licenses, sources })
    }

    /// Loads every partition file of `dir` matching `pattern`, sorted by name.
    pub fn load_from_dir(
        dir: impl AsRef<Path>,
        pattern: &Regex,
        licenses: Vec<String>,
    ) -> Result<Self> {
        let dir = dir.as_ref();
        let dataset = Self::from_entries(licenses, read_matching_entries(dir, pattern)?)?;
        info!("loaded {} sources from {}", dataset.sources.len(), dir.display());
        Ok(dataset)
    }
}

impl Connector {
    pub fn from_dataset(dataset: Dataset) -> Self {
        Connector::new(dataset.sources, dataset.licenses)
    }
}

impl From<Dataset> for Connector {
    fn from(dataset: Dataset) -> Self {
        Connector::from_dataset(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BelfioreError;

    const DOCUMENT: &str = r#"{
        "licenses": ["CC-BY"],
        "sources": [
            {"belfioreCode": "7ad", "provinceOrCountry": "RM", "name": "Roma", "dataSource": "0"}
        ]
    }"#;

    #[test]
    fn parses_a_document() {
        let dataset = Dataset::from_reader(DOCUMENT.as_bytes()).unwrap();
        assert_eq!(dataset.licenses, ["CC-BY"]);
        assert_eq!(dataset.sources.len(), 1);
        let db = Connector::from(dataset);
        assert_eq!(db.lookup_by_code("H501").unwrap().unwrap().name(), "Roma");
    }

    #[test]
    fn invalid_partitions_prevent_construction() {
        let broken = r#"{"sources": [{"belfioreCode": "7a", "provinceOrCountry": "RM", "name": "Roma"}]}"#;
        assert!(matches!(
            Dataset::from_reader(broken.as_bytes()),
            Err(BelfioreError::Json(_))
        ));
    }

    #[test]
    fn entries_keep_their_order() {
        let entries = vec![
            (
                "1-countries.json".to_string(),
                br#"{"belfioreCode": "od8", "provinceOrCountry": "XX", "name": "Nowhere"}"#.to_vec(),
            ),
            (
                "0-cities.json".to_string(),
                br#"{"belfioreCode": "7ad", "provinceOrCountry": "RM", "name": "Roma"}"#.to_vec(),
            ),
        ];
        let dataset = Dataset::from_entries(Vec::new(), entries).unwrap();
        assert_eq!(dataset.sources[0].names(), "Nowhere");
        assert_eq!(dataset.sources[1].names(), "Roma");
    }

    #[test]
    fn missing_files_are_not_found() {
        let err = Dataset::load_from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, BelfioreError::NotFound(_)));
    }
}
