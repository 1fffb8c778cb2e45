// crates/belfiore-core/src/loader/io.rs
use crate::error::{BelfioreError, Result};
use regex::Regex;
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::read::GzDecoder;

pub(crate) fn is_gzip_name(name: &str) -> bool {
    name.ends_with(".gz")
}

/// Opens a dataset file, gunzipping it when the name ends in `.gz`.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        BelfioreError::NotFound(format!("Dataset not found at {}: {}", path.display(), e))
    })?;
    let reader = BufReader::new(file);
    let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    wrap_reader(reader, &name)
}

/// Wraps `reader` in a gzip decoder when `name` says it is compressed.
pub(crate) fn wrap_reader<'r, R: Read + 'r>(reader: R, name: &str) -> Result<Box<dyn Read + 'r>> {
    if !is_gzip_name(name) {
        return Ok(Box::new(reader));
    }

    #[cfg(feature = "compact")]
    {
        Ok(Box::new(GzDecoder::new(reader)))
    }

    #[cfg(not(feature = "compact"))]
    {
        Err(BelfioreError::Config(format!(
            "{name} is gzip-compressed but the `compact` feature is disabled"
        )))
    }
}

/// Reads every file of `dir` whose name matches `pattern`, sorted by name.
///
/// Directories are skipped. Each item is `(file name, raw bytes)`.
pub fn read_matching_entries(dir: &Path, pattern: &Regex) -> Result<Vec<(String, Vec<u8>)>> {
    let listing = fs::read_dir(dir).map_err(|e| {
        BelfioreError::NotFound(format!("Dataset directory {}: {}", dir.display(), e))
    })?;

    let mut entries = Vec::new();
    for entry in listing {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !pattern.is_match(&name) {
            continue;
        }
        let bytes = fs::read(entry.path())?;
        entries.push((name, bytes));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(entries)
}
