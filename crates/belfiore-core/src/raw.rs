// crates/belfiore-core/src/raw.rs

use serde::{Deserialize, Serialize};

/// Raw dataset partition as it comes from JSON.
///
/// Field names mirror the published dataset files. Use
/// [`PackedSource::try_from`](crate::model::PackedSource) to validate it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PackedSourceRaw {
    /// Sorted 3-char base-32 Belfiore code tokens.
    #[serde(rename = "belfioreCode")]
    pub codes: String,
    /// 2-char province (cities) or ISO 3166 alpha-2 (countries) tokens.
    #[serde(rename = "provinceOrCountry")]
    pub region_codes: String,
    /// `|`-delimited names.
    #[serde(rename = "name")]
    pub names: String,
    /// 4-char day offsets, possibly shorter than the entry count.
    #[serde(rename = "creationDate", default, skip_serializing_if = "Option::is_none")]
    pub creation_dates: Option<String>,
    #[serde(rename = "expirationDate", default, skip_serializing_if = "Option::is_none")]
    pub expiration_dates: Option<String>,
    /// Base-32 number holding 2 license bits per entry.
    #[serde(rename = "dataSource", default)]
    pub license_bits: String,
}
