// crates/belfiore-core/src/model.rs

//! Packed partitions and the place records decoded from them.

use crate::codec::{CODE_TOKEN_WIDTH, DATE_TOKEN_WIDTH, REGION_TOKEN_WIDTH};
use crate::error::{BelfioreError, Result};
use crate::names::name_count;
use crate::raw::PackedSourceRaw;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One validated, immutable dataset partition.
///
/// All fields are index aligned: entry `i` owns bytes `3i..3i+3` of the code
/// field, `2i..2i+2` of the region field, the `i`-th name and the 4-char
/// date tokens at `4i`. Nothing is decoded up front.
#[derive(Clone, Debug, Deserialize)]
#[serde(try_from = "PackedSourceRaw")]
pub struct PackedSource {
    codes: String,
    region_codes: String,
    names: String,
    creation_dates: Option<String>,
    expiration_dates: Option<String>,
    license_bits: String,
    len: usize,
}

fn is_base32(field: &str) -> bool {
    field.bytes().all(|b| char::from(b).is_digit(32))
}

fn optional_field(field: Option<String>) -> Option<String> {
    field.filter(|f| !f.is_empty())
}

impl TryFrom<PackedSourceRaw> for PackedSource {
    type Error = BelfioreError;

    fn try_from(raw: PackedSourceRaw) -> Result<Self> {
        if raw.codes.len() % CODE_TOKEN_WIDTH != 0 || !is_base32(&raw.codes) {
            return Err(BelfioreError::Format(format!(
                "code field must be base-32 tokens of {CODE_TOKEN_WIDTH} chars"
            )));
        }
        let len = raw.codes.len() / CODE_TOKEN_WIDTH;

        let sorted = raw
            .codes
            .as_bytes()
            .chunks(CODE_TOKEN_WIDTH)
            .zip(raw.codes.as_bytes().chunks(CODE_TOKEN_WIDTH).skip(1))
            .all(|(a, b)| a < b);
        if !sorted {
            return Err(BelfioreError::Format(
                "code tokens must be strictly ascending".to_string(),
            ));
        }

        if raw.region_codes.len() != len * REGION_TOKEN_WIDTH || !raw.region_codes.is_ascii() {
            return Err(BelfioreError::Format(format!(
                "region field holds {} bytes, expected {} for {len} entries",
                raw.region_codes.len(),
                len * REGION_TOKEN_WIDTH
            )));
        }

        let names = name_count(&raw.names);
        if names != len {
            return Err(BelfioreError::Format(format!(
                "name field holds {names} names, expected {len}"
            )));
        }

        let creation_dates = optional_field(raw.creation_dates);
        let expiration_dates = optional_field(raw.expiration_dates);
        for (label, field) in [("creation", &creation_dates), ("expiration", &expiration_dates)] {
            if let Some(field) = field {
                if field.len() > len * DATE_TOKEN_WIDTH || !is_base32(field) {
                    return Err(BelfioreError::Format(format!(
                        "{label} date field must hold at most {len} base-32 tokens of {DATE_TOKEN_WIDTH} chars"
                    )));
                }
            }
        }

        if !is_base32(&raw.license_bits) {
            return Err(BelfioreError::Format(
                "license field is not a base-32 number".to_string(),
            ));
        }

        Ok(PackedSource {
            codes: raw.codes,
            region_codes: raw.region_codes,
            names: raw.names,
            creation_dates,
            expiration_dates,
            license_bits: raw.license_bits,
            len,
        })
    }
}

impl PackedSource {
    /// Number of entries in the partition.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn codes(&self) -> &str {
        &self.codes
    }

    pub fn region_codes(&self) -> &str {
        &self.region_codes
    }

    pub fn names(&self) -> &str {
        &self.names
    }

    pub fn creation_dates(&self) -> Option<&str> {
        self.creation_dates.as_deref()
    }

    pub fn expiration_dates(&self) -> Option<&str> {
        self.expiration_dates.as_deref()
    }

    pub fn license_bits(&self) -> &str {
        &self.license_bits
    }

    /// Packed code token of entry `index`, `None` past the end.
    pub fn code_token(&self, index: usize) -> Option<&str> {
        fixed_token(&self.codes, index, CODE_TOKEN_WIDTH)
    }

    /// Packed province / ISO 3166 token of entry `index`.
    pub fn region_token(&self, index: usize) -> Option<&str> {
        fixed_token(&self.region_codes, index, REGION_TOKEN_WIDTH)
    }

    /// Creation day-offset token; `None` when the sparse field stops earlier.
    pub fn creation_token(&self, index: usize) -> Option<&str> {
        sparse_token(self.creation_dates.as_deref()?, index, DATE_TOKEN_WIDTH)
    }

    pub fn expiration_token(&self, index: usize) -> Option<&str> {
        sparse_token(self.expiration_dates.as_deref()?, index, DATE_TOKEN_WIDTH)
    }
}

fn fixed_token(field: &str, index: usize, width: usize) -> Option<&str> {
    let start = index.checked_mul(width)?;
    field.get(start..start.checked_add(width)?)
}

fn sparse_token(field: &str, index: usize, width: usize) -> Option<&str> {
    let start = index.checked_mul(width)?;
    if start >= field.len() {
        return None;
    }
    field.get(start..(start + width).min(field.len()))
}

/// City (region = province) or country (region = ISO 3166 alpha-2).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PlaceKind {
    City { province: String },
    Country { iso3166: String },
}

/// A fully decoded dataset entry. Materialized per query, never cached.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    #[serde(rename = "belfioreCode")]
    pub code: String,
    pub name: String,
    pub creation_date: NaiveDate,
    /// Last day (inclusive) the entry is active.
    pub expiration_date: NaiveDate,
    #[serde(rename = "dataSource")]
    pub license: Option<String>,
    #[serde(flatten)]
    pub kind: PlaceKind,
}

impl Place {
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn license(&self) -> Option<&str> {
        self.license.as_deref()
    }

    pub fn is_city(&self) -> bool {
        matches!(self.kind, PlaceKind::City { .. })
    }

    pub fn is_country(&self) -> bool {
        matches!(self.kind, PlaceKind::Country { .. })
    }

    /// Province for cities, ISO 3166 code for countries.
    pub fn region_code(&self) -> &str {
        match &self.kind {
            PlaceKind::City { province } => province,
            PlaceKind::Country { iso3166 } => iso3166,
        }
    }

    pub fn province(&self) -> Option<&str> {
        match &self.kind {
            PlaceKind::City { province } => Some(province),
            PlaceKind::Country { .. } => None,
        }
    }

    pub fn iso3166(&self) -> Option<&str> {
        match &self.kind {
            PlaceKind::Country { iso3166 } => Some(iso3166),
            PlaceKind::City { .. } => None,
        }
    }

    /// `true` when `date` lies within `creation_date..=expiration_date`.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.creation_date <= date && date <= self.expiration_date
    }
}
