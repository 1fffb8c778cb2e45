// crates/belfiore-core/src/connector.rs

//! # Connector
//!
//! The public query surface. A [`Connector`] is an immutable view over the
//! packed partitions, the license table and one [`FilterConfig`]. Narrowing
//! (`active`, `by_province`, `cities`, `countries`) returns a new view that
//! shares the packed data.

use crate::assembler::Assembler;
use crate::codec::{decode_code_token, encode_code, is_country_code};
use crate::common::DbStats;
use crate::error::{BelfioreError, Result};
use crate::filter::{FilterConfig, CITY_MATCHER, COUNTRY_MATCHER};
use crate::model::{PackedSource, Place};
use crate::scan::{NameMatcher, Places};
use crate::search::binary_find_index;
use crate::traits::NameMatch;
use chrono::NaiveDate;
use log::debug;
use std::sync::Arc;

/// Handle over the Belfiore dataset of cities and countries.
///
/// Partitions are searched in the order given at construction (cities
/// first, then countries, for the published dataset).
#[derive(Clone, Debug)]
pub struct Connector {
    sources: Arc<[PackedSource]>,
    licenses: Arc<[String]>,
    filter: FilterConfig,
}

impl Connector {
    /// Creates an unfiltered view.
    pub fn new(sources: Vec<PackedSource>, licenses: Vec<String>) -> Self {
        Connector {
            sources: sources.into(),
            licenses: licenses.into(),
            filter: FilterConfig::default(),
        }
    }

    /// Same data, different filters.
    pub fn with_filter(&self, filter: FilterConfig) -> Self {
        Connector {
            sources: Arc::clone(&self.sources),
            licenses: Arc::clone(&self.licenses),
            filter,
        }
    }

    pub fn filter(&self) -> &FilterConfig {
        &self.filter
    }

    pub fn sources(&self) -> &[PackedSource] {
        &self.sources
    }

    pub fn licenses(&self) -> &[String] {
        &self.licenses
    }

    fn assembler(&self) -> Assembler<'_> {
        Assembler::new(&self.licenses, &self.filter)
    }

    /// Looks a place up by its Belfiore code (case-insensitive).
    ///
    /// Stops at the first partition holding the code, even when the entry
    /// is then filtered out by this view. Malformed codes are an error.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # fn demo(db: &belfiore_core::Connector) -> belfiore_core::Result<()> {
    /// if let Some(rome) = db.lookup_by_code("H501")? {
    ///     println!("{} ({:?})", rome.name(), rome.province());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn lookup_by_code(&self, code: &str) -> Result<Option<Place>> {
        let token = encode_code(code)?;
        for (priority, source) in self.sources.iter().enumerate() {
            if let Some(index) = binary_find_index(source.codes(), &token, None) {
                debug!("{code}: token {token} at entry {index} of source {priority}");
                return self.assembler().assemble(source, index, None);
            }
        }
        debug!("{code}: not in any source");
        Ok(None)
    }

    /// Lazily yields every place accepted by this view.
    pub fn iter(&self) -> Places<'_> {
        Places::new(&self.sources, self.assembler(), None)
    }

    /// Every place accepted by this view.
    pub fn to_vec(&self) -> Result<Vec<Place>> {
        self.iter().collect()
    }

    /// Lazily yields places whose name matches `pattern` (case-insensitive
    /// regular expression, matched anywhere in the name).
    pub fn scan_by_name(&self, pattern: &str) -> Result<Places<'_>> {
        let matcher = NameMatcher::pattern(pattern)?;
        Ok(Places::new(&self.sources, self.assembler(), Some(matcher)))
    }

    /// Places whose name matches `pattern`; an empty pattern matches nothing.
    pub fn search_by_name(&self, pattern: &str) -> Result<Vec<Place>> {
        if pattern.is_empty() {
            return Ok(Vec::new());
        }
        self.scan_by_name(pattern)?.collect()
    }

    /// Places whose name contains `query`, ignoring accents and case.
    pub fn search_by_folded_name(&self, query: &str) -> Result<Vec<Place>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let matcher = NameMatcher::folded(query);
        Places::new(&self.sources, self.assembler(), Some(matcher)).collect()
    }

    /// The single place whose whole name matches `name` (case-insensitive
    /// pattern). `None` when nothing or more than one place matches.
    pub fn find_by_name(&self, name: &str) -> Result<Option<Place>> {
        if name.is_empty() {
            return Ok(None);
        }
        let matcher = NameMatcher::whole_name(name)?;
        unique(Places::new(&self.sources, self.assembler(), Some(matcher)))
    }

    /// Like [`find_by_name`](Self::find_by_name), comparing names with
    /// accents and case folded away (`"forli"` finds `"Forlì"`).
    pub fn find_by_folded_name(&self, name: &str) -> Result<Option<Place>> {
        if name.is_empty() {
            return Ok(None);
        }
        let matcher = NameMatcher::folded(name);
        let places = Places::new(&self.sources, self.assembler(), Some(matcher))
            .filter(|place| place.as_ref().map_or(true, |p| p.is_named(name)));
        unique(places)
    }

    /// View restricted to places active on `date`.
    pub fn active(&self, date: NaiveDate) -> Self {
        self.with_filter(self.filter.with_active_date(date))
    }

    /// View restricted to places active today (local clock).
    pub fn active_today(&self) -> Self {
        self.active(chrono::Local::now().date_naive())
    }

    /// View restricted to entries whose region code is `code` (2 letters,
    /// e.g. `"RM"`). Countries sharing the ISO 3166 code stay in the view.
    ///
    /// A city-scoped view narrows to the province; a country-scoped or
    /// province-scoped view refuses with [`BelfioreError::Config`].
    pub fn by_province(&self, code: &str) -> Result<Self> {
        let province = code.trim().to_ascii_uppercase();
        if province.len() != 2 || !province.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(BelfioreError::Format(format!(
                "'{code}' is not a province code (expected 2 letters)"
            )));
        }
        if let Some(current) = self.filter.province() {
            return Err(BelfioreError::Config(format!(
                "view is already scoped to province {current}"
            )));
        }
        if self.filter.is_country_scoped() {
            return Err(BelfioreError::Config(
                "a country view cannot be scoped to a province".to_string(),
            ));
        }
        let filter = self
            .filter
            .to_builder()
            .clear_code_matcher()
            .province(province)
            .build()?;
        Ok(self.with_filter(filter))
    }

    /// View restricted to Italian cities.
    pub fn cities(&self) -> Result<Self> {
        self.by_type(&CITY_MATCHER, "cities")
    }

    /// View restricted to foreign countries.
    pub fn countries(&self) -> Result<Self> {
        self.by_type(&COUNTRY_MATCHER, "countries")
    }

    fn by_type(&self, matcher: &regex::Regex, label: &str) -> Result<Self> {
        if self.filter.code_matcher().is_some() || self.filter.province().is_some() {
            return Err(BelfioreError::Config(format!(
                "cannot narrow to {label}: the view already has a type or province filter"
            )));
        }
        Ok(self.with_filter(self.filter.with_code_matcher(matcher.clone())?))
    }

    /// Entry counts over the packed data, ignoring this view's filters.
    ///
    /// Fails on the first code token that does not decode, like a scan would.
    pub fn stats(&self) -> Result<DbStats> {
        let mut stats = DbStats {
            sources: self.sources.len(),
            ..DbStats::default()
        };
        for source in self.sources.iter() {
            for index in 0..source.len() {
                let Some(token) = source.code_token(index) else {
                    continue;
                };
                if is_country_code(&decode_code_token(token)?) {
                    stats.countries += 1;
                } else {
                    stats.cities += 1;
                }
            }
        }
        Ok(stats)
    }
}

/// Exactly one result, or `None`. Stops pulling after the second hit.
fn unique<I>(mut places: I) -> Result<Option<Place>>
where
    I: Iterator<Item = Result<Place>>,
{
    let Some(first) = places.next().transpose()? else {
        return Ok(None);
    };
    match places.next().transpose()? {
        Some(second) => {
            debug!("{} and {} share the name, no unique match", first.code, second.code);
            Ok(None)
        }
        None => Ok(Some(first)),
    }
}
