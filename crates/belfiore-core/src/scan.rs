// crates/belfiore-core/src/scan.rs

//! Lazy, forward-only traversal of the packed partitions.
//!
//! [`Places`] walks the partitions in priority order and, inside each one,
//! walks the `names` field exactly once, so entry boundaries are computed
//! incrementally instead of per access. Every candidate entry still goes
//! through the [`Assembler`], which may drop it for code, province or date
//! reasons. To restart a scan, create a new iterator.

use crate::assembler::Assembler;
use crate::error::Result;
use crate::model::{PackedSource, Place};
use crate::names::NAME_DELIMITER;
use crate::text::fold_key;
use regex::{Regex, RegexBuilder};
use std::iter::Enumerate;
use std::str::Split;

/// Decides which names a scan yields.
#[derive(Clone, Debug)]
pub enum NameMatcher {
    /// Regular expression, matched anywhere in the name.
    Pattern(Regex),
    /// Accent- and case-insensitive substring (already folded).
    Folded(String),
}

impl NameMatcher {
    /// Case-insensitive pattern search.
    pub fn pattern(pattern: &str) -> Result<Self> {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(NameMatcher::Pattern(regex))
    }

    /// Case-insensitive pattern that must cover the whole name.
    pub fn whole_name(pattern: &str) -> Result<Self> {
        Self::pattern(&format!("^(?:{pattern})$"))
    }

    pub fn folded(query: &str) -> Self {
        NameMatcher::Folded(fold_key(query))
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            NameMatcher::Pattern(regex) => regex.is_match(name),
            NameMatcher::Folded(query) => fold_key(name).contains(query.as_str()),
        }
    }
}

/// Iterator over decoded places.
///
/// Created by [`Connector::iter`](crate::Connector::iter) and the name
/// search methods. Yields `Err` only for corrupt packed data.
pub struct Places<'a> {
    sources: std::slice::Iter<'a, PackedSource>,
    current: Option<(&'a PackedSource, Enumerate<Split<'a, char>>)>,
    matcher: Option<NameMatcher>,
    assembler: Assembler<'a>,
}

impl<'a> Places<'a> {
    pub fn new(
        sources: &'a [PackedSource],
        assembler: Assembler<'a>,
        matcher: Option<NameMatcher>,
    ) -> Self {
        Places {
            sources: sources.iter(),
            current: None,
            matcher,
            assembler,
        }
    }
}

impl<'a> Iterator for Places<'a> {
    type Item = Result<Place>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current.is_none() {
                let source = self.sources.next()?;
                self.current = Some((source, source.names().split(NAME_DELIMITER).enumerate()));
            }
            let (source, entries) = self.current.as_mut()?;
            let source: &'a PackedSource = *source;

            let Some((index, name)) = entries.next() else {
                self.current = None;
                continue;
            };
            if let Some(matcher) = &self.matcher {
                if !matcher.matches(name) {
                    continue;
                }
            }

            match self.assembler.assemble(source, index, Some(name)) {
                Ok(Some(place)) => return Some(Ok(place)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{encode_code, encode_license_bits};
    use crate::filter::{FilterConfig, COUNTRY_MATCHER};
    use crate::raw::PackedSourceRaw;

    fn partition(entries: &[(&str, &str, &str)]) -> PackedSource {
        let mut raw = PackedSourceRaw::default();
        let mut names = Vec::new();
        for (code, region, name) in entries {
            raw.codes.push_str(&encode_code(code).unwrap());
            raw.region_codes.push_str(region);
            names.push(*name);
        }
        raw.names = names.join("|");
        raw.license_bits = encode_license_bits(&vec![0u8; entries.len()]).unwrap();
        PackedSource::try_from(raw).unwrap()
    }

    fn sources() -> Vec<PackedSource> {
        vec![
            partition(&[("A011", "FR", "Rome"), ("F205", "MI", "Milano"), ("L219", "TO", "Torino")]),
            partition(&[("Z110", "FR", "Francia"), ("Z114", "GB", "Regno Unito")]),
        ]
    }

    fn names_of(places: Places<'_>) -> Vec<String> {
        places.map(|p| p.unwrap().name).collect()
    }

    #[test]
    fn unfiltered_scan_visits_sources_then_indices() {
        let sources = sources();
        let filter = FilterConfig::default();
        let licenses = vec!["CC-BY".to_string()];
        let places = Places::new(&sources, Assembler::new(&licenses, &filter), None);
        assert_eq!(
            names_of(places),
            ["Rome", "Milano", "Torino", "Francia", "Regno Unito"]
        );
    }

    #[test]
    fn pattern_scan_is_case_insensitive() {
        let sources = sources();
        let filter = FilterConfig::default();
        let licenses: Vec<String> = Vec::new();
        let matcher = NameMatcher::pattern("^r").unwrap();
        let places = Places::new(&sources, Assembler::new(&licenses, &filter), Some(matcher));
        assert_eq!(names_of(places), ["Rome", "Regno Unito"]);
    }

    #[test]
    fn matched_entries_still_go_through_filters() {
        let sources = sources();
        let filter = FilterConfig::default()
            .with_code_matcher(COUNTRY_MATCHER.clone())
            .unwrap();
        let licenses: Vec<String> = Vec::new();
        let matcher = NameMatcher::pattern("^r").unwrap();
        let places = Places::new(&sources, Assembler::new(&licenses, &filter), Some(matcher));
        assert_eq!(names_of(places), ["Regno Unito"]);
    }

    #[test]
    fn whole_name_and_folded_matchers() {
        let exact = NameMatcher::whole_name("rome").unwrap();
        assert!(exact.matches("Rome"));
        assert!(!exact.matches("Romeo"));
        let anchored = NameMatcher::whole_name("^Rome$").unwrap();
        assert!(anchored.matches("ROME"));

        let folded = NameMatcher::folded("FORLI");
        assert!(folded.matches("Forlì"));
        assert!(folded.matches("Forlì del Sannio"));
        assert!(folded.matches("Forlimpopoli"));
        assert!(!folded.matches("Roma"));
    }

    #[test]
    fn invalid_patterns_are_reported() {
        assert!(NameMatcher::pattern("(").is_err());
    }

    #[test]
    fn scans_are_independent() {
        let sources = sources();
        let filter = FilterConfig::default();
        let licenses: Vec<String> = Vec::new();
        let assembler = Assembler::new(&licenses, &filter);
        let mut first = Places::new(&sources, assembler, None);
        let mut second = Places::new(&sources, assembler, None);
        assert_eq!(first.next().unwrap().unwrap().name, "Rome");
        assert_eq!(first.next().unwrap().unwrap().name, "Milano");
        assert_eq!(second.next().unwrap().unwrap().name, "Rome");
    }

    #[test]
    fn empty_partitions_yield_nothing() {
        let sources = vec![PackedSource::try_from(PackedSourceRaw::default()).unwrap()];
        let filter = FilterConfig::default();
        let licenses: Vec<String> = Vec::new();
        let places = Places::new(&sources, Assembler::new(&licenses, &filter), None);
        assert_eq!(places.count(), 0);
    }
}
