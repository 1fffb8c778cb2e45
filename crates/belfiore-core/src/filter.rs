// crates/belfiore-core/src/filter.rs

//! Immutable filter configuration shared by the assembler and the connector.

use crate::error::{BelfioreError, Result};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Matches Belfiore codes of Italian cities (letters `A` to `Y`).
pub static CITY_MATCHER: Lazy<Regex> = Lazy::new(|| Regex::new("^[A-Y]").expect("valid regex"));

/// Matches Belfiore codes of foreign countries (letter `Z`).
pub static COUNTRY_MATCHER: Lazy<Regex> = Lazy::new(|| Regex::new("^Z").expect("valid regex"));

/// Which entries a view accepts.
///
/// `code_matcher` and `province` are mutually exclusive; every constructor
/// enforces it, so a built value is always consistent. Narrowing never
/// mutates: it derives a new value.
#[derive(Clone, Debug, Default)]
pub struct FilterConfig {
    active_date: Option<NaiveDate>,
    code_matcher: Option<Regex>,
    province: Option<String>,
}

impl FilterConfig {
    pub fn builder() -> FilterConfigBuilder {
        FilterConfigBuilder::default()
    }

    /// Starts a builder pre-filled with this configuration.
    pub fn to_builder(&self) -> FilterConfigBuilder {
        FilterConfigBuilder {
            active_date: self.active_date,
            code_matcher: self.code_matcher.clone(),
            province: self.province.clone(),
        }
    }

    pub fn active_date(&self) -> Option<NaiveDate> {
        self.active_date
    }

    pub fn code_matcher(&self) -> Option<&Regex> {
        self.code_matcher.as_ref()
    }

    pub fn province(&self) -> Option<&str> {
        self.province.as_deref()
    }

    /// `true` when the view only ever yields countries.
    pub fn is_country_scoped(&self) -> bool {
        self.code_matcher.as_ref().is_some_and(|m| m.is_match("Z000"))
    }

    pub fn with_active_date(&self, date: NaiveDate) -> Self {
        FilterConfig {
            active_date: Some(date),
            ..self.clone()
        }
    }

    pub fn with_code_matcher(&self, matcher: Regex) -> Result<Self> {
        self.to_builder().code_matcher(matcher).build()
    }

    pub fn with_province(&self, province: impl Into<String>) -> Result<Self> {
        self.to_builder().province(province).build()
    }

    #[inline]
    pub(crate) fn accepts_code(&self, code: &str) -> bool {
        self.code_matcher.as_ref().map_or(true, |m| m.is_match(code))
    }

    #[inline]
    pub(crate) fn accepts_region(&self, region: &str) -> bool {
        self.province.as_deref().map_or(true, |p| p == region)
    }
}

/// Builder for [`FilterConfig`]; [`build`](Self::build) checks exclusivity.
#[derive(Clone, Debug, Default)]
pub struct FilterConfigBuilder {
    active_date: Option<NaiveDate>,
    code_matcher: Option<Regex>,
    province: Option<String>,
}

impl FilterConfigBuilder {
    pub fn active_date(mut self, date: NaiveDate) -> Self {
        self.active_date = Some(date);
        self
    }

    pub fn code_matcher(mut self, matcher: Regex) -> Self {
        self.code_matcher = Some(matcher);
        self
    }

    pub fn province(mut self, province: impl Into<String>) -> Self {
        self.province = Some(province.into());
        self
    }

    pub fn clear_active_date(mut self) -> Self {
        self.active_date = None;
        self
    }

    pub fn clear_code_matcher(mut self) -> Self {
        self.code_matcher = None;
        self
    }

    pub fn clear_province(mut self) -> Self {
        self.province = None;
        self
    }

    pub fn build(self) -> Result<FilterConfig> {
        if let (Some(matcher), Some(province)) = (&self.code_matcher, &self.province) {
            return Err(BelfioreError::Config(format!(
                "code matcher '{}' and province '{province}' are mutually exclusive",
                matcher.as_str()
            )));
        }
        Ok(FilterConfig {
            active_date: self.active_date,
            code_matcher: self.code_matcher,
            province: self.province,
        })
    }
}
