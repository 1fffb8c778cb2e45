// crates/belfiore-core/src/assembler.rs

//! Turns one packed entry into a [`Place`], applying the active filters.

use crate::codec::{
    decode_code_token, decode_day_offset, epoch, far_future, is_country_code, license_index,
};
use crate::error::{BelfioreError, Result};
use crate::filter::FilterConfig;
use crate::model::{PackedSource, Place, PlaceKind};
use crate::names::name_by_index;
use log::trace;

/// Decodes entries of any partition against one license table and filter.
#[derive(Clone, Copy, Debug)]
pub struct Assembler<'a> {
    licenses: &'a [String],
    filter: &'a FilterConfig,
}

impl<'a> Assembler<'a> {
    pub fn new(licenses: &'a [String], filter: &'a FilterConfig) -> Self {
        Assembler { licenses, filter }
    }

    /// Decodes entry `index` of `source`.
    ///
    /// Returns `Ok(None)` when the entry does not exist or is filtered out.
    /// `known_name` skips the name lookup when the caller already walked to
    /// the entry's name.
    pub fn assemble(
        &self,
        source: &PackedSource,
        index: usize,
        known_name: Option<&str>,
    ) -> Result<Option<Place>> {
        let Some(token) = source.code_token(index) else {
            return Ok(None);
        };
        let code = decode_code_token(token)?;
        if !self.filter.accepts_code(&code) {
            trace!("{code}: rejected by code matcher");
            return Ok(None);
        }

        let region = source.region_token(index).ok_or_else(|| {
            BelfioreError::Format(format!("entry {index} has no region token"))
        })?;
        if !self.filter.accepts_region(region) {
            trace!("{code}: province {region} rejected");
            return Ok(None);
        }

        let creation_token = source.creation_token(index);
        let expiration_token = source.expiration_token(index);
        let creation_date = decode_day_offset(creation_token, epoch())?;
        let expiration_date = decode_day_offset(expiration_token, far_future())?;
        if let Some(active) = self.filter.active_date() {
            // A partition without a date field is unbounded on that side.
            // Entries past the end of a present field take the sentinel.
            let not_yet = source.creation_dates().is_some() && active < creation_date;
            let expired = source.expiration_dates().is_some() && active > expiration_date;
            if not_yet || expired {
                trace!("{code}: inactive on {active}");
                return Ok(None);
            }
        }

        let name = match known_name {
            Some(name) => name,
            None => name_by_index(source.names(), index)?,
        };

        let license = license_index(source.license_bits(), source.len(), index)?;
        let license = self.licenses.get(license).cloned();

        let kind = if is_country_code(&code) {
            PlaceKind::Country { iso3166: region.to_string() }
        } else {
            PlaceKind::City { province: region.to_string() }
        };

        Ok(Some(Place {
            code,
            name: name.to_string(),
            creation_date,
            expiration_date,
            license,
            kind,
        }))
    }
}
