// crates/belfiore-core/src/codec.rs

//! # Codec
//!
//! Bidirectional mapping between the human readable Belfiore code
//! (`"H501"`), its integer form (`(letter - 'A') * 1000 + digits`) and the
//! fixed-width base-32 tokens stored in the packed dataset.
//!
//! All tokens use the lowercase base-32 alphabet `0-9a-v`, zero padded on the
//! left to the token width of their field.

use crate::error::{BelfioreError, Result};
use chrono::{Days, NaiveDate};

/// Width of one packed Belfiore code token.
pub const CODE_TOKEN_WIDTH: usize = 3;
/// Width of one packed province / ISO 3166 token.
pub const REGION_TOKEN_WIDTH: usize = 2;
/// Width of one packed day-offset token.
pub const DATE_TOKEN_WIDTH: usize = 4;
/// Bits used per entry in the packed license field.
pub const LICENSE_BITS_PER_ENTRY: usize = 2;

/// Highest legal integer form (`"Z999"`).
pub const MAX_CODE_INT: u32 = 25 * 1000 + 999;
/// Leading letter reserved for foreign countries.
pub const COUNTRY_LETTER: u8 = b'Z';

/// Day-offset token used when an entry carries no expiration date.
pub const FAR_FUTURE_TOKEN: &str = "2qn13";

const BASE32_DIGITS: &[u8; 32] = b"0123456789abcdefghijklmnopqrstuv";

/// Reference date of every day-offset: the proclamation of the Kingdom of Italy.
pub fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1861, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Expiration reported for entries that never expire (`9999-12-31`).
pub fn far_future() -> NaiveDate {
    decode_day_offset(Some(FAR_FUTURE_TOKEN), NaiveDate::MAX).unwrap_or(NaiveDate::MAX)
}

/// Converts a Belfiore code into its integer form.
///
/// The code is upper-cased first, so `"h501"` and `"H501"` are equivalent.
///
/// # Examples
/// ```rust
/// use belfiore_core::codec::code_to_int;
///
/// assert_eq!(code_to_int("A011").unwrap(), 11);
/// assert_eq!(code_to_int("h501").unwrap(), 7501);
/// assert!(code_to_int("H50").is_err());
/// ```
pub fn code_to_int(code: &str) -> Result<u32> {
    let upper = code.to_ascii_uppercase();
    let bytes = upper.as_bytes();
    let well_formed = bytes.len() == 4
        && bytes[0].is_ascii_uppercase()
        && bytes[1..].iter().all(u8::is_ascii_digit);
    if !well_formed {
        return Err(BelfioreError::Format(format!(
            "'{code}' is not a Belfiore code (expected one letter and 3 digits)"
        )));
    }

    let letter = u32::from(bytes[0] - b'A');
    let digits = bytes[1..]
        .iter()
        .fold(0u32, |acc, d| acc * 10 + u32::from(d - b'0'));
    Ok(letter * 1000 + digits)
}

/// Converts an integer form back into the Belfiore code.
pub fn int_to_code(value: u32) -> Result<String> {
    if value > MAX_CODE_INT {
        return Err(BelfioreError::Format(format!(
            "{value} is outside the Belfiore code space (0..={MAX_CODE_INT})"
        )));
    }
    // value / 1000 <= 25 after the range check
    let letter = char::from(b'A' + (value / 1000) as u8);
    Ok(format!("{letter}{:03}", value % 1000))
}

/// Encodes a Belfiore code into the 3-char token stored in `codes`.
///
/// ```rust
/// use belfiore_core::codec::encode_code;
///
/// assert_eq!(encode_code("A011").unwrap(), "00b");
/// assert_eq!(encode_code("Z999").unwrap(), "pcf");
/// ```
pub fn encode_code(code: &str) -> Result<String> {
    Ok(encode_base32(u64::from(code_to_int(code)?), CODE_TOKEN_WIDTH))
}

/// Decodes a 3-char `codes` token into the Belfiore code.
pub fn decode_code_token(token: &str) -> Result<String> {
    let value = decode_base32(token)?;
    let value = u32::try_from(value).map_err(|_| {
        BelfioreError::Format(format!("code token '{token}' does not fit a Belfiore code"))
    })?;
    int_to_code(value)
}

/// Returns `true` when the (already validated) code denotes a foreign country.
#[inline]
pub fn is_country_code(code: &str) -> bool {
    code.as_bytes().first() == Some(&COUNTRY_LETTER)
}

#[inline]
fn base32_digit(byte: u8) -> Option<u32> {
    char::from(byte).to_digit(32)
}

/// Parses a base-32 token (case-insensitive). Empty tokens are malformed.
pub fn decode_base32(token: &str) -> Result<u64> {
    if token.is_empty() {
        return Err(BelfioreError::Format("empty base-32 token".to_string()));
    }
    token.bytes().try_fold(0u64, |acc, byte| {
        let digit = base32_digit(byte).ok_or_else(|| {
            BelfioreError::Format(format!("'{token}' is not a base-32 token"))
        })?;
        acc.checked_mul(32)
            .and_then(|v| v.checked_add(u64::from(digit)))
            .ok_or_else(|| BelfioreError::Format(format!("base-32 token '{token}' overflows")))
    })
}

/// Formats `value` in lowercase base-32, left padded with `0` up to `width`.
/// Values needing more digits than `width` are returned unpadded, never cut.
pub fn encode_base32(mut value: u64, width: usize) -> String {
    let mut digits = Vec::with_capacity(width.max(1));
    loop {
        digits.push(BASE32_DIGITS[(value % 32) as usize]);
        value /= 32;
        if value == 0 {
            break;
        }
    }
    while digits.len() < width {
        digits.push(b'0');
    }
    digits.iter().rev().map(|&b| char::from(b)).collect()
}

/// Decodes a day-offset token into a calendar date.
///
/// A missing or empty token is the "unbounded" encoding and decodes to the
/// caller chosen `sentinel` (the epoch for creation dates, [`far_future`]
/// for expiration dates).
///
/// ```rust
/// use belfiore_core::codec::{decode_day_offset, epoch, far_future};
///
/// assert_eq!(decode_day_offset(Some("0"), far_future()).unwrap(), epoch());
/// assert_eq!(decode_day_offset(None, far_future()).unwrap(), far_future());
/// ```
pub fn decode_day_offset(token: Option<&str>, sentinel: NaiveDate) -> Result<NaiveDate> {
    let token = match token {
        Some(t) if !t.is_empty() => t,
        _ => return Ok(sentinel),
    };
    let days = decode_base32(token)?;
    epoch()
        .checked_add_days(Days::new(days))
        .ok_or_else(|| BelfioreError::Format(format!("day offset '{token}' overflows the calendar")))
}

/// Encodes a calendar date into a 4-char day-offset token.
pub fn encode_day_offset(date: NaiveDate) -> Result<String> {
    let days = date.signed_duration_since(epoch()).num_days();
    let days = u64::try_from(days)
        .map_err(|_| BelfioreError::Format(format!("{date} precedes the epoch {}", epoch())))?;
    let token = encode_base32(days, DATE_TOKEN_WIDTH);
    if token.len() > DATE_TOKEN_WIDTH {
        return Err(BelfioreError::Format(format!(
            "{date} does not fit a {DATE_TOKEN_WIDTH}-char day offset"
        )));
    }
    Ok(token)
}

/// Packs one license-table index (`0..=3`) per entry into a base-32 token.
///
/// Entry `i` occupies bits `2i..2i+2` of the number's binary expansion, read
/// from the most significant end after padding to `2 × entries` bits.
pub fn encode_license_bits(indices: &[u8]) -> Result<String> {
    if let Some(bad) = indices.iter().find(|&&i| i > 3) {
        return Err(BelfioreError::Format(format!(
            "license index {bad} does not fit {LICENSE_BITS_PER_ENTRY} bits"
        )));
    }
    let total_bits = indices.len() * LICENSE_BITS_PER_ENTRY;
    let lead = (5 - total_bits % 5) % 5;
    let bit = |k: usize| -> u8 {
        // k counts from the most significant bit of the padded expansion
        if k < lead {
            return 0;
        }
        let k = k - lead;
        (indices[k / 2] >> (1 - k % 2)) & 1
    };

    let token: String = (0..(lead + total_bits) / 5)
        .map(|group| {
            let value = (0..5).fold(0usize, |acc, j| (acc << 1) | usize::from(bit(group * 5 + j)));
            char::from(BASE32_DIGITS[value])
        })
        .skip_while(|&c| c == '0')
        .collect();
    if token.is_empty() {
        Ok("0".to_string())
    } else {
        Ok(token)
    }
}

/// Extracts the license-table index of entry `index` from the packed field.
///
/// The token is read as an arbitrarily long base-32 number whose binary
/// expansion, stripped of leading zeros and left padded to `2 × entries`
/// bits, holds two bits per entry. An empty token reads as zero.
pub fn license_index(token: &str, entries: usize, index: usize) -> Result<usize> {
    if index >= entries {
        return Err(BelfioreError::Range(format!(
            "license entry {index} requested from a field of {entries} entries"
        )));
    }
    let digits = token.as_bytes();
    let digit_at = |pos: usize| -> Result<u32> {
        base32_digit(digits[pos]).ok_or_else(|| {
            BelfioreError::Format(format!("license field holds a non base-32 char at {pos}"))
        })
    };

    let mut significant = 0usize;
    for pos in 0..digits.len() {
        let value = digit_at(pos)?;
        if value != 0 {
            let bit_len = (u32::BITS - value.leading_zeros()) as usize;
            significant = (digits.len() - pos - 1) * 5 + bit_len;
            break;
        }
    }
    let padded = significant.max(entries * LICENSE_BITS_PER_ENTRY);
    let total_bits = digits.len() * 5;

    let bit = |k: usize| -> Result<usize> {
        let from_right = padded - 1 - k;
        if from_right >= total_bits {
            return Ok(0);
        }
        let value = digit_at(digits.len() - 1 - from_right / 5)?;
        Ok(((value >> (from_right % 5)) & 1) as usize)
    };

    let first = index * LICENSE_BITS_PER_ENTRY;
    Ok((bit(first)? << 1) | bit(first + 1)?)
}
