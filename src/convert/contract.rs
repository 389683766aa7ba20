//! Contract month/year decoding.
//!
//! Contract codes are 3- or 4-digit strings. A 4-digit code reads as
//! `MMYY`; a 3-digit code is prefixed with "1" before decoding, which
//! shifts the nominal month up by ten. That shift is a quirk of the
//! source encoding and is preserved as-is, so 3-digit codes decode to
//! months 11-19 rather than 1-9. The two-digit year is resolved against
//! the conventional century window.

use crate::constants::CENTURY_PIVOT;
use crate::error::{BillError, Result};

/// Decode a contract code into an unpadded month string and a 4-digit
/// year string. Codes of any other length, or with non-digit characters,
/// are rejected.
pub fn decode_month_year(code: &str) -> Result<(String, String)> {
    if !(code.len() == 3 || code.len() == 4) {
        return Err(BillError::InvalidContractCode {
            code: code.to_string(),
            reason: "length must be 3 or 4".to_string(),
        });
    }
    if !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BillError::InvalidContractCode {
            code: code.to_string(),
            reason: "expected digits only".to_string(),
        });
    }

    let padded = if code.len() == 3 {
        format!("1{code}")
    } else {
        code.to_string()
    };

    let month: u32 = parse_pair(&padded, &padded[..2])?;
    let short_year: u32 = parse_pair(&padded, &padded[2..])?;
    let year = if short_year >= CENTURY_PIVOT {
        1900 + short_year
    } else {
        2000 + short_year
    };

    Ok((month.to_string(), year.to_string()))
}

fn parse_pair(code: &str, digits: &str) -> Result<u32> {
    digits
        .parse()
        .map_err(|_| BillError::InvalidContractCode {
            code: code.to_string(),
            reason: "expected digits only".to_string(),
        })
}
