//! Statement header parsing.
//!
//! Parses the account/date block anchored at "Account No" into a key/value
//! mapping and builds the `BillBaseInfo` carried into every field mapper.
//! A field that does not split into exactly `key: value` fails the whole
//! file; dates that fail to parse are silently left unknown.

use std::collections::HashMap;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::constants::{
    HEADER_SECTION_TITLE, ISO_DATE_FORMAT, KEY_ACCOUNT_NO, KEY_BILL_DATE, KEY_STATEMENT_DATE,
};
use crate::error::{BillError, Result};
use crate::models::BillBaseInfo;
use crate::segment::locate_segment;

/// Header fields are separated by runs of two or more whitespace characters
fn field_delimiter() -> &'static Regex {
    static DELIMITER: OnceLock<Regex> = OnceLock::new();
    DELIMITER.get_or_init(|| Regex::new(r"\s{2,}").expect("static field delimiter pattern"))
}

/// Parse the header block into base information for one statement.
///
/// Fails when any header field is malformed or when no account number is
/// present; date coercion failures degrade to `None` instead.
pub fn parse_bill_header(content: &str) -> Result<BillBaseInfo> {
    let fields = header_fields(content)?;

    let account_no = fields.get(KEY_ACCOUNT_NO).cloned().unwrap_or_default();
    if account_no.is_empty() {
        return Err(BillError::MissingAccountNo);
    }

    let mut info = BillBaseInfo {
        account_no,
        ..Default::default()
    };

    if let Some(value) = fields.get(KEY_BILL_DATE) {
        info.bill_date = parse_date(value);
    }

    if let Some(value) = fields.get(KEY_STATEMENT_DATE) {
        if let Some((start, end)) = value.split_once("to") {
            info.statement_date_start = parse_date(start);
            info.statement_date_end = parse_date(end);
        }
    }

    Ok(info)
}

/// Extract the raw key/value mapping from the header segment.
///
/// Full-width colons are normalized first so mixed-encoding statements
/// parse uniformly. Missing segment yields an empty mapping, which
/// `parse_bill_header` rejects for the lack of an account number.
pub fn header_fields(content: &str) -> Result<HashMap<String, String>> {
    let segment = locate_segment(content, HEADER_SECTION_TITLE).replace('：', ":");

    let mut fields = HashMap::new();
    for line in segment.lines() {
        let line = line.trim();
        let line = line.strip_prefix('|').unwrap_or(line);
        let line = line.strip_suffix('|').unwrap_or(line);
        let line = line.trim();
        if line.is_empty() || line.starts_with('-') {
            continue;
        }

        for field in field_delimiter().split(line) {
            let parts: Vec<&str> = field.split(':').collect();
            if parts.len() != 2 {
                return Err(BillError::MalformedHeaderField {
                    field: field.to_string(),
                });
            }
            fields.insert(parts[0].trim().to_string(), parts[1].trim().to_string());
        }
    }

    Ok(fields)
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE_FORMAT).ok()
}
