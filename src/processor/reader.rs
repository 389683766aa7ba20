//! Statement byte decoding and content normalization.
//!
//! Statement exports historically use a legacy double-byte Chinese
//! encoding; newer exports are plain UTF-8. Decoding tries UTF-8 first
//! and falls back to GB18030, a superset of GBK. The decoded content is
//! then normalized so the final section always terminates at a dash rule.

use encoding_rs::GB18030;

/// Decode raw statement bytes into normalized text
pub fn decode_statement(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);

    let text = match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            let (decoded, _, _) = GB18030.decode(bytes);
            decoded.into_owned()
        }
    };

    normalize_trailing_rule(&text)
}

/// Guarantee the content ends with a dash rule so the last segment closes
fn normalize_trailing_rule(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.ends_with("------") {
        format!("{trimmed}\r\n")
    } else {
        format!("{trimmed}\r\n\t-------\r\n")
    }
}
