//! Shared helpers for text cleanup and report-id derivation.
//!
//! The vendor feed carries HTML fragments inside plain string fields
//! (`<b>` runs, entity escapes, stray whitespace). [`clean_text`] is the
//! single cleaning primitive every formatter goes through before a string
//! reaches the rendered briefing.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use quick_xml::escape::unescape;
use regex::Regex;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Strip HTML tags, decode entity escapes, and trim surrounding whitespace.
///
/// Tag removal happens before entity decoding so that a decoded `&lt;b&gt;`
/// survives as literal text instead of being re-stripped. Entity decoding
/// covers the basic named set plus numeric references; text with entities
/// outside that set is kept as-is rather than rejected.
///
/// Cleaning already-clean text is a no-op apart from the trim.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(clean_text("<b>政策</b>利好"), "政策利好");
/// assert_eq!(clean_text("  plain  "), "plain");
/// ```
pub fn clean_text(raw: &str) -> String {
    let stripped = TAG_RE.replace_all(raw, "");
    let decoded = match unescape(&stripped) {
        Ok(cow) => cow.into_owned(),
        // Entity outside the supported set; keep the stripped text.
        Err(_) => stripped.into_owned(),
    };
    decoded.trim().to_string()
}

/// Build the vendor report id: the date as `YYYYMMDD` plus the two-digit
/// edition suffix (the evening review is edition `"02"`).
pub fn report_id(date: NaiveDate, edition: &str) -> String {
    format!("{}{}", date.format("%Y%m%d"), edition)
}
