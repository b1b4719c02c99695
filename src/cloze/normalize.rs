//! Blank marker normalization
//!
//! Authors mark blanks with underscore runs of any length (`___`, `________`).
//! Before scanning, every run of three or more underscores collapses into one
//! canonical token so that one run is always exactly one blank.

use once_cell::sync::Lazy;
use regex::Regex;

/// Canonical blank marker produced by normalization.
///
/// Private-use code points, so authored text never contains it.
pub const BLANK_MARKER: &str = "\u{E000}\u{E001}\u{E002}";

/// What a blank marker stands for when it ends up inside highlight text
pub const BLANK_MARKER_TEXT: &str = "___";

/// Static regex for underscore runs that mark a blank
static UNDERSCORE_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_{3,}").expect("Invalid UNDERSCORE_RUN_RE regex"));

/// Replace every run of 3+ underscores with [`BLANK_MARKER`]
pub fn normalize_blank_markers(html: &str) -> String {
    UNDERSCORE_RUN_RE
        .replace_all(html, BLANK_MARKER)
        .into_owned()
}

/// Turn canonical markers back into their authored form
pub fn denormalize(text: &str) -> String {
    text.replace(BLANK_MARKER, BLANK_MARKER_TEXT)
}
