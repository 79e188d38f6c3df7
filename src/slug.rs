//! Heading anchor generation.
//!
//! Follows the markdown-it-anchor slug rule: trim, lower-case, collapse
//! whitespace runs to `-`, then percent-encode like `encodeURIComponent`.

use crate::model::SectionKind;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use std::sync::LazyLock;

/// Characters `encodeURIComponent` leaves alone: A-Z a-z 0-9 - _ . ! ~ * ' ( )
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

pub fn slugify(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let dashed = RE_WHITESPACE.replace_all(&lowered, "-");
    utf8_percent_encode(&dashed, URI_COMPONENT).to_string()
}

/// Anchor for a kind heading inside a class block, e.g. `marker-options-list`.
pub fn anchor(class_name: &str, kind: SectionKind) -> String {
    slugify(&format!("{}-{}", class_name, kind.anchor_suffix()))
}
