//! Normalizer — maps a loosely-shaped [`InboundRecord`] onto a
//! [`CanonicalLead`].
//!
//! For every canonical field the alias list is probed in order and the first
//! usable value wins. A value is usable when the key exists, it is not
//! `null`, and its text form is non-empty after trimming. Numbers and
//! booleans are stringified first, so `0` and `false` count as present.
//! Anything unresolved becomes the placeholder; normalisation never fails.

use std::borrow::Cow;

use serde_json::Value;

use crate::aliases::FieldAliasTable;
use crate::types::{CanonicalLead, InboundRecord, LeadField};

/// Normalise `inbound` against `aliases`.
///
/// `source_fallback` is request context supplied by the caller (the
/// `Origin` or `Referer` header); it is only consulted when no alias
/// resolved [`LeadField::Source`].
pub fn normalize(
    inbound: &InboundRecord,
    aliases: &FieldAliasTable,
    placeholder: &str,
    source_fallback: Option<&str>,
) -> CanonicalLead {
    let mut resolved = LeadField::ALL.map(|field| pick_first(inbound, aliases.aliases(field)));

    let source = &mut resolved[LeadField::Source as usize];
    if source.is_none() {
        *source = source_fallback
            .map(trim_value)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
    }

    CanonicalLead::new(resolved, placeholder)
}

/// First usable value among `keys`, trimmed.
pub fn pick_first(inbound: &InboundRecord, keys: &[String]) -> Option<String> {
    keys.iter()
        .filter_map(|key| inbound.get(key))
        .filter_map(scalar_text)
        .map(|text| trim_value(&text).to_string())
        .find(|text| !text.is_empty())
}

/// Whitespace trim that also strips a byte-order mark, which some form
/// builders prepend to pasted text.
fn trim_value(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Text form of a JSON value. `null` has none; arrays and objects render as
/// compact JSON.
fn scalar_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Array(_) | Value::Object(_) => Some(Cow::Owned(value.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

/// [`normalize`] bound to a fixed alias table and placeholder, built once at
/// startup and shared read-only between requests.
#[derive(Debug, Clone)]
pub struct Normalizer {
    aliases: FieldAliasTable,
    placeholder: String,
}

impl Normalizer {
    pub fn new(aliases: FieldAliasTable, placeholder: impl Into<String>) -> Self {
        Self {
            aliases,
            placeholder: placeholder.into(),
        }
    }

    pub fn normalize(&self, inbound: &InboundRecord, source_fallback: Option<&str>) -> CanonicalLead {
        normalize(inbound, &self.aliases, &self.placeholder, source_fallback)
    }

    pub fn aliases(&self) -> &FieldAliasTable {
        &self.aliases
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }
}
