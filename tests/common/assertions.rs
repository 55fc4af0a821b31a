//! Domain-specific assertion macros for lead-relay harnesses.
//!
//! These add context-rich failure messages that make it clear *which* field
//! or message invariant was violated.

use relay_core::{CanonicalLead, LeadField};

// ---------------------------------------------------------------------------
// Field assertions
// ---------------------------------------------------------------------------

/// Assert that a `CanonicalLead` resolved `field` to `value`.
///
/// ```rust
/// assert_field!(lead, LeadField::Contact, "+1-555-0100");
/// ```
#[macro_export]
macro_rules! assert_field {
    ($lead:expr, $field:expr, $value:expr) => {{
        let lead: &relay_core::CanonicalLead = &$lead;
        let field: relay_core::LeadField = $field;
        let expected: &str = $value;
        let actual = lead.get(field);
        if actual != expected {
            panic!(
                "assert_field! failed:\n  lead[{}]\n  expected: {:?}\n  actual:   {:?}\n  lead: {:?}",
                field, expected, actual, lead
            );
        }
        if lead.is_placeholder(field) {
            panic!("assert_field! failed: {} holds the placeholder, not a resolved value", field);
        }
    }};
}

/// Assert that `field` fell back to the placeholder.
#[macro_export]
macro_rules! assert_placeholder {
    ($lead:expr, $field:expr) => {{
        let lead: &relay_core::CanonicalLead = &$lead;
        let field: relay_core::LeadField = $field;
        if !lead.is_placeholder(field) {
            panic!(
                "assert_placeholder! failed: {} resolved to {:?}",
                field,
                lead.get(field)
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// Record invariants
// ---------------------------------------------------------------------------

/// Every canonical field holds a non-empty string.
pub fn assert_complete(lead: &CanonicalLead) {
    for field in LeadField::ALL {
        assert!(
            !lead.get(field).trim().is_empty(),
            "canonical field {field} is blank: {lead:?}"
        );
    }
    let json = serde_json::to_value(lead).unwrap();
    let obj = json.as_object().expect("lead serializes as an object");
    assert_eq!(obj.len(), LeadField::COUNT, "lead has missing keys: {json}");
    assert!(obj.values().all(|v| v.is_string()), "lead has non-string values: {json}");
}

// ---------------------------------------------------------------------------
// Message invariants
// ---------------------------------------------------------------------------

/// Assert that the only raw markup in `text` is the formatter's own `<b>`
/// tags and the only `&` start one of the three entities.
pub fn assert_no_raw_markup(text: &str) {
    let stripped = text.replace("<b>", "").replace("</b>", "");
    assert!(
        !stripped.contains('<') && !stripped.contains('>'),
        "message contains raw markup outside <b> tags:\n{text}"
    );
    for (i, _) in stripped.match_indices('&') {
        let rest = &stripped[i..];
        assert!(
            rest.starts_with("&amp;") || rest.starts_with("&lt;") || rest.starts_with("&gt;"),
            "message contains a bare '&' at byte {i}:\n{text}"
        );
    }
}

/// Reverse [`relay_core::escape_html`]. Test-only; not a general decoder.
pub fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<").replace("&gt;", ">").replace("&amp;", "&")
}
