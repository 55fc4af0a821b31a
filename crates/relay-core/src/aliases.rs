//! Field alias table — which inbound keys feed which canonical field.
//!
//! Forms in the wild post the same information under different names
//! (`type`, `projectType`, `tip_obekta`, …). The table lists, per
//! [`LeadField`], the keys to probe in priority order. It is plain data:
//! built once at startup and only read afterwards.

use crate::types::LeadField;

// ---------------------------------------------------------------------------
// Built-in aliases
// ---------------------------------------------------------------------------

const BUILTIN_ALIASES: &[(LeadField, &[&str])] = &[
    (
        LeadField::ObjectType,
        &["objectType", "type", "object", "projectType", "tip", "tip_obekta"],
    ),
    (
        LeadField::Stage,
        &["stage", "projectStage", "stage_project", "stadiya", "stadiya_proekta"],
    ),
    (
        LeadField::Timeline,
        &["timeline", "deadline", "term", "sroki", "time", "due"],
    ),
    (
        LeadField::Concerns,
        &[
            "concerns",
            "details",
            "concern",
            "problem",
            "comment",
            "message",
            "whatWorries",
            "worries",
        ],
    ),
    (
        LeadField::Contact,
        &["contact", "phone", "tel", "telegram", "email"],
    ),
    (
        LeadField::Name,
        &["name", "fullName", "clientName", "fio", "imya"],
    ),
    (LeadField::Source, &["source"]),
];

// ---------------------------------------------------------------------------
// FieldAliasTable
// ---------------------------------------------------------------------------

/// Ordered alias lists for every canonical field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAliasTable {
    entries: [Vec<String>; LeadField::COUNT],
}

impl FieldAliasTable {
    /// The aliases shipped with the relay.
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_ALIASES
                .iter()
                .map(|(field, keys)| (*field, keys.iter().map(|k| k.to_string()).collect())),
        )
    }

    /// Build a table from explicit entries. A field without an entry probes
    /// only its own canonical name.
    pub fn new(entries: impl IntoIterator<Item = (LeadField, Vec<String>)>) -> Self {
        let mut table: [Vec<String>; LeadField::COUNT] =
            LeadField::ALL.map(|f| vec![f.as_str().to_string()]);
        for (field, keys) in entries {
            table[field.index()] = keys;
        }
        Self { entries: table }
    }

    /// Replace the alias list of a single field.
    pub fn with_aliases<I, S>(mut self, field: LeadField, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries[field.index()] = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn aliases(&self, field: LeadField) -> &[String] {
        &self.entries[field.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (LeadField, &[String])> + '_ {
        LeadField::ALL
            .iter()
            .map(move |f| (*f, self.entries[f.index()].as_slice()))
    }
}

impl Default for FieldAliasTable {
    fn default() -> Self {
        Self::builtin()
    }
}
