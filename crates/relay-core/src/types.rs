//! Core types for relay-core.
//!
//! This module defines the data shared by every stage of the relay: the
//! open [`InboundRecord`] a form posts, the closed set of canonical
//! [`LeadField`]s, the fully-resolved [`CanonicalLead`] and the rendered
//! [`OutboundMessage`].

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// An inbound form submission: any JSON object, no schema enforced.
pub type InboundRecord = serde_json::Map<String, serde_json::Value>;

/// Canonical lead field names, in declared (rendering and probing) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LeadField {
    #[serde(rename = "objectType", alias = "objecttype", alias = "object_type")]
    ObjectType,
    #[serde(rename = "stage")]
    Stage,
    #[serde(rename = "timeline")]
    Timeline,
    #[serde(rename = "concerns")]
    Concerns,
    #[serde(rename = "contact")]
    Contact,
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "source")]
    Source,
}

impl LeadField {
    pub const COUNT: usize = 7;

    pub const ALL: [LeadField; LeadField::COUNT] = [
        LeadField::ObjectType,
        LeadField::Stage,
        LeadField::Timeline,
        LeadField::Concerns,
        LeadField::Contact,
        LeadField::Name,
        LeadField::Source,
    ];

    /// Canonical wire name, as used in JSON output and configuration keys.
    pub fn as_str(self) -> &'static str {
        match self {
            LeadField::ObjectType => "objectType",
            LeadField::Stage => "stage",
            LeadField::Timeline => "timeline",
            LeadField::Concerns => "concerns",
            LeadField::Contact => "contact",
            LeadField::Name => "name",
            LeadField::Source => "source",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for LeadField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CanonicalLead
// ---------------------------------------------------------------------------

/// A lead after normalisation: exactly one string per [`LeadField`].
///
/// Values that no alias resolved hold the placeholder and are flagged, so the
/// formatter can decide whether to render or omit them. There is no way to
/// build a `CanonicalLead` with a missing field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalLead {
    values: [String; LeadField::COUNT],
    defaulted: [bool; LeadField::COUNT],
}

impl CanonicalLead {
    /// Build a lead from per-field resolution results, indexed in
    /// [`LeadField::ALL`] order. `None` entries take `placeholder`.
    pub fn new(resolved: [Option<String>; LeadField::COUNT], placeholder: &str) -> Self {
        let defaulted = std::array::from_fn(|i| resolved[i].is_none());
        let values = resolved.map(|v| v.unwrap_or_else(|| placeholder.to_string()));
        Self { values, defaulted }
    }

    pub fn get(&self, field: LeadField) -> &str {
        &self.values[field.index()]
    }

    /// `true` when `field` fell back to the placeholder.
    pub fn is_placeholder(&self, field: LeadField) -> bool {
        self.defaulted[field.index()]
    }

    /// Number of fields that resolved from the inbound record (or, for
    /// `source`, from the request context).
    pub fn resolved_count(&self) -> usize {
        self.defaulted.iter().filter(|d| !**d).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LeadField, &str)> + '_ {
        LeadField::ALL.iter().map(move |f| (*f, self.get(*f)))
    }
}

impl Serialize for CanonicalLead {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(LeadField::COUNT))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.as_str(), value)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// OutboundMessage
// ---------------------------------------------------------------------------

/// Rendered Telegram HTML text for one lead. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage(String);

impl OutboundMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for OutboundMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
