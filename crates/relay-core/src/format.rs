//! Message formatter — renders a [`CanonicalLead`] as Telegram HTML.
//!
//! Layout is fixed: a bold title, then the fields in four sections separated
//! by blank lines. Every interpolated value goes through [`escape_html`]
//! exactly once. The free-text `concerns` field is truncated to the
//! configured length before escaping so an entity is never cut in half.

use std::borrow::Cow;

use crate::config::MessageConfig;
use crate::types::{CanonicalLead, LeadField, OutboundMessage};

/// Appended to `concerns` when it was cut short.
pub const TRUNCATION_MARKER: &str = "…";

enum Section {
    /// `<b>Label:</b> value` per field.
    Inline(&'static [LeadField]),
    /// `<b>Label:</b>` on its own line, value below.
    Block(LeadField),
}

const LAYOUT: &[Section] = &[
    Section::Inline(&[LeadField::ObjectType, LeadField::Stage, LeadField::Timeline]),
    Section::Block(LeadField::Concerns),
    Section::Inline(&[LeadField::Name, LeadField::Contact]),
    Section::Inline(&[LeadField::Source]),
];

fn label(field: LeadField) -> &'static str {
    match field {
        LeadField::ObjectType => "Object type",
        LeadField::Stage => "Stage",
        LeadField::Timeline => "Timeline",
        LeadField::Concerns => "Concerns",
        LeadField::Contact => "Contact",
        LeadField::Name => "Name",
        LeadField::Source => "Source",
    }
}

/// Replace `&`, `<` and `>` with their entities. Single pass: an input that
/// already contains `&amp;` is escaped again.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Cut `input` to at most `max_chars` characters, appending
/// [`TRUNCATION_MARKER`] when anything was dropped.
pub fn truncate_chars(input: &str, max_chars: usize) -> Cow<'_, str> {
    match input.char_indices().nth(max_chars) {
        None => Cow::Borrowed(input),
        Some((cut, _)) => Cow::Owned(format!("{}{TRUNCATION_MARKER}", &input[..cut])),
    }
}

/// Render `lead` according to `config`.
pub fn format_message(lead: &CanonicalLead, config: &MessageConfig) -> OutboundMessage {
    let visible = |field: LeadField| !(config.omit_placeholders && lead.is_placeholder(field));

    let value = |field: LeadField| {
        let raw = lead.get(field);
        if field == LeadField::Concerns {
            escape_html(&truncate_chars(raw, config.max_concerns_chars))
        } else {
            escape_html(raw)
        }
    };

    let mut sections = vec![format!("<b>{}</b>", escape_html(&config.title))];

    for section in LAYOUT {
        let lines: Vec<String> = match section {
            Section::Inline(fields) => fields
                .iter()
                .filter(|f| visible(**f))
                .map(|f| format!("<b>{}:</b> {}", label(*f), value(*f)))
                .collect(),
            Section::Block(field) if visible(*field) => {
                vec![format!("<b>{}:</b>", label(*field)), value(*field)]
            }
            Section::Block(_) => Vec::new(),
        };
        if !lines.is_empty() {
            sections.push(lines.join("\n"));
        }
    }

    OutboundMessage::new(sections.join("\n\n"))
}
