//! Structure recovery for emoji-tagged summaries.
//!
//! The backend is prompted to answer with sections like
//!
//! ```text
//! 🧠 Main Topics
//! - pricing
//! ✅ Decisions
//! - go with plan B
//! ```
//!
//! but nothing guarantees it does. Text without any known marker is shown
//! verbatim.

use serde::Serialize;
use tracing::debug;

/// Marker → section label, in display order.
pub const SECTION_MARKERS: &[(&str, &str)] = &[
    ("🧠", "Main Topics"),
    ("✅", "Decisions"),
    ("🛠", "Action Items"),
    ("📌", "Notes / Context"),
];

pub const BULLET_GLYPHS: &[char] = &['-', '•'];

/// Shown in place of the bullets of a section that collected none.
pub const EMPTY_SECTION_PLACEHOLDER: &str = "Nothing found.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub label: String,
    pub bullets: Vec<String>,
}

/// Sections in the order their markers first appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedSummary {
    sections: Vec<Section>,
}

impl ParsedSummary {
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn get(&self, label: &str) -> Option<&[String]> {
        self.sections
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.bullets.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Open `label`, discarding any bullets it already had.
    fn open(&mut self, label: &str) -> usize {
        match self.sections.iter().position(|s| s.label == label) {
            Some(idx) => {
                self.sections[idx].bullets.clear();
                idx
            }
            None => {
                self.sections.push(Section {
                    label: label.to_string(),
                    bullets: Vec::new(),
                });
                self.sections.len() - 1
            }
        }
    }

    /// Render back into marker/bullet text that [`parse`] reads as `self`.
    pub fn to_canonical_text(&self) -> String {
        let mut out = Vec::new();
        for section in &self.sections {
            let marker = marker_for(&section.label).unwrap_or_default();
            out.push(format!("{marker} {}", section.label).trim().to_string());
            for bullet in &section.bullets {
                out.push(format!("- {bullet}"));
            }
        }
        out.join("\n")
    }
}

/// Result of [`parse`]: recognised sections, or the text as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryView<'a> {
    Sections(ParsedSummary),
    Raw(&'a str),
}

/// Parse a raw summary. Never fails: anything unrecognisable comes back as
/// [`SummaryView::Raw`].
pub fn parse(raw: &str) -> SummaryView<'_> {
    if !contains_marker(raw) {
        return SummaryView::Raw(raw);
    }

    match std::panic::catch_unwind(|| parse_sections(raw)) {
        Ok(parsed) if !parsed.is_empty() => SummaryView::Sections(parsed),
        Ok(_) => {
            debug!("Markers present but no section header found; showing raw summary");
            SummaryView::Raw(raw)
        }
        Err(_) => {
            debug!("Summary parser panicked; showing raw summary");
            SummaryView::Raw(raw)
        }
    }
}

fn contains_marker(raw: &str) -> bool {
    SECTION_MARKERS.iter().any(|(marker, _)| raw.contains(marker))
}

/// Section label for a line that starts with a known marker.
pub fn match_marker(line: &str) -> Option<&'static str> {
    SECTION_MARKERS
        .iter()
        .find(|(marker, _)| line.starts_with(marker))
        .map(|(_, label)| *label)
}

/// Marker glyph for a known section label.
pub fn marker_for(label: &str) -> Option<&'static str> {
    SECTION_MARKERS
        .iter()
        .find(|(_, l)| *l == label)
        .map(|(marker, _)| *marker)
}

fn parse_sections(raw: &str) -> ParsedSummary {
    let mut parsed = ParsedSummary::default();
    let mut current: Option<usize> = None;

    for line in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(label) = match_marker(line) {
            current = Some(parsed.open(label));
            continue;
        }

        if line.starts_with(BULLET_GLYPHS) {
            let Some(idx) = current else {
                continue;
            };
            let text = line.trim_start_matches(BULLET_GLYPHS).trim();
            if !text.is_empty() {
                parsed.sections[idx].bullets.push(text.to_string());
            }
        }
    }

    parsed
}
