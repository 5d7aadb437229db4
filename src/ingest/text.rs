use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;

/// Rough shape of a loaded chat, shown after a load and by `chatsum inspect`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TranscriptStats {
    pub chars: usize,
    pub lines: usize,
    /// Lines that look like a WhatsApp message header (`date, time - Name: text`).
    pub messages: usize,
    pub participants: Vec<String>,
}

impl TranscriptStats {
    pub fn compute(text: &str) -> Self {
        // Android: "12/31/23, 9:15 PM - Ana: text"
        // iOS:     "[31.12.23, 21:15:03] Ana: text"
        let headers = [
            Regex::new(r"^\d{1,2}[/.\-]\d{1,2}[/.\-]\d{2,4},?\s\d{1,2}:\d{2}(?::\d{2})?(?:\s?[AaPp]\.?[Mm]\.?)?\s[-–]\s([^:]{1,80}):\s")
                .expect("valid android header regex"),
            Regex::new(r"^\[\d{1,2}[/.\-]\d{1,2}[/.\-]\d{2,4},?\s\d{1,2}:\d{2}(?::\d{2})?(?:\s?[AaPp]\.?[Mm]\.?)?\]\s([^:]{1,80}):\s")
                .expect("valid ios header regex"),
        ];

        let mut stats = TranscriptStats {
            chars: text.chars().count(),
            ..Default::default()
        };
        let mut participants = BTreeSet::new();

        for line in text.lines() {
            let line = line.trim_start_matches(['\u{200e}', '\u{feff}']).trim();
            if line.is_empty() {
                continue;
            }
            stats.lines += 1;

            if let Some(caps) = headers.iter().find_map(|re| re.captures(line)) {
                stats.messages += 1;
                if let Some(name) = caps.get(1) {
                    participants.insert(name.as_str().trim().to_string());
                }
            }
        }

        stats.participants = participants.into_iter().collect();
        stats
    }
}
