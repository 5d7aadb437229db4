//! Transcript extraction from chat export archives.
//!
//! A WhatsApp "Export chat" zip holds the transcript next to media and the
//! occasional small text file. We pick the longest `.txt` member.

use std::io::{Read, Seek};
use std::path::Path;
use tracing::{debug, info};

use crate::error::ExtractionError;

pub const TRANSCRIPT_EXTENSION: &str = ".txt";

/// The archive member chosen as the chat transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedTranscript {
    pub entry_name: String,
    pub text: String,
}

/// Extract the most likely chat transcript from a zip archive.
pub fn extract_transcript<R: Read + Seek>(reader: R) -> Result<ExtractedTranscript, ExtractionError> {
    let mut archive = zip::ZipArchive::new(reader)?;

    let mut candidates = Vec::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if entry.is_dir() || !is_transcript_name(entry.name()) {
            continue;
        }

        let name = entry.name().to_string();
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes)?;
        let text = decode_text(&bytes);
        debug!("Candidate {} ({} chars)", name, text.chars().count());
        candidates.push((name, text));
    }

    let picked = select_largest(candidates).ok_or(ExtractionError::NoTranscriptFound)?;
    info!("Selected transcript member: {}", picked.entry_name);
    Ok(picked)
}

/// Open `path` and run [`extract_transcript`] on it.
pub fn extract_transcript_from_path(path: &Path) -> Result<ExtractedTranscript, ExtractionError> {
    let file = std::fs::File::open(path)?;
    extract_transcript(std::io::BufReader::new(file))
}

/// Pick the candidate with the most characters. Ties keep the earliest.
pub fn select_largest<I>(candidates: I) -> Option<ExtractedTranscript>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut best: Option<(usize, ExtractedTranscript)> = None;
    for (entry_name, text) in candidates {
        let len = text.chars().count();
        let better = match &best {
            Some((best_len, _)) => len > *best_len,
            None => true,
        };
        if better {
            best = Some((len, ExtractedTranscript { entry_name, text }));
        }
    }
    best.map(|(_, picked)| picked)
}

fn is_transcript_name(name: &str) -> bool {
    name.to_lowercase().ends_with(TRANSCRIPT_EXTENSION)
}

fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}
