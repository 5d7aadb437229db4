pub mod archive;
pub mod text;

use anyhow::{bail, Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

/// Where a transcript came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptOrigin {
    Pasted,
    File { path: PathBuf },
    Archive { entry: String },
}

impl TranscriptOrigin {
    pub fn describe(&self) -> String {
        match self {
            TranscriptOrigin::Pasted => "pasted text".to_string(),
            TranscriptOrigin::File { path } => path.display().to_string(),
            TranscriptOrigin::Archive { entry } => format!("archive member {entry}"),
        }
    }
}

/// The chat text a session works on. Never edited in place: a new
/// transcript replaces the old one wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    text: String,
    origin: TranscriptOrigin,
}

impl Transcript {
    pub fn new(text: impl Into<String>, origin: TranscriptOrigin) -> Self {
        Self {
            text: text.into(),
            origin,
        }
    }

    pub fn pasted(text: impl Into<String>) -> Self {
        Self::new(text, TranscriptOrigin::Pasted)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn origin(&self) -> &TranscriptOrigin {
        &self.origin
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

impl From<archive::ExtractedTranscript> for Transcript {
    fn from(extracted: archive::ExtractedTranscript) -> Self {
        Transcript::new(
            extracted.text,
            TranscriptOrigin::Archive {
                entry: extracted.entry_name,
            },
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Format {
    Archive,
    Text,
}

impl Format {
    pub fn detect_from_extension(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("zip") => Format::Archive,
            _ => Format::Text,
        }
    }
}

/// Load a transcript from a plain text file or a chat export zip.
pub fn load_path(path: &Path) -> Result<Transcript> {
    let transcript = match Format::detect_from_extension(path) {
        Format::Archive => {
            let extracted = archive::extract_transcript_from_path(path).with_context(|| {
                format!("Failed to extract transcript from: {}", path.display())
            })?;
            Transcript::from(extracted)
        }
        Format::Text => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read: {}", path.display()))?;
            Transcript::new(
                content,
                TranscriptOrigin::File {
                    path: path.to_path_buf(),
                },
            )
        }
    };

    info!("Loaded transcript from {}", transcript.origin().describe());
    Ok(transcript)
}

/// Read a pasted transcript from stdin.
pub fn load_stdin() -> Result<Transcript> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .context("Failed to read from stdin")?;

    if content.trim().is_empty() {
        bail!("Empty input from stdin");
    }

    Ok(Transcript::pasted(content))
}
