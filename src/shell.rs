//! Line-oriented interactive session.
//!
//! Holds one [`Session`] for the lifetime of the shell so summaries,
//! answers and analytics stay tied to the loaded transcript.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::backend::window::WindowMode;
use crate::backend::{ChatBackend, ModelTier};
use crate::ingest::text::TranscriptStats;
use crate::ingest::{Format, Transcript, TranscriptOrigin};
use crate::output::table;
use crate::session::state::{Flow, FlowStatus};
use crate::session::Session;

pub const DEFAULT_SUMMARY_FILE: &str = "chat-summary.txt";

const HELP: &str = "\
Commands:
  load <path>          load a chat export (.zip) or text file
  paste                paste a chat; end with a line containing only '.'
  model <fast|accurate>
  window <n|all>       summarize the last n messages, or everything
  summarize            summarize the loaded chat
  ask <question>       ask about the chat (needs a summary)
  analyze              chat statistics
  show                 show summary, answer and analytics
  save [file]          write the summary to a file (default chat-summary.txt)
  clear                drop the chat and all results
  status               show settings and flow states
  quit";

/// Run the shell until `quit` or end of input.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    backend: &dyn ChatBackend,
    mut input: R,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "chatsum shell ({}). Type 'help' for commands.", backend.name())?;
    let mut last_status: Option<String> = session.status().map(str::to_string);

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (cmd, arg) = match line.split_once(char::is_whitespace) {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (line, ""),
        };

        let mut ran_flow = false;
        match cmd {
            "quit" | "exit" => break,
            "help" => writeln!(out, "{HELP}")?,
            "load" => load(session, arg, out)?,
            "paste" => paste(session, &mut input, out)?,
            "model" => match ModelTier::from_str(arg) {
                Some(model) => {
                    session.config_mut().model = model;
                    writeln!(out, "model: {}", model.as_str())?;
                }
                None => writeln!(out, "usage: model <fast|accurate>")?,
            },
            "window" => set_window(session, arg, out)?,
            "summarize" => {
                if !session.can_summarize() {
                    writeln!(out, "Nothing to summarize. Load or paste a chat first.")?;
                } else {
                    ran_flow = true;
                    if session.run_summarize(backend) == FlowStatus::Succeeded {
                        writeln!(out, "{}", table::render_summary(session.summary(), false))?;
                    }
                }
            }
            "ask" => {
                session.set_question(arg);
                if !has_summary(session) {
                    writeln!(out, "Summarize first: answers are based on the current summary.")?;
                } else if arg.is_empty() {
                    writeln!(out, "usage: ask <question>")?;
                } else {
                    ran_flow = true;
                    if session.run_ask(backend) == FlowStatus::Succeeded {
                        writeln!(out, "{}", table::render_answer(&session.qa(), false))?;
                    }
                }
            }
            "analyze" => {
                if !session.can_analyze() {
                    writeln!(out, "Nothing to analyze. Load or paste a chat first.")?;
                } else {
                    ran_flow = true;
                    if session.run_analyze(backend) == FlowStatus::Succeeded {
                        writeln!(out, "{}", table::render_analytics(session.analytics(), false))?;
                    }
                }
            }
            "show" => show(session, out)?,
            "save" => save(session, arg, out)?,
            "clear" => match session.clear() {
                Ok(()) => writeln!(out, "Cleared.")?,
                Err(e) => writeln!(out, "{e}")?,
            },
            "status" => print_status(session, out)?,
            other => writeln!(out, "Unknown command: {other}. Type 'help'.")?,
        }

        // A finished flow always reports, even when it repeats the last message.
        let status = session.status().map(str::to_string);
        if ran_flow || status != last_status {
            if let Some(ref message) = status {
                writeln!(out, "{message}")?;
            }
            last_status = status;
        }
    }

    Ok(())
}

fn has_summary(session: &Session) -> bool {
    session.summary().is_some_and(|s| !s.trim().is_empty())
}

fn load<W: Write>(session: &mut Session, arg: &str, out: &mut W) -> Result<()> {
    if arg.is_empty() {
        writeln!(out, "usage: load <path>")?;
        return Ok(());
    }
    let path = Path::new(arg);

    let loaded = match Format::detect_from_extension(path) {
        Format::Archive => {
            writeln!(out, "📦 Reading ZIP...")?;
            let file = match std::fs::File::open(path) {
                Ok(file) => file,
                Err(e) => {
                    warn!("Failed to open {}: {e}", path.display());
                    writeln!(out, "❌ Failed to read ZIP. Try exporting again.")?;
                    return Ok(());
                }
            };
            session.load_archive(std::io::BufReader::new(file))
        }
        Format::Text => match std::fs::read_to_string(path) {
            Ok(content) => {
                let transcript = Transcript::new(
                    content,
                    TranscriptOrigin::File {
                        path: path.to_path_buf(),
                    },
                );
                session.load_transcript(transcript).map(|()| true)
            }
            Err(e) => {
                writeln!(out, "Failed to read {}: {e}", path.display())?;
                return Ok(());
            }
        },
    };

    match loaded {
        Ok(true) => {
            if let Some(t) = session.transcript() {
                let stats = TranscriptStats::compute(t.text());
                writeln!(out, "Loaded {}.", table::loaded_line(&stats))?;
            }
        }
        Ok(false) => {}
        Err(e) => writeln!(out, "{e}")?,
    }
    Ok(())
}

fn paste<R: BufRead, W: Write>(session: &mut Session, input: &mut R, out: &mut W) -> Result<()> {
    writeln!(out, "Paste the chat, then a line with a single '.':")?;
    let mut lines = Vec::new();
    loop {
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\r', '\n']);
        if line == "." {
            break;
        }
        lines.push(line.to_string());
    }

    let text = lines.join("\n");
    if text.trim().is_empty() {
        writeln!(out, "Nothing pasted.")?;
        return Ok(());
    }

    match session.load_transcript(Transcript::pasted(text)) {
        Ok(()) => {
            let text = session.transcript().map(Transcript::text).unwrap_or("");
            let stats = TranscriptStats::compute(text);
            writeln!(out, "Loaded {}.", table::loaded_line(&stats))?;
        }
        Err(e) => writeln!(out, "{e}")?,
    }
    Ok(())
}

fn set_window<W: Write>(session: &mut Session, arg: &str, out: &mut W) -> Result<()> {
    let config = session.config_mut();
    if arg.is_empty() {
        writeln!(out, "usage: window <n|all>")?;
        return Ok(());
    }
    if arg.eq_ignore_ascii_case("all") {
        config.window_mode = WindowMode::All;
    } else {
        config.window_mode = WindowMode::Recent;
        config.window_input = arg.to_string();
    }
    match config.effective_window() {
        0 => writeln!(out, "window: all messages")?,
        n => writeln!(out, "window: last {n} messages")?,
    }
    Ok(())
}

fn show<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    let in_flight = |flow| session.flow_status(flow) == FlowStatus::InFlight;
    writeln!(out, "── Summary ──")?;
    writeln!(out, "{}", table::render_summary(session.summary(), in_flight(Flow::Summarize)))?;
    writeln!(out, "── Ask My Chat ──")?;
    writeln!(out, "{}", table::render_answer(&session.qa(), in_flight(Flow::Ask)))?;
    writeln!(out, "── Analytics ──")?;
    writeln!(out, "{}", table::render_analytics(session.analytics(), in_flight(Flow::Analyze)))?;
    Ok(())
}

fn save<W: Write>(session: &Session, arg: &str, out: &mut W) -> Result<()> {
    let Some(summary) = session.summary().filter(|s| !s.is_empty()) else {
        writeln!(out, "No summary to save.")?;
        return Ok(());
    };
    let path = if arg.is_empty() {
        PathBuf::from(DEFAULT_SUMMARY_FILE)
    } else {
        PathBuf::from(arg)
    };
    match save_summary(summary, &path) {
        Ok(()) => writeln!(out, "Saved summary to {}", path.display())?,
        Err(e) => {
            warn!("{e:#}");
            writeln!(out, "{e:#}")?;
        }
    }
    Ok(())
}

/// Write the raw summary text to `path`.
pub fn save_summary(summary: &str, path: &Path) -> Result<()> {
    std::fs::write(path, summary)
        .with_context(|| format!("Failed to write summary: {}", path.display()))
}

fn print_status<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    let config = session.config();
    let transcript = session
        .transcript()
        .map(|t| t.origin().describe())
        .unwrap_or_else(|| "(none)".to_string());
    let window = match config.effective_window() {
        0 => "all".to_string(),
        n => format!("last {n}"),
    };

    writeln!(out, "Transcript: {transcript}")?;
    writeln!(out, "Model:      {}", config.model.as_str())?;
    writeln!(out, "Window:     {window}")?;
    for flow in Flow::ALL {
        writeln!(out, "  {:<10} {:?}", flow.label(), session.flow_status(flow))?;
    }
    Ok(())
}
