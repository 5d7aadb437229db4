use unicode_width::UnicodeWidthStr;

use crate::backend::AnalyticsResult;
use crate::ingest::text::TranscriptStats;
use crate::ingest::Transcript;
use crate::session::QaExchange;
use crate::summary::{self, SummaryView, EMPTY_SECTION_PLACEHOLDER};

pub const SUMMARY_PLACEHOLDER: &str = "Your summary will appear here.";
pub const ANSWER_PLACEHOLDER: &str = "Answer will appear here.";
pub const ANALYTICS_PLACEHOLDER: &str = "Run analyze to see chat statistics.";
pub const THINKING: &str = "Thinking…";

/// Truncate a string to fit within max_width (respecting unicode width).
fn truncate(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let cw = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + cw + 3 > max_width {
            result.push_str("...");
            break;
        }
        result.push(ch);
        width += cw;
    }
    result
}

/// Left-align `s` in a column of `width` display cells.
fn pad(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{s}{}", " ".repeat(width.saturating_sub(w)))
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Render the summary panel: placeholder, parsed sections, or the raw text.
pub fn render_summary(summary: Option<&str>, in_flight: bool) -> String {
    if in_flight {
        return THINKING.to_string();
    }
    let raw = match summary {
        Some(s) if !s.trim().is_empty() => s,
        _ => return SUMMARY_PLACEHOLDER.to_string(),
    };

    match summary::parse(raw) {
        SummaryView::Sections(parsed) => {
            let mut lines = Vec::new();
            for section in parsed.sections() {
                let marker = summary::marker_for(&section.label).unwrap_or("•");
                if !lines.is_empty() {
                    lines.push(String::new());
                }
                lines.push(format!("{marker} {}", section.label));
                if section.bullets.is_empty() {
                    lines.push(format!("  - {EMPTY_SECTION_PLACEHOLDER}"));
                }
                for bullet in &section.bullets {
                    lines.push(format!("  - {bullet}"));
                }
            }
            lines.join("\n")
        }
        SummaryView::Raw(text) => text.to_string(),
    }
}

/// Render the ask panel.
pub fn render_answer(qa: &QaExchange<'_>, in_flight: bool) -> String {
    if in_flight {
        return THINKING.to_string();
    }
    match qa.answer {
        Some(answer) if !answer.trim().is_empty() => {
            if qa.question.is_empty() {
                answer.to_string()
            } else {
                format!("Q: {}\n\n{answer}", qa.question)
            }
        }
        _ => ANSWER_PLACEHOLDER.to_string(),
    }
}

/// Render backend analytics.
pub fn render_analytics(analytics: Option<&AnalyticsResult>, in_flight: bool) -> String {
    if in_flight {
        return "Crunching numbers…".to_string();
    }
    let Some(a) = analytics else {
        return ANALYTICS_PLACEHOLDER.to_string();
    };

    let mut lines = vec![
        format!("Total Messages:   {}", a.total_messages),
        format!(
            "Most Active Day:  {}",
            a.most_active_day.as_deref().unwrap_or("N/A")
        ),
        format!(
            "Most Active Hour: {}",
            a.most_active_hour.as_deref().unwrap_or("N/A")
        ),
    ];

    let users = a.users_by_activity();
    lines.push(String::new());
    lines.push(format!("Messages per User ({}):", users.len()));
    let name_width = users
        .iter()
        .map(|(name, _)| UnicodeWidthStr::width(truncate(name, 30).as_str()))
        .max()
        .unwrap_or(0);
    for (name, count) in &users {
        lines.push(format!("  {} {count}", pad(&truncate(name, 30), name_width)));
    }

    if !a.top_words.is_empty() {
        lines.push(String::new());
        lines.push(format!("Top {} Word{}:", a.top_words.len(), plural(a.top_words.len())));
        let words: Vec<String> = a
            .top_words
            .iter()
            .map(|w| format!("{} ({})", w.word, w.count))
            .collect();
        lines.extend(wrap_items(&words, 76));
    }

    if !a.top_emojis.is_empty() {
        lines.push(String::new());
        lines.push("Top Emojis:".to_string());
        let emojis: Vec<String> = a
            .top_emojis
            .iter()
            .map(|e| format!("{} ({})", e.emoji, e.count))
            .collect();
        lines.extend(wrap_items(&emojis, 76));
    }

    lines.join("\n")
}

/// Lay out short items on indented lines no wider than `max_width`.
fn wrap_items(items: &[String], max_width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut line = String::from(" ");
    for item in items {
        let needed = UnicodeWidthStr::width(item.as_str()) + 2;
        if UnicodeWidthStr::width(line.as_str()) + needed > max_width && !line.trim().is_empty() {
            out.push(line);
            line = String::from(" ");
        }
        line.push_str("  ");
        line.push_str(item);
    }
    if !line.trim().is_empty() {
        out.push(line);
    }
    out
}

/// Render transcript statistics for `chatsum inspect`.
pub fn render_stats(transcript: &Transcript, stats: &TranscriptStats) -> String {
    let mut lines = vec![
        format!("Transcript: {}", transcript.origin().describe()),
        format!("  Characters:   {}", stats.chars),
        format!("  Lines:        {}", stats.lines),
        format!("  Messages:     {}", stats.messages),
    ];
    if !stats.participants.is_empty() {
        lines.push(format!(
            "  Participants: {}",
            truncate(&stats.participants.join(", "), 64)
        ));
    }
    lines.join("\n")
}

/// One-line description printed after a transcript loads.
pub fn loaded_line(stats: &TranscriptStats) -> String {
    if stats.messages > 0 {
        format!(
            "{} message{} from {} participant{}",
            stats.messages,
            plural(stats.messages),
            stats.participants.len(),
            plural(stats.participants.len())
        )
    } else {
        format!("{} line{}", stats.lines, plural(stats.lines))
    }
}
