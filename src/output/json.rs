use anyhow::Result;
use serde::Serialize;
use serde_json::{json, Value};

use crate::summary::{self, SummaryView};

/// Pretty-print any serializable value as JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

/// JSON shape for a summary: the raw text plus sections when they parsed.
pub fn summary_value(raw: &str) -> Value {
    match summary::parse(raw) {
        SummaryView::Sections(parsed) => json!({
            "summary": raw,
            "structured": true,
            "sections": parsed.sections(),
        }),
        SummaryView::Raw(_) => json!({
            "summary": raw,
            "structured": false,
            "sections": [],
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_summary_lists_sections() {
        let value = summary_value("✅ Decisions\n- plan B");
        assert_eq!(value["structured"], json!(true));
        assert_eq!(value["sections"][0]["label"], json!("Decisions"));
        assert_eq!(value["sections"][0]["bullets"], json!(["plan B"]));
    }

    #[test]
    fn plain_summary_has_no_sections() {
        let value = summary_value("all quiet");
        assert_eq!(value["structured"], json!(false));
        assert_eq!(value["summary"], json!("all quiet"));
    }
}
