//! Trailing-window (`last_n`) selection.
//!
//! The backend trims the chat to its last N messages; `0` means "send
//! everything". The client only decides which number goes on the wire.

pub const DEFAULT_WINDOW: u32 = 100;
pub const MIN_WINDOW: u32 = 10;
pub const MAX_WINDOW: u32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowMode {
    /// Only the most recent messages.
    Recent,
    /// The whole transcript.
    #[default]
    All,
}

impl WindowMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WindowMode::Recent => "recent",
            WindowMode::All => "all",
        }
    }
}

/// Compute the `last_n` value sent to the backend.
///
/// `All` always yields `0`. `Recent` parses `raw` (integers, or decimals
/// truncated toward zero), substitutes [`DEFAULT_WINDOW`] when it is not a
/// number, and clamps into `[min, max]`. Never fails.
pub fn effective_window(mode: WindowMode, raw: &str, min: u32, max: u32) -> u32 {
    if mode == WindowMode::All {
        return 0;
    }

    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    let requested = parse_window(raw).unwrap_or(i64::from(DEFAULT_WINDOW));
    requested.clamp(i64::from(lo), i64::from(hi)) as u32
}

fn parse_window(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<i64>() {
        return Some(n);
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() => Some(f.trunc().clamp(i64::MIN as f64, i64::MAX as f64) as i64),
        _ => None,
    }
}
