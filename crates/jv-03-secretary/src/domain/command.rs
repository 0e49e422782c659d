//! Instruction-style messages.
//!
//! | Message | Command |
//! |---------|---------|
//! | `1`, `今日待办` | list open todos |
//! | `完成 3`, `完成3` | mark #3 done |
//! | `延期 3 2026-03-01`, `延期 3 2026-03-01 18:00` | set #3's due |
//!
//! Anything else is captured as a new item.

use super::item::ItemId;
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

const LIST_ALIASES: [&str; 2] = ["1", "今日待办"];

/// Normalized due formats.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";
pub const DUE_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

// `[0-9]` rather than `\d`: the id and date are ASCII digits only
static DONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^完成\s*([0-9]+)$").expect("valid done pattern"));

static POSTPONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^延期\s*([0-9]+)\s+([0-9]{4}-[0-9]{2}-[0-9]{2}(?:\s+[0-9]{1,2}:[0-9]{2})?)$")
        .expect("valid postpone pattern")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ListTodos,
    Done(ItemId),
    Postpone { id: ItemId, due: String },
    /// Shaped like a postpone but the date does not exist.
    InvalidDue { id: ItemId, raw: String },
}

impl Command {
    /// Match a trimmed message against the command table.
    pub fn parse(content: &str) -> Option<Self> {
        if LIST_ALIASES.contains(&content) {
            return Some(Self::ListTodos);
        }

        if let Some(caps) = DONE_RE.captures(content) {
            return caps[1].parse().ok().map(Self::Done);
        }

        let caps = POSTPONE_RE.captures(content)?;
        let id = caps[1].parse().ok()?;
        let raw = &caps[2];

        Some(match normalize_due(raw) {
            Some(due) => Self::Postpone { id, due },
            None => Self::InvalidDue {
                id,
                raw: raw.to_string(),
            },
        })
    }
}

/// Validate the calendar values and render in a fixed format.
fn normalize_due(raw: &str) -> Option<String> {
    let mut parts = raw.split_whitespace();
    let date = parts.next()?;
    match parts.next() {
        None => NaiveDate::parse_from_str(date, DUE_DATE_FORMAT)
            .ok()
            .map(|d| d.format(DUE_DATE_FORMAT).to_string()),
        Some(time) => {
            NaiveDateTime::parse_from_str(&format!("{} {}", date, time), DUE_DATETIME_FORMAT)
                .ok()
                .map(|dt| dt.format(DUE_DATETIME_FORMAT).to_string())
        }
    }
}
