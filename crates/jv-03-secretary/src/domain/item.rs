//! Captured items.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Item identifier, assigned sequentially from 1.
pub type ItemId = u64;

/// Characters of content kept as the item title.
pub const TITLE_CHARS: usize = 40;

/// What a message looked like when it was captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Text,
    Link,
    MpArticle,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Link => "link",
            Self::MpArticle => "mp_article",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored item. Every captured item is an open todo until marked done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: ItemId,
    pub content: String,
    pub kind: ItemKind,
    pub title: String,
    pub due: Option<String>,
    pub done: bool,
    pub created_at: DateTime<Utc>,
}

impl Item {
    pub fn is_open(&self) -> bool {
        !self.done
    }
}

/// Fields supplied when capturing a new item; the repository assigns the
/// rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub content: String,
    pub kind: ItemKind,
    pub title: String,
}

impl NewItem {
    /// Title is the first [`TITLE_CHARS`] characters of the content.
    pub fn new(content: impl Into<String>, kind: ItemKind) -> Self {
        let content = content.into();
        let title = content.chars().take(TITLE_CHARS).collect();
        Self {
            content,
            kind,
            title,
        }
    }
}
