//! Message kind detection.

use super::item::ItemKind;
use regex::Regex;
use std::sync::LazyLock;

/// Official-account article URLs.
static ARTICLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)https?://(?:mp\.weixin\.qq\.com/s|weixin\.qq\.com/)")
        .expect("valid article pattern")
});

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://\S+").expect("valid url pattern"));

/// Classify by the platform message type first, then by URLs in the text.
///
/// - platform `link` → `Link`
/// - an official-account article URL → `MpArticle`
/// - any other `http(s)://` URL → `Link`
/// - otherwise `Text`
pub fn detect_kind(msg_type: &str, content: &str) -> ItemKind {
    if msg_type == "link" {
        ItemKind::Link
    } else if ARTICLE_RE.is_match(content) {
        ItemKind::MpArticle
    } else if URL_RE.is_match(content) {
        ItemKind::Link
    } else {
        ItemKind::Text
    }
}
