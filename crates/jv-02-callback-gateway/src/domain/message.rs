//! Decrypted inner messages and plaintext replies.

use jv_01_envelope_codec::{EnvelopeError, TagDocument};
use serde::Serialize;
use std::collections::BTreeMap;

/// Platform message type used when `MsgType` is absent.
pub const DEFAULT_MSG_TYPE: &str = "text";
/// Sender used when `FromUserName` is absent.
pub const UNKNOWN_SENDER: &str = "unknown";

/// Fields lifted out of the inner document; everything else lands in
/// `metadata`.
const KNOWN_FIELDS: [&str; 7] = [
    "MsgType",
    "Content",
    "Title",
    "Description",
    "FromUserName",
    "ToUserName",
    "AgentID",
];

/// A decrypted, authenticated message as handed to the collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InboundMessage {
    /// Platform message type (`text`, `link`, `event`, ...)
    pub msg_type: String,
    /// `Content`, else `Title`, else `Description`, trimmed
    pub content: String,
    /// Sending user
    pub from_user: String,
    /// Receiving account
    pub to_user: String,
    /// Receiving application, when present
    pub agent_id: Option<String>,
    /// Remaining fields (`CreateTime`, `MsgId`, `Url`, ...)
    pub metadata: BTreeMap<String, String>,
}

impl InboundMessage {
    /// Parse the decrypted inner XML.
    pub fn parse(xml: &str) -> Result<Self, EnvelopeError> {
        TagDocument::parse(xml).map(|doc| Self::from_document(&doc))
    }

    /// Build from an already parsed document.
    pub fn from_document(doc: &TagDocument) -> Self {
        let content = ["Content", "Title", "Description"]
            .iter()
            .find_map(|name| doc.get_non_empty(name))
            .unwrap_or_default()
            .trim()
            .to_string();

        let metadata = doc
            .to_map()
            .into_iter()
            .filter(|(name, _)| !KNOWN_FIELDS.contains(&name.as_str()))
            .collect();

        Self {
            msg_type: doc
                .get_non_empty("MsgType")
                .unwrap_or(DEFAULT_MSG_TYPE)
                .to_string(),
            content,
            from_user: doc
                .get_non_empty("FromUserName")
                .unwrap_or(UNKNOWN_SENDER)
                .to_string(),
            to_user: doc.get("ToUserName").unwrap_or_default().to_string(),
            agent_id: doc.get_non_empty("AgentID").map(str::to_string),
            metadata,
        }
    }

    /// A plain text message, mostly for collaborators' tests.
    pub fn text(from_user: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            msg_type: DEFAULT_MSG_TYPE.to_string(),
            content: content.into(),
            from_user: from_user.into(),
            to_user: String::new(),
            agent_id: None,
            metadata: BTreeMap::new(),
        }
    }

    /// Look up a field that was not lifted into a named member.
    pub fn meta(&self, name: &str) -> Option<&str> {
        self.metadata.get(name).map(String::as_str)
    }
}

/// Plaintext reply document, addressed back to the sender.
pub fn reply_document(inbound: &InboundMessage, content: &str, create_time: u64) -> TagDocument {
    TagDocument::new()
        .with_cdata("ToUserName", inbound.from_user.as_str())
        .with_cdata("FromUserName", inbound.to_user.as_str())
        .with_text("CreateTime", create_time.to_string())
        .with_cdata("MsgType", DEFAULT_MSG_TYPE)
        .with_cdata("Content", content)
}
