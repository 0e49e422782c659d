//! Secretary service - routes a message to a command or captures it.

use crate::domain::format::{
    format_done, format_invalid_due, format_not_found, format_postpone, format_reply,
    format_todo_list, format_unsupported, todo_next_hint, CaptureReply,
};
use crate::domain::{detect_kind, Command, Item, NewItem};
use crate::adapters::RuleBasedSummarizer;
use crate::ports::{ItemRepository, Summarizer, SummaryContext};
use std::sync::Arc;
use tracing::{debug, info};

pub struct Secretary {
    repository: Arc<dyn ItemRepository>,
    summarizer: Arc<dyn Summarizer>,
}

impl Secretary {
    pub fn new(repository: Arc<dyn ItemRepository>, summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            repository,
            summarizer,
        }
    }

    /// Reply to one message. `content` is already trimmed.
    pub async fn respond(&self, msg_type: &str, content: &str) -> String {
        if let Some(command) = Command::parse(content) {
            debug!(?command, "command");
            return self.execute(command);
        }
        if content.is_empty() {
            return format_unsupported(msg_type);
        }
        self.capture(msg_type, content).await
    }

    /// Everything stored, for the debug view.
    pub fn items(&self) -> Vec<Item> {
        self.repository.all()
    }

    fn execute(&self, command: Command) -> String {
        match command {
            Command::ListTodos => format_todo_list(&self.repository.open_todos()),
            Command::Done(id) => match self.repository.mark_done(id) {
                Some(item) => {
                    info!(id, "todo done");
                    format_done(&item)
                }
                None => format_not_found(id),
            },
            Command::Postpone { id, due } => match self.repository.update_due(id, due) {
                Some(item) => {
                    info!(id, due = ?item.due, "todo postponed");
                    format_postpone(&item)
                }
                None => format_not_found(id),
            },
            Command::InvalidDue { raw, .. } => format_invalid_due(&raw),
        }
    }

    async fn capture(&self, msg_type: &str, content: &str) -> String {
        let kind = detect_kind(msg_type, content);
        let item = self.repository.create(NewItem::new(content, kind));
        info!(id = item.id, kind = %kind, "item captured");

        let context = SummaryContext { content, kind };
        // the fallback chain always produces text; other summarizers may not
        let summary = match self.summarizer.summarize(&context).await {
            Ok(summary) => summary,
            Err(_) => RuleBasedSummarizer::summary(&context),
        };

        format_reply(&CaptureReply {
            kind,
            title: &item.title,
            due: item.due.as_deref(),
            todo_id: Some(item.id),
            summary: &summary,
            next: Some(todo_next_hint(item.id)),
        })
    }
}
