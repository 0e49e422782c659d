//! Plain-text replies.
//!
//! Captured-item replies use a fixed `KEY: value` layout so scripts on the
//! receiving side can parse them.

use super::item::{Item, ItemId, ItemKind};

const RULE_WIDTH: usize = 24;

/// Hint shown when there is nothing more specific to suggest.
pub const DEFAULT_NEXT: &str = "回复 1 查看今日待办";

/// Fields of a captured-item reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureReply<'a> {
    pub kind: ItemKind,
    pub title: &'a str,
    pub due: Option<&'a str>,
    pub todo_id: Option<ItemId>,
    pub summary: &'a str,
    pub next: Option<String>,
}

pub fn format_reply(reply: &CaptureReply<'_>) -> String {
    let todo_id = reply.todo_id.map(|id| id.to_string()).unwrap_or_default();
    [
        format!("TYPE: {}", reply.kind),
        format!("TITLE: {}", reply.title),
        format!("DUE: {}", reply.due.unwrap_or_default()),
        format!("TODO_ID: {}", todo_id),
        format!("SUMMARY: {}", reply.summary),
        format!("NEXT: {}", reply.next.as_deref().unwrap_or(DEFAULT_NEXT)),
    ]
    .join("\n")
}

/// Follow-up hint for a freshly captured todo.
pub fn todo_next_hint(id: ItemId) -> String {
    format!("回复 完成 {id} / 延期 {id} YYYY-MM-DD HH:mm / 1")
}

pub fn format_todo_list(todos: &[Item]) -> String {
    if todos.is_empty() {
        return "📋 当前没有未完成的待办事项。\n\nNEXT: 发送任意文本新建待办".to_string();
    }

    let rule = "─".repeat(RULE_WIDTH);
    let mut lines = Vec::with_capacity(todos.len() + 3);
    lines.push(format!("📋 待办列表（共 {} 项）\n{}", todos.len(), rule));
    for todo in todos {
        let due = todo
            .due
            .as_deref()
            .map(|d| format!(" ⏰ {}", d))
            .unwrap_or_default();
        lines.push(format!("[ ] {}. {}{}", todo.id, todo.title, due));
    }
    lines.push(rule);
    lines.push("NEXT: 完成 <id> | 延期 <id> YYYY-MM-DD HH:mm | 发送新任务".to_string());
    lines.join("\n")
}

pub fn format_done(item: &Item) -> String {
    format!("✅ 已完成: #{} {}\n\nNEXT: 回复 1 查看待办", item.id, item.title)
}

pub fn format_postpone(item: &Item) -> String {
    format!(
        "📅 已延期: #{} {}\n新截止: {}\n\nNEXT: 回复 1 查看待办",
        item.id,
        item.title,
        item.due.as_deref().unwrap_or_default()
    )
}

pub fn format_not_found(id: ItemId) -> String {
    format!("❌ 未找到待办 #{}", id)
}

pub fn format_invalid_due(raw: &str) -> String {
    format!("❌ 无效日期: {}\n\nNEXT: 延期 <id> YYYY-MM-DD HH:mm", raw)
}

/// Reply for messages with no text to capture (images, events, ...).
pub fn format_unsupported(msg_type: &str) -> String {
    format!("⚠️ 暂不支持收录 {} 消息\n\nNEXT: {}", msg_type, DEFAULT_NEXT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn item(id: ItemId, title: &str, due: Option<&str>) -> Item {
        Item {
            id,
            content: title.to_string(),
            kind: ItemKind::Text,
            title: title.to_string(),
            due: due.map(String::from),
            done: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_reply_layout() {
        let reply = format_reply(&CaptureReply {
            kind: ItemKind::Link,
            title: "周报",
            due: None,
            todo_id: Some(4),
            summary: "已收录 [link]：周报",
            next: Some(todo_next_hint(4)),
        });
        assert_eq!(
            reply,
            "TYPE: link\nTITLE: 周报\nDUE: \nTODO_ID: 4\nSUMMARY: 已收录 [link]：周报\n\
             NEXT: 回复 完成 4 / 延期 4 YYYY-MM-DD HH:mm / 1"
        );
    }

    #[test]
    fn test_reply_default_next() {
        let reply = format_reply(&CaptureReply {
            kind: ItemKind::Text,
            title: "x",
            due: Some("2026-03-01"),
            todo_id: None,
            summary: "s",
            next: None,
        });
        assert!(reply.contains("DUE: 2026-03-01\nTODO_ID: \n"));
        assert!(reply.ends_with("NEXT: 回复 1 查看今日待办"));
    }

    #[test]
    fn test_todo_list() {
        let list = format_todo_list(&[item(1, "写周报", Some("2026-03-01 18:00")), item(2, "买菜", None)]);
        let lines: Vec<&str> = list.lines().collect();
        assert_eq!(lines[0], "📋 待办列表（共 2 项）");
        assert_eq!(lines[1], "─".repeat(24));
        assert_eq!(lines[2], "[ ] 1. 写周报 ⏰ 2026-03-01 18:00");
        assert_eq!(lines[3], "[ ] 2. 买菜");
        assert_eq!(lines[4], "─".repeat(24));
        assert!(lines[5].starts_with("NEXT: 完成 <id>"));
    }

    #[test]
    fn test_empty_todo_list() {
        assert!(format_todo_list(&[]).starts_with("📋 当前没有未完成的待办事项。"));
    }

    #[test]
    fn test_confirmations() {
        assert_eq!(
            format_done(&item(3, "写周报", None)),
            "✅ 已完成: #3 写周报\n\nNEXT: 回复 1 查看待办"
        );
        assert_eq!(
            format_postpone(&item(3, "写周报", Some("2026-03-01"))),
            "📅 已延期: #3 写周报\n新截止: 2026-03-01\n\nNEXT: 回复 1 查看待办"
        );
        assert_eq!(format_not_found(9), "❌ 未找到待办 #9");
    }
}
