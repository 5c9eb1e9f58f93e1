//! Frame formatting utilities for client display.

use irori_server::infrastructure::dto::websocket::{ChatMessageDto, ImageMessageDto, MessageKind};

/// Frame formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the current participant list
    ///
    /// # Arguments
    ///
    /// * `names` - Display names in join order
    /// * `current_username` - The current client's display name (to mark as "me")
    pub fn format_users_list(names: &[String], current_username: &str) -> String {
        let mut output = String::new();
        output.push_str("\n\n============================================================\n");
        output.push_str("Users online:\n");

        if names.is_empty() {
            output.push_str("(No users)\n");
        } else {
            for name in names {
                let me_suffix = if name == current_username { " (me)" } else { "" };
                output.push_str(&format!("{}{}\n", name, me_suffix));
            }
        }

        output.push_str("============================================================\n");
        output
    }

    /// Format the replayed message history received on join
    pub fn format_history(records: &[ChatMessageDto]) -> String {
        if records.is_empty() {
            return "\n(No message history)\n".to_string();
        }

        let mut output = String::new();
        output.push_str("\n--- Message history ---\n");
        for record in records {
            output.push_str(&Self::format_history_line(record));
        }
        output.push_str("--- End of history ---\n");
        output
    }

    fn format_history_line(record: &ChatMessageDto) -> String {
        match record.r#type {
            MessageKind::System => format!("* {} ({})\n", record.text, record.timestamp),
            _ => format!(
                "@{}: {} ({})\n",
                record.username.as_deref().unwrap_or("anonymous"),
                record.text,
                record.timestamp
            ),
        }
    }

    /// Format a live chat message (user message or system announcement)
    pub fn format_chat_message(record: &ChatMessageDto) -> String {
        match record.r#type {
            MessageKind::System => format!("\n* {}\n", record.text),
            _ => format!(
                "\n@{}: {}\nsent at {}\n",
                record.username.as_deref().unwrap_or("anonymous"),
                record.text,
                record.timestamp
            ),
        }
    }

    /// Format an image relay notification (the payload itself is not rendered)
    pub fn format_image_message(record: &ImageMessageDto) -> String {
        format!(
            "\n@{} sent an image ({} bytes)\n",
            record.username.as_deref().unwrap_or("anonymous"),
            record.image.len()
        )
    }

    /// Format a typing indicator; stopping is not displayed
    pub fn format_typing(username: Option<&str>, is_typing: bool) -> Option<String> {
        if !is_typing {
            return None;
        }
        Some(format!(
            "\n{} is typing...\n",
            username.unwrap_or("anonymous")
        ))
    }

    /// Format a raw text frame (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_record(name: &str, text: &str) -> ChatMessageDto {
        ChatMessageDto {
            r#type: MessageKind::User,
            text: text.to_string(),
            username: Some(name.to_string()),
            timestamp: "2023-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_format_users_list_marks_me() {
        // テスト項目: 参加者リストで自分の名前に (me) が付与される
        // given (前提条件):
        let names = vec!["Alice".to_string(), "Bob".to_string()];

        // when (操作):
        let formatted = MessageFormatter::format_users_list(&names, "Bob");

        // then (期待する結果):
        assert!(formatted.contains("Alice\n"));
        assert!(formatted.contains("Bob (me)\n"));
    }

    #[test]
    fn test_format_users_list_empty() {
        // テスト項目: 参加者が空の場合、適切なメッセージが表示される
        // given (前提条件):
        let names: Vec<String> = vec![];

        // when (操作):
        let formatted = MessageFormatter::format_users_list(&names, "Alice");

        // then (期待する結果):
        assert!(formatted.contains("(No users)"));
    }

    #[test]
    fn test_format_history_preserves_order() {
        // テスト項目: 履歴は受信した順に整形される
        // given (前提条件):
        let records = vec![user_record("Alice", "first"), user_record("Bob", "second")];

        // when (操作):
        let formatted = MessageFormatter::format_history(&records);

        // then (期待する結果):
        let first_pos = formatted.find("first").unwrap();
        let second_pos = formatted.find("second").unwrap();
        assert!(first_pos < second_pos);
    }

    #[test]
    fn test_format_history_empty() {
        // テスト項目: 履歴が空の場合、適切なメッセージが表示される
        // given (前提条件):
        let records = vec![];

        // when (操作):
        let formatted = MessageFormatter::format_history(&records);

        // then (期待する結果):
        assert!(formatted.contains("(No message history)"));
    }

    #[test]
    fn test_format_chat_message_system() {
        // テスト項目: system メッセージは送信者なしのアナウンスとして整形される
        // given (前提条件):
        let record = ChatMessageDto {
            r#type: MessageKind::System,
            text: "Alice has joined the chat".to_string(),
            username: None,
            timestamp: "2023-01-01T00:00:00.000Z".to_string(),
        };

        // when (操作):
        let formatted = MessageFormatter::format_chat_message(&record);

        // then (期待する結果):
        assert!(formatted.contains("* Alice has joined the chat"));
        assert!(!formatted.contains("@"));
    }

    #[test]
    fn test_format_chat_message_anonymous_sender() {
        // テスト項目: username のない user メッセージは anonymous として表示される
        // given (前提条件):
        let record = ChatMessageDto {
            r#type: MessageKind::User,
            text: "boo".to_string(),
            username: None,
            timestamp: "2023-01-01T00:00:00.000Z".to_string(),
        };

        // when (操作):
        let formatted = MessageFormatter::format_chat_message(&record);

        // then (期待する結果):
        assert!(formatted.contains("@anonymous: boo"));
    }

    #[test]
    fn test_format_typing_only_when_typing() {
        // テスト項目: typing インジケータは is_typing=true の場合のみ表示される
        // given (前提条件):

        // when (操作):
        let shown = MessageFormatter::format_typing(Some("Bob"), true);
        let hidden = MessageFormatter::format_typing(Some("Bob"), false);

        // then (期待する結果):
        assert_eq!(shown, Some("\nBob is typing...\n".to_string()));
        assert_eq!(hidden, None);
    }
}
