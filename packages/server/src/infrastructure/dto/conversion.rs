//! Conversion logic between domain entities and wire DTOs.

use irori_shared::time::timestamp_to_rfc3339;

use crate::domain::{ImageMessage, SystemMessage, UserMessage};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// Domain Entity → DTO
// ========================================

impl From<UserMessage> for dto::ChatMessageDto {
    fn from(record: UserMessage) -> Self {
        Self {
            r#type: dto::MessageKind::User,
            text: record.text,
            username: record.username.map(|name| name.into_string()),
            timestamp: timestamp_to_rfc3339(record.timestamp.value()),
        }
    }
}

impl From<SystemMessage> for dto::ChatMessageDto {
    fn from(record: SystemMessage) -> Self {
        Self {
            r#type: dto::MessageKind::System,
            text: record.text,
            username: None,
            timestamp: timestamp_to_rfc3339(record.timestamp.value()),
        }
    }
}

impl From<ImageMessage> for dto::ImageMessageDto {
    fn from(record: ImageMessage) -> Self {
        Self {
            r#type: dto::MessageKind::Image,
            image: record.image,
            username: record.username.map(|name| name.into_string()),
            timestamp: timestamp_to_rfc3339(record.timestamp.value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Timestamp, Username};

    #[test]
    fn test_user_message_to_dto() {
        // テスト項目: UserMessage が user 種別の DTO に変換される
        // given (前提条件):
        let record = UserMessage::new(
            Some(Username::new("alice".to_string())),
            "Hello!".to_string(),
            Timestamp::new(1672531200000),
        );

        // when (操作):
        let dto: dto::ChatMessageDto = record.into();

        // then (期待する結果):
        assert_eq!(dto.r#type, dto::MessageKind::User);
        assert_eq!(dto.text, "Hello!");
        assert_eq!(dto.username.as_deref(), Some("alice"));
        assert_eq!(dto.timestamp, "2023-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_user_message_without_author_to_dto() {
        // テスト項目: 未 join の送信者のレコードは username なしで変換される
        // given (前提条件):
        let record = UserMessage::new(None, "anonymous".to_string(), Timestamp::new(0));

        // when (操作):
        let dto: dto::ChatMessageDto = record.into();

        // then (期待する結果):
        assert_eq!(dto.username, None);
    }

    #[test]
    fn test_system_message_to_dto() {
        // テスト項目: SystemMessage が system 種別の DTO に変換される
        // given (前提条件):
        let record = SystemMessage::joined(
            &Username::new("alice".to_string()),
            Timestamp::new(1672531200123),
        );

        // when (操作):
        let dto: dto::ChatMessageDto = record.into();

        // then (期待する結果):
        assert_eq!(dto.r#type, dto::MessageKind::System);
        assert_eq!(dto.text, "alice has joined the chat");
        assert_eq!(dto.username, None);
        assert_eq!(dto.timestamp, "2023-01-01T00:00:00.123Z");
    }

    #[test]
    fn test_image_message_to_dto() {
        // テスト項目: ImageMessage が image 種別の DTO に変換される
        // given (前提条件):
        let record = ImageMessage::new(
            Some(Username::new("bob".to_string())),
            "base64data".to_string(),
            Timestamp::new(1672531200000),
        );

        // when (操作):
        let dto: dto::ImageMessageDto = record.into();

        // then (期待する結果):
        assert_eq!(dto.r#type, dto::MessageKind::Image);
        assert_eq!(dto.image, "base64data");
        assert_eq!(dto.username.as_deref(), Some("bob"));
    }
}
