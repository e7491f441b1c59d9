use std::fmt;

use chrono::{DateTime, Local};

/// Display format for bubble timestamps (24-hour `HH:MM`).
pub const TIME_LABEL_FORMAT: &str = "%H:%M";

/// Stable identifier for one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(pub u64);

impl MessageId {
    /// Creates a typed message identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Chat speaker role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn is_user(self) -> bool {
        matches!(self, Self::User)
    }
}

/// One immutable conversation entry.
///
/// Fields are private so a message cannot change after the store appends it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    id: MessageId,
    role: Role,
    content: String,
    timestamp: DateTime<Local>,
}

impl Message {
    pub(crate) fn new(
        id: MessageId,
        role: Role,
        content: impl Into<String>,
        timestamp: DateTime<Local>,
    ) -> Self {
        Self {
            id,
            role,
            content: content.into(),
            timestamp,
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Hour and minute of creation, zero padded.
    pub fn time_label(&self) -> String {
        self.timestamp.format(TIME_LABEL_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn time_label_is_zero_padded_hour_and_minute() {
        let timestamp = Local
            .with_ymd_and_hms(2024, 3, 9, 7, 5, 42)
            .single()
            .expect("unambiguous local time");
        let message = Message::new(MessageId::new(1), Role::User, "oi", timestamp);

        assert_eq!(message.time_label(), "07:05");
    }

    #[test]
    fn message_id_displays_as_decimal_string() {
        assert_eq!(MessageId::new(42).to_string(), "42");
    }
}
