use chrono::{DateTime, Local};
use snafu::Snafu;

use crate::message::{Message, MessageId, Role};

/// Assistant message every conversation opens with.
pub const GREETING: &str = "Olá! Como posso ajudá-lo hoje?";
/// Scripted assistant reply standing in for a real model call.
pub const CANNED_REPLY: &str =
    "Esta é uma resposta simulada da IA. Em produção, aqui seria integrada uma API de IA real.";

/// Rejection reason for a submission that carries no content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Snafu)]
pub enum SendRejection {
    #[snafu(display("message content is empty after trimming whitespace"))]
    EmptyContent,
}

/// Ticket for one assistant reply owed after a successful send.
///
/// The caller decides when to redeem it; the store does not track timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingReply {
    sequence: u64,
    answers: MessageId,
}

impl PendingReply {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// The user message that triggered this reply.
    pub fn answers(&self) -> MessageId {
        self.answers
    }
}

/// Append-only conversation log.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<Message>,
    next_message_id: u64,
    next_reply_sequence: u64,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a conversation seeded with the assistant greeting.
    pub fn with_greeting(now: DateTime<Local>) -> Self {
        let mut conversation = Self::new();
        conversation.append(Role::Assistant, GREETING, now);
        conversation
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Appends a user message and returns the reply it is owed.
    ///
    /// Whitespace-only text is rejected without touching the log. Accepted
    /// text is stored verbatim, surrounding whitespace included.
    pub fn send(
        &mut self,
        text: &str,
        now: DateTime<Local>,
    ) -> Result<PendingReply, SendRejection> {
        if text.trim().is_empty() {
            return Err(SendRejection::EmptyContent);
        }

        let answers = self.append(Role::User, text, now).id();
        let pending = PendingReply {
            sequence: self.next_reply_sequence,
            answers,
        };
        self.next_reply_sequence = self.next_reply_sequence.saturating_add(1);

        tracing::debug!(
            message_id = %answers,
            reply_sequence = pending.sequence,
            "user message appended"
        );
        Ok(pending)
    }

    /// Appends the canned assistant reply for `pending`.
    ///
    /// Replies land in delivery order, which may differ from send order when
    /// several are in flight.
    pub fn deliver_reply(&mut self, pending: PendingReply, now: DateTime<Local>) -> &Message {
        tracing::debug!(
            reply_sequence = pending.sequence,
            answers = %pending.answers,
            "assistant reply delivered"
        );
        self.append(Role::Assistant, CANNED_REPLY, now)
    }

    fn append(&mut self, role: Role, content: &str, now: DateTime<Local>) -> &Message {
        let id = self.alloc_message_id();
        self.messages.push(Message::new(id, role, content, now));
        &self.messages[self.messages.len() - 1]
    }

    fn alloc_message_id(&mut self) -> MessageId {
        self.next_message_id = self.next_message_id.saturating_add(1);
        MessageId::new(self.next_message_id)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn contents(conversation: &Conversation) -> Vec<(Role, &str)> {
        conversation
            .messages()
            .iter()
            .map(|message| (message.role(), message.content()))
            .collect()
    }

    #[test]
    fn blank_submissions_leave_log_untouched() {
        let now = Local::now();
        let mut conversation = Conversation::with_greeting(now);
        let before = conversation.messages().to_vec();

        for text in ["", " ", "\n\t  \n"] {
            assert_eq!(
                conversation.send(text, now),
                Err(SendRejection::EmptyContent)
            );
        }

        assert_eq!(conversation.messages(), before.as_slice());
    }

    #[test]
    fn send_appends_user_message_then_reply_on_delivery() {
        let now = Local::now();
        let mut conversation = Conversation::new();

        let pending = conversation.send("hello", now).expect("non-empty text");
        assert_eq!(contents(&conversation), vec![(Role::User, "hello")]);
        assert_eq!(pending.answers(), conversation.messages()[0].id());

        let reply = conversation.deliver_reply(pending, now);
        assert_eq!(reply.role(), Role::Assistant);
        assert_eq!(reply.content(), CANNED_REPLY);
        assert_eq!(
            contents(&conversation),
            vec![(Role::User, "hello"), (Role::Assistant, CANNED_REPLY)]
        );
    }

    #[test]
    fn accepted_text_is_stored_without_trimming() {
        let mut conversation = Conversation::new();
        conversation
            .send("  linha um\nlinha dois ", Local::now())
            .expect("non-empty text");

        assert_eq!(
            conversation.last().map(Message::content),
            Some("  linha um\nlinha dois ")
        );
    }

    #[test]
    fn greeting_seeds_single_assistant_message() {
        let conversation = Conversation::with_greeting(Local::now());

        assert_eq!(contents(&conversation), vec![(Role::Assistant, GREETING)]);
    }

    #[test]
    fn overlapping_replies_append_in_delivery_order() {
        let now = Local::now();
        let mut conversation = Conversation::new();

        let first = conversation.send("primeira", now).expect("non-empty text");
        let second = conversation.send("segunda", now).expect("non-empty text");
        assert_ne!(first.sequence(), second.sequence());

        // Second timer fires before the first one.
        conversation.deliver_reply(second, now);
        conversation.deliver_reply(first, now);

        assert_eq!(
            contents(&conversation),
            vec![
                (Role::User, "primeira"),
                (Role::User, "segunda"),
                (Role::Assistant, CANNED_REPLY),
                (Role::Assistant, CANNED_REPLY),
            ]
        );

        let ids = conversation
            .messages()
            .iter()
            .map(Message::id)
            .collect::<Vec<_>>();
        let unique = ids.iter().copied().collect::<HashSet<_>>();
        assert_eq!(unique.len(), ids.len());
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
