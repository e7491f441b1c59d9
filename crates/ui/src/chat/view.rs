use std::time::Duration;

use chrono::Local;
use gpui::*;
use gpui_component::{ActiveTheme, v_flex};
use prosa_conversation::{Conversation, PendingReply};

use crate::chat::events::Submit;
use crate::chat::{MessageInput, MessageList};
use crate::config::AppConfig;

/// Owns the conversation and wires the input to the list.
pub struct ChatView {
    conversation: Conversation,
    message_list: Entity<MessageList>,
    message_input: Entity<MessageInput>,
    reply_delay: Duration,
}

impl ChatView {
    pub fn new(window: &mut Window, cx: &mut Context<Self>) -> Self {
        let message_list = cx.new(MessageList::new);
        let message_input = cx.new(|cx| MessageInput::new(window, cx));

        cx.subscribe(&message_input, |this, _, event: &Submit, cx| {
            this.handle_submit(event, cx);
        })
        .detach();

        let mut this = Self {
            conversation: Conversation::with_greeting(Local::now()),
            message_list,
            message_input,
            reply_delay: AppConfig::current(cx).reply_delay(),
        };
        this.sync_messages(cx);
        this
    }

    fn handle_submit(&mut self, event: &Submit, cx: &mut Context<Self>) {
        match self.conversation.send(&event.content, Local::now()) {
            Ok(pending) => {
                self.sync_messages(cx);
                self.schedule_reply(pending, cx);
            }
            Err(rejection) => {
                tracing::debug!("send rejected: {rejection}");
            }
        }
    }

    /// Replies are never cancelled; overlapping sends each get their own timer.
    fn schedule_reply(&mut self, pending: PendingReply, cx: &mut Context<Self>) {
        let delay = self.reply_delay;

        cx.spawn(async move |this, cx| {
            cx.background_executor().timer(delay).await;

            let _ = this.update(cx, |this, cx| {
                this.conversation.deliver_reply(pending, Local::now());
                this.sync_messages(cx);
            });
        })
        .detach();
    }

    fn sync_messages(&mut self, cx: &mut Context<Self>) {
        let messages = self.conversation.messages();
        self.message_list.update(cx, |list, cx| {
            list.set_messages(messages, cx);
        });
        cx.notify();
    }
}

impl Render for ChatView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        v_flex()
            .id("chat-view")
            .relative()
            .size_full()
            .min_h_0()
            .overflow_hidden()
            .bg(theme.background)
            .child(
                div()
                    .id("chat-view-message-list")
                    .flex_1()
                    .min_h_0()
                    .child(self.message_list.clone()),
            )
            .child(
                div()
                    .id("chat-view-message-input")
                    .flex_shrink_0()
                    .w_full()
                    .border_t_1()
                    .border_color(theme.border)
                    .bg(theme.secondary)
                    .child(self.message_input.clone()),
            )
    }
}
