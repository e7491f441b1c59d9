use gpui::prelude::FluentBuilder as _;
use gpui::*;
use gpui_component::{ActiveTheme, Icon, IconName, h_flex, label::Label, v_flex};
use prosa_conversation::{Message, Role};

use crate::chat::scroll_manager::ScrollManager;

const AVATAR_SIZE: Pixels = px(32.);
const AVATAR_ICON_SIZE: Pixels = px(16.);
const BUBBLE_PADDING_X: Pixels = px(16.);
const BUBBLE_PADDING_Y: Pixels = px(12.);
/// Bubbles never grow past this share of the list width.
const BUBBLE_MAX_WIDTH_FRACTION: f32 = 0.75;

/// Which edge of the list a bubble hugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Avatar {
    User,
    Bot,
}

impl Avatar {
    fn icon(self) -> IconName {
        match self {
            Self::User => IconName::User,
            Self::Bot => IconName::Bot,
        }
    }
}

/// Visual treatment of one bubble, derived from the author role alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BubbleLayout {
    pub side: BubbleSide,
    pub avatar: Avatar,
    pub bordered: bool,
}

impl BubbleLayout {
    pub fn for_role(role: Role) -> Self {
        if role.is_user() {
            Self {
                side: BubbleSide::Right,
                avatar: Avatar::User,
                bordered: false,
            }
        } else {
            Self {
                side: BubbleSide::Left,
                avatar: Avatar::Bot,
                bordered: true,
            }
        }
    }
}

pub struct MessageList {
    messages: Vec<Message>,
    scroll_manager: ScrollManager,
}

impl MessageList {
    pub fn new(_cx: &mut Context<Self>) -> Self {
        Self {
            messages: Vec::new(),
            scroll_manager: ScrollManager::new(),
        }
    }

    pub fn set_messages(&mut self, messages: &[Message], cx: &mut Context<Self>) {
        self.messages = messages.to_vec();
        cx.notify();
    }

    fn render_message_row(&self, message: &Message, cx: &Context<Self>) -> AnyElement {
        let theme = cx.theme();
        let layout = BubbleLayout::for_role(message.role());
        let is_user = layout.side == BubbleSide::Right;

        let (bubble_bg, bubble_fg, meta_fg) = if is_user {
            (
                theme.primary,
                theme.primary_foreground,
                theme.primary_foreground.opacity(0.7),
            )
        } else {
            (theme.secondary, theme.secondary_foreground, theme.muted_foreground)
        };
        let (avatar_bg, avatar_fg) = if is_user {
            (theme.secondary, theme.foreground)
        } else {
            (theme.primary, theme.primary_foreground)
        };

        h_flex()
            .id(ElementId::Name(SharedString::from(format!(
                "message-{}",
                message.id()
            ))))
            .w_full()
            .items_start()
            .gap_3()
            .when(is_user, |row| row.flex_row_reverse())
            .child(
                div()
                    .size(AVATAR_SIZE)
                    .flex_shrink_0()
                    .rounded_full()
                    .flex()
                    .items_center()
                    .justify_center()
                    .bg(avatar_bg)
                    .child(
                        Icon::new(layout.avatar.icon())
                            .size(AVATAR_ICON_SIZE)
                            .text_color(avatar_fg),
                    ),
            )
            .child(
                v_flex()
                    .max_w(relative(BUBBLE_MAX_WIDTH_FRACTION))
                    .px(BUBBLE_PADDING_X)
                    .py(BUBBLE_PADDING_Y)
                    .gap_1()
                    .rounded_2xl()
                    .bg(bubble_bg)
                    .text_color(bubble_fg)
                    .when(layout.bordered, |bubble| {
                        bubble.border_1().border_color(theme.border)
                    })
                    .child(
                        div()
                            .text_sm()
                            .child(message.content().to_string()),
                    )
                    .child(
                        Label::new(message.time_label())
                            .text_xs()
                            .text_color(meta_fg),
                    ),
            )
            .into_any_element()
    }
}

impl Render for MessageList {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        self.scroll_manager.before_render();

        let rows = self
            .messages
            .iter()
            .map(|message| self.render_message_row(message, cx))
            .collect::<Vec<_>>();

        div()
            .id("message-list")
            .size_full()
            .min_h_0()
            .overflow_y_scroll()
            .track_scroll(self.scroll_manager.handle())
            .child(v_flex().w_full().px_4().py_6().gap_4().children(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_bubbles_sit_right_and_assistant_bubbles_left() {
        assert_eq!(BubbleLayout::for_role(Role::User).side, BubbleSide::Right);
        assert_eq!(
            BubbleLayout::for_role(Role::Assistant).side,
            BubbleSide::Left
        );
    }

    #[test]
    fn avatar_follows_role() {
        assert_eq!(BubbleLayout::for_role(Role::User).avatar, Avatar::User);
        assert_eq!(BubbleLayout::for_role(Role::Assistant).avatar, Avatar::Bot);
    }

    #[test]
    fn only_assistant_bubbles_carry_a_border() {
        assert!(!BubbleLayout::for_role(Role::User).bordered);
        assert!(BubbleLayout::for_role(Role::Assistant).bordered);
    }
}
