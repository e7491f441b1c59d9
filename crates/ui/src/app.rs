use gpui::*;
use gpui_component::{
    ActiveTheme, IconName, Root, Sizable, WindowExt,
    button::{Button, ButtonVariants},
    h_flex, v_flex,
};

use crate::chat::ChatView;
use crate::settings::{SETTINGS_TITLE, SettingsPanel};

pub const APP_TITLE: &str = "Chat Assistant";
pub const APP_SUBTITLE: &str = "Sempre pronto para ajudar";
const SETTINGS_DIALOG_WIDTH: f32 = 500.0;
const HEADER_AVATAR_SIZE: f32 = 40.0;
#[cfg(target_os = "macos")]
const WINDOW_TOOLBAR_LEFT_SAFE_PADDING: f32 = 78.0;
#[cfg(not(target_os = "macos"))]
const WINDOW_TOOLBAR_LEFT_SAFE_PADDING: f32 = 24.0;

gpui::actions!(shell, [OpenSettings, Quit]);

/// Main window: header, chat view, settings dialog and toast layer.
pub struct ChatAppShell {
    chat_view: Entity<ChatView>,
    settings_panel: Entity<SettingsPanel>,
    title_bar_should_move: bool,
}

impl ChatAppShell {
    pub fn new(window: &mut Window, cx: &mut Context<Self>) -> Self {
        let chat_view = cx.new(|cx| ChatView::new(window, cx));
        let settings_panel = cx.new(|cx| SettingsPanel::new(window, cx));

        Self {
            chat_view,
            settings_panel,
            title_bar_should_move: false,
        }
    }

    /// Opens the settings dialog on a fresh draft.
    fn open_settings(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.settings_panel.update(cx, |panel, cx| {
            panel.begin_editing(window, cx);
        });

        let panel = self.settings_panel.clone();
        window.open_dialog(cx, move |dialog, _, _| {
            dialog
                .title(SETTINGS_TITLE)
                .w(px(SETTINGS_DIALOG_WIDTH))
                .child(panel.clone())
        });
    }
}

impl Render for ChatAppShell {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let dialog_layer = Root::render_dialog_layer(window, cx);
        let notification_layer = Root::render_notification_layer(window, cx);
        let theme = cx.theme();

        div()
            .id("app-shell")
            .size_full()
            .relative()
            .bg(theme.background)
            .on_action(cx.listener(|this, _: &OpenSettings, window, cx| {
                this.open_settings(window, cx);
            }))
            .child(
                v_flex()
                    .size_full()
                    .child(self.render_header(window, cx))
                    .child(
                        v_flex()
                            .id("main-content")
                            .flex_1()
                            .min_w_0()
                            .min_h_0()
                            .overflow_hidden()
                            .child(self.chat_view.clone()),
                    ),
            )
            .children(dialog_layer)
            .children(notification_layer)
    }
}

impl ChatAppShell {
    fn render_header(&self, window: &Window, cx: &Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        h_flex()
            .id("app-header")
            .window_control_area(WindowControlArea::Drag)
            .on_mouse_down_out(cx.listener(|this, _, _window, _cx| {
                this.title_bar_should_move = false;
            }))
            .on_mouse_up(
                MouseButton::Left,
                cx.listener(|this, _, _window, _cx| {
                    this.title_bar_should_move = false;
                }),
            )
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, _, _window, _cx| {
                    this.title_bar_should_move = true;
                }),
            )
            .on_mouse_move(cx.listener(|this, _, window, _cx| {
                if this.title_bar_should_move {
                    this.title_bar_should_move = false;
                    window.start_window_move();
                }
            }))
            .w_full()
            .flex_shrink_0()
            .pl(px(WINDOW_TOOLBAR_LEFT_SAFE_PADDING))
            .pr_6()
            .py_4()
            .items_center()
            .justify_between()
            .bg(theme.secondary)
            .border_b_1()
            .border_color(theme.border)
            .child(
                h_flex()
                    .gap_3()
                    .items_center()
                    .child(
                        div()
                            .size(px(HEADER_AVATAR_SIZE))
                            .rounded_full()
                            .bg(theme.primary)
                            .flex()
                            .items_center()
                            .justify_center()
                            .text_lg()
                            .font_weight(FontWeight::BOLD)
                            .text_color(theme.primary_foreground)
                            .child("AI"),
                    )
                    .child(
                        v_flex()
                            .child(
                                div()
                                    .text_lg()
                                    .font_weight(FontWeight::SEMIBOLD)
                                    .text_color(theme.foreground)
                                    .child(APP_TITLE),
                            )
                            .child(
                                div()
                                    .text_xs()
                                    .text_color(theme.muted_foreground)
                                    .child(APP_SUBTITLE),
                            ),
                    ),
            )
            .child(
                h_flex()
                    .gap_2()
                    .items_center()
                    // Keep header buttons from starting a window drag.
                    .on_mouse_down(MouseButton::Left, |_, _, cx| cx.stop_propagation())
                    .child(
                        Button::new("open-settings")
                            .ghost()
                            .small()
                            .icon(IconName::Settings)
                            .on_click(cx.listener(|this, _, window, cx| {
                                this.open_settings(window, cx);
                            })),
                    )
                    .child(self.render_linux_window_controls(window, cx)),
            )
    }

    fn render_linux_window_controls(&self, window: &Window, cx: &Context<Self>) -> AnyElement {
        #[cfg(target_os = "linux")]
        {
            let maximize_icon = if window.is_maximized() {
                IconName::WindowRestore
            } else {
                IconName::WindowMaximize
            };

            h_flex()
                .id("linux-window-controls")
                .items_center()
                .gap_2()
                .child(
                    Button::new("linux-window-minimize")
                        .ghost()
                        .small()
                        .icon(IconName::WindowMinimize)
                        .on_click(cx.listener(|_, _, window, _| {
                            window.minimize_window();
                        })),
                )
                .child(
                    Button::new("linux-window-maximize")
                        .ghost()
                        .small()
                        .icon(maximize_icon)
                        .on_click(cx.listener(|_, _, window, _| {
                            window.zoom_window();
                        })),
                )
                .child(
                    Button::new("linux-window-close")
                        .ghost()
                        .small()
                        .icon(IconName::WindowClose)
                        .on_click(cx.listener(|_, _, window, _| {
                            window.remove_window();
                        })),
                )
                .into_any_element()
        }

        #[cfg(not(target_os = "linux"))]
        {
            let _ = (window, cx);
            div().into_any_element()
        }
    }
}
