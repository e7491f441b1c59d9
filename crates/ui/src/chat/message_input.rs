use std::time::Duration;

use gpui::prelude::FluentBuilder as _;
use gpui::*;
use gpui_component::{
    ActiveTheme, IconName, Sizable, WindowExt,
    button::{Button, ButtonVariants},
    h_flex,
    input::{Input, InputEvent, InputState},
    label::Label,
    notification::Notification,
    v_flex,
};
use prosa_conversation::{Composer, RecordingToggle, SIMULATED_TRANSCRIPT, TranscriptionTicket};

use crate::chat::events::Submit;
use crate::config::AppConfig;

const RECORDING_STARTED_TITLE: &str = "Gravação iniciada";
const RECORDING_STARTED_BODY: &str = "Fale agora. Clique novamente para parar.";
const RECORDING_STOPPED_TITLE: &str = "Gravação finalizada";
const RECORDING_STOPPED_BODY: &str = "Processando sua mensagem...";

pub struct MessageInput {
    input_state: Entity<InputState>,
    composer: Composer,
    transcription_delay: Duration,
    transcription_task: Option<Task<()>>,
    pending_newline: bool,
}

impl EventEmitter<Submit> for MessageInput {}

impl MessageInput {
    pub fn new(window: &mut Window, cx: &mut Context<Self>) -> Self {
        let input_state = cx.new(|cx| {
            InputState::new(window, cx)
                .placeholder("Digite sua mensagem...")
                .auto_grow(1, 6)
        });

        cx.subscribe_in(
            &input_state,
            window,
            |this, _, event: &InputEvent, window, cx| {
                this.sync_draft(cx);

                if let InputEvent::PressEnter { secondary } = event {
                    if *secondary {
                        this.pending_newline = false;
                        return;
                    }

                    if this.pending_newline {
                        // Shift+Enter inserts a newline manually and then still emits PressEnter.
                        // Consume that synthetic enter so it never triggers submit.
                        this.pending_newline = false;
                    } else {
                        this.trim_trailing_newline(window, cx);
                        this.handle_submit(window, cx);
                    }
                }
            },
        )
        .detach();

        Self {
            input_state,
            composer: Composer::new(),
            transcription_delay: AppConfig::current(cx).transcription_delay(),
            transcription_task: None,
            pending_newline: false,
        }
    }

    /// Pulls the editor's text into the composer so later edits are noticed.
    fn sync_draft(&mut self, cx: &mut Context<Self>) {
        let value = self.input_state.read(cx).value().to_string();
        if self.composer.edit(value) {
            cx.notify();
        }
    }

    fn write_draft(&mut self, text: &str, window: &mut Window, cx: &mut Context<Self>) {
        self.input_state.update(cx, |state, cx| {
            state.set_value(text.to_string(), window, cx);
        });
        // Programmatic writes must not look like user edits to the composer.
        self.composer.edit(text);
        cx.notify();
    }

    fn handle_shift_enter(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.pending_newline = true;
        self.input_state.update(cx, |state, cx| {
            state.insert("\n", window, cx);
        });
        self.sync_draft(cx);
    }

    fn trim_trailing_newline(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let value = self.input_state.read(cx).value().to_string();
        if let Some(trimmed) = value.strip_suffix('\n') {
            self.write_draft(trimmed, window, cx);
        }
    }

    fn handle_submit(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.sync_draft(cx);

        match self.composer.take_submission() {
            Ok(content) => {
                cx.emit(Submit::new(content));
                self.write_draft("", window, cx);
                self.pending_newline = false;
            }
            Err(rejection) => {
                tracing::debug!("submit ignored: {rejection}");
            }
        }
    }

    fn toggle_recording(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.sync_draft(cx);

        match self.composer.toggle_recording() {
            RecordingToggle::Started => {
                // A new recording replaces whatever transcription was still pending.
                self.transcription_task = None;
                tracing::info!("simulated voice capture started");
                window.push_notification(
                    Notification::info(RECORDING_STARTED_BODY).title(RECORDING_STARTED_TITLE),
                    cx,
                );
            }
            RecordingToggle::Stopped(ticket) => {
                tracing::info!(
                    transcription = ticket.sequence(),
                    "simulated voice capture stopped"
                );
                window.push_notification(
                    Notification::info(RECORDING_STOPPED_BODY).title(RECORDING_STOPPED_TITLE),
                    cx,
                );
                self.schedule_transcription(ticket, window, cx);
            }
        }

        cx.notify();
    }

    fn schedule_transcription(
        &mut self,
        ticket: TranscriptionTicket,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let delay = self.transcription_delay;

        self.transcription_task = Some(cx.spawn_in(window, async move |this, cx| {
            cx.background_executor().timer(delay).await;

            let _ = this.update_in(cx, |this, window, cx| {
                this.finish_transcription(ticket, window, cx);
            });
        }));
    }

    fn finish_transcription(
        &mut self,
        ticket: TranscriptionTicket,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.sync_draft(cx);
        self.transcription_task = None;

        match self
            .composer
            .complete_transcription(ticket, SIMULATED_TRANSCRIPT)
        {
            Ok(()) => {
                let transcript = self.composer.text().to_string();
                self.write_draft(&transcript, window, cx);
            }
            Err(rejection) => {
                tracing::debug!("transcription dropped: {rejection}");
                cx.notify();
            }
        }
    }
}

impl Render for MessageInput {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let is_recording = self.composer.is_recording();
        let can_submit = self.composer.can_submit();

        let record = Button::new("record")
            .small()
            .when(is_recording, |button| {
                button.danger().icon(IconName::CircleX).child("Parar")
            })
            .when(!is_recording, |button| {
                button.ghost().icon(IconName::Circle).child("Voz")
            })
            .on_click(cx.listener(|this, _, window, cx| {
                this.toggle_recording(window, cx);
            }));

        let send = Button::new("send")
            .small()
            .primary()
            .icon(IconName::ArrowUp)
            .child("Enviar")
            .disabled(!can_submit)
            .on_click(cx.listener(|this, _, window, cx| {
                this.handle_submit(window, cx);
            }));

        v_flex()
            .bg(theme.background)
            .gap_2()
            .p_4()
            .when(is_recording, |column| {
                column.child(
                    h_flex()
                        .id("recording-indicator")
                        .gap_2()
                        .items_center()
                        .child(div().size(px(8.)).rounded_full().bg(theme.danger))
                        .child(
                            Label::new("Gravando...")
                                .text_xs()
                                .text_color(theme.danger),
                        ),
                )
            })
            .child(
                h_flex()
                    .w_full()
                    .items_end()
                    .gap_2()
                    .child(
                        div()
                            .flex_1()
                            .min_w_0()
                            .px_3()
                            .py_2()
                            .rounded_lg()
                            .border_1()
                            .border_color(theme.border)
                            .bg(theme.background)
                            .on_key_down(cx.listener(
                                |this, event: &KeyDownEvent, window, cx| {
                                    if event.keystroke.key == "enter"
                                        && event.keystroke.modifiers.shift
                                    {
                                        this.handle_shift_enter(window, cx);
                                    }
                                },
                            ))
                            .child(Input::new(&self.input_state).w_full()),
                    )
                    .child(record)
                    .child(send),
            )
    }
}
