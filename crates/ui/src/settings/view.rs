use gpui::*;
use gpui_component::{
    ActiveTheme, Sizable, WindowExt,
    button::{Button, ButtonVariants},
    checkbox::Checkbox,
    h_flex,
    notification::Notification,
    slider::{Slider, SliderEvent, SliderState},
    v_flex,
};
use prosa_conversation::{Preferences, PreferencesDraft, Temperature};

pub const SETTINGS_TITLE: &str = "Configurações";
const SETTINGS_DESCRIPTION: &str = "Personalize sua experiência com o chat assistant";
const SAVED_TITLE: &str = "Configurações salvas";
const SAVED_BODY: &str = "Suas preferências foram atualizadas com sucesso.";

/// Settings dialog body.
///
/// Saved preferences stay inside this panel; nothing else in the window
/// reads them.
pub struct SettingsPanel {
    preferences: PreferencesDraft,
    temperature_slider: Entity<SliderState>,
    _subscriptions: Vec<Subscription>,
}

impl SettingsPanel {
    pub fn new(window: &mut Window, cx: &mut Context<Self>) -> Self {
        let preferences = PreferencesDraft::new(Preferences::default());
        let initial_temperature = preferences.draft().temperature.value();

        let temperature_slider = cx.new(|_| {
            SliderState::new()
                .min(Temperature::MIN)
                .max(Temperature::MAX)
                .step(Temperature::STEP)
                .default_value(initial_temperature)
        });

        let slider_subscription = cx.subscribe_in(
            &temperature_slider,
            window,
            |this, _, event: &SliderEvent, _window, cx| {
                let SliderEvent::Change(value) = event;
                this.preferences.set_temperature(value.start());
                cx.notify();
            },
        );

        Self {
            preferences,
            temperature_slider,
            _subscriptions: vec![slider_subscription],
        }
    }

    /// Starts a fresh draft from the last saved preferences.
    pub fn begin_editing(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.preferences.discard();
        self.sync_slider(window, cx);
        cx.notify();
    }

    fn sync_slider(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let value = self.preferences.draft().temperature.value();
        self.temperature_slider.update(cx, |slider, cx| {
            slider.set_value(value, window, cx);
        });
    }

    fn cancel(&mut self, _event: &ClickEvent, window: &mut Window, cx: &mut Context<Self>) {
        self.preferences.discard();
        self.sync_slider(window, cx);
        window.close_dialog(cx);
        cx.notify();
    }

    fn save(&mut self, _event: &ClickEvent, window: &mut Window, cx: &mut Context<Self>) {
        let saved = self.preferences.commit();
        tracing::info!(
            notifications = saved.notifications,
            sound_effects = saved.sound_effects,
            auto_scroll = saved.auto_scroll,
            temperature = %saved.temperature,
            "settings saved"
        );

        window.push_notification(Notification::success(SAVED_BODY).title(SAVED_TITLE), cx);
        window.close_dialog(cx);
        cx.notify();
    }

    fn render_toggle_row(
        &self,
        label: &'static str,
        description: &'static str,
        checkbox: Checkbox,
        cx: &Context<Self>,
    ) -> impl IntoElement {
        let theme = cx.theme();

        h_flex()
            .w_full()
            .items_center()
            .justify_between()
            .gap_2()
            .child(
                v_flex()
                    .gap_0p5()
                    .child(
                        div()
                            .text_base()
                            .font_weight(FontWeight::MEDIUM)
                            .text_color(theme.foreground)
                            .child(label),
                    )
                    .child(
                        div()
                            .text_sm()
                            .text_color(theme.muted_foreground)
                            .child(description),
                    ),
            )
            .child(checkbox)
    }
}

impl Render for SettingsPanel {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let draft = *self.preferences.draft();

        let notifications = Checkbox::new("settings-notifications")
            .checked(draft.notifications)
            .on_click(cx.listener(|this, checked: &bool, _window, cx| {
                this.preferences.set_notifications(*checked);
                cx.notify();
            }));
        let sound_effects = Checkbox::new("settings-sound-effects")
            .checked(draft.sound_effects)
            .on_click(cx.listener(|this, checked: &bool, _window, cx| {
                this.preferences.set_sound_effects(*checked);
                cx.notify();
            }));
        let auto_scroll = Checkbox::new("settings-auto-scroll")
            .checked(draft.auto_scroll)
            .on_click(cx.listener(|this, checked: &bool, _window, cx| {
                this.preferences.set_auto_scroll(*checked);
                cx.notify();
            }));

        let theme = cx.theme();

        v_flex()
            .id("settings-panel")
            .w_full()
            .gap_6()
            .py_4()
            .child(
                div()
                    .text_sm()
                    .text_color(theme.muted_foreground)
                    .child(SETTINGS_DESCRIPTION),
            )
            .child(self.render_toggle_row(
                "Notificações",
                "Receber notificações de novas mensagens",
                notifications,
                cx,
            ))
            .child(self.render_toggle_row(
                "Efeitos sonoros",
                "Reproduzir sons ao enviar/receber mensagens",
                sound_effects,
                cx,
            ))
            .child(self.render_toggle_row(
                "Rolagem automática",
                "Rolar automaticamente para novas mensagens",
                auto_scroll,
                cx,
            ))
            .child(
                v_flex()
                    .gap_3()
                    .child(
                        v_flex()
                            .gap_0p5()
                            .child(
                                div()
                                    .text_base()
                                    .font_weight(FontWeight::MEDIUM)
                                    .text_color(theme.foreground)
                                    .child("Criatividade da IA"),
                            )
                            .child(
                                div()
                                    .text_sm()
                                    .text_color(theme.muted_foreground)
                                    .child("Ajuste o nível de criatividade das respostas (0.0 - 1.0)"),
                            ),
                    )
                    .child(
                        h_flex()
                            .items_center()
                            .gap_4()
                            .child(
                                div()
                                    .flex_1()
                                    .min_w_0()
                                    .child(Slider::new(&self.temperature_slider)),
                            )
                            .child(
                                div()
                                    .w(px(48.))
                                    .text_sm()
                                    .font_weight(FontWeight::MEDIUM)
                                    .text_center()
                                    .child(draft.temperature.to_string()),
                            ),
                    ),
            )
            .child(
                h_flex()
                    .gap_2()
                    .justify_end()
                    .child(
                        Button::new("settings-cancel")
                            .outline()
                            .small()
                            .child("Cancelar")
                            .on_click(cx.listener(Self::cancel)),
                    )
                    .child(
                        Button::new("settings-save")
                            .primary()
                            .small()
                            .child("Salvar configurações")
                            .on_click(cx.listener(Self::save)),
                    ),
            )
    }
}
