use std::fmt;

const TENTHS_MAX: u8 = 10;
const DEFAULT_TENTHS: u8 = 7;

/// Reply creativity in `[0.0, 1.0]`, snapped to `0.1` steps.
///
/// Stored as whole tenths so off-range and off-step values cannot exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Temperature(u8);

impl Temperature {
    pub const MIN: f32 = 0.0;
    pub const MAX: f32 = 1.0;
    pub const STEP: f32 = 0.1;

    /// Clamps `value` to the range and rounds to the nearest step.
    pub fn from_value(value: f32) -> Self {
        if value.is_nan() {
            return Self::default();
        }

        let tenths = (value.clamp(Self::MIN, Self::MAX) * 10.0).round() as u8;
        Self(tenths.min(TENTHS_MAX))
    }

    pub fn tenths(self) -> u8 {
        self.0
    }

    pub fn value(self) -> f32 {
        f32::from(self.0) / 10.0
    }
}

impl Default for Temperature {
    fn default() -> Self {
        Self(DEFAULT_TENTHS)
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    pub notifications: bool,
    pub sound_effects: bool,
    pub auto_scroll: bool,
    pub temperature: Temperature,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            notifications: true,
            sound_effects: false,
            auto_scroll: true,
            temperature: Temperature::default(),
        }
    }
}

/// Saved preferences plus the copy being edited in the settings dialog.
#[derive(Debug, Clone, Default)]
pub struct PreferencesDraft {
    saved: Preferences,
    draft: Preferences,
}

impl PreferencesDraft {
    pub fn new(saved: Preferences) -> Self {
        Self {
            saved,
            draft: saved,
        }
    }

    pub fn saved(&self) -> &Preferences {
        &self.saved
    }

    pub fn draft(&self) -> &Preferences {
        &self.draft
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != self.saved
    }

    pub fn set_notifications(&mut self, enabled: bool) {
        self.draft.notifications = enabled;
    }

    pub fn set_sound_effects(&mut self, enabled: bool) {
        self.draft.sound_effects = enabled;
    }

    pub fn set_auto_scroll(&mut self, enabled: bool) {
        self.draft.auto_scroll = enabled;
    }

    pub fn set_temperature(&mut self, value: f32) -> Temperature {
        self.draft.temperature = Temperature::from_value(value);
        self.draft.temperature
    }

    /// Drops unsaved edits.
    pub fn discard(&mut self) {
        self.draft = self.saved;
    }

    pub fn commit(&mut self) -> Preferences {
        self.saved = self.draft;
        self.saved
    }
}
