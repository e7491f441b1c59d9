pub mod view;

pub use view::{SETTINGS_TITLE, SettingsPanel};
