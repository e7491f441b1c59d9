#![deny(unsafe_code)]

/// Prosa desktop chat window.
///
/// Views are built with GPUI and gpui-component; conversation state lives in
/// `prosa-conversation`.
pub mod app;
/// Message list, input bar and the view that wires them to the conversation.
pub mod chat;
pub mod config;
/// Settings dialog.
pub mod settings;
