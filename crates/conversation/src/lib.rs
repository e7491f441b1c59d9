#![deny(unsafe_code)]

//! Domain model behind the Prosa chat window.
//!
//! Nothing here knows about GPUI. Timers live in the views; this crate hands
//! out tickets ([`PendingReply`], [`TranscriptionTicket`]) that the views
//! redeem when their timers fire.

/// Draft text and simulated voice capture.
pub mod composer;
pub mod message;
/// Settings dialog draft.
pub mod preferences;
/// Append-only conversation log with scripted replies.
pub mod store;

pub use composer::{
    Composer, RecordingToggle, SIMULATED_TRANSCRIPT, TranscriptionRejection, TranscriptionTicket,
    VoiceCapture,
};
pub use message::{Message, MessageId, Role};
pub use preferences::{Preferences, PreferencesDraft, Temperature};
pub use store::{CANNED_REPLY, Conversation, GREETING, PendingReply, SendRejection};
