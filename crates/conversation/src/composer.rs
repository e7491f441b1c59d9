use snafu::Snafu;

use crate::store::SendRejection;

/// Text written into the draft when a simulated recording finishes.
pub const SIMULATED_TRANSCRIPT: &str = "Esta é uma mensagem de voz simulada.";

/// Identifies one in-flight simulated transcription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TranscriptionTicket {
    sequence: u64,
}

impl TranscriptionTicket {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// Lifecycle of the simulated voice capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VoiceCapture {
    #[default]
    Idle,
    Recording,
    Transcribing(TranscriptionTicket),
}

/// Outcome of pressing the record control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingToggle {
    Started,
    Stopped(TranscriptionTicket),
}

/// Rejection reason for a transcription that arrived too late to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Snafu)]
pub enum TranscriptionRejection {
    #[snafu(display("transcription {sequence} is no longer pending"))]
    Superseded { sequence: u64 },
    #[snafu(display("draft was edited after recording {sequence} started"))]
    DraftEdited { sequence: u64 },
}

/// Draft text plus the voice capture attached to it.
#[derive(Debug, Clone, Default)]
pub struct Composer {
    text: String,
    /// Draft as it was when the current recording started.
    baseline: Option<String>,
    capture: VoiceCapture,
    next_transcription: u64,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn capture(&self) -> VoiceCapture {
        self.capture
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.capture, VoiceCapture::Recording)
    }

    pub fn is_transcribing(&self) -> bool {
        matches!(self.capture, VoiceCapture::Transcribing(_))
    }

    /// True when the draft would be accepted by a send.
    pub fn can_submit(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Records the editor's current text. Returns whether anything changed.
    pub fn edit(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.text {
            return false;
        }

        self.text = text;
        true
    }

    /// Takes the draft for sending and clears it.
    pub fn take_submission(&mut self) -> Result<String, SendRejection> {
        if !self.can_submit() {
            return Err(SendRejection::EmptyContent);
        }

        Ok(std::mem::take(&mut self.text))
    }

    pub fn toggle_recording(&mut self) -> RecordingToggle {
        match self.capture {
            VoiceCapture::Recording => {
                let ticket = TranscriptionTicket {
                    sequence: self.next_transcription,
                };
                self.next_transcription = self.next_transcription.wrapping_add(1);
                self.capture = VoiceCapture::Transcribing(ticket);
                RecordingToggle::Stopped(ticket)
            }
            VoiceCapture::Idle | VoiceCapture::Transcribing(_) => {
                self.capture = VoiceCapture::Recording;
                self.baseline = Some(self.text.clone());
                RecordingToggle::Started
            }
        }
    }

    /// Writes `transcript` into the draft if `ticket` is still current and
    /// the draft reads the same as when its recording started.
    pub fn complete_transcription(
        &mut self,
        ticket: TranscriptionTicket,
        transcript: &str,
    ) -> Result<(), TranscriptionRejection> {
        if self.capture != VoiceCapture::Transcribing(ticket) {
            return Err(TranscriptionRejection::Superseded {
                sequence: ticket.sequence,
            });
        }

        self.capture = VoiceCapture::Idle;
        if self.baseline.take().as_deref() != Some(self.text.as_str()) {
            return Err(TranscriptionRejection::DraftEdited {
                sequence: ticket.sequence,
            });
        }

        self.text = transcript.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop_recording(composer: &mut Composer) -> TranscriptionTicket {
        assert_eq!(composer.toggle_recording(), RecordingToggle::Started);
        match composer.toggle_recording() {
            RecordingToggle::Stopped(ticket) => ticket,
            RecordingToggle::Started => panic!("second toggle must stop the recording"),
        }
    }

    #[test]
    fn submission_clears_draft() {
        let mut composer = Composer::new();
        composer.edit("olá");

        assert_eq!(composer.take_submission().as_deref(), Ok("olá"));
        assert_eq!(composer.text(), "");
        assert!(!composer.can_submit());
    }

    #[test]
    fn blank_submission_keeps_draft() {
        let mut composer = Composer::new();
        composer.edit("  \n ");

        assert_eq!(composer.take_submission(), Err(SendRejection::EmptyContent));
        assert_eq!(composer.text(), "  \n ");
    }

    #[test]
    fn transcription_replaces_untouched_draft() {
        let mut composer = Composer::new();
        composer.edit("rascunho");
        let ticket = stop_recording(&mut composer);
        assert!(composer.is_transcribing());

        composer
            .complete_transcription(ticket, SIMULATED_TRANSCRIPT)
            .expect("draft untouched");

        assert_eq!(composer.text(), SIMULATED_TRANSCRIPT);
        assert_eq!(composer.capture(), VoiceCapture::Idle);
    }

    #[test]
    fn transcription_is_dropped_after_user_edit() {
        let mut composer = Composer::new();
        let ticket = stop_recording(&mut composer);
        composer.edit("digitado à mão");

        assert_eq!(
            composer.complete_transcription(ticket, SIMULATED_TRANSCRIPT),
            Err(TranscriptionRejection::DraftEdited {
                sequence: ticket.sequence()
            })
        );
        assert_eq!(composer.text(), "digitado à mão");
        assert_eq!(composer.capture(), VoiceCapture::Idle);
    }

    #[test]
    fn unchanged_edit_does_not_count_as_user_edit() {
        let mut composer = Composer::new();
        composer.edit("mesmo texto");
        let ticket = stop_recording(&mut composer);

        assert!(!composer.edit("mesmo texto"));
        assert!(
            composer
                .complete_transcription(ticket, SIMULATED_TRANSCRIPT)
                .is_ok()
        );
    }

    #[test]
    fn typing_during_recording_keeps_typed_text() {
        let mut composer = Composer::new();
        assert_eq!(composer.toggle_recording(), RecordingToggle::Started);
        composer.edit("digitado durante a gravação");
        let RecordingToggle::Stopped(ticket) = composer.toggle_recording() else {
            panic!("second toggle must stop the recording");
        };

        assert_eq!(
            composer.complete_transcription(ticket, SIMULATED_TRANSCRIPT),
            Err(TranscriptionRejection::DraftEdited {
                sequence: ticket.sequence()
            })
        );
        assert_eq!(composer.text(), "digitado durante a gravação");
        assert_eq!(composer.capture(), VoiceCapture::Idle);
    }

    #[test]
    fn edit_that_restores_the_draft_keeps_transcription() {
        let mut composer = Composer::new();
        let ticket = stop_recording(&mut composer);
        // Enter on a blank draft inserts a newline that is trimmed right back.
        composer.edit("\n");
        composer.edit("");

        assert!(
            composer
                .complete_transcription(ticket, SIMULATED_TRANSCRIPT)
                .is_ok()
        );
        assert_eq!(composer.text(), SIMULATED_TRANSCRIPT);
    }

    #[test]
    fn restarting_recording_supersedes_pending_transcription() {
        let mut composer = Composer::new();
        let stale = stop_recording(&mut composer);
        let fresh = stop_recording(&mut composer);

        assert_eq!(
            composer.complete_transcription(stale, SIMULATED_TRANSCRIPT),
            Err(TranscriptionRejection::Superseded {
                sequence: stale.sequence()
            })
        );
        assert!(composer.is_transcribing());
        assert!(
            composer
                .complete_transcription(fresh, SIMULATED_TRANSCRIPT)
                .is_ok()
        );
    }
}
