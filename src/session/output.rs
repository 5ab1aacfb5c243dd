use crate::error::Result;
use std::time::{Duration, Instant};

const COPY_ACK_WINDOW: Duration = Duration::from_secs(2);

/// Display state of one view's result area. Loading, error and success are
/// mutually exclusive; Idle is the untouched form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputState {
    Idle,
    Loading,
    Ready(String),
    Failed(String),
}

/// Result presenter for one view.
///
/// Every submission takes a ticket from [`OutputPanel::begin`]; a completion
/// is applied only while the panel is still loading *and* the ticket matches
/// the current epoch. Clearing the form bumps the epoch, so a response that
/// resolves after a clear is dropped instead of repopulating an empty form.
#[derive(Debug)]
pub struct OutputPanel {
    state: OutputState,
    epoch: u64,
    copied_at: Option<Instant>,
}

impl Default for OutputPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputPanel {
    pub fn new() -> Self {
        Self {
            state: OutputState::Idle,
            epoch: 0,
            copied_at: None,
        }
    }

    pub fn state(&self) -> &OutputState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == OutputState::Loading
    }

    pub fn result(&self) -> Option<&str> {
        match &self.state {
            OutputState::Ready(text) => Some(text),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            OutputState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Enters the loading state, discarding any previous result or error,
    /// and returns the ticket the eventual completion must present.
    pub fn begin(&mut self) -> u64 {
        self.epoch += 1;
        self.state = OutputState::Loading;
        self.copied_at = None;
        self.epoch
    }

    /// Pre-network validation failures render as errors without ever
    /// entering the loading state.
    pub fn fail_validation(&mut self, message: impl Into<String>) {
        self.state = OutputState::Failed(message.into());
    }

    /// Applies a finished generation. Returns false when the outcome was
    /// stale (superseded ticket, or the form was cleared meanwhile).
    pub fn complete(&mut self, ticket: u64, outcome: Result<String>) -> bool {
        if ticket != self.epoch || self.state != OutputState::Loading {
            log::debug!("Dropping stale generation outcome (ticket {})", ticket);
            return false;
        }
        self.state = match outcome {
            Ok(text) => OutputState::Ready(text),
            Err(error) => OutputState::Failed(error.to_string()),
        };
        true
    }

    /// Back to Idle; any in-flight submission becomes stale.
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.state = OutputState::Idle;
        self.copied_at = None;
    }

    pub fn mark_copied(&mut self) {
        self.copied_at = Some(Instant::now());
    }

    /// True while the copy acknowledgment should still be shown; reverts by
    /// itself after the window passes.
    pub fn copied_recently(&self) -> bool {
        self.copied_at
            .map(|at| at.elapsed() < COPY_ACK_WINDOW)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PromptError;

    #[test]
    fn begin_clears_previous_result_and_error() {
        let mut panel = OutputPanel::new();
        panel.fail_validation("请上传一张参考图片。");
        assert_eq!(panel.error(), Some("请上传一张参考图片。"));

        let ticket = panel.begin();
        assert!(panel.is_loading());
        assert!(panel.error().is_none());
        assert!(panel.result().is_none());

        assert!(panel.complete(ticket, Ok("提示词".into())));
        assert_eq!(panel.result(), Some("提示词"));

        // A new submission hides the old result while loading.
        panel.begin();
        assert!(panel.result().is_none());
        assert!(panel.is_loading());
    }

    #[test]
    fn failed_generation_ends_in_error_state() {
        let mut panel = OutputPanel::new();
        let ticket = panel.begin();
        assert!(panel.complete(ticket, Err(PromptError::Service("connection refused".into()))));
        assert!(!panel.is_loading());
        assert!(panel.result().is_none());
        assert!(panel.error().unwrap().contains("connection refused"));
    }

    #[test]
    fn stale_outcomes_are_dropped_after_reset() {
        let mut panel = OutputPanel::new();
        let ticket = panel.begin();
        panel.reset();

        assert!(!panel.complete(ticket, Ok("late".into())));
        assert_eq!(*panel.state(), OutputState::Idle);
    }

    #[test]
    fn superseded_tickets_are_dropped() {
        let mut panel = OutputPanel::new();
        let first = panel.begin();
        let second = panel.begin();

        assert!(!panel.complete(first, Ok("old".into())));
        assert!(panel.is_loading());
        assert!(panel.complete(second, Ok("new".into())));
        assert_eq!(panel.result(), Some("new"));
    }

    #[test]
    fn validation_failure_never_touches_loading() {
        let mut panel = OutputPanel::new();
        panel.fail_validation("请描述您的视频故事。");
        assert!(!panel.is_loading());
        assert!(panel.error().is_some());
    }

    #[test]
    fn copy_acknowledgment_does_not_alter_the_result() {
        let mut panel = OutputPanel::new();
        let ticket = panel.begin();
        assert!(panel.complete(ticket, Ok("提示词".into())));

        assert!(!panel.copied_recently());
        panel.mark_copied();
        assert!(panel.copied_recently());
        assert_eq!(panel.result(), Some("提示词"));
    }
}
