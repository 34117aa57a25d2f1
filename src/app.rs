// src/app.rs

use crate::conversation::{Conversation, Sender};
use crate::status_indicator::StatusIndicator;

/// Explicit guard for the reply fetch. At most one request is in flight per
/// screen; while `Pending`, the submit path is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Pending,
}

/// Per-screen transient state: the conversation, the input buffer, the
/// fetch flag and scroll position. Owned by the event loop and dropped with
/// it; nothing here outlives the screen.
pub struct App {
    pub conversation: Conversation,
    pub input: String,
    pub fetch_state: FetchState,
    pub scroll: u16,
    pub stick_to_bottom: bool,
    pub status_indicator: StatusIndicator,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> App {
        App {
            conversation: Conversation::new(),
            input: String::new(),
            fetch_state: FetchState::Idle,
            scroll: 0,
            stick_to_bottom: true,
            status_indicator: StatusIndicator::new(),
            should_quit: false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.fetch_state == FetchState::Pending
    }

    /// The single guarded entry point for a submission. Blank input and an
    /// in-flight fetch both leave the app untouched and return `None`.
    /// Otherwise the user message is appended, the input cleared, the fetch
    /// flag set, and the submitted text handed back for the caller to spawn
    /// the fetch with.
    pub fn submit(&mut self) -> Option<String> {
        if self.is_pending() {
            return None;
        }
        let text = self.input.trim();
        if text.is_empty() {
            return None;
        }
        let text = text.to_string();

        self.conversation.push(text.clone(), Sender::User);
        self.input.clear();
        self.fetch_state = FetchState::Pending;
        self.status_indicator.set_thinking(true);
        self.stick_to_bottom = true;
        Some(text)
    }

    /// Resolves the in-flight fetch with its reply text (real or the fixed
    /// error string) and returns to idle. Called exactly once per spawned
    /// fetch, always from the UI loop.
    pub fn resolve_reply(&mut self, text: String) {
        self.conversation.push(text, Sender::Bot);
        self.fetch_state = FetchState::Idle;
        self.status_indicator.set_thinking(false);
        self.stick_to_bottom = true;
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    pub fn scroll_up(&mut self) {
        self.stick_to_bottom = false;
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        // The view clamps to the last line and re-enables stickiness there.
        self.scroll = self.scroll.saturating_add(1);
    }
}

impl Default for App {
    fn default() -> Self {
        App::new()
    }
}
