//! UI-level state that drives rendering.
//! Owns the conversation and the input box, and applies responder events
//! drained from the EventBus each frame.

use siba_core::conversation::{Conversation, PendingTurn};
use siba_types::config::AssistantConfig;
use siba_types::event::ChatEvent;
use siba_types::message::Role;

const STATUS_ONLINE: &str = "Online";
const STATUS_TYPING: &str = "Typing...";

/// State visible to UI panels
pub struct UiState {
    pub conversation: Conversation,
    /// Input field content
    pub input_text: String,
    /// Status line text
    pub status_text: String,
    /// Delay announced for the pending reply, if any
    pub typing_delay_ms: Option<u32>,
    max_input_rows: usize,
    scroll_pending: bool,
}

/// What a press of Enter in the input box means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnterAction {
    Submit,
    Newline,
}

/// Plain Enter submits; Shift+Enter inserts a line break.
pub fn enter_action(shift: bool) -> EnterAction {
    if shift {
        EnterAction::Newline
    } else {
        EnterAction::Submit
    }
}

impl UiState {
    pub fn new(config: &AssistantConfig) -> Self {
        Self {
            conversation: Conversation::with_greeting(config.greeting.as_deref()),
            input_text: String::new(),
            status_text: STATUS_ONLINE.to_string(),
            typing_delay_ms: None,
            max_input_rows: config.max_input_rows.max(1),
            scroll_pending: true,
        }
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<ChatEvent>) {
        for event in events {
            match event {
                ChatEvent::TypingStarted { delay_ms, .. } => {
                    self.typing_delay_ms = Some(delay_ms);
                }
                ChatEvent::ReplyReady { turn_id, text } => {
                    if self.conversation.complete(turn_id, text).is_some() {
                        self.typing_delay_ms = None;
                        self.status_text = STATUS_ONLINE.to_string();
                        self.scroll_pending = true;
                    }
                }
            }
        }
    }

    /// Submit affordance: non-blank input and no reply pending
    pub fn can_submit(&self) -> bool {
        self.conversation.can_submit(&self.input_text)
    }

    /// Submit the input box. On acceptance the box is cleared and the
    /// returned turn must be handed to the responder; otherwise nothing
    /// changes.
    pub fn submit(&mut self) -> Option<PendingTurn> {
        let turn = self.conversation.submit(&self.input_text)?;
        self.input_text.clear();
        self.status_text = STATUS_TYPING.to_string();
        self.scroll_pending = true;
        Some(turn)
    }

    pub fn is_busy(&self) -> bool {
        self.conversation.is_waiting()
    }

    /// Rows the input box should occupy: one per line of content, capped.
    pub fn input_rows(&self) -> usize {
        self.input_text
            .split('\n')
            .count()
            .clamp(1, self.max_input_rows)
    }

    /// Typing indicator text, with the announced delay once it is known,
    /// e.g. "SIBA Assistant is typing (1.2s)".
    pub fn typing_label(&self) -> String {
        let who = Role::Assistant.label();
        match self.typing_delay_ms {
            Some(ms) => format!("{} is typing ({:.1}s)", who, f64::from(ms) / 1000.0),
            None => format!("{} is typing", who),
        }
    }

    pub fn max_input_rows(&self) -> usize {
        self.max_input_rows
    }

    /// True once after every change to the feed; the chat panel scrolls
    /// to the newest entry when it sees it.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_pending)
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(&AssistantConfig::default())
    }
}
