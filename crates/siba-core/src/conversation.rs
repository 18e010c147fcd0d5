//! Conversation state machine.
//!
//! Two states: `Idle` accepts a submission, `Waiting` holds exactly one
//! pending turn. Submissions while waiting, or with blank input, are
//! silently dropped. The message list is append-only.

use siba_types::message::{Message, MessageId};
use siba_types::session::SessionInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    Idle,
    Waiting { turn_id: u64 },
}

/// A submission accepted by the conversation, waiting for its reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTurn {
    pub turn_id: u64,
    pub input: String,
}

pub struct Conversation {
    session: SessionInfo,
    messages: Vec<Message>,
    state: ChatState,
    next_id: u64,
    turn_counter: u64,
}

impl Conversation {
    pub fn new() -> Self {
        let session = SessionInfo::new();
        log::info!("Conversation {} started", session.short_id());
        Self {
            session,
            messages: Vec::new(),
            state: ChatState::Idle,
            next_id: 0,
            turn_counter: 0,
        }
    }

    /// Start a conversation that opens with an assistant greeting.
    pub fn with_greeting(greeting: Option<&str>) -> Self {
        let mut conversation = Self::new();
        if let Some(text) = greeting.filter(|t| !t.trim().is_empty()) {
            let id = conversation.allocate_id();
            conversation.messages.push(Message::assistant(id, text));
        }
        conversation
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    pub fn is_waiting(&self) -> bool {
        matches!(self.state, ChatState::Waiting { .. })
    }

    pub fn session(&self) -> &SessionInfo {
        &self.session
    }

    /// Whether `input` would be accepted right now.
    pub fn can_submit(&self, input: &str) -> bool {
        !input.trim().is_empty() && !self.is_waiting()
    }

    /// Append the user's message and enter `Waiting`.
    ///
    /// Returns `None` (and changes nothing) for blank input or while a
    /// reply is still pending.
    pub fn submit(&mut self, input: &str) -> Option<PendingTurn> {
        if !self.can_submit(input) {
            return None;
        }
        let text = input.trim().to_string();
        let id = self.allocate_id();
        self.messages.push(Message::user(id, text.clone()));

        self.turn_counter += 1;
        let turn_id = self.turn_counter;
        self.state = ChatState::Waiting { turn_id };
        log::debug!(
            "[{}] turn {} accepted ({} chars)",
            self.session.short_id(),
            turn_id,
            text.len()
        );
        Some(PendingTurn { turn_id, input: text })
    }

    /// Append the assistant's reply for the pending turn and return to `Idle`.
    ///
    /// A reply for any other turn (or while idle) is ignored.
    pub fn complete(&mut self, turn_id: u64, reply: impl Into<String>) -> Option<&Message> {
        match self.state {
            ChatState::Waiting { turn_id: pending } if pending == turn_id => {
                let id = self.allocate_id();
                self.messages.push(Message::assistant(id, reply));
                self.state = ChatState::Idle;
                log::debug!("[{}] turn {} answered", self.session.short_id(), turn_id);
                self.messages.last()
            }
            _ => {
                log::warn!(
                    "[{}] dropping reply for turn {} (state {:?})",
                    self.session.short_id(),
                    turn_id,
                    self.state
                );
                None
            }
        }
    }

    fn allocate_id(&mut self) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
