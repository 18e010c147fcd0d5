use serde::{Deserialize, Serialize};

/// Events emitted by the responder.
/// The UI drains these every frame and applies them to the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatEvent {
    /// The typing delay for a turn has started
    TypingStarted { turn_id: u64, delay_ms: u32 },

    /// The resolver produced the reply for a turn
    ReplyReady { turn_id: u64, text: String },
}

impl ChatEvent {
    pub fn turn_id(&self) -> u64 {
        match self {
            ChatEvent::TypingStarted { turn_id, .. } | ChatEvent::ReplyReady { turn_id, .. } => {
                *turn_id
            }
        }
    }
}
