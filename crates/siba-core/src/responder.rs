//! Responder — the deferred half of a turn.
//!
//! One call to [`Responder::respond`] per accepted submission:
//! 1. Pick a typing delay from the configured range
//! 2. Sleep for it
//! 3. Resolve the reply and publish it on the event bus
//!
//! It must be spawned via `wasm_bindgen_futures::spawn_local` in the
//! browser. There is no cancellation; a spawned turn always publishes.

use siba_types::config::DelayRange;
use siba_types::event::ChatEvent;

use crate::conversation::PendingTurn;
use crate::event_bus::EventBus;
use crate::ports::{DelayPort, EntropyPort};
use crate::resolver::RuleTable;

pub struct Responder {
    table: RuleTable,
    typing_delay: DelayRange,
    event_bus: EventBus,
}

impl Responder {
    pub fn new(table: RuleTable, typing_delay: DelayRange, event_bus: EventBus) -> Self {
        Self {
            table,
            typing_delay,
            event_bus,
        }
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    pub fn typing_delay(&self, entropy: &dyn EntropyPort) -> u32 {
        self.typing_delay.sample(entropy.next_unit())
    }

    pub async fn respond(
        &self,
        turn: PendingTurn,
        delay: &dyn DelayPort,
        entropy: &dyn EntropyPort,
    ) -> String {
        let delay_ms = self.typing_delay(entropy);
        self.event_bus.emit(ChatEvent::TypingStarted {
            turn_id: turn.turn_id,
            delay_ms,
        });

        delay.sleep(delay_ms).await;

        let text = match self.table.find(&turn.input) {
            Some(rule) => {
                log::debug!("turn {} matched rule '{}'", turn.turn_id, rule.name);
                rule.reply.clone()
            }
            None => {
                log::debug!("turn {} fell back to default reply", turn.turn_id);
                self.table.fallback().to_string()
            }
        };

        self.event_bus.emit(ChatEvent::ReplyReady {
            turn_id: turn.turn_id,
            text: text.clone(),
        });
        text
    }
}
