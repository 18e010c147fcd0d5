//! Main egui application — composes the panels and runs reply turns.

use std::rc::Rc;

use egui::{self, CentralPanel, TopBottomPanel};

use siba_core::conversation::PendingTurn;
use siba_core::event_bus::EventBus;
use siba_core::ports::{DelayPort, EntropyPort};
use siba_core::responder::Responder;
use siba_core::startup::{load_config, load_rule_table};
use siba_platform::{MathRandom, TimeoutDelay};
use siba_types::config::AssistantConfig;
use siba_ui::panels::{chat, header};
use siba_ui::state::UiState;
use siba_ui::theme;

/// Host page elements that may carry JSON overrides
const CONFIG_ELEMENT_ID: &str = "siba_config";
const RULES_ELEMENT_ID: &str = "siba_rules";

/// The main application state
pub struct SibaApp {
    ui_state: UiState,
    config: AssistantConfig,
    event_bus: EventBus,
    responder: Rc<Responder>,
    delay: Rc<dyn DelayPort>,
    entropy: Rc<dyn EntropyPort>,
    first_frame: bool,
}

impl SibaApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = load_config(embedded_json(CONFIG_ELEMENT_ID).as_deref());
        let table = load_rule_table(embedded_json(RULES_ELEMENT_ID).as_deref());
        let event_bus = EventBus::new();
        let responder = Responder::new(table, config.typing_delay, event_bus.clone());
        log::info!(
            "Loaded {} reply rules, typing delay {}-{}ms",
            responder.table().rules().len(),
            config.typing_delay.min_ms,
            config.typing_delay.max_ms
        );

        Self {
            ui_state: UiState::new(&config),
            config,
            event_bus,
            responder: Rc::new(responder),
            delay: Rc::new(TimeoutDelay::new()),
            entropy: Rc::new(MathRandom::new()),
            first_frame: true,
        }
    }
}

impl eframe::App for SibaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.first_frame = false;
        }

        // Drain events from the responder
        if self.event_bus.has_pending() {
            let events = self.event_bus.drain();
            self.ui_state.process_events(events);
            ctx.request_repaint();
        }

        // Keeps the typing indicator animated
        if self.ui_state.is_busy() {
            ctx.request_repaint();
        }

        // ── Header ───────────────────────────────────────────
        TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(4.0);
            header::header_bar(ui, &self.config, &self.ui_state);
            ui.add_space(4.0);
        });

        // ── Chat ─────────────────────────────────────────────
        let submitted = CentralPanel::default()
            .show(ctx, |ui| chat::chat_panel(ui, &mut self.ui_state))
            .inner;
        if let Some(turn) = submitted {
            self.dispatch_turn(turn, ctx);
        }
    }
}

/// Text of a `<script type="application/json">` element on the host page
fn embedded_json(id: &str) -> Option<String> {
    gloo_utils::document()
        .get_element_by_id(id)
        .and_then(|element| element.text_content())
}

impl SibaApp {
    /// Run the delayed reply for an accepted turn (async)
    fn dispatch_turn(&self, turn: PendingTurn, ctx: &egui::Context) {
        let responder = self.responder.clone();
        let delay = self.delay.clone();
        let entropy = self.entropy.clone();
        let ctx = ctx.clone();

        log::debug!("Dispatching turn {}", turn.turn_id);
        wasm_bindgen_futures::spawn_local(async move {
            responder
                .respond(turn, delay.as_ref(), entropy.as_ref())
                .await;
            ctx.request_repaint();
        });
    }
}
