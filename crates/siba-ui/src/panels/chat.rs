//! Chat panel — message feed, typing indicator and input box.

use egui::{self, Align, Key, Layout, Modifiers, RichText, ScrollArea, Vec2};
use siba_core::conversation::PendingTurn;
use siba_core::markup::{to_markup, Span};
use siba_types::message::Message;
use crate::state::{enter_action, EnterAction, UiState};
use crate::theme::*;

/// Render the chat panel. Returns the accepted turn when the user submits.
pub fn chat_panel(ui: &mut egui::Ui, state: &mut UiState) -> Option<PendingTurn> {
    let mut submitted = None;

    egui::Frame::default()
        .fill(BG_SURFACE)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                let input_height = INPUT_ROW_HEIGHT * state.max_input_rows() as f32;
                let feed_height = (ui.available_height() - input_height - 24.0).max(80.0);
                let scroll_to_latest = state.take_scroll_request();

                // Message feed
                ScrollArea::vertical()
                    .id_salt("chat_feed")
                    .max_height(feed_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for message in state.conversation.messages() {
                            render_message(ui, message);
                            ui.add_space(6.0);
                        }

                        if state.is_busy() {
                            typing_indicator(ui, &state.typing_label());
                        }

                        if scroll_to_latest {
                            ui.scroll_to_cursor(Some(Align::BOTTOM));
                        }
                    });

                ui.separator();

                // Input area
                ui.horizontal(|ui| {
                    let input_id = ui.make_persistent_id("chat_input");
                    let focused = ui.memory(|m| m.has_focus(input_id));

                    // Must run before the TextEdit so plain Enter never
                    // becomes a newline.
                    let enter_submit = focused && ui.input_mut(take_submit_enter);

                    let rows = state.input_rows();
                    let response = ScrollArea::vertical()
                        .id_salt("chat_input_scroll")
                        .max_height(input_height)
                        .max_width(ui.available_width() - 70.0)
                        .show(ui, |ui| {
                            ui.add(
                                egui::TextEdit::multiline(&mut state.input_text)
                                    .id(input_id)
                                    .hint_text("Ask about admissions, fees, programs...")
                                    .desired_rows(rows)
                                    .desired_width(f32::INFINITY)
                                    .font(egui::FontId::proportional(14.0)),
                            )
                        })
                        .inner;

                    let send_enabled = state.can_submit();
                    let send_btn = ui.add_enabled(
                        send_enabled,
                        egui::Button::new(RichText::new("Send").color(TEXT_ON_ACCENT))
                            .fill(if send_enabled { ACCENT } else { BG_MUTED })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(60.0, 0.0)),
                    );

                    if enter_submit || send_btn.clicked() {
                        // Blank input or a pending reply make this a no-op
                        if let Some(turn) = state.submit() {
                            submitted = Some(turn);
                        }
                        response.request_focus();
                    }
                });
            });
        });

    submitted
}

/// Consume a plain Enter press. Shift is read from the key event itself;
/// a Shift+Enter press is left for the text box.
fn take_submit_enter(input: &mut egui::InputState) -> bool {
    let shift = input.events.iter().find_map(|event| match event {
        egui::Event::Key {
            key: Key::Enter,
            pressed: true,
            modifiers,
            ..
        } => Some(modifiers.shift),
        _ => None,
    });
    match shift.map(enter_action) {
        Some(EnterAction::Submit) => input.consume_key(Modifiers::NONE, Key::Enter),
        _ => false,
    }
}

fn render_message(ui: &mut egui::Ui, message: &Message) {
    let (bg, fg, link, align) = if message.is_user() {
        (USER_BUBBLE, TEXT_ON_ACCENT, LINK_ON_ACCENT, Align::Max)
    } else {
        (ASSISTANT_BUBBLE, TEXT_PRIMARY, LINK, Align::Min)
    };
    let max_width = ui.available_width() * BUBBLE_MAX_WIDTH_RATIO;

    ui.with_layout(Layout::top_down(align), |ui| {
        egui::Frame::default()
            .fill(bg)
            .corner_radius(BUBBLE_ROUNDING)
            .inner_margin(BUBBLE_PADDING)
            .show(ui, |ui| {
                ui.set_max_width(max_width);
                ui.label(RichText::new(message.role.label()).color(fg).strong().small());
                render_text(ui, &message.text, fg, link);
            });
        ui.label(
            RichText::new(&message.timestamp)
                .color(TEXT_SECONDARY)
                .small(),
        );
    });
}

/// One wrapped row per line; URLs become links that open in a new tab.
fn render_text(ui: &mut egui::Ui, text: &str, fg: egui::Color32, link: egui::Color32) {
    for line in to_markup(text) {
        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;
            if line.is_empty() {
                ui.label(" ");
            }
            for span in line {
                match span {
                    Span::Text(t) => {
                        ui.label(RichText::new(t).color(fg));
                    }
                    Span::Link(url) => {
                        ui.add(
                            egui::Hyperlink::from_label_and_url(
                                RichText::new(url).color(link).underline(),
                                url,
                            )
                            .open_in_new_tab(true),
                        );
                    }
                }
            }
        });
    }
}

fn typing_indicator(ui: &mut egui::Ui, label: &str) {
    let time = ui.input(|i| i.time);
    let dots = ".".repeat((time * 3.0) as usize % 3 + 1);

    ui.with_layout(Layout::top_down(Align::Min), |ui| {
        egui::Frame::default()
            .fill(ASSISTANT_BUBBLE)
            .corner_radius(BUBBLE_ROUNDING)
            .inner_margin(BUBBLE_PADDING)
            .show(ui, |ui| {
                ui.label(
                    RichText::new(format!("{}{}", label, dots))
                        .color(TEXT_SECONDARY)
                        .italics(),
                );
            });
    });
}
