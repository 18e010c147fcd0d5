//! Header bar — assistant title, subtitle and online/typing status.

use egui::{self, Align, Layout, RichText};
use siba_types::config::AssistantConfig;
use crate::state::UiState;
use crate::theme::*;

pub fn header_bar(ui: &mut egui::Ui, config: &AssistantConfig, state: &UiState) {
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.label(
                RichText::new(&config.title)
                    .strong()
                    .color(ACCENT)
                    .size(18.0),
            );
            ui.label(
                RichText::new(&config.subtitle)
                    .color(TEXT_SECONDARY)
                    .small(),
            );
        });
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            let status_color = if state.is_busy() { WARNING } else { SUCCESS };
            ui.label(
                RichText::new(&state.status_text)
                    .color(status_color)
                    .small(),
            );
            ui.label(RichText::new("●").color(status_color).small());
        });
    });
}
