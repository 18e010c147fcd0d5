//! UI theme constants

use egui::{Color32, CornerRadius, Stroke, Vec2};

pub const BG_PRIMARY: Color32 = Color32::from_rgb(249, 250, 251);
pub const BG_SURFACE: Color32 = Color32::from_rgb(255, 255, 255);
pub const BG_MUTED: Color32 = Color32::from_rgb(229, 231, 235);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(17, 24, 39);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(107, 114, 128);
pub const TEXT_ON_ACCENT: Color32 = Color32::from_rgb(255, 255, 255);
pub const ACCENT: Color32 = Color32::from_rgb(37, 99, 235);
pub const ACCENT_DARK: Color32 = Color32::from_rgb(29, 78, 216);
pub const SUCCESS: Color32 = Color32::from_rgb(22, 163, 74);
pub const WARNING: Color32 = Color32::from_rgb(217, 119, 6);
pub const LINK: Color32 = Color32::from_rgb(30, 64, 175);
pub const LINK_ON_ACCENT: Color32 = Color32::from_rgb(219, 234, 254);

pub const USER_BUBBLE: Color32 = ACCENT;
pub const ASSISTANT_BUBBLE: Color32 = Color32::from_rgb(243, 244, 246);

pub const PANEL_ROUNDING: CornerRadius = CornerRadius::same(6);
pub const BUBBLE_ROUNDING: CornerRadius = CornerRadius::same(14);
pub const PANEL_PADDING: Vec2 = Vec2::new(12.0, 8.0);
pub const BUBBLE_PADDING: Vec2 = Vec2::new(12.0, 8.0);

/// Bubbles never span more than this share of the feed width
pub const BUBBLE_MAX_WIDTH_RATIO: f32 = 0.75;
/// Height of one row in the input box
pub const INPUT_ROW_HEIGHT: f32 = 20.0;

/// Apply the light theme to an egui context
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals = egui::Visuals::light();
    style.visuals.panel_fill = BG_PRIMARY;
    style.visuals.window_fill = BG_SURFACE;
    style.visuals.extreme_bg_color = BG_SURFACE;
    style.visuals.hyperlink_color = LINK;

    style.visuals.widgets.inactive.bg_fill = BG_MUTED;
    style.visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);
    style.visuals.widgets.hovered.bg_fill = BG_MUTED;
    style.visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    style.visuals.widgets.active.bg_fill = ACCENT_DARK;
    style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, TEXT_ON_ACCENT);

    style.visuals.selection.bg_fill = ACCENT.linear_multiply(0.3);
    style.visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    style.spacing.item_spacing = Vec2::new(8.0, 6.0);

    ctx.set_style(style);
}
