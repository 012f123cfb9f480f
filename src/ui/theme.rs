use egui::{Color32, FontId, Rounding, Stroke, Visuals};

use crate::model::{TaskPriority, TaskStatus};

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(24, 24, 32);
pub const BG_PANEL: Color32 = Color32::from_rgb(30, 30, 40);
pub const BG_HEADER: Color32 = Color32::from_rgb(34, 37, 48);
pub const BG_ROW_HOVER: Color32 = Color32::from_rgba_premultiplied(14, 14, 14, 14);
pub const BG_SELECTED: Color32 = Color32::from_rgba_premultiplied(80, 140, 220, 45);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(50, 52, 64);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(230, 232, 240);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(155, 160, 178);
pub const TEXT_DIM: Color32 = Color32::from_rgb(100, 105, 120);
pub const TEXT_ON_BAR: Color32 = Color32::from_rgb(255, 255, 255);

pub const ACCENT: Color32 = Color32::from_rgb(80, 140, 220);
pub const TODAY_LINE: Color32 = Color32::from_rgb(240, 75, 75);
pub const GRID_LINE: Color32 = Color32::from_rgb(44, 46, 58);
pub const WEEKEND_SHADE: Color32 = Color32::from_rgb(28, 29, 38);
pub const ERROR: Color32 = Color32::from_rgb(229, 57, 53);

pub const PROGRESS_OVERLAY: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 70);
pub const DEP_ARROW: Color32 = Color32::from_rgb(150, 132, 96);
pub const DEP_ARROW_HOVER: Color32 = Color32::from_rgb(242, 202, 134);
pub const DEP_DOT: Color32 = Color32::from_rgb(242, 202, 134);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const BAR_ROUNDING: f32 = 4.0;
pub const PROGRESS_INSET: f32 = 3.0;
pub const DEP_DOT_RADIUS: f32 = 3.0;
pub const ARROW_HEAD_LEN: f32 = 6.0;
pub const ARROW_HEAD_WIDTH: f32 = 3.5;
pub const TODAY_MARKER_RADIUS: f32 = 4.0;
pub const LABEL_MARGIN: f32 = 12.0;
pub const TOOLTIP_SIZE: [f32; 2] = [240.0, 200.0];
pub const TOOLTIP_OFFSET: f32 = 14.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub const FONT_HEADER_SIZE: f32 = 12.0;
pub const FONT_SUB_SIZE: f32 = 10.5;
pub const FONT_BAR_SIZE: f32 = 11.5;
pub const FONT_SMALL_SIZE: f32 = 9.5;

pub fn font_menu() -> FontId {
    FontId::proportional(12.0)
}

pub fn font_status() -> FontId {
    FontId::proportional(11.0)
}

// ── Status / priority colors ─────────────────────────────────────────────────

pub fn status_color(status: TaskStatus) -> Color32 {
    match status {
        TaskStatus::Open => Color32::from_rgb(66, 133, 244),
        TaskStatus::Working => Color32::from_rgb(251, 140, 0),
        TaskStatus::PendingReview => Color32::from_rgb(171, 71, 188),
        TaskStatus::Completed => Color32::from_rgb(52, 168, 83),
        TaskStatus::Cancelled => Color32::from_rgb(120, 124, 138),
        TaskStatus::Overdue => Color32::from_rgb(229, 57, 53),
    }
}

pub fn priority_color(priority: TaskPriority) -> Color32 {
    match priority {
        TaskPriority::Low => TEXT_SECONDARY,
        TaskPriority::Medium => Color32::from_rgb(3, 169, 244),
        TaskPriority::High => Color32::from_rgb(251, 140, 0),
        TaskPriority::Urgent => Color32::from_rgb(229, 57, 53),
    }
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = Color32::from_rgb(20, 20, 28);

    visuals.widgets.noninteractive.bg_fill = BG_PANEL;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);
    visuals.widgets.noninteractive.rounding = Rounding::same(4.0);

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(42, 44, 56);
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.inactive.rounding = Rounding::same(4.0);

    visuals.widgets.hovered.bg_fill = Color32::from_rgb(52, 54, 68);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.hovered.rounding = Rounding::same(4.0);

    visuals.widgets.active.bg_fill = Color32::from_rgb(60, 62, 76);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.active.fg_stroke = Stroke::new(2.0, Color32::WHITE);
    visuals.widgets.active.rounding = Rounding::same(4.0);

    visuals.selection.bg_fill = BG_SELECTED;
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    visuals.window_rounding = Rounding::same(8.0);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    ctx.set_style(style);
}
