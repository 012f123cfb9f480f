use egui::{Context, Id, Order, Pos2, Rect, RichText, Vec2};

use crate::scene::tooltip::{place_tooltip, TooltipContent};
use crate::ui::theme;

/// Floating task details on the tooltip layer, above the scroll area's clip.
pub fn show_task_tooltip(ctx: &Context, id: Id, content: &TooltipContent, pointer: Pos2, viewport: Rect) {
    let size = Vec2::from(theme::TOOLTIP_SIZE);
    let pos = place_tooltip(pointer, size, viewport, theme::TOOLTIP_OFFSET);

    egui::Area::new(id)
        .order(Order::Tooltip)
        .fixed_pos(pos)
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_width(size.x - 16.0);
                ui.label(
                    RichText::new(&content.title)
                        .size(theme::FONT_HEADER_SIZE)
                        .strong()
                        .color(theme::TEXT_PRIMARY),
                );
                ui.label(
                    RichText::new(content.status.label())
                        .size(theme::FONT_SUB_SIZE)
                        .color(theme::status_color(content.status)),
                );
                ui.add_space(4.0);
                egui::Grid::new(id.with("rows"))
                    .num_columns(2)
                    .spacing([10.0, 2.0])
                    .show(ui, |ui| {
                        for (label, value) in content.rows() {
                            ui.label(RichText::new(label).size(theme::FONT_SUB_SIZE).color(theme::TEXT_DIM));
                            let value = RichText::new(value).size(theme::FONT_SUB_SIZE);
                            let value = if label == "Priority" {
                                value.color(theme::priority_color(content.priority))
                            } else {
                                value.color(theme::TEXT_SECONDARY)
                            };
                            ui.label(value);
                            ui.end_row();
                        }
                    });
            });
        });
}
