use std::time::Duration;

use chrono::NaiveDate;
use egui::{Align, Id, Layout, RichText, Sense, Ui, Vec2};
use egui_phosphor::regular as icons;

use crate::interaction::{clicked_task, ChartController, ChartInteraction, AUTO_CENTER_DELAY};
use crate::model::{GanttConfig, GanttDependency, GanttTask, ZoomLevel};
use crate::scene::tooltip::TooltipContent;
use crate::scene::{build_scene, ChartOptions, SceneInput};
use crate::ui::{painter, theme, tooltip};

/// Extra chart-space margin built around the scroll viewport.
const CULL_MARGIN: f32 = 200.0;

/// Data drawn by one chart instance. `revision` changes whenever `tasks` or
/// `dependencies` do.
pub struct ChartData<'a> {
    pub tasks: &'a [GanttTask],
    pub dependencies: &'a [GanttDependency],
    pub revision: u64,
    pub today: NaiveDate,
}

/// Render the timeline with its zoom bar. Clicks and zoom requests are
/// reported back; the chart keeps no selection of its own.
pub fn show_gantt_chart(
    ui: &mut Ui,
    controller: &mut ChartController,
    data: &ChartData<'_>,
    config: &GanttConfig,
    options: &ChartOptions,
) -> ChartInteraction {
    let mut interaction = ChartInteraction::default();
    let salt = options.class_name.as_deref().unwrap_or("gantt_chart");
    let chart_id = Id::new(("gantt", salt));

    let mut today_clicked = false;
    ui.horizontal(|ui| {
        for zoom in ZoomLevel::ALL {
            let selected = controller.zoom.value() == zoom;
            if ui
                .selectable_label(selected, RichText::new(zoom.label()).font(theme::font_menu()))
                .clicked()
            {
                interaction.zoom_changed = controller.zoom.request(zoom);
            }
        }
        ui.separator();
        today_clicked = ui
            .button(format!("{} Today", icons::CROSSHAIR))
            .on_hover_text("Scroll to today")
            .clicked();
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            ui.label(
                RichText::new("Ctrl+Scroll to zoom")
                    .size(theme::FONT_SMALL_SIZE)
                    .color(theme::TEXT_DIM),
            );
        });
    });
    ui.add_space(2.0);

    if data.tasks.is_empty() {
        controller.hover.clear();
        show_message_panel(ui, icons::CALENDAR_BLANK, "No tasks to show", "This schedule has no tasks yet.");
        return interaction;
    }

    // Ctrl+scroll steps the zoom level
    let chart_rect = ui.available_rect_before_wrap();
    if ui.rect_contains_pointer(chart_rect) {
        let (ctrl, scroll_y) = ui.input(|i| (i.modifiers.ctrl, i.raw_scroll_delta.y));
        if ctrl && scroll_y != 0.0 {
            let current = controller.zoom.value();
            let next = if scroll_y > 0.0 { current.zoom_in() } else { current.zoom_out() };
            if let Some(changed) = controller.zoom.request(next) {
                interaction.zoom_changed = Some(changed);
            }
        }
    }

    let ChartController {
        zoom,
        hover,
        scroll,
        memo,
    } = controller;
    let layout = memo.get(data.revision, data.tasks, zoom.value(), config, data.today);

    let viewport_width = chart_rect.width();
    let now = ui.input(|i| i.time);
    scroll.on_layout(now, layout, data.today, viewport_width);
    if scroll.is_waiting() {
        ui.ctx().request_repaint_after(Duration::from_secs_f64(AUTO_CENTER_DELAY));
    }
    if today_clicked {
        let from = scroll.offset();
        if !scroll.scroll_to_today(layout, data.today, viewport_width) {
            tracing::debug!(today = %data.today, from, "today is outside the chart range");
        }
    }

    if layout.zoom != zoom.value() {
        ui.label(
            RichText::new(format!(
                "{} Range too wide for {} view, showing {}",
                icons::INFO,
                zoom.value().label(),
                layout.zoom.label()
            ))
            .size(theme::FONT_SMALL_SIZE)
            .color(theme::TEXT_DIM),
        );
    }

    let mut area = egui::ScrollArea::both()
        .id_salt(chart_id)
        .auto_shrink([false, false]);
    if let Some(height) = options.height {
        area = area.max_height(height);
    }
    if let Some(offset) = scroll.take_pending() {
        area = area.horizontal_scroll_offset(offset);
    }

    let mut clicked_id = None;
    let hovered_before = hover.task_id();
    let chart_size = Vec2::new(layout.chart_width, layout.chart_height);
    let output = area.show_viewport(ui, |ui, viewport| {
        let (response, painter) = ui.allocate_painter(chart_size, Sense::click());
        let origin = response.rect.min;
        let scene = build_scene(&SceneInput {
            tasks: data.tasks,
            dependencies: data.dependencies,
            layout,
            config,
            options,
            hovered: hover.task_id(),
            today: data.today,
            visible: Some(viewport.expand(CULL_MARGIN)),
        });
        painter.rect_filled(response.rect, 0.0, scene.background);
        painter::paint_scene(&painter, origin, &scene);

        match response.hover_pos() {
            Some(pointer) => match scene.hit_test(pointer - origin.to_vec2()) {
                Some(hit) if hover.task_id() == Some(hit.task_id) => hover.track(pointer),
                Some(hit) => hover.enter(hit.task_id, pointer),
                None => {
                    if let Some(id) = hover.task_id() {
                        hover.leave(id);
                    }
                }
            },
            None => {
                if let Some(id) = hover.task_id() {
                    hover.leave(id);
                }
            }
        }

        if response.clicked() {
            if let Some(pointer) = response.interact_pointer_pos() {
                let local = pointer - origin.to_vec2();
                clicked_id = scene
                    .hit_test(local)
                    .filter(|hit| hit.bar.is_some_and(|bar| bar.contains(local)))
                    .map(|hit| hit.task_id);
            }
        }
        if let Some(hit) = hover.task_id().and_then(|id| scene.hit_regions.iter().find(|h| h.task_id == id)) {
            if hit.bar.is_some() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
            }
        }
    });
    scroll.record_offset(output.state.offset.x);

    if hover.task_id() != hovered_before {
        ui.ctx().request_repaint();
    }

    if let Some(id) = clicked_id {
        interaction.clicked_task = clicked_task(data.tasks, id);
    }

    if let (Some(id), Some(pointer)) = (hover.task_id(), hover.pointer()) {
        if let Some(task) = data.tasks.iter().find(|t| t.id == id) {
            let content = TooltipContent::for_task(task, data.today);
            tooltip::show_task_tooltip(ui.ctx(), chart_id.with("tooltip"), &content, pointer, ui.ctx().screen_rect());
        }
    }

    interaction
}

/// Centered notice used for the empty and error states.
pub fn show_message_panel(ui: &mut Ui, icon: &str, title: &str, detail: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() / 3.0);
        ui.label(RichText::new(icon).size(32.0).color(theme::TEXT_DIM));
        ui.label(RichText::new(title).font(theme::font_menu()).color(theme::TEXT_PRIMARY));
        ui.label(RichText::new(detail).size(theme::FONT_SUB_SIZE).color(theme::TEXT_SECONDARY));
    });
}

/// Error state: no partial chart is drawn.
pub fn show_error_panel(ui: &mut Ui, message: &str) -> bool {
    let mut retry = false;
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() / 3.0);
        ui.label(RichText::new(icons::WARNING_CIRCLE).size(32.0).color(theme::ERROR));
        ui.label(
            RichText::new("Could not load the schedule")
                .font(theme::font_menu())
                .color(theme::TEXT_PRIMARY),
        );
        ui.label(RichText::new(message).size(theme::FONT_SUB_SIZE).color(theme::TEXT_SECONDARY));
        ui.add_space(8.0);
        retry = ui.button(format!("{} Retry", icons::ARROW_CLOCKWISE)).clicked();
    });
    retry
}
