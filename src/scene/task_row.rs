use chrono::NaiveDate;
use egui::{Align2, Pos2, Rect, Stroke, Vec2};

use super::{ChartOptions, HitRegion, NodeKey, Primitive, SceneNode, TextPrimitive};
use crate::model::{GanttConfig, GanttLayout, GanttTask};
use crate::ui::theme;

pub const NO_DATES_LABEL: &str = "No dates set";
const GROUP_GLYPH: &str = "◆";
const GROUP_GLYPH_WIDTH: f32 = 14.0;

/// A drawn row plus the area it reacts to.
pub struct DrawnRow {
    pub node: SceneNode,
    pub hit: HitRegion,
}

/// Bar rectangle of a positioned task, vertically centered in its row.
pub fn bar_rect(layout: &GanttLayout, config: &GanttConfig, task_id: i64) -> Option<Rect> {
    layout.position(task_id).map(|pos| {
        Rect::from_min_size(
            Pos2::new(pos.x, pos.y + config.bar_inset()),
            Vec2::new(pos.width, config.bar_height.min(config.row_height)),
        )
    })
}

/// Label column, bar, progress overlay and dependency dot for one task.
pub fn task_row(
    task: &GanttTask,
    row: usize,
    layout: &GanttLayout,
    config: &GanttConfig,
    options: &ChartOptions,
    hovered: bool,
    today: NaiveDate,
) -> DrawnRow {
    let top = row as f32 * config.row_height + config.header_height;
    let center_y = top + config.row_height / 2.0;
    let left = layout.left_panel_width;
    let row_rect = Rect::from_min_size(Pos2::new(0.0, top), Vec2::new(layout.chart_width, config.row_height));
    let mut prims = Vec::with_capacity(12);

    prims.push(Primitive::Rect {
        rect: Rect::from_min_max(row_rect.min, Pos2::new(left, row_rect.max.y)),
        fill: theme::BG_PANEL,
        rounding: 0.0,
    });
    if hovered {
        prims.push(Primitive::Rect {
            rect: row_rect,
            fill: theme::BG_ROW_HOVER,
            rounding: 0.0,
        });
    }
    prims.push(Primitive::Line {
        points: [Pos2::new(0.0, row_rect.max.y), Pos2::new(row_rect.max.x, row_rect.max.y)],
        stroke: Stroke::new(0.5, theme::BORDER_SUBTLE),
        dash: None,
    });
    prims.push(Primitive::Line {
        points: [Pos2::new(left, top), Pos2::new(left, row_rect.max.y)],
        stroke: Stroke::new(1.0, theme::BORDER_SUBTLE),
        dash: None,
    });

    // Name label, indented by depth.
    let mut label_x = theme::LABEL_MARGIN + task.depth as f32 * config.indent_per_level;
    if task.is_group {
        prims.push(Primitive::Text(TextPrimitive::new(
            Pos2::new(label_x, center_y),
            Align2::LEFT_CENTER,
            GROUP_GLYPH,
            theme::FONT_SMALL_SIZE,
            theme::TEXT_SECONDARY,
        )));
        label_x += GROUP_GLYPH_WIDTH;
    }
    let room = (left - label_x - theme::LABEL_MARGIN).max(0.0);
    let max_chars = (room / (theme::FONT_BAR_SIZE * 0.55)) as usize;
    let label = TextPrimitive::new(
        Pos2::new(label_x, center_y),
        Align2::LEFT_CENTER,
        super::truncate(&task.subject, max_chars),
        theme::FONT_BAR_SIZE,
        theme::TEXT_PRIMARY,
    );
    prims.push(Primitive::Text(if task.is_group { label.bold() } else { label }));

    let bar = match task.dates() {
        Some(_) => bar_rect(layout, config, task.id),
        None => None,
    };

    match bar {
        Some(bar) => {
            let status = task.display_status(today);
            prims.push(Primitive::Rect {
                rect: bar,
                fill: theme::status_color(status),
                rounding: theme::BAR_ROUNDING,
            });

            if options.show_progress {
                let fraction = (task.progress / 100.0).clamp(0.0, 1.0);
                if fraction > 0.0 {
                    let inset = theme::PROGRESS_INSET.min(bar.height() / 4.0);
                    prims.push(Primitive::Rect {
                        rect: Rect::from_min_size(
                            Pos2::new(bar.min.x, bar.min.y + inset),
                            Vec2::new(bar.width() * fraction, bar.height() - inset * 2.0),
                        ),
                        fill: theme::PROGRESS_OVERLAY,
                        rounding: theme::BAR_ROUNDING / 2.0,
                    });
                }
                if bar.width() >= config.progress_label_min_width {
                    prims.push(Primitive::Text(TextPrimitive::new(
                        bar.center(),
                        Align2::CENTER_CENTER,
                        format!("{:.0}%", task.progress),
                        theme::FONT_SMALL_SIZE,
                        theme::TEXT_ON_BAR,
                    )));
                }
            }

            if !task.depends_on.is_empty() {
                prims.push(Primitive::Circle {
                    center: Pos2::new(bar.min.x, bar.center().y),
                    radius: theme::DEP_DOT_RADIUS,
                    fill: theme::DEP_DOT,
                    stroke: Some(Stroke::new(1.0, theme::BG_DARK)),
                });
            }
        }
        None => {
            prims.push(Primitive::Text(
                TextPrimitive::new(
                    Pos2::new(left + theme::LABEL_MARGIN, center_y),
                    Align2::LEFT_CENTER,
                    NO_DATES_LABEL,
                    theme::FONT_SMALL_SIZE,
                    theme::TEXT_DIM,
                )
                .italic(),
            ));
        }
    }

    DrawnRow {
        node: SceneNode {
            key: NodeKey::Row(task.id),
            primitives: prims,
        },
        hit: HitRegion {
            task_id: task.id,
            row: row_rect,
            bar,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::calculate_layout;
    use crate::model::{TaskStatus, ZoomLevel};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draw(task: &GanttTask, zoom: ZoomLevel, options: &ChartOptions, hovered: bool) -> DrawnRow {
        let config = GanttConfig::default();
        let tasks = vec![task.clone()];
        let layout = calculate_layout(&tasks, zoom, &config, date(2024, 1, 3));
        task_row(task, 0, &layout, &config, options, hovered, date(2024, 1, 3))
    }

    fn texts(node: &SceneNode) -> Vec<&TextPrimitive> {
        node.primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Text(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    fn has_fill(node: &SceneNode, color: egui::Color32) -> bool {
        node.primitives
            .iter()
            .any(|p| matches!(p, Primitive::Rect { fill, .. } if *fill == color))
    }

    #[test]
    fn dateless_task_shows_placeholder_instead_of_bar() {
        let mut task = GanttTask::new(1, "Floating");
        task.end_date = Some(date(2024, 1, 5));
        let drawn = draw(&task, ZoomLevel::Day, &ChartOptions::default(), false);

        assert!(drawn.hit.bar.is_none());
        let placeholder = texts(&drawn.node)
            .into_iter()
            .find(|t| t.text == NO_DATES_LABEL)
            .expect("placeholder label");
        assert!(placeholder.italic);
        assert!(!has_fill(&drawn.node, theme::status_color(TaskStatus::Open)));
    }

    #[test]
    fn bar_uses_status_color_and_progress_label() {
        let mut task = GanttTask::new(1, "Build").with_dates(date(2024, 1, 1), date(2024, 1, 5));
        task.status = TaskStatus::Working;
        task.progress = 50.0;
        let drawn = draw(&task, ZoomLevel::Day, &ChartOptions::default(), false);

        let bar = drawn.hit.bar.expect("bar");
        assert_eq!(bar.width(), 200.0);
        assert!(has_fill(&drawn.node, theme::status_color(TaskStatus::Working)));
        assert!(has_fill(&drawn.node, theme::PROGRESS_OVERLAY));
        assert!(texts(&drawn.node).iter().any(|t| t.text == "50%"));
    }

    #[test]
    fn overdue_bar_is_drawn_in_overdue_color() {
        let task = GanttTask::new(1, "Late").with_dates(date(2023, 12, 20), date(2024, 1, 2));
        let drawn = draw(&task, ZoomLevel::Day, &ChartOptions::default(), false);
        assert!(has_fill(&drawn.node, theme::status_color(TaskStatus::Overdue)));
    }

    #[test]
    fn narrow_bar_hides_progress_label() {
        let mut task = GanttTask::new(1, "Quick").with_dates(date(2024, 1, 1), date(2024, 1, 1));
        task.progress = 30.0;
        let drawn = draw(&task, ZoomLevel::Month, &ChartOptions::default(), false);
        assert!(texts(&drawn.node).iter().all(|t| t.text != "30%"));
    }

    #[test]
    fn progress_toggle_hides_overlay() {
        let mut task = GanttTask::new(1, "Build").with_dates(date(2024, 1, 1), date(2024, 1, 5));
        task.progress = 80.0;
        let options = ChartOptions {
            show_progress: false,
            ..Default::default()
        };
        let drawn = draw(&task, ZoomLevel::Day, &options, false);
        assert!(!has_fill(&drawn.node, theme::PROGRESS_OVERLAY));
    }

    #[test]
    fn predecessors_add_dependency_dot() {
        let mut task = GanttTask::new(2, "After").with_dates(date(2024, 1, 1), date(2024, 1, 5));
        task.depends_on = vec![1];
        let drawn = draw(&task, ZoomLevel::Day, &ChartOptions::default(), false);
        assert!(drawn
            .node
            .primitives
            .iter()
            .any(|p| matches!(p, Primitive::Circle { .. })));
    }

    #[test]
    fn depth_indents_label_and_hover_adds_band() {
        let mut task = GanttTask::new(1, "Nested").with_dates(date(2024, 1, 1), date(2024, 1, 5));
        task.depth = 2;
        task.is_group = true;
        let drawn = draw(&task, ZoomLevel::Day, &ChartOptions::default(), true);

        let label = texts(&drawn.node)
            .into_iter()
            .find(|t| t.text == "Nested")
            .expect("label");
        assert_eq!(label.pos.x, theme::LABEL_MARGIN + 40.0 + GROUP_GLYPH_WIDTH);
        assert!(label.bold);
        assert!(has_fill(&drawn.node, theme::BG_ROW_HOVER));
    }
}
