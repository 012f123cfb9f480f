use egui::{Align2, Pos2, Rect, Stroke};

use super::{NodeKey, Primitive, SceneNode, TextPrimitive};
use crate::layout::{get_primary_headers, get_time_units, get_time_units_between};
use crate::model::{GanttLayout, ZoomLevel};
use crate::ui::theme;

/// Narrowest tick that still gets a secondary label.
const MIN_TICK_LABEL_WIDTH: f32 = 14.0;

/// Header band with grouped labels, plus the full-height grid and weekend
/// shading that hang off it. With `visible`, only ticks under that chart-space
/// rect are emitted.
pub fn timeline_header(layout: &GanttLayout, visible: Option<Rect>) -> SceneNode {
    let width = layout.chart_width;
    let height = layout.chart_height;
    let header = layout.header_height;
    let split = header / 2.0;
    let left = layout.left_panel_width;
    let grid = Stroke::new(0.5, theme::GRID_LINE);

    let units = match visible {
        Some(rect) => get_time_units_between(layout, layout.x_to_date(rect.min.x), layout.x_to_date(rect.max.x)),
        None => get_time_units(layout),
    };
    let primaries = get_primary_headers(&units);
    let mut prims = Vec::with_capacity(units.len() * 3 + primaries.len() * 2 + 8);

    prims.push(Primitive::Rect {
        rect: Rect::from_min_max(Pos2::ZERO, Pos2::new(width, header)),
        fill: theme::BG_HEADER,
        rounding: 0.0,
    });

    if layout.zoom == ZoomLevel::Day {
        for tick in units.iter().filter(|u| u.is_weekend) {
            prims.push(Primitive::Rect {
                rect: Rect::from_min_max(Pos2::new(tick.x, split), Pos2::new(tick.x + tick.width, height)),
                fill: theme::WEEKEND_SHADE,
                rounding: 0.0,
            });
        }
    }

    for tick in &units {
        prims.push(Primitive::Line {
            points: [Pos2::new(tick.x, split), Pos2::new(tick.x, height)],
            stroke: grid,
            dash: None,
        });
        if tick.width >= MIN_TICK_LABEL_WIDTH {
            let color = if tick.is_weekend { theme::TEXT_DIM } else { theme::TEXT_SECONDARY };
            prims.push(Primitive::Text(TextPrimitive::new(
                Pos2::new(tick.x + tick.width / 2.0, split + split / 2.0),
                Align2::CENTER_CENTER,
                tick.label.clone(),
                theme::FONT_SUB_SIZE,
                color,
            )));
        }
    }

    for cell in &primaries {
        prims.push(Primitive::Line {
            points: [Pos2::new(cell.x, 0.0), Pos2::new(cell.x, split)],
            stroke: Stroke::new(1.0, theme::BORDER_SUBTLE),
            dash: None,
        });
        prims.push(Primitive::Text(
            TextPrimitive::new(
                Pos2::new(cell.x + 6.0, split / 2.0),
                Align2::LEFT_CENTER,
                super::truncate(&cell.label, (cell.width / (theme::FONT_HEADER_SIZE * 0.6)) as usize),
                theme::FONT_HEADER_SIZE,
                theme::TEXT_PRIMARY,
            )
            .bold(),
        ));
    }

    // Row separators between the two label rows and under the header.
    prims.push(Primitive::Line {
        points: [Pos2::new(left, split), Pos2::new(width, split)],
        stroke: Stroke::new(0.5, theme::BORDER_SUBTLE),
        dash: None,
    });
    prims.push(Primitive::Line {
        points: [Pos2::new(0.0, header), Pos2::new(width, header)],
        stroke: Stroke::new(1.0, theme::BORDER_SUBTLE),
        dash: None,
    });

    // Left-panel label cell sits on top of the grid.
    prims.push(Primitive::Rect {
        rect: Rect::from_min_max(Pos2::ZERO, Pos2::new(left, header)),
        fill: theme::BG_PANEL,
        rounding: 0.0,
    });
    prims.push(Primitive::Text(
        TextPrimitive::new(
            Pos2::new(theme::LABEL_MARGIN, header / 2.0),
            Align2::LEFT_CENTER,
            "Task",
            theme::FONT_HEADER_SIZE,
            theme::TEXT_PRIMARY,
        )
        .bold(),
    ));
    prims.push(Primitive::Line {
        points: [Pos2::new(left, 0.0), Pos2::new(left, header)],
        stroke: Stroke::new(1.0, theme::BORDER_SUBTLE),
        dash: None,
    });

    SceneNode {
        key: NodeKey::Header,
        primitives: prims,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::calculate_layout;
    use crate::model::{GanttConfig, GanttTask};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn layout(zoom: ZoomLevel) -> GanttLayout {
        let tasks = vec![GanttTask::new(1, "A").with_dates(date(2024, 1, 1), date(2024, 1, 14))];
        calculate_layout(&tasks, zoom, &GanttConfig::default(), date(2024, 1, 1))
    }

    fn count_weekend_shades(node: &SceneNode) -> usize {
        node.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Rect { fill, .. } if *fill == theme::WEEKEND_SHADE))
            .count()
    }

    #[test]
    fn weekends_are_shaded_only_in_day_zoom() {
        // Dec 25 to Jan 21: four full weeks, eight weekend days.
        assert_eq!(count_weekend_shades(&timeline_header(&layout(ZoomLevel::Day), None)), 8);
        assert_eq!(count_weekend_shades(&timeline_header(&layout(ZoomLevel::Week), None)), 0);
    }

    #[test]
    fn one_grid_line_per_tick_reaches_chart_bottom() {
        let layout = layout(ZoomLevel::Day);
        let node = timeline_header(&layout, None);
        let full_height = node
            .primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Line { points, .. } if points[1].y == layout.chart_height))
            .count();
        assert_eq!(full_height as i64, layout.total_days);
    }

    #[test]
    fn header_carries_month_labels() {
        let node = timeline_header(&layout(ZoomLevel::Day), None);
        let texts: Vec<&str> = node
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Text(t) => Some(t.text.as_str()),
                _ => None,
            })
            .collect();
        assert!(texts.contains(&"December 2023"));
        assert!(texts.contains(&"January 2024"));
        assert!(texts.contains(&"Task"));
    }

    #[test]
    fn visible_window_limits_grid_lines() {
        let layout = layout(ZoomLevel::Day);
        // Five days wide, starting at the first day column.
        let left = layout.left_panel_width;
        let window = Rect::from_min_max(Pos2::new(left, 0.0), Pos2::new(left + 4.5 * 40.0, 300.0));
        let node = timeline_header(&layout, Some(window));
        let grid_lines = node
            .primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Line { points, .. } if points[1].y == layout.chart_height))
            .count();
        assert_eq!(grid_lines, 5);
    }
}
