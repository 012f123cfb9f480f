use chrono::NaiveDate;
use egui::{Pos2, Stroke};

use super::{NodeKey, Primitive, SceneNode};
use crate::layout::get_today_x;
use crate::model::GanttLayout;
use crate::ui::theme;

const DASH: (f32, f32) = (4.0, 4.0);

/// Dashed guide at today's column, with a dot on the header boundary. `None`
/// when today is outside the visible range.
pub fn today_marker(layout: &GanttLayout, today: NaiveDate) -> Option<SceneNode> {
    let x = get_today_x(layout, today)?;
    let top = layout.header_height;

    Some(SceneNode {
        key: NodeKey::TodayMarker,
        primitives: vec![
            Primitive::Line {
                points: [Pos2::new(x, top), Pos2::new(x, layout.chart_height)],
                stroke: Stroke::new(1.5, theme::TODAY_LINE),
                dash: Some(DASH),
            },
            Primitive::Circle {
                center: Pos2::new(x, top),
                radius: theme::TODAY_MARKER_RADIUS,
                fill: theme::TODAY_LINE,
                stroke: None,
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::calculate_layout;
    use crate::model::{GanttConfig, GanttTask, ZoomLevel};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn marker_is_dashed_line_at_today() {
        let config = GanttConfig::default();
        let tasks = vec![GanttTask::new(1, "A").with_dates(date(2024, 1, 1), date(2024, 1, 10))];
        let layout = calculate_layout(&tasks, ZoomLevel::Week, &config, date(2024, 1, 4));

        let node = today_marker(&layout, date(2024, 1, 4)).expect("today in range");
        match &node.primitives[0] {
            Primitive::Line { points, dash, .. } => {
                assert_eq!(points[0].x, config.left_panel_width + 10.0 * 15.0);
                assert_eq!(points[0].y, config.header_height);
                assert_eq!(points[1].y, layout.chart_height);
                assert!(dash.is_some());
            }
            other => panic!("unexpected primitive {other:?}"),
        }
    }

    #[test]
    fn no_marker_outside_range() {
        let tasks = vec![GanttTask::new(1, "A").with_dates(date(2024, 1, 1), date(2024, 1, 10))];
        let layout = calculate_layout(&tasks, ZoomLevel::Week, &GanttConfig::default(), date(2024, 1, 4));
        assert!(today_marker(&layout, date(2025, 1, 1)).is_none());
    }
}
