use egui::{Pos2, Stroke};

use super::{NodeKey, PathSegment, Primitive, SceneNode};
use crate::model::{GanttConfig, GanttDependency, GanttLayout};
use crate::ui::theme;

/// Shape chosen for a dependency arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// Single cubic through the horizontal midpoint.
    Curve,
    /// Orthogonal path around the bars for overlapping or backward edges.
    Detour,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowRoute {
    pub kind: RouteKind,
    pub segments: Vec<PathSegment>,
    pub end: Pos2,
}

/// Route from the predecessor's right edge `from` to the dependent's left edge
/// `to`, both at bar mid-height.
pub fn route_arrow(from: Pos2, to: Pos2, config: &GanttConfig) -> ArrowRoute {
    if to.x - from.x > config.arrow_gap {
        let mid_x = (from.x + to.x) / 2.0;
        return ArrowRoute {
            kind: RouteKind::Curve,
            segments: vec![
                PathSegment::MoveTo(from),
                PathSegment::CubicTo(Pos2::new(mid_x, from.y), Pos2::new(mid_x, to.y), to),
            ],
            end: to,
        };
    }

    let step = config.arrow_step;
    // Same-row edges run along the row's bottom boundary instead.
    let mid_y = if (to.y - from.y).abs() < f32::EPSILON {
        from.y + config.row_height / 2.0
    } else {
        (from.y + to.y) / 2.0
    };
    ArrowRoute {
        kind: RouteKind::Detour,
        segments: vec![
            PathSegment::MoveTo(from),
            PathSegment::LineTo(Pos2::new(from.x + step, from.y)),
            PathSegment::LineTo(Pos2::new(from.x + step, mid_y)),
            PathSegment::LineTo(Pos2::new(to.x - step, mid_y)),
            PathSegment::LineTo(Pos2::new(to.x - step, to.y)),
            PathSegment::LineTo(to),
        ],
        end: to,
    }
}

/// Right-pointing triangle whose tip sits on `tip`.
pub fn arrow_head(tip: Pos2) -> [Pos2; 3] {
    [
        tip,
        Pos2::new(tip.x - theme::ARROW_HEAD_LEN, tip.y - theme::ARROW_HEAD_WIDTH),
        Pos2::new(tip.x - theme::ARROW_HEAD_LEN, tip.y + theme::ARROW_HEAD_WIDTH),
    ]
}

/// Endpoints of an edge, or `None` when either task has no bar in `layout`.
pub fn arrow_endpoints(dep: &GanttDependency, layout: &GanttLayout) -> Option<(Pos2, Pos2)> {
    let from = layout.position(dep.from_task_id)?;
    let to = layout.position(dep.to_task_id)?;
    let half_row = layout.row_height / 2.0;
    Some((
        Pos2::new(from.x + from.width, from.y + half_row),
        Pos2::new(to.x, to.y + half_row),
    ))
}

/// One node per drawable edge. Edges touching tasks absent from the layout
/// are skipped.
pub fn dependency_arrows(
    dependencies: &[GanttDependency],
    layout: &GanttLayout,
    config: &GanttConfig,
    hovered: Option<i64>,
) -> Vec<SceneNode> {
    dependencies
        .iter()
        .filter_map(|dep| {
            let (from, to) = arrow_endpoints(dep, layout)?;
            let route = route_arrow(from, to, config);
            let highlighted = hovered.is_some_and(|id| id == dep.from_task_id || id == dep.to_task_id);
            let color = if highlighted { theme::DEP_ARROW_HOVER } else { theme::DEP_ARROW };
            Some(SceneNode {
                key: NodeKey::Arrow {
                    from: dep.from_task_id,
                    to: dep.to_task_id,
                },
                primitives: vec![Primitive::Path {
                    segments: route.segments,
                    stroke: Stroke::new(config.arrow_stroke_width, color),
                    arrow_head: Some(arrow_head(route.end)),
                }],
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::calculate_layout;
    use crate::model::{GanttTask, ZoomLevel};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn edge(from: i64, to: i64) -> GanttDependency {
        GanttDependency {
            from_task_id: from,
            to_task_id: to,
        }
    }

    fn route_between(pred: GanttTask, dep: GanttTask) -> ArrowRoute {
        let config = GanttConfig::default();
        let tasks = vec![pred, dep];
        let layout = calculate_layout(&tasks, ZoomLevel::Day, &config, date(2024, 1, 1));
        let (from, to) = arrow_endpoints(&edge(1, 2), &layout).expect("both positioned");
        route_arrow(from, to, &config)
    }

    #[test]
    fn gap_between_bars_draws_s_curve() {
        let route = route_between(
            GanttTask::new(1, "A").with_dates(date(2024, 1, 1), date(2024, 1, 3)),
            GanttTask::new(2, "B").with_dates(date(2024, 1, 6), date(2024, 1, 8)),
        );
        assert_eq!(route.kind, RouteKind::Curve);
        assert_eq!(route.segments.len(), 2);
    }

    #[test]
    fn overlapping_dependent_detours() {
        let route = route_between(
            GanttTask::new(1, "A").with_dates(date(2024, 1, 1), date(2024, 1, 10)),
            GanttTask::new(2, "B").with_dates(date(2024, 1, 5), date(2024, 1, 12)),
        );
        assert_eq!(route.kind, RouteKind::Detour);
        assert!(route
            .segments
            .iter()
            .all(|s| !matches!(s, PathSegment::CubicTo(..))));
    }

    #[test]
    fn detour_steps_out_and_runs_between_rows() {
        let config = GanttConfig::default();
        let from = Pos2::new(500.0, 80.0);
        let to = Pos2::new(400.0, 120.0);
        let route = route_arrow(from, to, &config);
        assert_eq!(
            route.segments,
            vec![
                PathSegment::MoveTo(from),
                PathSegment::LineTo(Pos2::new(510.0, 80.0)),
                PathSegment::LineTo(Pos2::new(510.0, 100.0)),
                PathSegment::LineTo(Pos2::new(390.0, 100.0)),
                PathSegment::LineTo(Pos2::new(390.0, 120.0)),
                PathSegment::LineTo(to),
            ]
        );
    }

    #[test]
    fn adjacent_bars_within_gap_still_detour() {
        let config = GanttConfig::default();
        let route = route_arrow(Pos2::new(100.0, 80.0), Pos2::new(115.0, 120.0), &config);
        assert_eq!(route.kind, RouteKind::Detour);
    }

    #[test]
    fn same_row_detour_drops_half_a_row() {
        let config = GanttConfig::default();
        let route = route_arrow(Pos2::new(300.0, 80.0), Pos2::new(200.0, 80.0), &config);
        assert_eq!(route.segments[2], PathSegment::LineTo(Pos2::new(310.0, 100.0)));
    }

    #[test]
    fn edges_to_missing_or_dateless_tasks_are_skipped() {
        let config = GanttConfig::default();
        let tasks = vec![
            GanttTask::new(1, "A").with_dates(date(2024, 1, 1), date(2024, 1, 3)),
            GanttTask::new(2, "B").with_dates(date(2024, 1, 6), date(2024, 1, 8)),
            GanttTask::new(3, "Dateless"),
        ];
        let layout = calculate_layout(&tasks, ZoomLevel::Day, &config, date(2024, 1, 1));
        let deps = vec![edge(1, 2), edge(42, 2), edge(1, 3), edge(2, 77)];

        let nodes = dependency_arrows(&deps, &layout, &config, None);
        let keys: Vec<NodeKey> = nodes.iter().map(|n| n.key).collect();
        assert_eq!(keys, vec![NodeKey::Arrow { from: 1, to: 2 }]);
    }

    #[test]
    fn hovered_endpoint_highlights_arrow() {
        let config = GanttConfig::default();
        let tasks = vec![
            GanttTask::new(1, "A").with_dates(date(2024, 1, 1), date(2024, 1, 3)),
            GanttTask::new(2, "B").with_dates(date(2024, 1, 6), date(2024, 1, 8)),
        ];
        let layout = calculate_layout(&tasks, ZoomLevel::Day, &config, date(2024, 1, 1));
        let nodes = dependency_arrows(&[edge(1, 2)], &layout, &config, Some(2));
        match &nodes[0].primitives[0] {
            Primitive::Path { stroke, arrow_head, .. } => {
                assert_eq!(stroke.color, theme::DEP_ARROW_HOVER);
                assert!(arrow_head.is_some());
            }
            other => panic!("unexpected primitive {other:?}"),
        }
    }
}
