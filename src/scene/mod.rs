//! Renderer-agnostic scene graph for the timeline.
//!
//! Each draw unit (header, one row per task, one arrow per dependency, the
//! today marker) becomes a [`SceneNode`] of flat [`Primitive`]s in chart
//! coordinates. The egui painter and the SVG writer both consume the same
//! scene, so what is exported is what is on screen.

pub mod arrows;
pub mod header;
pub mod svg;
pub mod task_row;
pub mod today;
pub mod tooltip;

use chrono::NaiveDate;
use egui::{Align2, Color32, Pos2, Rect, Stroke};

use crate::model::{GanttConfig, GanttDependency, GanttLayout, GanttTask};

/// Visual toggles supplied by the host. All of them default to on.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub show_dependencies: bool,
    pub show_today_marker: bool,
    pub show_progress: bool,
    /// Fixed viewport height; `None` fills the available space.
    pub height: Option<f32>,
    /// Distinguishes the widget state of several charts on one screen.
    pub class_name: Option<String>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            show_dependencies: true,
            show_today_marker: true,
            show_progress: true,
            height: None,
            class_name: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Pos2),
    LineTo(Pos2),
    CubicTo(Pos2, Pos2, Pos2),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub pos: Pos2,
    pub anchor: Align2,
    pub text: String,
    pub size: f32,
    pub color: Color32,
    pub italic: bool,
    pub bold: bool,
}

impl TextPrimitive {
    pub fn new(pos: Pos2, anchor: Align2, text: impl Into<String>, size: f32, color: Color32) -> Self {
        Self {
            pos,
            anchor,
            text: text.into(),
            size,
            color,
            italic: false,
            bold: false,
        }
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect {
        rect: Rect,
        fill: Color32,
        rounding: f32,
    },
    Line {
        points: [Pos2; 2],
        stroke: Stroke,
        /// `(dash, gap)` lengths for a dashed line.
        dash: Option<(f32, f32)>,
    },
    Path {
        segments: Vec<PathSegment>,
        stroke: Stroke,
        /// Filled triangle at the path end.
        arrow_head: Option<[Pos2; 3]>,
    },
    Circle {
        center: Pos2,
        radius: f32,
        fill: Color32,
        stroke: Option<Stroke>,
    },
    Text(TextPrimitive),
}

/// Identity of a draw unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKey {
    Header,
    Row(i64),
    Arrow { from: i64, to: i64 },
    TodayMarker,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub key: NodeKey,
    pub primitives: Vec<Primitive>,
}

/// Interactive area of the chart, in chart coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRegion {
    pub task_id: i64,
    pub row: Rect,
    pub bar: Option<Rect>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub background: Color32,
    pub nodes: Vec<SceneNode>,
    pub hit_regions: Vec<HitRegion>,
}

impl Scene {
    #[cfg(test)]
    pub fn node(&self, key: NodeKey) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.key == key)
    }

    /// Row under a chart-space point.
    pub fn hit_test(&self, point: Pos2) -> Option<&HitRegion> {
        self.hit_regions.iter().find(|h| h.row.contains(point))
    }
}

/// Everything one render pass reads.
pub struct SceneInput<'a> {
    pub tasks: &'a [GanttTask],
    pub dependencies: &'a [GanttDependency],
    pub layout: &'a GanttLayout,
    pub config: &'a GanttConfig,
    pub options: &'a ChartOptions,
    pub hovered: Option<i64>,
    pub today: NaiveDate,
    /// Chart-space area to build. `None` builds the whole chart.
    pub visible: Option<Rect>,
}

/// Compose all draw units, back to front.
pub fn build_scene(input: &SceneInput<'_>) -> Scene {
    let layout = input.layout;
    let mut nodes = Vec::with_capacity(input.tasks.len() + input.dependencies.len() + 2);
    let mut hit_regions = Vec::with_capacity(input.tasks.len());

    nodes.push(header::timeline_header(layout, input.visible));

    for (row, task) in input.tasks.iter().enumerate() {
        if let Some(visible) = input.visible {
            let top = row as f32 * input.config.row_height + input.config.header_height;
            if top > visible.max.y || top + input.config.row_height < visible.min.y {
                continue;
            }
        }
        let hovered = input.hovered == Some(task.id);
        let drawn = task_row::task_row(task, row, layout, input.config, input.options, hovered, input.today);
        hit_regions.push(drawn.hit);
        nodes.push(drawn.node);
    }

    if input.options.show_dependencies {
        nodes.extend(arrows::dependency_arrows(
            input.dependencies,
            layout,
            input.config,
            input.hovered,
        ));
    }

    if input.options.show_today_marker {
        nodes.extend(today::today_marker(layout, input.today));
    }

    Scene {
        width: layout.chart_width,
        height: layout.chart_height,
        background: crate::ui::theme::BG_DARK,
        nodes,
        hit_regions,
    }
}

/// Shorten `text` to `max_chars`, marking the cut with an ellipsis.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}
