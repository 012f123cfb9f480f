//! Tooltip content and placement. Needs only the hovered task and the
//! pointer; never the layout.

use chrono::NaiveDate;
use egui::{Pos2, Rect, Vec2};

use crate::model::{GanttTask, TaskPriority, TaskStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    pub title: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub start: String,
    pub end: String,
    pub duration: String,
    pub progress: String,
    pub assignee: String,
    pub dependencies: String,
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%b %d, %Y").to_string())
        .unwrap_or_else(|| "Not set".to_string())
}

impl TooltipContent {
    pub fn for_task(task: &GanttTask, today: NaiveDate) -> Self {
        let duration = match task.duration_days() {
            Some(1) => "1 day".to_string(),
            Some(days) => format!("{} days", days),
            None => "—".to_string(),
        };
        Self {
            title: task.subject.clone(),
            status: task.display_status(today),
            priority: task.priority,
            start: format_date(task.start_date),
            end: format_date(task.end_date),
            duration,
            progress: format!("{:.0}%", task.progress),
            assignee: task
                .assigned_to
                .clone()
                .unwrap_or_else(|| "Unassigned".to_string()),
            dependencies: task.depends_on.len().to_string(),
        }
    }

    /// Label/value pairs in display order, after the title and status.
    pub fn rows(&self) -> [(&'static str, &str); 7] {
        [
            ("Start", self.start.as_str()),
            ("End", self.end.as_str()),
            ("Duration", self.duration.as_str()),
            ("Progress", self.progress.as_str()),
            ("Priority", self.priority.label()),
            ("Assignee", self.assignee.as_str()),
            ("Depends on", self.dependencies.as_str()),
        ]
    }
}

/// Top-left corner for a tooltip of `size` near `pointer`, flipped to the
/// other side of the cursor when it would overflow `viewport` on the right or
/// bottom, then clamped inside.
pub fn place_tooltip(pointer: Pos2, size: Vec2, viewport: Rect, offset: f32) -> Pos2 {
    let mut x = pointer.x + offset;
    if x + size.x > viewport.max.x {
        x = pointer.x - offset - size.x;
    }
    let mut y = pointer.y + offset;
    if y + size.y > viewport.max.y {
        y = pointer.y - offset - size.y;
    }
    Pos2::new(
        x.min(viewport.max.x - size.x).max(viewport.min.x),
        y.min(viewport.max.y - size.y).max(viewport.min.y),
    )
}
