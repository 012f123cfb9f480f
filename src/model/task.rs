use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Workflow status as stored on a task. `Overdue` is only ever produced by
/// [`GanttTask::display_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Open,
    Working,
    PendingReview,
    Completed,
    Cancelled,
    Overdue,
}

impl TaskStatus {
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Open => "Open",
            TaskStatus::Working => "Working",
            TaskStatus::PendingReview => "Pending Review",
            TaskStatus::Completed => "Completed",
            TaskStatus::Cancelled => "Cancelled",
            TaskStatus::Overdue => "Overdue",
        }
    }

    /// Canonical wire name, as the API spells it.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Open => "open",
            TaskStatus::Working => "working",
            TaskStatus::PendingReview => "pending_review",
            TaskStatus::Completed => "completed",
            TaskStatus::Cancelled => "cancelled",
            TaskStatus::Overdue => "overdue",
        }
    }

    /// Finished statuses never turn overdue.
    pub fn is_closed(self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Cancelled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    pub fn label(self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
            TaskPriority::Urgent => "Urgent",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
            TaskPriority::Urgent => "urgent",
        }
    }
}

/// A directed finish-to-start edge: `to_task_id` depends on `from_task_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GanttDependency {
    pub from_task_id: i64,
    pub to_task_id: i64,
}

/// A normalized, schedulable unit of work on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GanttTask {
    pub id: i64,
    pub subject: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    /// Percentage complete, always within `0.0..=100.0`.
    pub progress: f32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub assigned_to: Option<String>,
    pub parent_task_id: Option<i64>,
    /// Distance from the nearest root along the parent chain.
    pub depth: usize,
    /// Summary task hint; only changes the row glyph.
    pub is_group: bool,
    /// Predecessor ids, in the order the API listed them.
    pub depends_on: Vec<i64>,
}

impl GanttTask {
    /// Create an open, medium-priority task with no dates.
    pub fn new(id: i64, subject: impl Into<String>) -> Self {
        Self {
            id,
            subject: subject.into(),
            status: TaskStatus::Open,
            priority: TaskPriority::Medium,
            progress: 0.0,
            start_date: None,
            end_date: None,
            assigned_to: None,
            parent_task_id: None,
            depth: 0,
            is_group: false,
            depends_on: Vec::new(),
        }
    }

    pub fn with_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Both ends of the span, only when the task can be drawn as a bar.
    pub fn dates(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    pub fn has_dates(&self) -> bool {
        self.dates().is_some()
    }

    /// Inclusive day count of the span. Inverted ranges count as one day.
    pub fn duration_days(&self) -> Option<i64> {
        self.dates()
            .map(|(start, end)| ((end - start).num_days() + 1).max(1))
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        match self.end_date {
            Some(end) => end < today && !self.status.is_closed(),
            None => false,
        }
    }

    /// Status shown to the user: the stored status, or `Overdue` once the end
    /// date has passed on an unfinished task.
    pub fn display_status(&self, today: NaiveDate) -> TaskStatus {
        if self.is_overdue(today) {
            TaskStatus::Overdue
        } else {
            self.status
        }
    }
}
