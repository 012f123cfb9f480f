use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Controls the timeline granularity and the fixed pixel scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomLevel {
    Day,
    #[default]
    Week,
    Month,
}

impl ZoomLevel {
    pub const ALL: [ZoomLevel; 3] = [ZoomLevel::Day, ZoomLevel::Week, ZoomLevel::Month];

    /// Fixed ratio; the chart scrolls instead of reflowing to the viewport.
    pub fn pixels_per_day(self) -> f32 {
        match self {
            ZoomLevel::Day => 40.0,
            ZoomLevel::Week => 15.0,
            ZoomLevel::Month => 4.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ZoomLevel::Day => "Day",
            ZoomLevel::Week => "Week",
            ZoomLevel::Month => "Month",
        }
    }

    /// One step towards more detail, saturating at `Day`.
    pub fn zoom_in(self) -> Self {
        match self {
            ZoomLevel::Month => ZoomLevel::Week,
            _ => ZoomLevel::Day,
        }
    }

    /// One step towards less detail, saturating at `Month`.
    pub fn zoom_out(self) -> Self {
        match self {
            ZoomLevel::Day => ZoomLevel::Week,
            _ => ZoomLevel::Month,
        }
    }
}

impl std::str::FromStr for ZoomLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "days" => Ok(ZoomLevel::Day),
            "week" | "weeks" => Ok(ZoomLevel::Week),
            "month" | "months" => Ok(ZoomLevel::Month),
            other => Err(format!("unknown zoom level '{}' (expected day, week or month)", other)),
        }
    }
}

/// Pixel placement of one task bar. `y` is the top of the task's row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskPosition {
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

/// Geometry for one render pass. Built fresh by `layout::calculate_layout`.
#[derive(Debug, Clone, PartialEq)]
pub struct GanttLayout {
    pub chart_width: f32,
    pub chart_height: f32,
    /// Leftmost date, padding included.
    pub start_date: NaiveDate,
    /// Rightmost date, padding included.
    pub end_date: NaiveDate,
    pub total_days: i64,
    pub pixels_per_day: f32,
    pub zoom: ZoomLevel,
    pub left_panel_width: f32,
    pub header_height: f32,
    pub row_height: f32,
    /// Only tasks with both dates appear here.
    pub task_positions: HashMap<i64, TaskPosition>,
}

impl GanttLayout {
    /// Convert a date to an absolute x coordinate on the chart.
    pub fn date_to_x(&self, date: NaiveDate) -> f32 {
        let days = (date - self.start_date).num_days() as f32;
        self.left_panel_width + days * self.pixels_per_day
    }

    /// Convert an absolute x coordinate back to the date under it. Saturates at
    /// the calendar limits.
    pub fn x_to_date(&self, x: f32) -> NaiveDate {
        let days = ((x - self.left_panel_width) / self.pixels_per_day).floor() as i64;
        chrono::Duration::try_days(days)
            .and_then(|offset| self.start_date.checked_add_signed(offset))
            .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    pub fn position(&self, task_id: i64) -> Option<&TaskPosition> {
        self.task_positions.get(&task_id)
    }
}
