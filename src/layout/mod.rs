//! Date-to-pixel layout for the timeline.
//!
//! Everything here is a pure function of the task list, the zoom level and the
//! [`GanttConfig`]. `today` is only consulted when no task carries dates, to
//! fall back on the current month.

pub mod time_units;

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};

use crate::model::{GanttConfig, GanttLayout, GanttTask, TaskPosition, ZoomLevel};

pub use time_units::{get_primary_headers, get_time_units, get_time_units_between};

/// Signed number of calendar days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// First and last day of the month containing `date`.
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date.with_day(1).unwrap_or(date);
    let next_month = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    let last = next_month
        .and_then(|d| d.pred_opt())
        .unwrap_or(first + Duration::days(30));
    (first, last)
}

/// Span covered by all dated tasks, padded on both sides.
///
/// Only tasks with both dates count. Without any, the range is the calendar
/// month containing `today`.
pub fn calculate_date_range(
    tasks: &[GanttTask],
    today: NaiveDate,
    padding_days: i64,
) -> (NaiveDate, NaiveDate) {
    let dated = tasks.iter().filter_map(GanttTask::dates);
    let (min, max) = dated.fold(None, |acc: Option<(NaiveDate, NaiveDate)>, (start, end)| {
        Some(match acc {
            None => (start, end),
            Some((lo, hi)) => (lo.min(start), hi.max(end)),
        })
    })
    .unwrap_or_else(|| month_bounds(today));

    // An inverted single task would otherwise produce an empty range.
    let (min, max) = if max < min { (max, min) } else { (min, max) };
    let padding = Duration::try_days(padding_days.max(0)).unwrap_or(Duration::zero());
    (
        min.checked_sub_signed(padding).unwrap_or(NaiveDate::MIN),
        max.checked_add_signed(padding).unwrap_or(NaiveDate::MAX),
    )
}

/// Bar width for a dated task: whole days inclusive, at least one day, never
/// below the configured minimum.
pub fn bar_width(start: NaiveDate, end: NaiveDate, pixels_per_day: f32, min_bar_width: f32) -> f32 {
    let days = (days_between(start, end) + 1).max(1) as f32;
    (days * pixels_per_day).max(min_bar_width)
}

/// Widest chart laid out at the requested zoom. Past this, f32 x coordinates
/// stop resolving half pixels.
pub const MAX_CHART_WIDTH: f32 = 4_194_304.0;

/// Zoom used for `total_days`: the requested level, stepped out while the
/// chart would be wider than [`MAX_CHART_WIDTH`]. Month is never stepped out of.
pub fn fit_zoom(requested: ZoomLevel, total_days: i64, left_panel_width: f32) -> ZoomLevel {
    let mut zoom = requested;
    while zoom != ZoomLevel::Month
        && left_panel_width + total_days as f32 * zoom.pixels_per_day() > MAX_CHART_WIDTH
    {
        zoom = zoom.zoom_out();
    }
    zoom
}

/// Compute chart bounds and every bar position in one pass.
///
/// Row order is the order of `tasks`; dateless tasks keep their row but get no
/// entry in `task_positions`. `layout.zoom` is the zoom after [`fit_zoom`].
pub fn calculate_layout(
    tasks: &[GanttTask],
    requested: ZoomLevel,
    config: &GanttConfig,
    today: NaiveDate,
) -> GanttLayout {
    let (start_date, end_date) = calculate_date_range(tasks, today, config.date_padding_days);
    let total_days = days_between(start_date, end_date) + 1;
    let zoom = fit_zoom(requested, total_days, config.left_panel_width);
    if zoom != requested {
        tracing::debug!(?requested, ?zoom, total_days, "range too wide, zooming out");
    }
    let pixels_per_day = zoom.pixels_per_day();

    let mut task_positions = HashMap::with_capacity(tasks.len());
    for (row, task) in tasks.iter().enumerate() {
        let Some((start, end)) = task.dates() else {
            continue;
        };
        let x = config.left_panel_width + days_between(start_date, start) as f32 * pixels_per_day;
        let width = bar_width(start, end, pixels_per_day, config.min_bar_width);
        let y = row as f32 * config.row_height + config.header_height;
        task_positions.insert(task.id, TaskPosition { x, y, width });
    }

    GanttLayout {
        chart_width: config.left_panel_width + total_days as f32 * pixels_per_day,
        chart_height: tasks.len() as f32 * config.row_height + config.header_height,
        start_date,
        end_date,
        total_days,
        pixels_per_day,
        zoom,
        left_panel_width: config.left_panel_width,
        header_height: config.header_height,
        row_height: config.row_height,
        task_positions,
    }
}

/// X coordinate of `today`, or `None` when it falls outside the padded range.
pub fn get_today_x(layout: &GanttLayout, today: NaiveDate) -> Option<f32> {
    if !layout.contains(today) {
        return None;
    }
    Some(layout.date_to_x(today))
}
