use chrono::{Datelike, Days, NaiveDate, Weekday};

use super::{days_between, month_bounds};
use crate::model::{GanttLayout, ZoomLevel};

/// One tick of the secondary header row, clipped to the layout range.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeUnit {
    pub start: NaiveDate,
    /// Inclusive.
    pub end: NaiveDate,
    pub x: f32,
    pub width: f32,
    pub label: String,
    /// Coarser label shared by the ticks of one primary header cell.
    pub group_label: String,
    pub is_weekend: bool,
}

/// A run of consecutive ticks sharing the same coarse label.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryHeader {
    pub label: String,
    pub x: f32,
    pub width: f32,
    /// Number of ticks covered.
    pub span: usize,
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn unit(layout: &GanttLayout, start: NaiveDate, end: NaiveDate, label: String, group_label: String) -> TimeUnit {
    TimeUnit {
        start,
        end,
        x: layout.date_to_x(start),
        width: (days_between(start, end) + 1) as f32 * layout.pixels_per_day,
        label,
        group_label,
        is_weekend: start == end && is_weekend(start),
    }
}

/// Enumerate header ticks across the layout range at the layout's zoom.
pub fn get_time_units(layout: &GanttLayout) -> Vec<TimeUnit> {
    get_time_units_between(layout, layout.start_date, layout.end_date)
}

/// Ticks touching `[from, to]`, each clipped to the layout range rather than
/// to the window.
pub fn get_time_units_between(layout: &GanttLayout, from: NaiveDate, to: NaiveDate) -> Vec<TimeUnit> {
    let (range_start, range_end) = (layout.start_date, layout.end_date);
    let last = to.min(range_end);
    let mut units = Vec::new();
    let mut cursor = from.max(range_start);

    while cursor <= last {
        let tick_end = match layout.zoom {
            ZoomLevel::Day => {
                units.push(unit(
                    layout,
                    cursor,
                    cursor,
                    cursor.day().to_string(),
                    cursor.format("%B %Y").to_string(),
                ));
                cursor
            }
            ZoomLevel::Week => {
                let offset = u64::from(cursor.weekday().num_days_from_monday());
                let week_start = cursor.checked_sub_days(Days::new(offset)).unwrap_or(range_start);
                let week_end = week_start.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);
                let start = week_start.max(range_start);
                let end = week_end.min(range_end);
                units.push(unit(
                    layout,
                    start,
                    end,
                    week_start.format("W%V").to_string(),
                    start.format("%B %Y").to_string(),
                ));
                end
            }
            ZoomLevel::Month => {
                let (first, month_last) = month_bounds(cursor);
                let start = first.max(range_start);
                let end = month_last.min(range_end);
                units.push(unit(
                    layout,
                    start,
                    end,
                    start.format("%b").to_string(),
                    start.format("%Y").to_string(),
                ));
                end
            }
        };
        match tick_end.succ_opt() {
            Some(next) => cursor = next,
            None => break,
        }
    }
    units
}

/// Group consecutive ticks with the same `group_label` into spanned cells.
pub fn get_primary_headers(units: &[TimeUnit]) -> Vec<PrimaryHeader> {
    let mut headers: Vec<PrimaryHeader> = Vec::new();
    let mut current: Option<PrimaryHeader> = None;

    for tick in units {
        match current.as_mut() {
            Some(run) if run.label == tick.group_label => {
                run.width += tick.width;
                run.span += 1;
            }
            _ => {
                if let Some(done) = current.take() {
                    headers.push(done);
                }
                current = Some(PrimaryHeader {
                    label: tick.group_label.clone(),
                    x: tick.x,
                    width: tick.width,
                    span: 1,
                });
            }
        }
    }
    headers.extend(current);
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::calculate_layout;
    use crate::model::{GanttConfig, GanttTask};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn layout_for(zoom: ZoomLevel, start: NaiveDate, end: NaiveDate) -> GanttLayout {
        let config = GanttConfig {
            date_padding_days: 0,
            ..Default::default()
        };
        let tasks = vec![GanttTask::new(1, "Span").with_dates(start, end)];
        calculate_layout(&tasks, zoom, &config, start)
    }

    #[test]
    fn day_ticks_cover_every_day_and_flag_weekends() {
        let layout = layout_for(ZoomLevel::Day, date(2024, 1, 29), date(2024, 2, 4));
        let units = get_time_units(&layout);
        assert_eq!(units.len(), 7);
        assert_eq!(units[0].label, "29");
        assert_eq!(units[0].x, layout.left_panel_width);
        assert_eq!(units[3].label, "1");
        let weekends: Vec<bool> = units.iter().map(|u| u.is_weekend).collect();
        assert_eq!(weekends, vec![false, false, false, false, false, true, true]);
    }

    #[test]
    fn week_ticks_are_clipped_to_range() {
        // Wednesday to the following Tuesday.
        let layout = layout_for(ZoomLevel::Week, date(2024, 1, 3), date(2024, 1, 16));
        let units = get_time_units(&layout);
        assert_eq!(units.len(), 3);
        assert_eq!(units[0].start, date(2024, 1, 3));
        assert_eq!(units[0].end, date(2024, 1, 7));
        assert_eq!(units[0].width, 5.0 * 15.0);
        assert_eq!(units[1].start, date(2024, 1, 8));
        assert_eq!(units[1].width, 7.0 * 15.0);
        assert_eq!(units[2].end, date(2024, 1, 16));

        let total: f32 = units.iter().map(|u| u.width).sum();
        assert_eq!(total, layout.total_days as f32 * layout.pixels_per_day);
    }

    #[test]
    fn month_ticks_group_by_year() {
        let layout = layout_for(ZoomLevel::Month, date(2023, 11, 15), date(2024, 2, 10));
        let units = get_time_units(&layout);
        let labels: Vec<&str> = units.iter().map(|u| u.label.as_str()).collect();
        assert_eq!(labels, vec!["Nov", "Dec", "Jan", "Feb"]);

        let headers = get_primary_headers(&units);
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[0].label, "2023");
        assert_eq!(headers[0].span, 2);
        assert_eq!(headers[1].label, "2024");
        assert_eq!(headers[1].span, 2);
        assert_eq!(headers[1].x, units[2].x);
        assert_eq!(headers[1].width, units[2].width + units[3].width);
    }

    #[test]
    fn day_headers_group_by_month() {
        let layout = layout_for(ZoomLevel::Day, date(2024, 1, 30), date(2024, 2, 2));
        let headers = get_primary_headers(&get_time_units(&layout));
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[0].label, "January 2024");
        assert_eq!(headers[0].span, 2);
        assert_eq!(headers[0].width, 80.0);
        assert_eq!(headers[1].label, "February 2024");
        assert_eq!(headers[1].span, 2);
    }

    #[test]
    fn primary_headers_of_nothing_is_empty() {
        assert!(get_primary_headers(&[]).is_empty());
    }

    #[test]
    fn window_yields_only_touching_ticks() {
        let layout = layout_for(ZoomLevel::Week, date(2024, 1, 3), date(2024, 3, 29));
        // Wednesday to the following Tuesday touches two weeks.
        let units = get_time_units_between(&layout, date(2024, 1, 17), date(2024, 1, 23));
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].start, date(2024, 1, 15));
        assert_eq!(units[1].end, date(2024, 1, 28));
        assert_eq!(units, get_time_units(&layout)[2..4].to_vec());
    }

    #[test]
    fn window_outside_range_is_empty() {
        let layout = layout_for(ZoomLevel::Day, date(2024, 1, 1), date(2024, 1, 10));
        assert!(get_time_units_between(&layout, date(2024, 2, 1), date(2024, 2, 5)).is_empty());
        assert_eq!(get_time_units_between(&layout, date(2023, 1, 1), date(2024, 1, 2)).len(), 2);
    }
}
