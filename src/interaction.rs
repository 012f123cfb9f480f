//! Chart-local interaction state: zoom, hover, scroll and the layout memo.
//!
//! Nothing here touches egui directly; the chart widget feeds pointer and
//! scroll events in and reads the results back, which keeps all of it
//! testable without a UI context.

use chrono::NaiveDate;
use egui::Pos2;

use crate::layout::{calculate_layout, get_today_x};
use crate::model::{GanttConfig, GanttLayout, GanttTask, ZoomLevel};

/// Seconds between the first layout and the automatic scroll to today.
pub const AUTO_CENTER_DELAY: f64 = 0.1;

// ── Zoom ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ZoomMode {
    /// The host owns the value and pushes it back through `sync`.
    Controlled,
    /// The chart owns the value.
    Uncontrolled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomState {
    mode: ZoomMode,
    value: ZoomLevel,
}

impl ZoomState {
    pub fn controlled(value: ZoomLevel) -> Self {
        Self {
            mode: ZoomMode::Controlled,
            value,
        }
    }

    pub fn uncontrolled(value: ZoomLevel) -> Self {
        Self {
            mode: ZoomMode::Uncontrolled,
            value,
        }
    }

    pub fn value(&self) -> ZoomLevel {
        self.value
    }

    #[cfg(test)]
    pub fn is_controlled(&self) -> bool {
        self.mode == ZoomMode::Controlled
    }

    /// User asked for `zoom`. Returns the change to notify the host about, or
    /// `None` when nothing changed. Only uncontrolled state updates itself.
    pub fn request(&mut self, zoom: ZoomLevel) -> Option<ZoomLevel> {
        if zoom == self.value {
            return None;
        }
        if self.mode == ZoomMode::Uncontrolled {
            self.value = zoom;
        }
        Some(zoom)
    }

    /// Host-supplied value. Ignored in uncontrolled mode.
    pub fn sync(&mut self, value: ZoomLevel) {
        if self.mode == ZoomMode::Controlled {
            self.value = value;
        }
    }
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::uncontrolled(ZoomLevel::default())
    }
}

// ── Hover ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering { task_id: i64, pointer: Pos2 },
}

impl HoverState {
    /// Pointer entered a task row. Replaces any previous hover.
    pub fn enter(&mut self, task_id: i64, pointer: Pos2) {
        *self = HoverState::Hovering { task_id, pointer };
    }

    /// Pointer moved. No-op while idle.
    pub fn track(&mut self, pointer: Pos2) {
        if let HoverState::Hovering { pointer: p, .. } = self {
            *p = pointer;
        }
    }

    /// Pointer left `task_id`. A stale leave for another row is ignored.
    pub fn leave(&mut self, task_id: i64) {
        if self.task_id() == Some(task_id) {
            *self = HoverState::Idle;
        }
    }

    pub fn clear(&mut self) {
        *self = HoverState::Idle;
    }

    pub fn task_id(&self) -> Option<i64> {
        match self {
            HoverState::Hovering { task_id, .. } => Some(*task_id),
            HoverState::Idle => None,
        }
    }

    pub fn pointer(&self) -> Option<Pos2> {
        match self {
            HoverState::Hovering { pointer, .. } => Some(*pointer),
            HoverState::Idle => None,
        }
    }
}

// ── Scroll ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrollState {
    offset: f32,
    pending: Option<f32>,
    auto_center_at: Option<f64>,
    auto_centered: bool,
}

impl ScrollState {
    /// Queue a horizontal offset that puts today in the middle of a viewport
    /// `viewport_width` wide. Returns `false` when today is off the chart.
    pub fn scroll_to_today(&mut self, layout: &GanttLayout, today: NaiveDate, viewport_width: f32) -> bool {
        match get_today_x(layout, today) {
            Some(x) => {
                self.pending = Some((x - viewport_width / 2.0).max(0.0));
                true
            }
            None => false,
        }
    }

    /// Called after every layout at time `now` (seconds). The first call arms
    /// a one-shot timer; once it is due, today is centered. Returns `true` on
    /// the frame the automatic centering fires.
    pub fn on_layout(&mut self, now: f64, layout: &GanttLayout, today: NaiveDate, viewport_width: f32) -> bool {
        if self.auto_centered {
            return false;
        }
        let due = *self.auto_center_at.get_or_insert(now + AUTO_CENTER_DELAY);
        if now < due {
            return false;
        }
        self.auto_centered = true;
        self.scroll_to_today(layout, today, viewport_width)
    }

    /// The automatic centering is armed but has not fired yet.
    pub fn is_waiting(&self) -> bool {
        !self.auto_centered && self.auto_center_at.is_some()
    }

    pub fn take_pending(&mut self) -> Option<f32> {
        self.pending.take()
    }

    pub fn record_offset(&mut self, offset: f32) {
        self.offset = offset;
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }
}

// ── Memo ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
struct MemoKey {
    revision: u64,
    zoom: ZoomLevel,
    config: GanttConfig,
    today: NaiveDate,
}

/// Last computed layout, reused while the data revision, zoom, config and
/// today are unchanged.
#[derive(Debug, Default)]
pub struct LayoutMemo {
    entry: Option<(MemoKey, GanttLayout)>,
    computed: usize,
}

impl LayoutMemo {
    pub fn get(
        &mut self,
        revision: u64,
        tasks: &[GanttTask],
        zoom: ZoomLevel,
        config: &GanttConfig,
        today: NaiveDate,
    ) -> &GanttLayout {
        let key = MemoKey {
            revision,
            zoom,
            config: config.clone(),
            today,
        };
        if self.entry.as_ref().is_some_and(|(cached, _)| *cached != key) {
            self.entry = None;
        }
        if self.entry.is_none() {
            self.computed += 1;
            tracing::trace!(revision, ?zoom, computed = self.computed, "recomputing layout");
        }
        &self
            .entry
            .get_or_insert_with(|| (key, calculate_layout(tasks, zoom, config, today)))
            .1
    }

    /// Number of layouts computed so far.
    #[cfg(test)]
    pub fn computed(&self) -> usize {
        self.computed
    }
}

// ── Controller ──────────────────────────────────────────────────────────────

/// What happened in the chart this frame, for the host to act on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartInteraction {
    pub clicked_task: Option<GanttTask>,
    pub zoom_changed: Option<ZoomLevel>,
}

#[derive(Debug, Default)]
pub struct ChartController {
    pub zoom: ZoomState,
    pub hover: HoverState,
    pub scroll: ScrollState,
    pub memo: LayoutMemo,
}

impl ChartController {
    pub fn new(zoom: ZoomState) -> Self {
        Self {
            zoom,
            ..Default::default()
        }
    }

    /// New data arrived; hover refers to rows that may no longer exist.
    pub fn data_replaced(&mut self) {
        self.hover.clear();
    }
}

/// Clicked task, looked up by id so the host receives the full record.
pub fn clicked_task(tasks: &[GanttTask], task_id: i64) -> Option<GanttTask> {
    tasks.iter().find(|t| t.id == task_id).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn layout() -> GanttLayout {
        let tasks = vec![GanttTask::new(1, "A").with_dates(date(2024, 1, 1), date(2024, 3, 1))];
        calculate_layout(&tasks, ZoomLevel::Day, &GanttConfig::default(), date(2024, 1, 1))
    }

    #[test]
    fn uncontrolled_zoom_updates_itself_and_notifies() {
        let mut zoom = ZoomState::uncontrolled(ZoomLevel::Week);
        assert_eq!(zoom.request(ZoomLevel::Day), Some(ZoomLevel::Day));
        assert_eq!(zoom.value(), ZoomLevel::Day);
        assert_eq!(zoom.request(ZoomLevel::Day), None);
        zoom.sync(ZoomLevel::Month);
        assert_eq!(zoom.value(), ZoomLevel::Day);
    }

    #[test]
    fn controlled_zoom_waits_for_host() {
        let mut zoom = ZoomState::controlled(ZoomLevel::Week);
        assert_eq!(zoom.request(ZoomLevel::Month), Some(ZoomLevel::Month));
        assert_eq!(zoom.value(), ZoomLevel::Week);
        zoom.sync(ZoomLevel::Month);
        assert_eq!(zoom.value(), ZoomLevel::Month);
    }

    #[test]
    fn hover_tracks_one_task_at_a_time() {
        let mut hover = HoverState::default();
        hover.track(Pos2::new(1.0, 1.0));
        assert_eq!(hover, HoverState::Idle);

        hover.enter(3, Pos2::new(10.0, 10.0));
        hover.track(Pos2::new(12.0, 11.0));
        assert_eq!(hover.pointer(), Some(Pos2::new(12.0, 11.0)));

        hover.enter(4, Pos2::new(20.0, 50.0));
        hover.leave(3);
        assert_eq!(hover.task_id(), Some(4));
        hover.leave(4);
        assert_eq!(hover.task_id(), None);
        assert_eq!(hover.pointer(), None);
    }

    #[test]
    fn scroll_to_today_centers_and_clamps() {
        let layout = layout();
        let mut scroll = ScrollState::default();
        // Range starts 2023-12-25; today sits 30 days in at 40 px/day.
        assert!(scroll.scroll_to_today(&layout, date(2024, 1, 24), 600.0));
        assert_eq!(scroll.take_pending(), Some(250.0 + 30.0 * 40.0 - 300.0));
        assert_eq!(scroll.take_pending(), None);

        assert!(scroll.scroll_to_today(&layout, date(2023, 12, 26), 2000.0));
        assert_eq!(scroll.take_pending(), Some(0.0));

        assert!(!scroll.scroll_to_today(&layout, date(2025, 1, 1), 600.0));
        assert_eq!(scroll.take_pending(), None);
    }

    #[test]
    fn auto_center_fires_once_after_delay() {
        let layout = layout();
        let today = date(2024, 1, 24);
        let mut scroll = ScrollState::default();

        assert!(!scroll.on_layout(1.0, &layout, today, 600.0));
        assert!(scroll.is_waiting());
        assert!(!scroll.on_layout(1.05, &layout, today, 600.0));
        assert!(scroll.on_layout(1.0 + AUTO_CENTER_DELAY, &layout, today, 600.0));
        assert!(scroll.take_pending().is_some());

        assert!(!scroll.on_layout(5.0, &layout, today, 600.0));
        assert!(!scroll.is_waiting());
        assert_eq!(scroll.take_pending(), None);
    }

    #[test]
    fn memo_recomputes_only_when_key_changes() {
        let tasks = vec![GanttTask::new(1, "A").with_dates(date(2024, 1, 1), date(2024, 1, 5))];
        let config = GanttConfig::default();
        let today = date(2024, 1, 2);
        let mut memo = LayoutMemo::default();

        let width = memo.get(1, &tasks, ZoomLevel::Week, &config, today).chart_width;
        memo.get(1, &tasks, ZoomLevel::Week, &config, today);
        assert_eq!(memo.computed(), 1);

        let day_width = memo.get(1, &tasks, ZoomLevel::Day, &config, today).chart_width;
        assert!(day_width > width);
        memo.get(2, &tasks, ZoomLevel::Day, &config, today);
        memo.get(2, &tasks, ZoomLevel::Day, &config, date(2024, 1, 3));
        assert_eq!(memo.computed(), 4);
    }

    #[test]
    fn click_reports_full_task() {
        let tasks = vec![GanttTask::new(7, "Seven")];
        assert_eq!(clicked_task(&tasks, 7).map(|t| t.subject), Some("Seven".into()));
        assert!(clicked_task(&tasks, 8).is_none());
    }

    #[test]
    fn replacing_data_clears_hover() {
        let mut controller = ChartController::new(ZoomState::controlled(ZoomLevel::Month));
        controller.hover.enter(1, Pos2::ZERO);
        controller.data_replaced();
        assert_eq!(controller.hover, HoverState::Idle);
        assert!(controller.zoom.is_controlled());
    }
}
