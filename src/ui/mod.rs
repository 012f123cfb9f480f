pub mod gantt_chart;
pub mod painter;
pub mod theme;
pub mod toolbar;
pub mod tooltip;
