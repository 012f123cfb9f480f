use serde::{Deserialize, Serialize};

/// Visual constants shared by layout and scene building.
///
/// Every field carries a default so a partial `chart` section in the settings
/// file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GanttConfig {
    pub row_height: f32,
    pub bar_height: f32,
    pub header_height: f32,
    pub left_panel_width: f32,
    /// Horizontal indent of the task label per hierarchy level.
    pub indent_per_level: f32,
    /// Bars never get narrower than this, so one-day tasks stay clickable.
    pub min_bar_width: f32,
    pub arrow_stroke_width: f32,
    /// Days added before the earliest and after the latest task.
    pub date_padding_days: i64,
    /// Bars narrower than this hide their percentage label.
    pub progress_label_min_width: f32,
    /// Horizontal clearance needed for a plain S-curve arrow.
    pub arrow_gap: f32,
    /// Length of the horizontal stubs of a detoured arrow.
    pub arrow_step: f32,
}

impl Default for GanttConfig {
    fn default() -> Self {
        Self {
            row_height: 40.0,
            bar_height: 24.0,
            header_height: 60.0,
            left_panel_width: 250.0,
            indent_per_level: 20.0,
            min_bar_width: 20.0,
            arrow_stroke_width: 1.5,
            date_padding_days: 7,
            progress_label_min_width: 40.0,
            arrow_gap: 20.0,
            arrow_step: 10.0,
        }
    }
}

impl GanttConfig {
    /// Vertical offset of a bar inside its row.
    pub fn bar_inset(&self) -> f32 {
        ((self.row_height - self.bar_height) / 2.0).max(0.0)
    }
}
