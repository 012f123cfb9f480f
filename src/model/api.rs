//! Wire types of the task-timeline endpoint.
//!
//! Field names follow the JSON payload. Everything optional carries a serde
//! default so sparse payloads still parse; normalization happens later in
//! `transform`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GanttApiResponse {
    pub tasks: Vec<ApiTask>,
    pub date_range: ApiDateRange,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiTask {
    pub id: i64,
    pub subject: String,
    pub status: String,
    pub priority: String,
    pub progress: Option<f64>,
    pub exp_start_date: Option<String>,
    pub exp_end_date: Option<String>,
    pub assigned_to: Option<String>,
    pub parent_task_id: Option<i64>,
    pub is_group: bool,
    pub depends_on: Vec<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiDateRange {
    pub min_date: Option<String>,
    pub max_date: Option<String>,
}
