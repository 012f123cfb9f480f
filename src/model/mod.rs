pub mod api;
pub mod config;
pub mod task;
pub mod timeline;

pub use api::{ApiTask, GanttApiResponse};
pub use config::GanttConfig;
pub use task::{GanttDependency, GanttTask, TaskPriority, TaskStatus};
pub use timeline::{GanttLayout, TaskPosition, ZoomLevel};
