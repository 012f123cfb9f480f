use std::path::Path;

use chrono::NaiveDate;

use super::file::ExportError;
use crate::model::GanttTask;

const HEADER: [&str; 12] = [
    "ID",
    "Task",
    "Parent",
    "Depth",
    "Status",
    "Priority",
    "Start Date",
    "End Date",
    "Duration (days)",
    "Progress (%)",
    "Assignee",
    "Depends On",
];

fn date_cell(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

/// Write the normalized schedule as semicolon-delimited CSV, one row per task
/// in display order. Status is the displayed one, so overdue tasks say so.
/// Returns the number of tasks written.
pub fn write_csv<W: std::io::Write>(tasks: &[GanttTask], today: NaiveDate, writer: W) -> Result<usize, ExportError> {
    let mut wtr = csv::WriterBuilder::new().delimiter(b';').from_writer(writer);
    wtr.write_record(HEADER)?;

    for task in tasks {
        let depends_on = task
            .depends_on
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        wtr.write_record([
            task.id.to_string(),
            task.subject.clone(),
            task.parent_task_id.map(|id| id.to_string()).unwrap_or_default(),
            task.depth.to_string(),
            task.display_status(today).as_str().to_string(),
            task.priority.as_str().to_string(),
            date_cell(task.start_date),
            date_cell(task.end_date),
            task.duration_days().map(|d| d.to_string()).unwrap_or_default(),
            format!("{:.0}", task.progress),
            task.assigned_to.clone().unwrap_or_default(),
            depends_on,
        ])?;
    }

    wtr.flush().map_err(|e| ExportError::Csv(e.into()))?;
    Ok(tasks.len())
}

/// Export the schedule to a CSV file at `path`.
pub fn export_csv(tasks: &[GanttTask], today: NaiveDate, path: &Path) -> Result<usize, ExportError> {
    if tasks.is_empty() {
        return Err(ExportError::Empty);
    }
    let file = std::fs::File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let count = write_csv(tasks, today, file)?;
    tracing::info!(path = %path.display(), count, "exported CSV");
    Ok(count)
}
