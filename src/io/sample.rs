use chrono::{Duration, NaiveDate};

use crate::model::{ApiTask, GanttApiResponse};
use crate::model::api::ApiDateRange;

fn iso(date: NaiveDate) -> Option<String> {
    Some(date.format("%Y-%m-%d").to_string())
}

#[allow(clippy::too_many_arguments)]
fn task(
    id: i64,
    subject: &str,
    status: &str,
    priority: &str,
    progress: Option<f64>,
    span: Option<(i64, i64)>,
    parent: Option<i64>,
    depends_on: &[i64],
    today: NaiveDate,
) -> ApiTask {
    ApiTask {
        id,
        subject: subject.to_string(),
        status: status.to_string(),
        priority: priority.to_string(),
        progress,
        exp_start_date: span.and_then(|(s, _)| iso(today + Duration::days(s))),
        exp_end_date: span.and_then(|(_, e)| iso(today + Duration::days(e))),
        assigned_to: None,
        parent_task_id: parent,
        is_group: false,
        depends_on: depends_on.to_vec(),
    }
}

/// Demonstration schedule placed around `today`, shown on first launch.
pub fn sample_response(today: NaiveDate) -> GanttApiResponse {
    // ── Phase 1: Planning ───────────────────────────────────────
    let mut planning = task(1, "Planning", "Working", "High", Some(70.0), Some((-12, 4)), None, &[], today);
    planning.is_group = true;

    let mut kickoff = task(2, "Project Kickoff", "Completed", "Medium", Some(100.0), Some((-12, -10)), Some(1), &[], today);
    kickoff.assigned_to = Some("pm@example.com".into());

    let mut requirements =
        task(3, "Requirements Gathering", "In Progress", "High", Some(60.0), Some((-9, -2)), Some(1), &[2], today);
    requirements.assigned_to = Some("analyst@example.com".into());

    let review = task(4, "Scope Review", "pending-review", "Medium", None, Some((-1, 4)), Some(1), &[3], today);

    // ── Phase 2: Execution ──────────────────────────────────────
    let mut execution = task(5, "Execution", "Open", "Medium", Some(10.0), Some((3, 40)), None, &[], today);
    execution.is_group = true;

    let mut design = task(6, "UI Design", "working", "Medium", Some(25.0), Some((3, 14)), Some(5), &[4], today);
    design.assigned_to = Some("designer@example.com".into());

    let backend = task(7, "Backend Development", "open", "urgent", Some(0.0), Some((5, 30)), Some(5), &[4], today);
    let api = task(8, "API Contracts", "open", "high", Some(0.0), Some((6, 12)), Some(7), &[], today);
    let qa = task(9, "Testing & QA", "open", "medium", Some(0.0), Some((26, 38)), Some(5), &[6, 7], today);
    let launch = task(10, "Launch", "open", "urgent", None, Some((40, 40)), None, &[9], today);

    // Odd ones out: overdue work and an unscheduled task.
    let audit = task(11, "Security Audit", "open", "high", Some(40.0), Some((-20, -5)), None, &[], today);
    let docs = task(12, "Write Documentation", "open", "low", None, None, None, &[], today);

    let tasks = vec![
        planning, kickoff, requirements, review, execution, design, backend, api, qa, launch, audit, docs,
    ];

    GanttApiResponse {
        tasks,
        date_range: ApiDateRange {
            min_date: iso(today - Duration::days(20)),
            max_date: iso(today + Duration::days(40)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskStatus;
    use crate::transform::{extract_dependencies, sort_tasks_for_gantt, transform_api_tasks};

    #[test]
    fn sample_normalizes_into_a_full_schedule() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let tasks = sort_tasks_for_gantt(transform_api_tasks(&sample_response(today)));

        assert_eq!(tasks.len(), 12);
        assert_eq!(tasks[0].subject, "Security Audit");
        assert!(tasks.iter().any(|t| t.depth == 2));
        assert!(tasks.iter().any(|t| !t.has_dates()));
        assert!(tasks
            .iter()
            .any(|t| t.display_status(today) == TaskStatus::Overdue));
        assert_eq!(extract_dependencies(&tasks).len(), 7);
    }
}
