//! Normalizes the raw timeline payload into [`GanttTask`]s.
//!
//! Upstream sources are not guaranteed to use the canonical enum spellings or
//! valid dates, so everything here degrades to a safe default instead of
//! failing: unknown statuses become `open`, unknown priorities `medium`, and
//! unparsable dates `None`.

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, NaiveDateTime};

use crate::model::{
    ApiTask, GanttApiResponse, GanttDependency, GanttTask, TaskPriority, TaskStatus,
};

/// Lowercase, trim, and unify `-`/space separators to `_`.
fn normalize_key(s: &str) -> String {
    s.trim().to_lowercase().replace([' ', '-'], "_")
}

/// Map a free-text status onto [`TaskStatus`].
pub fn normalize_status(raw: &str) -> TaskStatus {
    match normalize_key(raw).as_str() {
        "working" | "in_progress" | "inprogress" | "active" | "started" => TaskStatus::Working,
        "pending_review" | "pendingreview" | "review" | "in_review" => TaskStatus::PendingReview,
        "completed" | "complete" | "done" | "closed" | "finished" => TaskStatus::Completed,
        "cancelled" | "canceled" => TaskStatus::Cancelled,
        // "overdue" is derived at render time and never stored.
        _ => TaskStatus::Open,
    }
}

/// Map a free-text priority onto [`TaskPriority`].
pub fn normalize_priority(raw: &str) -> TaskPriority {
    match normalize_key(raw).as_str() {
        "low" | "lowest" => TaskPriority::Low,
        "high" => TaskPriority::High,
        "urgent" | "critical" | "highest" => TaskPriority::Urgent,
        _ => TaskPriority::Medium,
    }
}

/// Parse an ISO calendar date, tolerating a trailing time component.
pub fn parse_api_date(raw: Option<&str>) -> Option<NaiveDate> {
    let s = raw?.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// Clamp an optional percentage into `0..=100`; missing or NaN is zero.
fn normalize_progress(raw: Option<f64>) -> f32 {
    match raw {
        Some(p) if p.is_finite() => p.clamp(0.0, 100.0) as f32,
        _ => 0.0,
    }
}

fn transform_task(raw: &ApiTask) -> GanttTask {
    GanttTask {
        id: raw.id,
        subject: raw.subject.clone(),
        status: normalize_status(&raw.status),
        priority: normalize_priority(&raw.priority),
        progress: normalize_progress(raw.progress),
        start_date: parse_api_date(raw.exp_start_date.as_deref()),
        end_date: parse_api_date(raw.exp_end_date.as_deref()),
        assigned_to: raw
            .assigned_to
            .as_ref()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty()),
        parent_task_id: raw.parent_task_id,
        depth: 0,
        is_group: raw.is_group,
        depends_on: raw.depends_on.clone(),
    }
}

/// Number of ancestors of `task_id` present in `parents`.
///
/// The walk stops at a parent outside the set. If the chain loops back on
/// itself, the depth is whatever was counted before the repeat.
pub fn calculate_depth(task_id: i64, parents: &HashMap<i64, Option<i64>>) -> usize {
    let mut depth = 0;
    let mut visited = HashSet::from([task_id]);
    let mut current = parents.get(&task_id).copied().flatten();

    while let Some(parent_id) = current {
        let Some(next) = parents.get(&parent_id) else {
            break;
        };
        if !visited.insert(parent_id) {
            break;
        }
        depth += 1;
        current = *next;
    }
    depth
}

/// Convert the API payload into normalized tasks, in payload order.
pub fn transform_api_tasks(response: &GanttApiResponse) -> Vec<GanttTask> {
    let mut tasks: Vec<GanttTask> = response.tasks.iter().map(transform_task).collect();

    let parents: HashMap<i64, Option<i64>> = tasks
        .iter()
        .map(|t| (t.id, t.parent_task_id))
        .collect();
    for task in &mut tasks {
        task.depth = calculate_depth(task.id, &parents);
    }

    tracing::debug!(count = tasks.len(), "normalized timeline tasks");
    tasks
}

/// One edge per `(predecessor, task)` pair, in task then `depends_on` order.
/// Predecessors missing from `tasks` are kept; the renderer filters them.
pub fn extract_dependencies(tasks: &[GanttTask]) -> Vec<GanttDependency> {
    tasks
        .iter()
        .flat_map(|task| {
            task.depends_on.iter().map(move |&from| GanttDependency {
                from_task_id: from,
                to_task_id: task.id,
            })
        })
        .collect()
}

fn sort_key(task: &GanttTask) -> (bool, Option<NaiveDate>, String) {
    (
        task.start_date.is_none(),
        task.start_date,
        task.subject.to_lowercase(),
    )
}

/// Order tasks as a tree: roots by start date then name, each followed by its
/// children in the same order. Orphans (parent not in the set) and tasks only
/// reachable through a parent cycle follow at the end in input order.
pub fn sort_tasks_for_gantt(tasks: Vec<GanttTask>) -> Vec<GanttTask> {
    let ids: HashSet<i64> = tasks.iter().map(|t| t.id).collect();

    let mut children: HashMap<i64, Vec<usize>> = HashMap::new();
    let mut roots: Vec<usize> = Vec::new();
    for (idx, task) in tasks.iter().enumerate() {
        match task.parent_task_id {
            None => roots.push(idx),
            Some(parent) if ids.contains(&parent) => {
                children.entry(parent).or_default().push(idx)
            }
            Some(_) => {}
        }
    }

    let by_key = |a: &usize, b: &usize| sort_key(&tasks[*a]).cmp(&sort_key(&tasks[*b]));
    roots.sort_by(by_key);
    for list in children.values_mut() {
        list.sort_by(by_key);
    }

    let mut order: Vec<usize> = Vec::with_capacity(tasks.len());
    let mut visited: HashSet<usize> = HashSet::new();
    for &root in &roots {
        push_subtree(root, &tasks, &children, &mut visited, &mut order);
    }
    // Orphans and cycle members, keeping their own subtrees together.
    for idx in 0..tasks.len() {
        push_subtree(idx, &tasks, &children, &mut visited, &mut order);
    }

    let mut slots: Vec<Option<GanttTask>> = tasks.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|idx| slots[idx].take())
        .collect()
}

/// Iterative pre-order walk; the visited set stops parent cycles.
fn push_subtree(
    start: usize,
    tasks: &[GanttTask],
    children: &HashMap<i64, Vec<usize>>,
    visited: &mut HashSet<usize>,
    order: &mut Vec<usize>,
) {
    let mut stack = vec![start];
    while let Some(idx) = stack.pop() {
        if !visited.insert(idx) {
            continue;
        }
        order.push(idx);
        if let Some(kids) = children.get(&tasks[idx].id) {
            stack.extend(kids.iter().rev().copied());
        }
    }
}
