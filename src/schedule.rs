use chrono::NaiveDate;

use crate::layout::calculate_layout;
use crate::model::{GanttApiResponse, GanttConfig, GanttDependency, GanttTask, ZoomLevel};
use crate::scene::{build_scene, ChartOptions, Scene, SceneInput};
use crate::transform::{extract_dependencies, sort_tasks_for_gantt, transform_api_tasks};

/// Normalized tasks in display order, with the dependency edges between them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    pub tasks: Vec<GanttTask>,
    pub dependencies: Vec<GanttDependency>,
}

impl Schedule {
    pub fn from_response(response: &GanttApiResponse) -> Self {
        let tasks = sort_tasks_for_gantt(transform_api_tasks(response));
        let dependencies = extract_dependencies(&tasks);
        Self { tasks, dependencies }
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Full scene for a static render, with nothing hovered.
    pub fn render(&self, zoom: ZoomLevel, config: &GanttConfig, options: &ChartOptions, today: NaiveDate) -> Scene {
        let layout = calculate_layout(&self.tasks, zoom, config, today);
        build_scene(&SceneInput {
            tasks: &self.tasks,
            dependencies: &self.dependencies,
            layout: &layout,
            config,
            options,
            hovered: None,
            today,
            visible: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ApiTask;
    use crate::scene::NodeKey;

    fn api_task(id: i64, subject: &str, parent: Option<i64>, depends_on: Vec<i64>) -> ApiTask {
        ApiTask {
            id,
            subject: subject.into(),
            exp_start_date: Some("2024-01-01".into()),
            exp_end_date: Some("2024-01-04".into()),
            parent_task_id: parent,
            depends_on,
            ..Default::default()
        }
    }

    #[test]
    fn response_becomes_sorted_schedule_and_scene() {
        let response = GanttApiResponse {
            tasks: vec![
                api_task(2, "Child", Some(1), vec![3]),
                api_task(3, "Other root", None, vec![]),
                api_task(1, "Root", None, vec![]),
            ],
            ..Default::default()
        };
        let schedule = Schedule::from_response(&response);
        let order: Vec<i64> = schedule.tasks.iter().map(|t| t.id).collect();
        assert_eq!(order, vec![3, 1, 2]);
        assert_eq!(schedule.dependencies.len(), 1);

        let today = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let scene = schedule.render(ZoomLevel::Day, &GanttConfig::default(), &ChartOptions::default(), today);
        assert!(scene.node(NodeKey::Arrow { from: 3, to: 2 }).is_some());
        assert_eq!(scene.hit_regions.len(), 3);
    }
}
