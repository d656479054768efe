use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn default_owner() -> String {
    "None".to_string()
}

/// A named container of tasks, keyed in the store by a `proj_xxxxxxxx` id.
///
/// The id itself is the map key in [`crate::store::GanttStore`] and in the
/// persisted snapshot; it is not repeated inside the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default = "default_owner")]
    pub owner: String,
    #[serde(default)]
    pub tasks: BTreeMap<String, Task>,
    pub created_at: DateTime<Utc>,
}

/// A scheduled unit of work within a project.
///
/// `duration_days` is always consistent with the inclusive date span:
/// `end_date - start_date + 1`. The store recomputes it whenever either
/// date or the duration changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_owner")]
    pub owner: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: i64,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub progress: u8,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Result of creating a project
#[derive(Debug, Clone, Serialize)]
pub struct CreatedProject {
    pub id: String,
    pub name: String,
    pub owner: String,
}

/// One row of the project listing
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub task_count: usize,
}

/// One row of a task listing, sorted by start date
#[derive(Debug, Clone, Serialize)]
pub struct TaskSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub owner: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: i64,
    pub progress: u8,
}

/// Project context embedded in task details
#[derive(Debug, Clone, Serialize)]
pub struct ProjectInfo {
    pub id: String,
    pub name: String,
    pub owner: String,
}

/// Full task record plus its project context
#[derive(Debug, Clone, Serialize)]
pub struct TaskDetail {
    #[serde(flatten)]
    pub task: Task,
    pub project: ProjectInfo,
}

/// Result of deleting a task
#[derive(Debug, Clone, Serialize)]
pub struct DeletedTask {
    pub id: String,
    pub name: String,
}

/// Result of deleting a project
#[derive(Debug, Clone, Serialize)]
pub struct DeletedProject {
    pub id: String,
    pub name: String,
    pub task_count: usize,
}

/// Result of adding or removing a dependency edge
#[derive(Debug, Clone, Serialize)]
pub struct DependencyChange {
    pub task_id: String,
    pub task_name: String,
    pub depends_on: String,
    pub depends_on_name: String,
}

/// New task input. Dates are ISO strings; the store parses and validates them.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub name: String,
    pub description: String,
    pub owner: String,
    pub start_date: Option<String>,
    pub duration_days: i64,
    pub end_date: Option<String>,
}

impl Default for NewTask {
    fn default() -> Self {
        NewTask {
            name: String::new(),
            description: String::new(),
            owner: default_owner(),
            start_date: None,
            duration_days: 1,
            end_date: None,
        }
    }
}

/// Task update input. `None` fields keep their prior values.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub owner: Option<String>,
    pub start_date: Option<String>,
    pub duration_days: Option<i64>,
    pub end_date: Option<String>,
    pub progress: Option<i64>,
}
