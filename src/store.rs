use crate::error::{GanttError, Result};
use crate::models::{
    CreatedProject, DeletedProject, DeletedTask, DependencyChange, NewTask, Project, ProjectInfo,
    ProjectSummary, Task, TaskDetail, TaskSummary, TaskUpdate,
};
use crate::storage::Storage;
use chrono::{Duration, Local, NaiveDate, Utc};
use std::collections::BTreeMap;
use std::path::Path;
use uuid::Uuid;

/// In-memory project/task collection with invariant enforcement.
///
/// Every mutating operation validates its input first, applies the change,
/// and then writes the full collection through [`Storage`]. Failed
/// operations leave both memory and the snapshot untouched.
pub struct GanttStore {
    projects: BTreeMap<String, Project>,
    storage: Storage,
}

impl GanttStore {
    /// Open a store backed by the given snapshot file, loading any existing
    /// collection. A missing or unreadable snapshot yields an empty store.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let storage = Storage::new(path);
        let projects = storage.load();
        GanttStore { projects, storage }
    }

    pub fn data_file(&self) -> &Path {
        self.storage.path()
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    pub fn task_count(&self) -> usize {
        self.projects.values().map(|p| p.tasks.len()).sum()
    }

    // ==================== Project Operations ====================

    /// Create a new project with an empty task map.
    pub fn create_project(&mut self, name: &str, owner: &str) -> Result<CreatedProject> {
        if name.trim().is_empty() {
            return Err(GanttError::EmptyProjectName);
        }

        let id = loop {
            let candidate = fresh_id("proj");
            if !self.projects.contains_key(&candidate) {
                break candidate;
            }
        };

        self.projects.insert(
            id.clone(),
            Project {
                name: name.to_string(),
                owner: owner.to_string(),
                tasks: BTreeMap::new(),
                created_at: Utc::now(),
            },
        );
        self.persist()?;

        Ok(CreatedProject {
            id,
            name: name.to_string(),
            owner: owner.to_string(),
        })
    }

    /// List all projects. Order follows the id map and is not significant.
    pub fn list_projects(&self) -> Vec<ProjectSummary> {
        self.projects
            .iter()
            .map(|(id, project)| ProjectSummary {
                id: id.clone(),
                name: project.name.clone(),
                owner: project.owner.clone(),
                task_count: project.tasks.len(),
            })
            .collect()
    }

    /// Full snapshot of one project. The clone keeps caller mutation away
    /// from store state.
    pub fn project_data(&self, project_id: &str) -> Result<Project> {
        self.get_project(project_id).cloned()
    }

    /// Delete a project and everything in it.
    pub fn delete_project(&mut self, project_id: &str) -> Result<DeletedProject> {
        let project = self
            .projects
            .remove(project_id)
            .ok_or_else(|| GanttError::ProjectNotFound(project_id.to_string()))?;
        self.persist()?;

        Ok(DeletedProject {
            id: project_id.to_string(),
            name: project.name,
            task_count: project.tasks.len(),
        })
    }

    // ==================== Task Operations ====================

    /// List a project's tasks sorted ascending by start date.
    pub fn project_tasks(&self, project_id: &str) -> Result<Vec<TaskSummary>> {
        let project = self.get_project(project_id)?;

        let mut summaries: Vec<TaskSummary> = project
            .tasks
            .values()
            .map(|task| TaskSummary {
                id: task.id.clone(),
                name: task.name.clone(),
                description: task.description.clone(),
                owner: task.owner.clone(),
                start_date: task.start_date,
                end_date: task.end_date,
                duration_days: task.duration_days,
                progress: task.progress,
            })
            .collect();
        summaries.sort_by_key(|t| t.start_date);

        Ok(summaries)
    }

    /// Full task record plus its project context.
    pub fn task_details(&self, project_id: &str, task_id: &str) -> Result<TaskDetail> {
        let project = self.get_project(project_id)?;
        let task = project
            .tasks
            .get(task_id)
            .ok_or_else(|| task_not_found(project_id, task_id))?;

        Ok(TaskDetail {
            task: task.clone(),
            project: ProjectInfo {
                id: project_id.to_string(),
                name: project.name.clone(),
                owner: project.owner.clone(),
            },
        })
    }

    /// Add a task. The missing one of {end date, duration} is derived from
    /// the other; start defaults to today.
    pub fn add_task(&mut self, project_id: &str, new: NewTask) -> Result<Task> {
        if !self.projects.contains_key(project_id) {
            return Err(GanttError::ProjectNotFound(project_id.to_string()));
        }
        if new.name.trim().is_empty() {
            return Err(GanttError::EmptyTaskName);
        }
        if new.duration_days <= 0 {
            return Err(GanttError::NonPositiveDuration);
        }

        let start = match &new.start_date {
            Some(s) => parse_date("start date", s)?,
            None => Local::now().date_naive(),
        };
        let (end, duration_days) = match &new.end_date {
            Some(e) => {
                let end = parse_date("end date", e)?;
                let duration = (end - start).num_days() + 1;
                if duration <= 0 {
                    return Err(GanttError::EndBeforeStart);
                }
                (end, duration)
            }
            None => (end_from_duration(start, new.duration_days)?, new.duration_days),
        };

        let project = self
            .projects
            .get_mut(project_id)
            .ok_or_else(|| GanttError::ProjectNotFound(project_id.to_string()))?;
        let id = loop {
            let candidate = fresh_id("task");
            if !project.tasks.contains_key(&candidate) {
                break candidate;
            }
        };

        let task = Task {
            id: id.clone(),
            name: new.name,
            description: new.description,
            owner: new.owner,
            start_date: start,
            end_date: end,
            duration_days,
            dependencies: Vec::new(),
            progress: 0,
            created_at: Utc::now(),
            updated_at: None,
        };
        project.tasks.insert(id, task.clone());
        self.persist()?;

        Ok(task)
    }

    /// Apply a partial update. All validation happens against a working copy,
    /// so a rejected update leaves the stored task unchanged.
    pub fn update_task(
        &mut self,
        project_id: &str,
        task_id: &str,
        update: TaskUpdate,
    ) -> Result<Task> {
        if update.end_date.is_some() && update.duration_days.is_some() {
            return Err(GanttError::ConflictingDateParams);
        }

        let project = self
            .projects
            .get_mut(project_id)
            .ok_or_else(|| GanttError::ProjectNotFound(project_id.to_string()))?;
        let mut task = project
            .tasks
            .get(task_id)
            .ok_or_else(|| task_not_found(project_id, task_id))?
            .clone();

        if let Some(name) = update.name {
            if name.trim().is_empty() {
                return Err(GanttError::EmptyTaskName);
            }
            task.name = name;
        }
        if let Some(description) = update.description {
            task.description = description;
        }
        if let Some(owner) = update.owner {
            task.owner = owner;
        }

        let mut start = task.start_date;
        let start_changed = match &update.start_date {
            Some(s) => {
                start = parse_date("start date", s)?;
                true
            }
            None => false,
        };

        if let Some(e) = &update.end_date {
            let end = parse_date("end date", e)?;
            let duration = (end - start).num_days() + 1;
            if duration <= 0 {
                return Err(GanttError::EndBeforeStart);
            }
            task.end_date = end;
            task.duration_days = duration;
        } else if let Some(duration) = update.duration_days {
            if duration <= 0 {
                return Err(GanttError::NonPositiveDuration);
            }
            task.end_date = end_from_duration(start, duration)?;
            task.duration_days = duration;
        } else if start_changed {
            // Keep the duration and slide the end date with the new start.
            task.end_date = end_from_duration(start, task.duration_days)?;
        }
        task.start_date = start;

        if let Some(progress) = update.progress {
            if !(0..=100).contains(&progress) {
                return Err(GanttError::ProgressOutOfRange(progress));
            }
            task.progress = progress as u8;
        }

        task.updated_at = Some(Utc::now());
        project.tasks.insert(task_id.to_string(), task.clone());
        self.persist()?;

        Ok(task)
    }

    /// Delete a task. Refused while any other task in the project lists it
    /// as a dependency.
    pub fn delete_task(&mut self, project_id: &str, task_id: &str) -> Result<DeletedTask> {
        let project = self
            .projects
            .get_mut(project_id)
            .ok_or_else(|| GanttError::ProjectNotFound(project_id.to_string()))?;
        let name = project
            .tasks
            .get(task_id)
            .ok_or_else(|| task_not_found(project_id, task_id))?
            .name
            .clone();

        let dependents: Vec<String> = project
            .tasks
            .values()
            .filter(|t| t.id != task_id && t.dependencies.iter().any(|d| d == task_id))
            .map(|t| t.name.clone())
            .collect();
        if !dependents.is_empty() {
            return Err(GanttError::HasDependents { name, dependents });
        }

        project.tasks.remove(task_id);
        self.persist()?;

        Ok(DeletedTask {
            id: task_id.to_string(),
            name,
        })
    }

    // ==================== Dependency Operations ====================

    /// Record that `task_id` depends on `depends_on` (same project only).
    pub fn add_dependency(
        &mut self,
        project_id: &str,
        task_id: &str,
        depends_on: &str,
    ) -> Result<DependencyChange> {
        if task_id == depends_on {
            return Err(GanttError::SelfDependency);
        }

        let project = self
            .projects
            .get_mut(project_id)
            .ok_or_else(|| GanttError::ProjectNotFound(project_id.to_string()))?;
        let depends_on_name = project
            .tasks
            .get(depends_on)
            .ok_or_else(|| task_not_found(project_id, depends_on))?
            .name
            .clone();
        let task = project
            .tasks
            .get_mut(task_id)
            .ok_or_else(|| task_not_found(project_id, task_id))?;

        if task.dependencies.iter().any(|d| d == depends_on) {
            return Err(GanttError::DependencyExists {
                task_id: task_id.to_string(),
                depends_on: depends_on.to_string(),
            });
        }
        task.dependencies.push(depends_on.to_string());
        task.updated_at = Some(Utc::now());
        let task_name = task.name.clone();
        self.persist()?;

        Ok(DependencyChange {
            task_id: task_id.to_string(),
            task_name,
            depends_on: depends_on.to_string(),
            depends_on_name,
        })
    }

    /// Remove a previously recorded dependency edge.
    pub fn remove_dependency(
        &mut self,
        project_id: &str,
        task_id: &str,
        depends_on: &str,
    ) -> Result<DependencyChange> {
        let project = self
            .projects
            .get_mut(project_id)
            .ok_or_else(|| GanttError::ProjectNotFound(project_id.to_string()))?;
        let depends_on_name = project
            .tasks
            .get(depends_on)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| depends_on.to_string());
        let task = project
            .tasks
            .get_mut(task_id)
            .ok_or_else(|| task_not_found(project_id, task_id))?;

        let before = task.dependencies.len();
        task.dependencies.retain(|d| d != depends_on);
        if task.dependencies.len() == before {
            return Err(GanttError::DependencyMissing {
                task_id: task_id.to_string(),
                depends_on: depends_on.to_string(),
            });
        }
        task.updated_at = Some(Utc::now());
        let task_name = task.name.clone();
        self.persist()?;

        Ok(DependencyChange {
            task_id: task_id.to_string(),
            task_name,
            depends_on: depends_on.to_string(),
            depends_on_name,
        })
    }

    // ==================== Helper Methods ====================

    fn get_project(&self, project_id: &str) -> Result<&Project> {
        self.projects
            .get(project_id)
            .ok_or_else(|| GanttError::ProjectNotFound(project_id.to_string()))
    }

    fn persist(&self) -> Result<()> {
        self.storage.save(&self.projects)
    }
}

fn task_not_found(project_id: &str, task_id: &str) -> GanttError {
    GanttError::TaskNotFound {
        project_id: project_id.to_string(),
        task_id: task_id.to_string(),
    }
}

fn fresh_id(prefix: &str) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{prefix}_{}", &hex[..8])
}

/// Inclusive end date for `duration` days starting at `start`. Durations
/// that overflow the calendar range are a validation error, not a panic.
fn end_from_duration(start: NaiveDate, duration: i64) -> Result<NaiveDate> {
    Duration::try_days(duration - 1)
        .and_then(|span| start.checked_add_signed(span))
        .ok_or(GanttError::DurationTooLong)
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| GanttError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (GanttStore, TempDir) {
        let temp = TempDir::new().unwrap();
        let store = GanttStore::open(temp.path().join("gantt_data.json"));
        (store, temp)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn add_dated_task(store: &mut GanttStore, project: &str, name: &str, start: &str, days: i64) -> Task {
        store
            .add_task(
                project,
                NewTask {
                    name: name.to_string(),
                    start_date: Some(start.to_string()),
                    duration_days: days,
                    ..NewTask::default()
                },
            )
            .unwrap()
    }

    #[test]
    fn create_project_rejects_empty_name() {
        let (mut store, _temp) = setup();
        assert!(matches!(
            store.create_project("   ", "None"),
            Err(GanttError::EmptyProjectName)
        ));
        assert!(store.list_projects().is_empty());
    }

    #[test]
    fn create_project_generates_prefixed_id() {
        let (mut store, _temp) = setup();
        let created = store.create_project("Launch", "ada").unwrap();
        assert!(created.id.starts_with("proj_"));
        assert_eq!(created.id.len(), "proj_".len() + 8);

        let listed = store.list_projects();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Launch");
        assert_eq!(listed[0].owner, "ada");
        assert_eq!(listed[0].task_count, 0);
    }

    #[test]
    fn add_task_derives_end_from_duration() {
        let (mut store, _temp) = setup();
        let project = store.create_project("Launch", "None").unwrap();
        let task = add_dated_task(&mut store, &project.id, "Design", "2024-01-01", 3);

        assert!(task.id.starts_with("task_"));
        assert_eq!(task.start_date, date(2024, 1, 1));
        assert_eq!(task.end_date, date(2024, 1, 3));
        assert_eq!(task.duration_days, 3);
        assert_eq!(task.progress, 0);
        assert!(task.dependencies.is_empty());

        // Details report the same values back.
        let detail = store.task_details(&project.id, &task.id).unwrap();
        assert_eq!(detail.task.end_date, date(2024, 1, 3));
        assert_eq!(detail.project.name, "Launch");
    }

    #[test]
    fn add_task_derives_duration_from_end() {
        let (mut store, _temp) = setup();
        let project = store.create_project("Launch", "None").unwrap();
        let task = store
            .add_task(
                &project.id,
                NewTask {
                    name: "Build".to_string(),
                    start_date: Some("2024-01-01".to_string()),
                    end_date: Some("2024-01-05".to_string()),
                    ..NewTask::default()
                },
            )
            .unwrap();

        assert_eq!(task.duration_days, 5);
        assert_eq!(task.end_date, date(2024, 1, 5));
    }

    #[test]
    fn add_task_single_day_when_end_equals_start() {
        let (mut store, _temp) = setup();
        let project = store.create_project("Launch", "None").unwrap();
        let task = store
            .add_task(
                &project.id,
                NewTask {
                    name: "Kickoff".to_string(),
                    start_date: Some("2024-01-01".to_string()),
                    end_date: Some("2024-01-01".to_string()),
                    ..NewTask::default()
                },
            )
            .unwrap();
        assert_eq!(task.duration_days, 1);
    }

    #[test]
    fn add_task_rejects_end_before_start() {
        let (mut store, _temp) = setup();
        let project = store.create_project("Launch", "None").unwrap();
        let result = store.add_task(
            &project.id,
            NewTask {
                name: "Bad".to_string(),
                start_date: Some("2024-01-05".to_string()),
                end_date: Some("2024-01-01".to_string()),
                ..NewTask::default()
            },
        );
        assert!(matches!(result, Err(GanttError::EndBeforeStart)));
    }

    #[test]
    fn add_task_rejects_bad_inputs() {
        let (mut store, _temp) = setup();
        let project = store.create_project("Launch", "None").unwrap();

        assert!(matches!(
            store.add_task(&project.id, NewTask { name: " ".to_string(), ..NewTask::default() }),
            Err(GanttError::EmptyTaskName)
        ));
        assert!(matches!(
            store.add_task(
                &project.id,
                NewTask {
                    name: "X".to_string(),
                    duration_days: 0,
                    ..NewTask::default()
                }
            ),
            Err(GanttError::NonPositiveDuration)
        ));
        assert!(matches!(
            store.add_task(
                &project.id,
                NewTask {
                    name: "X".to_string(),
                    start_date: Some("01/02/2024".to_string()),
                    ..NewTask::default()
                }
            ),
            Err(GanttError::InvalidDate { field: "start date", .. })
        ));
        assert!(matches!(
            store.add_task("proj_missing", NewTask { name: "X".to_string(), ..NewTask::default() }),
            Err(GanttError::ProjectNotFound(_))
        ));
    }

    #[test]
    fn add_task_rejects_duration_past_calendar_range() {
        let (mut store, _temp) = setup();
        let project = store.create_project("Launch", "None").unwrap();

        for duration in [i64::MAX, 1_000_000_000_000] {
            let result = store.add_task(
                &project.id,
                NewTask {
                    name: "Forever".to_string(),
                    start_date: Some("2024-01-01".to_string()),
                    duration_days: duration,
                    ..NewTask::default()
                },
            );
            assert!(matches!(result, Err(GanttError::DurationTooLong)));
        }
        assert_eq!(store.task_count(), 0);
    }

    #[test]
    fn update_rejects_duration_past_calendar_range() {
        let (mut store, _temp) = setup();
        let project = store.create_project("Launch", "None").unwrap();
        let task = add_dated_task(&mut store, &project.id, "Design", "2024-01-01", 3);

        let result = store.update_task(
            &project.id,
            &task.id,
            TaskUpdate { duration_days: Some(i64::MAX), ..TaskUpdate::default() },
        );
        assert!(matches!(result, Err(GanttError::DurationTooLong)));

        // Stored task is untouched after the rejected update.
        let detail = store.task_details(&project.id, &task.id).unwrap();
        assert_eq!(detail.task.duration_days, 3);
        assert_eq!(detail.task.end_date, date(2024, 1, 3));
    }

    #[test]
    fn add_task_defaults_start_to_today() {
        let (mut store, _temp) = setup();
        let project = store.create_project("Launch", "None").unwrap();
        let task = store
            .add_task(&project.id, NewTask { name: "Today".to_string(), ..NewTask::default() })
            .unwrap();

        let today = Local::now().date_naive();
        assert_eq!(task.start_date, today);
        assert_eq!(task.end_date, today);
        assert_eq!(task.duration_days, 1);
    }

    #[test]
    fn project_tasks_sorted_by_start_date() {
        let (mut store, _temp) = setup();
        let project = store.create_project("Launch", "None").unwrap();
        add_dated_task(&mut store, &project.id, "Later", "2024-02-01", 2);
        add_dated_task(&mut store, &project.id, "Earlier", "2024-01-01", 2);
        add_dated_task(&mut store, &project.id, "Middle", "2024-01-15", 2);

        let names: Vec<String> = store
            .project_tasks(&project.id)
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["Earlier", "Middle", "Later"]);
    }

    #[test]
    fn project_data_is_a_detached_copy() {
        let (mut store, _temp) = setup();
        let project = store.create_project("Launch", "None").unwrap();
        add_dated_task(&mut store, &project.id, "Design", "2024-01-01", 3);

        let mut copy = store.project_data(&project.id).unwrap();
        copy.tasks.clear();
        copy.name = "Mutated".to_string();

        let fresh = store.project_data(&project.id).unwrap();
        assert_eq!(fresh.name, "Launch");
        assert_eq!(fresh.tasks.len(), 1);
    }

    #[test]
    fn update_rejects_end_and_duration_together() {
        let (mut store, _temp) = setup();
        let project = store.create_project("Launch", "None").unwrap();
        let task = add_dated_task(&mut store, &project.id, "Design", "2024-01-01", 3);

        let result = store.update_task(
            &project.id,
            &task.id,
            TaskUpdate {
                end_date: Some("2024-01-10".to_string()),
                duration_days: Some(4),
                ..TaskUpdate::default()
            },
        );
        assert!(matches!(result, Err(GanttError::ConflictingDateParams)));

        // Unchanged after the failed update.
        let detail = store.task_details(&project.id, &task.id).unwrap();
        assert_eq!(detail.task.end_date, date(2024, 1, 3));
        assert_eq!(detail.task.duration_days, 3);
        assert!(detail.task.updated_at.is_none());
    }

    #[test]
    fn update_progress_validated() {
        let (mut store, _temp) = setup();
        let project = store.create_project("Launch", "None").unwrap();
        let task = add_dated_task(&mut store, &project.id, "Design", "2024-01-01", 3);

        let result = store.update_task(
            &project.id,
            &task.id,
            TaskUpdate { progress: Some(150), ..TaskUpdate::default() },
        );
        assert!(matches!(result, Err(GanttError::ProgressOutOfRange(150))));

        let updated = store
            .update_task(
                &project.id,
                &task.id,
                TaskUpdate { progress: Some(50), ..TaskUpdate::default() },
            )
            .unwrap();
        assert_eq!(updated.progress, 50);
        // Dates untouched by a progress-only update.
        assert_eq!(updated.start_date, date(2024, 1, 1));
        assert_eq!(updated.end_date, date(2024, 1, 3));
        assert!(updated.updated_at.is_some());
    }

    #[test]
    fn update_start_only_slides_end_keeping_duration() {
        let (mut store, _temp) = setup();
        let project = store.create_project("Launch", "None").unwrap();
        let task = add_dated_task(&mut store, &project.id, "Design", "2024-01-01", 3);

        let updated = store
            .update_task(
                &project.id,
                &task.id,
                TaskUpdate {
                    start_date: Some("2024-02-10".to_string()),
                    ..TaskUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(updated.start_date, date(2024, 2, 10));
        assert_eq!(updated.end_date, date(2024, 2, 12));
        assert_eq!(updated.duration_days, 3);
    }

    #[test]
    fn update_duration_recomputes_end() {
        let (mut store, _temp) = setup();
        let project = store.create_project("Launch", "None").unwrap();
        let task = add_dated_task(&mut store, &project.id, "Design", "2024-01-01", 3);

        let updated = store
            .update_task(
                &project.id,
                &task.id,
                TaskUpdate { duration_days: Some(10), ..TaskUpdate::default() },
            )
            .unwrap();
        assert_eq!(updated.end_date, date(2024, 1, 10));
        assert_eq!(updated.duration_days, 10);
    }

    #[test]
    fn update_end_recomputes_duration_against_new_start() {
        let (mut store, _temp) = setup();
        let project = store.create_project("Launch", "None").unwrap();
        let task = add_dated_task(&mut store, &project.id, "Design", "2024-01-01", 3);

        let updated = store
            .update_task(
                &project.id,
                &task.id,
                TaskUpdate {
                    start_date: Some("2024-01-02".to_string()),
                    end_date: Some("2024-01-08".to_string()),
                    ..TaskUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(updated.duration_days, 7);
    }

    #[test]
    fn update_rejects_empty_name() {
        let (mut store, _temp) = setup();
        let project = store.create_project("Launch", "None").unwrap();
        let task = add_dated_task(&mut store, &project.id, "Design", "2024-01-01", 3);

        let result = store.update_task(
            &project.id,
            &task.id,
            TaskUpdate { name: Some("  ".to_string()), ..TaskUpdate::default() },
        );
        assert!(matches!(result, Err(GanttError::EmptyTaskName)));
    }

    #[test]
    fn delete_blocked_by_dependents_then_allowed() {
        let (mut store, _temp) = setup();
        let project = store.create_project("Launch", "None").unwrap();
        let design = add_dated_task(&mut store, &project.id, "Design", "2024-01-01", 3);
        let build = add_dated_task(&mut store, &project.id, "Build", "2024-01-04", 5);

        store
            .add_dependency(&project.id, &build.id, &design.id)
            .unwrap();

        let result = store.delete_task(&project.id, &design.id);
        match result {
            Err(GanttError::HasDependents { name, dependents }) => {
                assert_eq!(name, "Design");
                assert_eq!(dependents, vec!["Build".to_string()]);
            }
            other => panic!("expected HasDependents, got {other:?}"),
        }

        // Deleting the dependent first unblocks the prerequisite.
        store.delete_task(&project.id, &build.id).unwrap();
        let deleted = store.delete_task(&project.id, &design.id).unwrap();
        assert_eq!(deleted.name, "Design");
    }

    #[test]
    fn removing_dependency_unblocks_deletion() {
        let (mut store, _temp) = setup();
        let project = store.create_project("Launch", "None").unwrap();
        let design = add_dated_task(&mut store, &project.id, "Design", "2024-01-01", 3);
        let build = add_dated_task(&mut store, &project.id, "Build", "2024-01-04", 5);

        store
            .add_dependency(&project.id, &build.id, &design.id)
            .unwrap();
        store
            .remove_dependency(&project.id, &build.id, &design.id)
            .unwrap();

        assert!(store.delete_task(&project.id, &design.id).is_ok());
    }

    #[test]
    fn dependency_validation() {
        let (mut store, _temp) = setup();
        let project = store.create_project("Launch", "None").unwrap();
        let design = add_dated_task(&mut store, &project.id, "Design", "2024-01-01", 3);
        let build = add_dated_task(&mut store, &project.id, "Build", "2024-01-04", 5);

        assert!(matches!(
            store.add_dependency(&project.id, &design.id, &design.id),
            Err(GanttError::SelfDependency)
        ));
        assert!(matches!(
            store.add_dependency(&project.id, &build.id, "task_missing"),
            Err(GanttError::TaskNotFound { .. })
        ));

        store
            .add_dependency(&project.id, &build.id, &design.id)
            .unwrap();
        assert!(matches!(
            store.add_dependency(&project.id, &build.id, &design.id),
            Err(GanttError::DependencyExists { .. })
        ));
        assert!(matches!(
            store.remove_dependency(&project.id, &design.id, &build.id),
            Err(GanttError::DependencyMissing { .. })
        ));
    }

    #[test]
    fn delete_project_reports_task_count() {
        let (mut store, _temp) = setup();
        let project = store.create_project("Launch", "None").unwrap();
        add_dated_task(&mut store, &project.id, "Design", "2024-01-01", 3);
        add_dated_task(&mut store, &project.id, "Build", "2024-01-04", 5);

        let deleted = store.delete_project(&project.id).unwrap();
        assert_eq!(deleted.task_count, 2);
        assert!(matches!(
            store.project_data(&project.id),
            Err(GanttError::ProjectNotFound(_))
        ));
    }

    #[test]
    fn mutations_survive_reopen() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("gantt_data.json");

        let project_id = {
            let mut store = GanttStore::open(&path);
            let project = store.create_project("Launch", "ada").unwrap();
            add_dated_task(&mut store, &project.id, "Design", "2024-01-01", 3);
            project.id
        };

        let reopened = GanttStore::open(&path);
        assert_eq!(reopened.project_count(), 1);
        assert_eq!(reopened.task_count(), 1);
        let tasks = reopened.project_tasks(&project_id).unwrap();
        assert_eq!(tasks[0].name, "Design");
        assert_eq!(tasks[0].duration_days, 3);
    }
}
