use thiserror::Error;

/// All possible errors in the Gantt store
#[derive(Error, Debug)]
pub enum GanttError {
    #[error("Project name cannot be empty")]
    EmptyProjectName,

    #[error("Task name cannot be empty")]
    EmptyTaskName,

    #[error("Project with ID '{0}' does not exist")]
    ProjectNotFound(String),

    #[error("Task with ID '{task_id}' does not exist in project '{project_id}'")]
    TaskNotFound {
        project_id: String,
        task_id: String,
    },

    #[error("Invalid {field} format: '{value}'. Use YYYY-MM-DD format.")]
    InvalidDate { field: &'static str, value: String },

    #[error("Duration days must be a positive integer")]
    NonPositiveDuration,

    #[error("Duration days is too large to schedule")]
    DurationTooLong,

    #[error("End date must be after start date")]
    EndBeforeStart,

    #[error("Cannot specify both end_date and duration_days - please provide only one")]
    ConflictingDateParams,

    #[error("Progress must be an integer between 0 and 100")]
    ProgressOutOfRange(i64),

    #[error("A task cannot depend on itself")]
    SelfDependency,

    #[error("Task '{task_id}' already depends on '{depends_on}'")]
    DependencyExists {
        task_id: String,
        depends_on: String,
    },

    #[error("Task '{task_id}' does not depend on '{depends_on}'")]
    DependencyMissing {
        task_id: String,
        depends_on: String,
    },

    #[error("Cannot delete task '{name}' because it is depended on by: {dependents}", dependents = format_names(dependents))]
    HasDependents {
        name: String,
        dependents: Vec<String>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GanttError {
    /// Errors that do not describe caller mistakes. The tool boundary reports
    /// these with the generic unexpected-error text instead of `Error: ...`.
    pub fn is_internal(&self) -> bool {
        matches!(self, GanttError::Io(_) | GanttError::Json(_))
    }
}

fn format_names(names: &[String]) -> String {
    names.join(", ")
}

/// Result type alias
pub type Result<T> = std::result::Result<T, GanttError>;
