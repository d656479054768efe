use crate::models::{NewTask, TaskUpdate};
use crate::store::GanttStore;
use crate::tools;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt, handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters, model::*, schemars, tool, tool_handler, tool_router,
    transport::stdio,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Gantt chart MCP server
#[derive(Clone)]
pub struct GanttMcp {
    store: Arc<Mutex<GanttStore>>,
    charts_dir: PathBuf,
    tool_router: ToolRouter<Self>,
}

// Input types for tools
#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CreateProjectInput {
    pub project_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_owner: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ProjectIdInput {
    pub project_id: String,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct TaskRefInput {
    pub project_id: String,
    pub task_id: String,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct AddTaskInput {
    pub project_id: String,
    pub task_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Start date in YYYY-MM-DD format; defaults to today
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Duration in days; ignored when end_date is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<i64>,
    /// End date in YYYY-MM-DD format, inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_owner: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct UpdateTaskInput {
    pub project_id: String,
    pub task_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Cannot be combined with end_date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<i64>,
    /// Cannot be combined with duration_days
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_owner: Option<String>,
    /// Progress percentage, 0-100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct DependencyInput {
    pub project_id: String,
    pub task_id: String,
    pub depends_on: String,
}

fn text_result(text: String) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

#[tool_router]
impl GanttMcp {
    pub fn new(data_file: PathBuf, charts_dir: PathBuf) -> Self {
        Self {
            store: Arc::new(Mutex::new(GanttStore::open(data_file))),
            charts_dir,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Create a new Gantt chart project.")]
    async fn create_gantt_project(
        &self,
        params: Parameters<CreateProjectInput>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        let mut store = self.store.lock().await;
        text_result(tools::create_gantt_project(
            &mut store,
            &p.project_name,
            p.project_owner.as_deref().unwrap_or("None"),
        ))
    }

    #[tool(description = "List all existing Gantt chart projects.")]
    async fn list_gantt_projects(&self) -> Result<CallToolResult, McpError> {
        let store = self.store.lock().await;
        text_result(tools::list_gantt_projects(&store))
    }

    #[tool(
        description = "Add a task to an existing Gantt chart project. Provide either end_date or duration_days; the other is derived."
    )]
    async fn add_task(
        &self,
        params: Parameters<AddTaskInput>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        let mut store = self.store.lock().await;
        text_result(tools::add_task(
            &mut store,
            &p.project_id,
            NewTask {
                name: p.task_name,
                description: p.description.unwrap_or_default(),
                owner: p.task_owner.unwrap_or_else(|| "None".to_string()),
                start_date: p.start_date,
                duration_days: p.duration_days.unwrap_or(1),
                end_date: p.end_date,
            },
        ))
    }

    #[tool(description = "List all tasks in a Gantt chart project, sorted by start date.")]
    async fn list_tasks(
        &self,
        params: Parameters<ProjectIdInput>,
    ) -> Result<CallToolResult, McpError> {
        let store = self.store.lock().await;
        text_result(tools::list_tasks(&store, &params.0.project_id))
    }

    #[tool(description = "Get detailed information about a specific task.")]
    async fn get_task_details(
        &self,
        params: Parameters<TaskRefInput>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        let store = self.store.lock().await;
        text_result(tools::get_task_details(&store, &p.project_id, &p.task_id))
    }

    #[tool(
        description = "Update an existing task. Only the fields you provide change; end_date and duration_days are mutually exclusive."
    )]
    async fn update_task(
        &self,
        params: Parameters<UpdateTaskInput>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        let mut store = self.store.lock().await;
        text_result(tools::update_task(
            &mut store,
            &p.project_id,
            &p.task_id,
            TaskUpdate {
                name: p.task_name,
                description: p.description,
                owner: p.task_owner,
                start_date: p.start_date,
                duration_days: p.duration_days,
                end_date: p.end_date,
                progress: p.progress,
            },
        ))
    }

    #[tool(
        description = "Delete a task from a project. Fails while other tasks still depend on it."
    )]
    async fn delete_task(
        &self,
        params: Parameters<TaskRefInput>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        let mut store = self.store.lock().await;
        text_result(tools::delete_task(&mut store, &p.project_id, &p.task_id))
    }

    #[tool(description = "Delete a Gantt chart project and all its tasks.")]
    async fn delete_project(
        &self,
        params: Parameters<ProjectIdInput>,
    ) -> Result<CallToolResult, McpError> {
        let mut store = self.store.lock().await;
        text_result(tools::delete_project(&mut store, &params.0.project_id))
    }

    #[tool(
        description = "Make one task depend on another in the same project. The prerequisite cannot be deleted while the dependency exists."
    )]
    async fn add_task_dependency(
        &self,
        params: Parameters<DependencyInput>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        let mut store = self.store.lock().await;
        text_result(tools::add_task_dependency(
            &mut store,
            &p.project_id,
            &p.task_id,
            &p.depends_on,
        ))
    }

    #[tool(description = "Remove a dependency between two tasks.")]
    async fn remove_task_dependency(
        &self,
        params: Parameters<DependencyInput>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        let mut store = self.store.lock().await;
        text_result(tools::remove_task_dependency(
            &mut store,
            &p.project_id,
            &p.task_id,
            &p.depends_on,
        ))
    }

    #[tool(
        description = "Generate a Gantt chart for a project, open it in the default browser if possible, and return the file link."
    )]
    async fn view_gantt_chart(
        &self,
        params: Parameters<ProjectIdInput>,
    ) -> Result<CallToolResult, McpError> {
        let store = self.store.lock().await;
        text_result(tools::view_gantt_chart(
            &store,
            &params.0.project_id,
            &self.charts_dir,
            true,
        ))
    }
}

#[tool_handler]
impl ServerHandler for GanttMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "GanttChart - project and task management with timeline rendering. \
                 Create a project with create_gantt_project, add tasks with add_task \
                 (dates as YYYY-MM-DD, durations inclusive of both endpoints), link \
                 tasks with add_task_dependency, then call view_gantt_chart to render \
                 the timeline to an HTML file."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Serve the tool surface over stdio until the client disconnects.
pub async fn run_mcp_server(data_file: PathBuf, charts_dir: PathBuf) -> anyhow::Result<()> {
    let mcp = GanttMcp::new(data_file, charts_dir);

    let service = mcp.serve(stdio()).await.inspect_err(|e| {
        eprintln!("Error starting MCP server: {e}");
    })?;

    service.waiting().await?;
    Ok(())
}
