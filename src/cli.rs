use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gantt-mcp")]
#[command(about = "Gantt chart project and task manager")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Path to the JSON snapshot file
    #[arg(
        long,
        env = "GANTT_DATA_FILE",
        default_value = "gantt_data.json",
        global = true
    )]
    pub data_file: PathBuf,

    /// Directory for generated chart files
    #[arg(long, env = "GANTT_CHARTS_DIR", default_value = "charts", global = true)]
    pub charts_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new project
    CreateProject {
        /// Project name
        name: String,
        /// Project owner
        #[arg(long, default_value = "None")]
        owner: String,
    },

    /// List all projects
    Projects,

    /// Add a task to a project
    AddTask {
        /// Project ID
        project_id: String,
        /// Task name
        name: String,
        /// Task description
        #[arg(long)]
        desc: Option<String>,
        /// Start date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        start: Option<String>,
        /// Duration in days (ignored when --end is given)
        #[arg(long, default_value_t = 1)]
        duration: i64,
        /// End date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        end: Option<String>,
        /// Task owner
        #[arg(long, default_value = "None")]
        owner: String,
    },

    /// List tasks in a project, sorted by start date
    Tasks {
        /// Project ID
        project_id: String,
    },

    /// Show task details
    Show {
        /// Project ID
        project_id: String,
        /// Task ID
        task_id: String,
    },

    /// Update a task; only the given fields change
    Update {
        /// Project ID
        project_id: String,
        /// Task ID
        task_id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New description
        #[arg(long)]
        desc: Option<String>,
        /// New owner
        #[arg(long)]
        owner: Option<String>,
        /// New start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// New duration in days (cannot be combined with --end)
        #[arg(long)]
        duration: Option<i64>,
        /// New end date (cannot be combined with --duration)
        #[arg(long)]
        end: Option<String>,
        /// Progress percentage (0-100)
        #[arg(long)]
        progress: Option<i64>,
    },

    /// Delete a task
    DeleteTask {
        /// Project ID
        project_id: String,
        /// Task ID
        task_id: String,
    },

    /// Delete a project and all its tasks
    DeleteProject {
        /// Project ID
        project_id: String,
    },

    /// Add a dependency between two tasks
    Depend {
        /// Project ID
        project_id: String,
        /// Task ID (the dependent)
        task_id: String,
        /// Task ID it depends on (the prerequisite)
        on_id: String,
    },

    /// Remove a dependency
    Undepend {
        /// Project ID
        project_id: String,
        /// Task ID
        task_id: String,
        /// Task ID to remove the dependency on
        on_id: String,
    },

    /// Render the Gantt chart for a project
    Chart {
        /// Project ID
        project_id: String,
        /// Open the chart in the default browser
        #[arg(long)]
        open: bool,
        /// Print the compact inline markup to stdout instead of writing a file
        #[arg(long)]
        inline: bool,
        /// Maximum width of the inline chart in pixels
        #[arg(long, default_value_t = 600)]
        max_width: u32,
    },

    /// Show storage information
    Info,

    /// Start the MCP server on stdio
    Mcp,
}
