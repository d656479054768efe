//! Tool surface: the remote-callable operations, each returning
//! human-readable text.
//!
//! Store errors come back as `Error: ...` strings; internal failures (IO,
//! serialization) as a generic unexpected-error string. Transports never see
//! typed errors, only text.

use crate::chart;
use crate::error::GanttError;
use crate::layout;
use crate::models::{NewTask, TaskUpdate};
use crate::store::GanttStore;
use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::path::Path;
use tracing::warn;

fn error_text(e: GanttError) -> String {
    if e.is_internal() {
        format!("An unexpected error occurred: {e}")
    } else {
        format!("Error: {e}")
    }
}

pub fn create_gantt_project(store: &mut GanttStore, name: &str, owner: &str) -> String {
    match store.create_project(name, owner) {
        Ok(p) => format!(
            "Project created successfully!\n\
             Project ID: {}\n\
             Project Name: {}\n\
             Project Owner: {}",
            p.id, p.name, p.owner
        ),
        Err(e) => error_text(e),
    }
}

pub fn list_gantt_projects(store: &GanttStore) -> String {
    let projects = store.list_projects();
    if projects.is_empty() {
        return "No projects exist. Please create a project first.".to_string();
    }

    let mut out = "Existing projects:\n\n".to_string();
    for (i, p) in projects.iter().enumerate() {
        let _ = write!(
            out,
            "{}. ID: {}\n   Name: {}\n   Owner: {}\n   Task count: {}\n\n",
            i + 1,
            p.id,
            p.name,
            p.owner,
            p.task_count
        );
    }
    out
}

pub fn add_task(store: &mut GanttStore, project_id: &str, new: NewTask) -> String {
    match store.add_task(project_id, new) {
        Ok(task) => format!(
            "Task added successfully!\n\
             Project ID: {project_id}\n\
             Task ID: {}\n\
             Task Name: {}\n\
             Task Owner: {}\n\
             Start Date: {}\n\
             End Date: {}\n\
             Duration: {} days",
            task.id, task.name, task.owner, task.start_date, task.end_date, task.duration_days
        ),
        Err(e) => error_text(e),
    }
}

pub fn list_tasks(store: &GanttStore, project_id: &str) -> String {
    let tasks = match store.project_tasks(project_id) {
        Ok(tasks) => tasks,
        Err(e) => return error_text(e),
    };
    if tasks.is_empty() {
        return format!("No tasks found in project with ID '{project_id}'.");
    }

    let mut out = format!("Tasks in project '{project_id}':\n\n");
    for (i, task) in tasks.iter().enumerate() {
        let _ = write!(
            out,
            "{}. ID: {}\n   Name: {}\n   Owner: {}\n   Duration: {} days\n   Date: {} to {}\n   Progress: {}%\n\n",
            i + 1,
            task.id,
            task.name,
            task.owner,
            task.duration_days,
            task.start_date,
            task.end_date,
            task.progress
        );
    }
    out
}

pub fn get_task_details(store: &GanttStore, project_id: &str, task_id: &str) -> String {
    let detail = match store.task_details(project_id, task_id) {
        Ok(detail) => detail,
        Err(e) => return error_text(e),
    };
    let task = &detail.task;

    let mut out = format!("Details for task '{}' (ID: {task_id}):\n\n", task.name);
    out.push_str("Basic Information:\n");
    let _ = writeln!(out, "- Name: {}", task.name);
    let _ = writeln!(
        out,
        "- Description: {}",
        if task.description.is_empty() {
            "None"
        } else {
            &task.description
        }
    );
    let _ = writeln!(out, "- Owner: {}", task.owner);

    out.push_str("\nTime Information:\n");
    let _ = writeln!(out, "- Start Date: {}", task.start_date);
    let _ = writeln!(out, "- End Date: {}", task.end_date);
    let _ = writeln!(out, "- Duration: {} days", task.duration_days);

    out.push_str("\nStatus Information:\n");
    let _ = writeln!(out, "- Progress: {}%", task.progress);

    if !task.dependencies.is_empty() {
        out.push_str("\nDependencies:\n");
        for dep in &task.dependencies {
            let _ = writeln!(out, "- Depends on: {dep}");
        }
    }

    out.push_str("\nProject Context:\n");
    let _ = writeln!(out, "- Project ID: {}", detail.project.id);
    let _ = writeln!(out, "- Project Name: {}", detail.project.name);
    let _ = writeln!(out, "- Project Owner: {}", detail.project.owner);

    let _ = write!(out, "\nCreated At: {}\n", task.created_at);
    out
}

pub fn update_task(
    store: &mut GanttStore,
    project_id: &str,
    task_id: &str,
    update: TaskUpdate,
) -> String {
    match store.update_task(project_id, task_id, update) {
        Ok(task) => format!(
            "Task updated successfully!\n\
             Project ID: {project_id}\n\
             Task ID: {}\n\
             Task Name: {}\n\
             Description: {}\n\
             Owner: {}\n\
             Start Date: {}\n\
             End Date: {}\n\
             Duration: {} days\n\
             Progress: {}%",
            task.id,
            task.name,
            task.description,
            task.owner,
            task.start_date,
            task.end_date,
            task.duration_days,
            task.progress
        ),
        Err(e) => error_text(e),
    }
}

pub fn delete_task(store: &mut GanttStore, project_id: &str, task_id: &str) -> String {
    match store.delete_task(project_id, task_id) {
        Ok(deleted) => format!(
            "Task deleted successfully!\n\
             Project ID: {project_id}\n\
             Task ID: {}\n\
             Task Name: {}",
            deleted.id, deleted.name
        ),
        Err(e) => error_text(e),
    }
}

pub fn delete_project(store: &mut GanttStore, project_id: &str) -> String {
    match store.delete_project(project_id) {
        Ok(deleted) => format!(
            "Project deleted successfully!\n\
             Project ID: {}\n\
             Project Name: {}\n\
             Tasks deleted: {}",
            deleted.id, deleted.name, deleted.task_count
        ),
        Err(e) => error_text(e),
    }
}

pub fn add_task_dependency(
    store: &mut GanttStore,
    project_id: &str,
    task_id: &str,
    depends_on: &str,
) -> String {
    match store.add_dependency(project_id, task_id, depends_on) {
        Ok(change) => format!(
            "Dependency added: '{}' now depends on '{}'.",
            change.task_name, change.depends_on_name
        ),
        Err(e) => error_text(e),
    }
}

pub fn remove_task_dependency(
    store: &mut GanttStore,
    project_id: &str,
    task_id: &str,
    depends_on: &str,
) -> String {
    match store.remove_dependency(project_id, task_id, depends_on) {
        Ok(change) => format!(
            "Dependency removed: '{}' no longer depends on '{}'.",
            change.task_name, change.depends_on_name
        ),
        Err(e) => error_text(e),
    }
}

/// Generate the full-page chart, write it under `charts_dir`, and optionally
/// try to open it in the default browser. Browser failure only changes the
/// wording of the reply.
pub fn view_gantt_chart(
    store: &GanttStore,
    project_id: &str,
    charts_dir: &Path,
    open_browser: bool,
) -> String {
    let project = match store.project_data(project_id) {
        Ok(project) => project,
        Err(e) => return error_text(e),
    };

    let layout = layout::compute_layout(project.tasks.values());
    let html = chart::render_page(project_id, &project, &layout);
    let chart_file = match chart::write_chart(charts_dir, project_id, &html) {
        Ok(chart_file) => chart_file,
        Err(e) => return error_text(e),
    };

    let opened = open_browser
        && webbrowser::open(&chart_file.url)
            .map_err(|e| warn!(error = %e, "failed to open browser"))
            .is_ok();

    if opened {
        format!(
            "Gantt chart for '{}' generated and opened in browser!\n\n\
             If the chart didn't open automatically, you can access it at:\n{}\n\n\
             Project ID: {project_id}\n\
             Tasks: {}",
            project.name,
            chart_file.url,
            project.tasks.len()
        )
    } else {
        format!(
            "Gantt chart for '{}' generated successfully!\n\n\
             Please open this link in your browser to view the chart:\n{}\n\n\
             Project ID: {project_id}\n\
             Tasks: {}\n\
             Local file: {}",
            project.name,
            chart_file.url,
            project.tasks.len(),
            chart_file.path.display()
        )
    }
}

/// Compact chart markup for clients that can render HTML inline.
pub fn inline_gantt_chart(store: &GanttStore, project_id: &str, max_width: u32) -> String {
    let project = match store.project_data(project_id) {
        Ok(project) => project,
        Err(e) => return error_text(e),
    };
    let layout = layout::compute_layout(project.tasks.values());
    chart::render_inline(project_id, &project, &layout, max_width)
}

/// Summary of the persistent snapshot backing the store.
pub fn storage_info(store: &GanttStore) -> String {
    let path = store.data_file();
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(_) => {
            return format!(
                "No storage file found at {}. Data will be created when a project is added.",
                path.display()
            );
        }
    };

    let size_kb = metadata.len() as f64 / 1024.0;
    let modified = metadata
        .modified()
        .map(|t| DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!(
        "Storage Information:\n\n\
         Storage file: {}\n\
         File size: {size_kb:.2} KB\n\
         Last modified: {modified}\n\n\
         Stored projects: {}\n\
         Total tasks: {}",
        path.display(),
        store.project_count(),
        store.task_count()
    )
}
