use crate::chart;
use crate::error::Result;
use crate::layout;
use crate::models::{NewTask, TaskUpdate};
use crate::store::GanttStore;
use crate::tools;
use std::path::Path;
use tracing::warn;

/// Handle the create-project command
pub fn handle_create_project(data_file: &Path, name: &str, owner: &str) -> Result<()> {
    let mut store = GanttStore::open(data_file);
    let created = store.create_project(name, owner)?;

    println!("Created project {}: {}", created.id, created.name);
    println!("  Owner: {}", created.owner);

    Ok(())
}

/// Handle the projects command
pub fn handle_projects(data_file: &Path) -> Result<()> {
    let store = GanttStore::open(data_file);
    let projects = store.list_projects();

    if projects.is_empty() {
        println!("No projects found.");
        return Ok(());
    }

    for p in projects {
        println!(
            "{}  {}  owner={}  tasks={}",
            p.id, p.name, p.owner, p.task_count
        );
    }

    Ok(())
}

/// Handle the add-task command
#[allow(clippy::too_many_arguments)]
pub fn handle_add_task(
    data_file: &Path,
    project_id: &str,
    name: &str,
    desc: Option<&str>,
    start: Option<&str>,
    duration: i64,
    end: Option<&str>,
    owner: &str,
) -> Result<()> {
    let mut store = GanttStore::open(data_file);
    let task = store.add_task(
        project_id,
        NewTask {
            name: name.to_string(),
            description: desc.unwrap_or_default().to_string(),
            owner: owner.to_string(),
            start_date: start.map(str::to_string),
            duration_days: duration,
            end_date: end.map(str::to_string),
        },
    )?;

    println!("Created task {}: {}", task.id, task.name);
    println!(
        "  {} to {} ({} days)",
        task.start_date, task.end_date, task.duration_days
    );

    Ok(())
}

/// Handle the tasks command
pub fn handle_tasks(data_file: &Path, project_id: &str) -> Result<()> {
    let store = GanttStore::open(data_file);
    let tasks = store.project_tasks(project_id)?;

    if tasks.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }

    for task in tasks {
        println!(
            "{}  {}  {} to {}  {}d  {}%",
            task.id, task.name, task.start_date, task.end_date, task.duration_days, task.progress
        );
    }

    Ok(())
}

/// Handle the show command
pub fn handle_show(data_file: &Path, project_id: &str, task_id: &str) -> Result<()> {
    let store = GanttStore::open(data_file);
    let detail = store.task_details(project_id, task_id)?;
    let task = &detail.task;

    println!("[{}] {}", task.id, task.name);
    if !task.description.is_empty() {
        println!("Description:  {}", task.description);
    }
    println!("Owner:        {}", task.owner);
    println!("Start:        {}", task.start_date);
    println!("End:          {}", task.end_date);
    println!("Duration:     {} days", task.duration_days);
    println!("Progress:     {}%", task.progress);

    if !task.dependencies.is_empty() {
        println!("Depends on:   {}", task.dependencies.join(", "));
    }

    println!(
        "Project:      {} ({})",
        detail.project.name, detail.project.id
    );
    println!("Created:      {}", task.created_at.format("%Y-%m-%d %H:%M"));
    if let Some(updated) = task.updated_at {
        println!("Updated:      {}", updated.format("%Y-%m-%d %H:%M"));
    }

    Ok(())
}

/// Handle the update command
#[allow(clippy::too_many_arguments)]
pub fn handle_update(
    data_file: &Path,
    project_id: &str,
    task_id: &str,
    name: Option<&str>,
    desc: Option<&str>,
    owner: Option<&str>,
    start: Option<&str>,
    duration: Option<i64>,
    end: Option<&str>,
    progress: Option<i64>,
) -> Result<()> {
    let mut store = GanttStore::open(data_file);
    let task = store.update_task(
        project_id,
        task_id,
        TaskUpdate {
            name: name.map(str::to_string),
            description: desc.map(str::to_string),
            owner: owner.map(str::to_string),
            start_date: start.map(str::to_string),
            duration_days: duration,
            end_date: end.map(str::to_string),
            progress,
        },
    )?;

    println!("Updated task {}: {}", task.id, task.name);
    println!(
        "  {} to {} ({} days), {}% done",
        task.start_date, task.end_date, task.duration_days, task.progress
    );

    Ok(())
}

/// Handle the delete-task command
pub fn handle_delete_task(data_file: &Path, project_id: &str, task_id: &str) -> Result<()> {
    let mut store = GanttStore::open(data_file);
    let deleted = store.delete_task(project_id, task_id)?;

    println!("Deleted task {}: {}", deleted.id, deleted.name);

    Ok(())
}

/// Handle the delete-project command
pub fn handle_delete_project(data_file: &Path, project_id: &str) -> Result<()> {
    let mut store = GanttStore::open(data_file);
    let deleted = store.delete_project(project_id)?;

    println!(
        "Deleted project {}: {} ({} tasks)",
        deleted.id, deleted.name, deleted.task_count
    );

    Ok(())
}

/// Handle the depend command
pub fn handle_depend(data_file: &Path, project_id: &str, task_id: &str, on_id: &str) -> Result<()> {
    let mut store = GanttStore::open(data_file);
    let change = store.add_dependency(project_id, task_id, on_id)?;

    println!(
        "'{}' now depends on '{}'",
        change.task_name, change.depends_on_name
    );

    Ok(())
}

/// Handle the undepend command
pub fn handle_undepend(
    data_file: &Path,
    project_id: &str,
    task_id: &str,
    on_id: &str,
) -> Result<()> {
    let mut store = GanttStore::open(data_file);
    let change = store.remove_dependency(project_id, task_id, on_id)?;

    println!(
        "'{}' no longer depends on '{}'",
        change.task_name, change.depends_on_name
    );

    Ok(())
}

/// Handle the chart command
pub fn handle_chart(
    data_file: &Path,
    charts_dir: &Path,
    project_id: &str,
    open: bool,
    inline: bool,
    max_width: u32,
) -> Result<()> {
    let store = GanttStore::open(data_file);
    let project = store.project_data(project_id)?;
    let layout = layout::compute_layout(project.tasks.values());

    if inline {
        println!("{}", chart::render_inline(project_id, &project, &layout, max_width));
        return Ok(());
    }

    let html = chart::render_page(project_id, &project, &layout);
    let chart_file = chart::write_chart(charts_dir, project_id, &html)?;

    println!("Chart written: {}", chart_file.path.display());
    println!("Open: {}", chart_file.url);

    if open {
        if let Err(e) = webbrowser::open(&chart_file.url) {
            warn!(error = %e, "failed to open browser");
            println!("Could not open a browser; use the link above.");
        }
    }

    Ok(())
}

/// Handle the info command
pub fn handle_info(data_file: &Path) -> Result<()> {
    let store = GanttStore::open(data_file);
    println!("{}", tools::storage_info(&store));
    Ok(())
}
