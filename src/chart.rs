//! HTML rendering for Gantt charts.
//!
//! Consumes [`ChartLayout`] percentages and produces either a self-contained
//! page or a compact inline fragment, plus the timestamped chart file the
//! view tool hands back as a `file://` link.

use crate::error::Result;
use crate::layout::ChartLayout;
use crate::models::Project;
use chrono::Local;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A chart written to disk.
#[derive(Debug, Clone)]
pub struct ChartFile {
    pub path: PathBuf,
    pub url: String,
}

/// Render the full-page chart document.
pub fn render_page(project_id: &str, project: &Project, layout: &ChartLayout) -> String {
    let mut html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{name} - Gantt Chart</title>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 20px; background-color: #f5f5f5; }}
        h1, h2 {{ color: #333; }}
        .project-info {{ margin-bottom: 20px; padding: 15px; background-color: #fff; border-radius: 5px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }}
        .gantt-container {{ overflow-x: auto; margin-top: 20px; background-color: #fff; border-radius: 5px; padding: 15px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }}
        .timeline {{ display: flex; border-bottom: 1px solid #ddd; margin-bottom: 10px; padding-bottom: 5px; }}
        .day {{ flex: 1; text-align: center; font-size: 12px; min-width: 30px; color: #666; }}
        .task-row {{ display: flex; margin-bottom: 15px; align-items: center; }}
        .task-label {{ width: 150px; overflow: hidden; text-overflow: ellipsis; white-space: nowrap; font-weight: bold; color: #333; }}
        .task-timeline {{ flex-grow: 1; position: relative; height: 30px; border-radius: 4px; background-color: #f0f0f0; }}
        .task-bar {{ position: absolute; height: 100%; background-color: #4caf50; border-radius: 4px; display: flex; align-items: center; justify-content: center; color: white; font-size: 12px; cursor: pointer; }}
        .task-bar:hover {{ background-color: #3e8e41; }}
        .task-progress {{ position: absolute; height: 100%; background-color: rgba(0,0,0,0.1); bottom: 0; }}
        .tooltip {{ display: none; position: absolute; bottom: 105%; left: 50%; transform: translateX(-50%); background: rgba(0,0,0,0.7); color: #fff; padding: 10px; border-radius: 4px; z-index: 1000; font-size: 12px; min-width: 200px; pointer-events: none; }}
        .task-bar:hover .tooltip {{ display: block; }}
        .no-tasks {{ color: #666; font-style: italic; padding: 20px; text-align: center; }}
    </style>
</head>
<body>
    <div class="project-info">
        <h1>{name} - Gantt Chart</h1>
        <p><strong>Project ID:</strong> {project_id}</p>
        <p><strong>Owner:</strong> {owner}</p>
        <p><strong>Created:</strong> {created}</p>
        <p><strong>Tasks:</strong> {task_count}</p>
    </div>

    <div class="gantt-container">
        <h2>Tasks Timeline</h2>
        <div class="gantt-chart">
            <div class="timeline">
"#,
        name = project.name,
        project_id = project_id,
        owner = project.owner,
        created = project.created_at.format("%Y-%m-%d %H:%M"),
        task_count = project.tasks.len(),
    );

    for day in layout.days() {
        let _ = writeln!(
            html,
            r#"                <div class="day">{}</div>"#,
            day.format("%m-%d")
        );
    }
    html.push_str("            </div>\n");

    if layout.bars.is_empty() {
        html.push_str(
            r#"            <div class="no-tasks">No tasks added to this project yet.</div>
"#,
        );
    } else {
        for bar in &layout.bars {
            let _ = write!(
                html,
                r#"            <div class="task-row">
                <div class="task-label" title="{name}">{name}</div>
                <div class="task-timeline">
                    <div class="task-bar" style="left: {start:.4}%; width: {width:.4}%;">
                        {name}
                        <div class="tooltip">
                            <p><strong>Task:</strong> {name}</p>
                            <p><strong>Owner:</strong> {owner}</p>
                            <p><strong>Start:</strong> {start_date}</p>
                            <p><strong>End:</strong> {end_date}</p>
                            <p><strong>Progress:</strong> {progress}%</p>
                        </div>
                        <div class="task-progress" style="width: {progress}%;"></div>
                    </div>
                </div>
            </div>
"#,
                name = bar.name,
                owner = bar.owner,
                start = bar.start_pct,
                width = bar.width_pct,
                start_date = bar.start_date,
                end_date = bar.end_date,
                progress = bar.progress,
            );
        }
    }

    html.push_str(
        r#"        </div>
    </div>
</body>
</html>"#,
    );
    html
}

/// Render the compact inline variant for embedding in chat interfaces.
pub fn render_inline(
    project_id: &str,
    project: &Project,
    layout: &ChartLayout,
    max_width: u32,
) -> String {
    let mut html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: {max_width}px; margin: 0 auto; background-color: #fff; border-radius: 8px; padding: 10px;">
    <div style="margin-bottom: 15px; padding-bottom: 10px; border-bottom: 1px solid #eee;">
        <h3 style="margin: 0; color: #333; font-size: 16px;">{name} - Gantt Chart</h3>
        <div style="font-size: 12px; color: #666;">
            <span>Project ID: {project_id} | </span>
            <span>Owner: {owner} | </span>
            <span>Tasks: {task_count}</span>
        </div>
    </div>
    <div style="overflow-x: auto;">
        <div style="display: flex; border-bottom: 1px solid #ddd; margin-bottom: 8px; padding-bottom: 4px;">
"#,
        max_width = max_width,
        name = project.name,
        project_id = project_id,
        owner = project.owner,
        task_count = project.tasks.len(),
    );

    for day in layout.days() {
        let _ = writeln!(
            html,
            r#"            <div style="flex: 1; text-align: center; font-size: 10px; min-width: 24px; color: #888;">{}</div>"#,
            day.format("%m-%d")
        );
    }
    html.push_str("        </div>\n");

    if layout.bars.is_empty() {
        html.push_str(
            r#"        <div style="color: #666; font-style: italic; padding: 10px; text-align: center; font-size: 12px;">No tasks added to this project yet.</div>
"#,
        );
    } else {
        for bar in &layout.bars {
            let _ = write!(
                html,
                r#"        <div style="display: flex; margin-bottom: 10px; align-items: center;">
            <div style="width: 120px; overflow: hidden; text-overflow: ellipsis; white-space: nowrap; font-weight: bold; font-size: 12px; color: #333;" title="{name}">{name}</div>
            <div style="flex-grow: 1; position: relative; height: 20px;">
                <div style="position: absolute; left: {start:.4}%; width: {width:.4}%; height: 100%; border-radius: 3px; background-color: #4caf50; font-size: 10px; color: white; display: flex; align-items: center; justify-content: center; overflow: hidden; white-space: nowrap;">{name}</div>
            </div>
        </div>
"#,
                name = bar.name,
                start = bar.start_pct,
                width = bar.width_pct,
            );
        }
    }

    let _ = write!(
        html,
        r#"    </div>
    <div style="text-align: right; font-size: 10px; color: #999; margin-top: 5px;">Generated: {}</div>
</div>"#,
        Local::now().format("%Y-%m-%d %H:%M")
    );
    html
}

/// Write a rendered chart into `dir` under a name unique per project and
/// generation time, returning the absolute path and its `file://` URL.
pub fn write_chart(dir: &Path, project_id: &str, html: &str) -> Result<ChartFile> {
    fs::create_dir_all(dir)?;

    let timestamp = Local::now().format("%Y%m%d%H%M%S");
    let path = dir.join(format!("gantt_{project_id}_{timestamp}.html"));
    fs::write(&path, html)?;

    let abs = fs::canonicalize(&path)?;
    let url = format!("file://{}", abs.display());
    debug!(path = %abs.display(), "chart written");

    Ok(ChartFile { path: abs, url })
}
