//! Chart layout engine.
//!
//! Converts task date ranges into normalized horizontal positions: a shared
//! date window plus per-task offset/width percentages of that window. Pure
//! computation, no side effects.

use crate::models::Task;
use chrono::{Duration, Local, NaiveDate};

/// The date window and per-task bar geometry for one chart.
#[derive(Debug, Clone)]
pub struct ChartLayout {
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub total_days: i64,
    pub bars: Vec<TaskBar>,
}

/// One task bar, positioned as percentages of the window.
///
/// Percentages are independent per task and deliberately unclamped; each bar
/// is an overlay on the shared window, not a slice of a stacked total.
#[derive(Debug, Clone)]
pub struct TaskBar {
    pub id: String,
    pub name: String,
    pub start_pct: f64,
    pub width_pct: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub progress: u8,
    pub owner: String,
}

impl ChartLayout {
    /// Iterate the days of the window, inclusive on both ends.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let start = self.window_start;
        (0..self.total_days).map(move |offset| start + Duration::days(offset))
    }
}

/// Compute the layout for a set of tasks.
///
/// The window spans `[min start - 1 day, max end + 1 day]` so no bar touches
/// an edge; with no tasks it defaults to one week from today.
pub fn compute_layout<'a, I>(tasks: I) -> ChartLayout
where
    I: IntoIterator<Item = &'a Task>,
{
    let tasks: Vec<&Task> = tasks.into_iter().collect();

    let (window_start, window_end) = match (
        tasks.iter().map(|t| t.start_date).min(),
        tasks.iter().map(|t| t.end_date).max(),
    ) {
        (Some(min), Some(max)) => (min - Duration::days(1), max + Duration::days(1)),
        _ => {
            let today = Local::now().date_naive();
            (today, today + Duration::days(7))
        }
    };

    let total_days = (window_end - window_start).num_days() + 1;

    let bars = tasks
        .into_iter()
        .map(|task| {
            let start_pct =
                (task.start_date - window_start).num_days() as f64 / total_days as f64 * 100.0;
            let span_days = (task.end_date - task.start_date).num_days() + 1;
            let width_pct = span_days as f64 / total_days as f64 * 100.0;
            TaskBar {
                id: task.id.clone(),
                name: task.name.clone(),
                start_pct,
                width_pct,
                start_date: task.start_date,
                end_date: task.end_date,
                progress: task.progress,
                owner: task.owner.clone(),
            }
        })
        .collect();

    ChartLayout {
        window_start,
        window_end,
        total_days,
        bars,
    }
}
