//! gantt-mcp - Gantt chart project and task management.
//!
//! An in-memory project/task store persisted as a JSON snapshot, a pure
//! layout engine that normalizes task date ranges into chart percentages,
//! and a tool surface exposed both as a CLI and as an MCP stdio server.

pub mod chart;
pub mod cli;
pub mod cli_handlers;
pub mod error;
pub mod layout;
pub mod mcp;
pub mod models;
pub mod storage;
pub mod store;
pub mod tools;

pub use error::{GanttError, Result};
pub use models::*;
